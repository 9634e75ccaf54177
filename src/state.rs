use crate::color::SiteColors;
use crate::data::aggregate::{PieChart, ScatterChart, site_success_breakdown, success_payload_scatter};
use crate::data::model::{LaunchDataset, PayloadRange, SiteSelection};

// ---------------------------------------------------------------------------
// Payload slider extrema
// ---------------------------------------------------------------------------

/// Extrema and step of the payload slider.  Decided once at load time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderBounds {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl SliderBounds {
    /// `[floor(min payload), ceil(max payload)]` of the loaded dataset.
    pub fn from_dataset(dataset: &LaunchDataset, step: f64) -> Self {
        let (min, max) = dataset.payload_bounds();
        Self {
            min: min.floor(),
            max: max.ceil(),
            step,
        }
    }
}

// ---------------------------------------------------------------------------
// Control events
// ---------------------------------------------------------------------------

/// A change reported by one of the controls.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlEvent {
    SiteSelected(SiteSelection),
    PayloadRangeChanged(PayloadRange),
    /// Put the payload range back to the observed `[min, max]`.
    ResetPayloadRange,
}

/// Output region replaced by a dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartRegion {
    SuccessPie,
    PayloadScatter,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// Chart descriptors are only ever replaced by [`AppState::dispatch`], never
/// edited in place.
pub struct AppState {
    /// Loaded at startup, read-only afterwards.
    pub dataset: LaunchDataset,

    pub slider: SliderBounds,

    /// Current control values.
    pub site: SiteSelection,
    pub payload: PayloadRange,

    /// Current chart descriptors.
    pub pie: PieChart,
    pub scatter: ScatterChart,

    pub site_colors: SiteColors,

    /// Type-to-filter text of the site selector.
    pub site_search: String,
}

impl AppState {
    pub fn new(dataset: LaunchDataset, slider: SliderBounds) -> Self {
        let site = SiteSelection::default();
        let (low, high) = dataset.payload_bounds();
        let payload = PayloadRange::new(low, high);
        let pie = site_success_breakdown(&dataset, &site);
        let scatter = success_payload_scatter(&dataset, &site, &payload);
        let site_colors = SiteColors::new(dataset.sites());

        Self {
            dataset,
            slider,
            site,
            payload,
            pie,
            scatter,
            site_colors,
            site_search: String::new(),
        }
    }

    /// Range the slider starts at: the observed payload extremes.
    pub fn default_payload_range(&self) -> PayloadRange {
        let (low, high) = self.dataset.payload_bounds();
        PayloadRange::new(low, high)
    }

    /// Selector entries: the sentinel followed by every observed site.
    pub fn site_options(&self) -> Vec<SiteSelection> {
        std::iter::once(SiteSelection::AllSites)
            .chain(self.dataset.sites().iter().cloned().map(SiteSelection::Site))
            .collect()
    }

    /// Apply a control change and recompute the charts that depend on it.
    ///
    /// The site drives both charts; the payload range only drives the scatter.
    pub fn dispatch(&mut self, event: ControlEvent) -> Vec<ChartRegion> {
        let updated = match event {
            ControlEvent::SiteSelected(site) => {
                self.site = site;
                self.pie = site_success_breakdown(&self.dataset, &self.site);
                self.scatter = success_payload_scatter(&self.dataset, &self.site, &self.payload);
                vec![ChartRegion::SuccessPie, ChartRegion::PayloadScatter]
            }
            ControlEvent::PayloadRangeChanged(range) => {
                self.payload = range;
                self.scatter = success_payload_scatter(&self.dataset, &self.site, &self.payload);
                vec![ChartRegion::PayloadScatter]
            }
            ControlEvent::ResetPayloadRange => {
                let range = self.default_payload_range();
                return self.dispatch(ControlEvent::PayloadRangeChanged(range));
            }
        };

        log::debug!(
            "site={} payload={} -> {} pie segments, {} scatter points",
            self.site,
            self.payload,
            self.pie.segments.len(),
            self.scatter.points.len()
        );
        updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{LaunchRecord, Outcome};

    fn state() -> AppState {
        let dataset = LaunchDataset::from_records(vec![
            LaunchRecord::new("CCAFS", 500.0, Outcome::Success),
            LaunchRecord::new("CCAFS", 2000.0, Outcome::Failure),
            LaunchRecord::new("KSC", 3000.0, Outcome::Success),
        ])
        .unwrap();
        let slider = SliderBounds::from_dataset(&dataset, 1000.0);
        AppState::new(dataset, slider)
    }

    #[test]
    fn starts_unfiltered_over_the_observed_range() {
        let st = state();
        assert_eq!(st.site, SiteSelection::AllSites);
        assert_eq!(st.payload, PayloadRange::new(500.0, 3000.0));
        assert_eq!(st.pie.segments.len(), 2);
        assert_eq!(st.scatter.points.len(), 3);
    }

    #[test]
    fn selector_lists_sentinel_then_sites() {
        let labels: Vec<String> = state()
            .site_options()
            .iter()
            .map(|s| s.label().to_string())
            .collect();
        assert_eq!(labels, ["All Sites", "CCAFS", "KSC"]);
    }

    #[test]
    fn site_change_refreshes_both_charts() {
        let mut st = state();
        let regions = st.dispatch(ControlEvent::SiteSelected(SiteSelection::Site("KSC".to_string())));
        assert_eq!(regions, [ChartRegion::SuccessPie, ChartRegion::PayloadScatter]);
        assert_eq!(st.pie.title, "Total Success Launches for site KSC");
        assert_eq!(st.scatter.points.len(), 1);
    }

    #[test]
    fn range_change_refreshes_only_the_scatter() {
        let mut st = state();
        let pie_before = st.pie.clone();
        let regions = st.dispatch(ControlEvent::PayloadRangeChanged(PayloadRange::new(0.0, 2500.0)));
        assert_eq!(regions, [ChartRegion::PayloadScatter]);
        assert_eq!(st.pie, pie_before);
        assert_eq!(st.scatter.points.len(), 2);
    }

    #[test]
    fn range_survives_a_site_change() {
        let mut st = state();
        st.dispatch(ControlEvent::PayloadRangeChanged(PayloadRange::new(1000.0, 2500.0)));
        st.dispatch(ControlEvent::SiteSelected(SiteSelection::Site("CCAFS".to_string())));
        assert_eq!(st.scatter.points.len(), 1);
        assert_eq!(st.scatter.points[0].outcome, Outcome::Failure);
    }

    #[test]
    fn reset_restores_the_observed_range() {
        let mut st = state();
        st.dispatch(ControlEvent::PayloadRangeChanged(PayloadRange::new(0.0, 0.0)));
        assert!(st.scatter.points.is_empty());
        let regions = st.dispatch(ControlEvent::ResetPayloadRange);
        assert_eq!(regions, [ChartRegion::PayloadScatter]);
        assert_eq!(st.payload, PayloadRange::new(500.0, 3000.0));
        assert_eq!(st.scatter.points.len(), 3);
    }

    #[test]
    fn same_event_twice_gives_same_charts() {
        let mut st = state();
        let event = ControlEvent::SiteSelected(SiteSelection::Site("CCAFS".to_string()));
        st.dispatch(event.clone());
        let (pie, scatter) = (st.pie.clone(), st.scatter.clone());
        st.dispatch(event);
        assert_eq!(st.pie, pie);
        assert_eq!(st.scatter, scatter);
    }

    #[test]
    fn unrecognised_site_behaves_like_all_sites() {
        let mut st = state();
        let all_pie = st.pie.clone();
        st.dispatch(ControlEvent::SiteSelected(SiteSelection::Site("Boca Chica".to_string())));
        assert_eq!(st.pie, all_pie);
        assert_eq!(st.scatter.points.len(), 3);
    }
}

use super::model::{LaunchDataset, Outcome, PayloadRange, SiteSelection};

// ---------------------------------------------------------------------------
// Chart descriptors
// ---------------------------------------------------------------------------

/// What a pie segment stands for; the renderer picks its colour from this.
#[derive(Debug, Clone, PartialEq)]
pub enum SegmentKey {
    Site(String),
    Outcome(Outcome),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieSegment {
    pub key: SegmentKey,
    pub label: String,
    /// Success rate (all-sites view) or record count (single-site view).
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PieChart {
    pub title: String,
    pub segments: Vec<PieSegment>,
}

impl PieChart {
    pub fn total(&self) -> f64 {
        self.segments.iter().map(|s| s.value).sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub payload_mass_kg: f64,
    pub launch_site: String,
    pub outcome: Outcome,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScatterChart {
    pub points: Vec<ScatterPoint>,
}

// ---------------------------------------------------------------------------
// Aggregations
// ---------------------------------------------------------------------------

/// Pie chart for the site selector.
///
/// * no site filter → one segment per site, sized by its mean outcome
///   (the success rate), in first-appearance order
/// * a known site → failure/success counts for that site; a class with no
///   launches gets no segment at all
pub fn site_success_breakdown(dataset: &LaunchDataset, selection: &SiteSelection) -> PieChart {
    match dataset.resolve_site(selection) {
        Some(site) => {
            let mut counts = [0usize; 2];
            for rec in dataset.records().iter().filter(|r| r.launch_site == site) {
                counts[rec.outcome.class() as usize] += 1;
            }

            let segments = [Outcome::Failure, Outcome::Success]
                .into_iter()
                .zip(counts)
                .filter(|(_, n)| *n > 0)
                .map(|(outcome, n)| PieSegment {
                    key: SegmentKey::Outcome(outcome),
                    label: outcome.to_string(),
                    value: n as f64,
                })
                .collect();

            PieChart {
                title: format!("Total Success Launches for site {site}"),
                segments,
            }
        }
        None => {
            let segments = dataset
                .sites()
                .iter()
                .map(|site| {
                    let (launches, successes) = dataset
                        .records()
                        .iter()
                        .filter(|r| &r.launch_site == site)
                        .fold((0usize, 0usize), |(n, s), r| {
                            (n + 1, s + r.outcome.class() as usize)
                        });
                    PieSegment {
                        key: SegmentKey::Site(site.clone()),
                        label: site.clone(),
                        value: successes as f64 / launches as f64,
                    }
                })
                .collect();

            PieChart {
                title: "Success launches by all sites".to_string(),
                segments,
            }
        }
    }
}

/// Scatter of payload against site for the launches passing both filters.
///
/// A direct projection: one point per surviving record, dataset order.
pub fn success_payload_scatter(
    dataset: &LaunchDataset,
    selection: &SiteSelection,
    range: &PayloadRange,
) -> ScatterChart {
    let site = dataset.resolve_site(selection);
    let points = dataset
        .records()
        .iter()
        .filter(|r| site.map_or(true, |s| r.launch_site == s))
        .filter(|r| range.contains(r.payload_mass_kg))
        .map(|r| ScatterPoint {
            payload_mass_kg: r.payload_mass_kg,
            launch_site: r.launch_site.clone(),
            outcome: r.outcome,
        })
        .collect();

    ScatterChart { points }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::LaunchRecord;

    fn small() -> LaunchDataset {
        LaunchDataset::from_records(vec![
            LaunchRecord::new("CCAFS", 500.0, Outcome::Success),
            LaunchRecord::new("CCAFS", 2000.0, Outcome::Failure),
            LaunchRecord::new("KSC", 3000.0, Outcome::Success),
        ])
        .unwrap()
    }

    fn larger() -> LaunchDataset {
        let sites = ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"];
        let records = (0..40)
            .map(|i| {
                let outcome = if i % 3 == 0 { Outcome::Failure } else { Outcome::Success };
                LaunchRecord::new(sites[i % 4], (i * 250) as f64, outcome)
            })
            .collect();
        LaunchDataset::from_records(records).unwrap()
    }

    fn site(name: &str) -> SiteSelection {
        SiteSelection::Site(name.to_string())
    }

    fn as_pairs(chart: &PieChart) -> Vec<(String, f64)> {
        chart
            .segments
            .iter()
            .map(|s| (s.label.clone(), s.value))
            .collect()
    }

    #[test]
    fn all_sites_breakdown_is_success_rate_per_site() {
        let chart = site_success_breakdown(&small(), &SiteSelection::AllSites);
        assert_eq!(
            as_pairs(&chart),
            vec![("CCAFS".to_string(), 0.5), ("KSC".to_string(), 1.0)]
        );
        assert_eq!(chart.title, "Success launches by all sites");
    }

    #[test]
    fn single_site_breakdown_counts_each_class() {
        let chart = site_success_breakdown(&small(), &site("CCAFS"));
        assert_eq!(
            chart.segments,
            vec![
                PieSegment {
                    key: SegmentKey::Outcome(Outcome::Failure),
                    label: "0".to_string(),
                    value: 1.0,
                },
                PieSegment {
                    key: SegmentKey::Outcome(Outcome::Success),
                    label: "1".to_string(),
                    value: 1.0,
                },
            ]
        );
        assert_eq!(chart.title, "Total Success Launches for site CCAFS");
    }

    #[test]
    fn absent_class_has_no_segment() {
        let chart = site_success_breakdown(&small(), &site("KSC"));
        assert_eq!(chart.segments.len(), 1);
        assert_eq!(chart.segments[0].key, SegmentKey::Outcome(Outcome::Success));
    }

    #[test]
    fn site_with_only_failures_still_gets_a_rate_segment() {
        let ds = LaunchDataset::from_records(vec![
            LaunchRecord::new("A", 1.0, Outcome::Failure),
            LaunchRecord::new("B", 1.0, Outcome::Success),
        ])
        .unwrap();
        let chart = site_success_breakdown(&ds, &SiteSelection::AllSites);
        assert_eq!(
            as_pairs(&chart),
            vec![("A".to_string(), 0.0), ("B".to_string(), 1.0)]
        );
    }

    #[test]
    fn single_site_counts_sum_to_site_records() {
        let ds = larger();
        for name in ds.sites() {
            let chart = site_success_breakdown(&ds, &site(name));
            let expected = ds.records().iter().filter(|r| &r.launch_site == name).count();
            assert_eq!(chart.total(), expected as f64, "site {name}");
        }
    }

    #[test]
    fn all_sites_has_one_segment_per_site() {
        let ds = larger();
        let chart = site_success_breakdown(&ds, &SiteSelection::AllSites);
        let labels: Vec<&str> = chart.segments.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, ds.sites());
        assert!(chart.segments.iter().all(|s| (0.0..=1.0).contains(&s.value)));
    }

    #[test]
    fn unknown_site_falls_back_to_all_sites() {
        let ds = small();
        let all = site_success_breakdown(&ds, &SiteSelection::AllSites);
        assert_eq!(site_success_breakdown(&ds, &site("Boca Chica")), all);

        let range = PayloadRange::new(0.0, 10_000.0);
        assert_eq!(
            success_payload_scatter(&ds, &site("Boca Chica"), &range),
            success_payload_scatter(&ds, &SiteSelection::AllSites, &range)
        );
    }

    #[test]
    fn scatter_filters_by_range_inclusively() {
        let chart =
            success_payload_scatter(&small(), &SiteSelection::AllSites, &PayloadRange::new(0.0, 2500.0));
        let points: Vec<(f64, &str, Outcome)> = chart
            .points
            .iter()
            .map(|p| (p.payload_mass_kg, p.launch_site.as_str(), p.outcome))
            .collect();
        assert_eq!(
            points,
            vec![
                (500.0, "CCAFS", Outcome::Success),
                (2000.0, "CCAFS", Outcome::Failure)
            ]
        );

        let edges =
            success_payload_scatter(&small(), &SiteSelection::AllSites, &PayloadRange::new(500.0, 2000.0));
        assert_eq!(edges.points.len(), 2);
    }

    #[test]
    fn scatter_filters_by_site() {
        let chart = success_payload_scatter(&small(), &site("KSC"), &PayloadRange::new(0.0, 10_000.0));
        assert_eq!(
            chart.points,
            vec![ScatterPoint {
                payload_mass_kg: 3000.0,
                launch_site: "KSC".to_string(),
                outcome: Outcome::Success,
            }]
        );
    }

    #[test]
    fn inverted_or_disjoint_range_is_empty_not_error() {
        let ds = small();
        let inverted = success_payload_scatter(&ds, &SiteSelection::AllSites, &PayloadRange::new(3000.0, 0.0));
        assert!(inverted.points.is_empty());
        let beyond = success_payload_scatter(&ds, &site("KSC"), &PayloadRange::new(5000.0, 9000.0));
        assert_eq!(beyond, ScatterChart::default());
    }

    #[test]
    fn every_point_satisfies_both_predicates() {
        let ds = larger();
        let range = PayloadRange::new(1000.0, 6000.0);
        for name in ds.sites() {
            let chart = success_payload_scatter(&ds, &site(name), &range);
            assert!(!chart.points.is_empty());
            for p in &chart.points {
                assert!(range.contains(p.payload_mass_kg));
                assert_eq!(&p.launch_site, name);
            }
        }
    }

    #[test]
    fn narrowing_the_range_never_adds_points() {
        let ds = larger();
        let selections = [SiteSelection::AllSites, site("KSC LC-39A")];
        for sel in &selections {
            let mut previous = usize::MAX;
            for step in 0..10 {
                let shrink = step as f64 * 500.0;
                let range = PayloadRange::new(shrink, 10_000.0 - shrink);
                let n = success_payload_scatter(&ds, sel, &range).points.len();
                assert!(n <= previous, "{sel} {range}: {n} > {previous}");
                previous = n;
            }
        }
    }

    #[test]
    fn repeated_calls_are_identical() {
        let ds = larger();
        let sel = site("VAFB SLC-4E");
        let range = PayloadRange::new(0.0, 5000.0);
        assert_eq!(site_success_breakdown(&ds, &sel), site_success_breakdown(&ds, &sel));
        assert_eq!(
            success_payload_scatter(&ds, &sel, &range),
            success_payload_scatter(&ds, &sel, &range)
        );
    }
}

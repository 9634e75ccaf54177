use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::model::{PayloadRange, SiteSelection};
use crate::state::{AppState, ControlEvent};

// ---------------------------------------------------------------------------
// Left side panel – controls
// ---------------------------------------------------------------------------

/// Render the control panel and dispatch whatever the user changed.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let mut events = Vec::new();

    ui.strong("Launch site");
    site_selector(ui, state, &mut events);

    ui.add_space(12.0);
    ui.strong("Payload range (Kg):");
    payload_sliders(ui, state, &mut events);

    for event in events {
        state.dispatch(event);
    }
}

fn site_selector(ui: &mut Ui, state: &mut AppState, events: &mut Vec<ControlEvent>) {
    ui.add(
        egui::TextEdit::singleline(&mut state.site_search)
            .hint_text("Select Launch Site")
            .desired_width(f32::INFINITY),
    );

    let needle = state.site_search.to_lowercase();
    let current = state.site.clone();

    egui::ComboBox::from_id_salt("site_dropdown")
        .selected_text(current.label())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for option in state.site_options() {
                let matches = matches!(option, SiteSelection::AllSites)
                    || option.label().to_lowercase().contains(&needle);
                if !matches {
                    continue;
                }
                // Colour swatch for the site, same colour as its pie segment.
                let mut text = RichText::new(option.label());
                if let SiteSelection::Site(name) = &option {
                    text = text.color(state.site_colors.color_for(name));
                }
                let selected = option == current;
                if ui.selectable_label(selected, text).clicked() && !selected {
                    events.push(ControlEvent::SiteSelected(option));
                }
            }
        });
}

fn payload_sliders(ui: &mut Ui, state: &AppState, events: &mut Vec<ControlEvent>) {
    let bounds = state.slider;
    let mut low = state.payload.low;
    let mut high = state.payload.high;

    let low_changed = user_changed(&ui.add(
        egui::Slider::new(&mut low, bounds.min..=bounds.max)
            .step_by(bounds.step)
            .text("min"),
    ));
    let high_changed = user_changed(&ui.add(
        egui::Slider::new(&mut high, bounds.min..=bounds.max)
            .step_by(bounds.step)
            .text("max"),
    ));

    // The slider snaps unsnapped values (the observed payload extremes) to its
    // step while merely drawing them; only act on what the user moved.
    let shown = if low_changed || high_changed {
        let mut range = PayloadRange::new(
            if low_changed { low } else { state.payload.low },
            if high_changed { high } else { state.payload.high },
        );
        // Dragging one handle past the other pushes the other one along.
        if range.low > range.high {
            if low_changed {
                range.high = range.low;
            } else {
                range.low = range.high;
            }
        }
        events.push(ControlEvent::PayloadRangeChanged(range));
        range
    } else {
        state.payload
    };

    ui.horizontal(|ui: &mut Ui| {
        ui.label(format!("{:.0} – {:.0} kg", shown.low, shown.high));
        if ui.small_button("Reset").clicked() {
            events.push(ControlEvent::ResetPayloadRange);
        }
    });
}

/// A value change that came from a pointer or keyboard on this slider.
fn user_changed(response: &egui::Response) -> bool {
    response.changed()
        && (response.dragged()
            || response.drag_stopped()
            || response.clicked()
            || response.has_focus()
            || response.is_pointer_button_down_on())
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the title bar with record counts.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(
            RichText::new("SpaceX Launch Records Dashboard")
                .size(28.0)
                .color(Color32::from_rgb(0x50, 0x3D, 0x36)),
        );
    });
    ui.horizontal(|ui: &mut Ui| {
        ui.label(format!(
            "{} launches from {} sites, {} shown in the scatter",
            state.dataset.len(),
            state.dataset.sites().len(),
            state.scatter.points.len()
        ));
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{LaunchDataset, LaunchRecord, Outcome};
    use crate::state::SliderBounds;

    fn state() -> AppState {
        let dataset = LaunchDataset::from_records(vec![
            LaunchRecord::new("CCAFS", 362.5, Outcome::Success),
            LaunchRecord::new("CCAFS", 5000.0, Outcome::Failure),
            LaunchRecord::new("KSC", 9600.2, Outcome::Success),
        ])
        .unwrap();
        let slider = SliderBounds::from_dataset(&dataset, 1000.0);
        AppState::new(dataset, slider)
    }

    fn idle_frame(ctx: &egui::Context, state: &mut AppState) {
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| side_panel(ui, state));
        });
    }

    #[test]
    fn idle_frames_keep_the_observed_payload_range() {
        let ctx = egui::Context::default();
        let mut st = state();

        idle_frame(&ctx, &mut st);
        idle_frame(&ctx, &mut st);

        assert_eq!(st.payload, PayloadRange::new(362.5, 9600.2));
        assert_eq!(st.scatter.points.len(), 3);
    }

    #[test]
    fn idle_frames_keep_a_chosen_site() {
        let ctx = egui::Context::default();
        let mut st = state();
        st.dispatch(ControlEvent::SiteSelected(SiteSelection::Site("KSC".to_string())));

        idle_frame(&ctx, &mut st);

        assert_eq!(st.site, SiteSelection::Site("KSC".to_string()));
        assert_eq!(st.scatter.points.len(), 1);
        assert_eq!(st.payload, PayloadRange::new(362.5, 9600.2));
    }
}

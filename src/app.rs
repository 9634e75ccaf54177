use eframe::egui;

use crate::state::AppState;
use crate::ui::{charts, panels};

/// Share of the central panel given to the pie chart.
const PIE_HEIGHT_FRACTION: f32 = 0.42;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LaunchDashApp {
    pub state: AppState,
}

impl LaunchDashApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for LaunchDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title and counts ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        // ---- Left side panel: site and payload controls ----
        egui::SidePanel::left("filter_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: pie above scatter ----
        egui::CentralPanel::default().show(ctx, |ui| {
            let pie_height = (ui.available_height() * PIE_HEIGHT_FRACTION).max(160.0);
            charts::success_pie(ui, &self.state.pie, &self.state.site_colors, pie_height);
            ui.separator();
            charts::payload_scatter(ui, &self.state.scatter, self.state.dataset.sites());
        });
    }
}

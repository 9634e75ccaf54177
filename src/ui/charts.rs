use std::f32::consts::{FRAC_PI_2, TAU};
use std::ops::RangeInclusive;

use eframe::egui::{self, Align2, Color32, FontId, Pos2, RichText, Sense, Shape, Stroke, Ui, Vec2};
use egui_plot::{GridMark, Legend, MarkerShape, Plot, PlotPoints, Points};

use crate::color::{SiteColors, outcome_color};
use crate::data::aggregate::{PieChart, ScatterChart};
use crate::data::model::Outcome;

/// Radians per triangle when tessellating a slice.
const ARC_STEP: f32 = 0.05;

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

/// Draw the success pie with a legend on its right.
pub fn success_pie(ui: &mut Ui, chart: &PieChart, colors: &SiteColors, height: f32) {
    ui.label(RichText::new(&chart.title).size(16.0).strong());

    let total = chart.total();
    if chart.segments.is_empty() || total <= 0.0 {
        ui.allocate_ui(Vec2::new(ui.available_width(), height), |ui: &mut Ui| {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.label("No successful launches to show");
            });
        });
        return;
    }

    ui.horizontal(|ui: &mut Ui| {
        let size = Vec2::splat(height);
        let (rect, response) = ui.allocate_exact_size(size, Sense::hover());
        let painter = ui.painter_at(rect);
        let center = rect.center();
        let radius = height * 0.45;

        // Slices run clockwise from twelve o'clock.
        let mut start = -FRAC_PI_2;
        let mut slices = Vec::with_capacity(chart.segments.len());
        for seg in &chart.segments {
            let sweep = (seg.value / total) as f32 * TAU;
            let fill = colors.segment_color(&seg.key);
            fill_slice(&painter, center, radius, start, sweep, fill);
            slices.push((start, sweep));
            start += sweep;
        }

        // Percent labels on top of the fills.
        for (seg, (start, sweep)) in chart.segments.iter().zip(&slices) {
            let share = seg.value / total;
            if share < 0.03 {
                continue;
            }
            let mid = start + sweep / 2.0;
            let pos = center + Vec2::angled(mid) * radius * 0.65;
            painter.text(
                pos,
                Align2::CENTER_CENTER,
                format!("{:.1}%", share * 100.0),
                FontId::proportional(13.0),
                Color32::WHITE,
            );
        }

        if let Some(pointer) = response.hover_pos() {
            let offset = pointer - center;
            if offset.length() <= radius {
                let angle = (offset.angle() + FRAC_PI_2).rem_euclid(TAU) - FRAC_PI_2;
                let hovered = slices
                    .iter()
                    .position(|(s, w)| angle >= *s && angle < s + w);
                if let Some(seg) = hovered.and_then(|i| chart.segments.get(i)) {
                    let share = seg.value / total * 100.0;
                    response.on_hover_ui_at_pointer(|ui: &mut Ui| {
                        ui.label(format!("{}: {} ({share:.1}%)", seg.label, seg.value));
                    });
                }
            }
        }

        ui.vertical(|ui: &mut Ui| {
            for seg in &chart.segments {
                ui.horizontal(|ui: &mut Ui| {
                    let (swatch, _) = ui.allocate_exact_size(Vec2::splat(12.0), Sense::hover());
                    ui.painter()
                        .rect_filled(swatch, 2.0, colors.segment_color(&seg.key));
                    ui.label(&seg.label);
                });
            }
        });
    });
}

fn fill_slice(painter: &egui::Painter, center: Pos2, radius: f32, start: f32, sweep: f32, fill: Color32) {
    if sweep <= 0.0 {
        return;
    }
    let steps = (sweep / ARC_STEP).ceil().max(1.0) as usize;
    let mut prev = center + Vec2::angled(start) * radius;
    for i in 1..=steps {
        let angle = start + sweep * i as f32 / steps as f32;
        let next = center + Vec2::angled(angle) * radius;
        painter.add(Shape::convex_polygon(vec![center, prev, next], fill, Stroke::NONE));
        prev = next;
    }
}

// ---------------------------------------------------------------------------
// Scatter chart
// ---------------------------------------------------------------------------

/// Payload (x) against launch site (y), one marker per launch, coloured by class.
pub fn payload_scatter(ui: &mut Ui, chart: &ScatterChart, sites: &[String]) {
    ui.label(RichText::new("Correlation between Payload and Success").size(16.0).strong());

    let site_row = |name: &str| sites.iter().position(|s| s == name).unwrap_or(0) as f64;
    let site_names = sites.to_vec();

    Plot::new("success_payload_scatter")
        .legend(Legend::default())
        .x_axis_label("Payload Mass (kg)")
        .y_axis_label("Launch Site")
        .y_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            let row = mark.value.round();
            if (mark.value - row).abs() > f64::EPSILON || row < 0.0 {
                return String::new();
            }
            site_names.get(row as usize).cloned().unwrap_or_default()
        })
        .include_y(-0.5)
        .include_y(sites.len() as f64 - 0.5)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for outcome in [Outcome::Failure, Outcome::Success] {
                let series: PlotPoints = chart
                    .points
                    .iter()
                    .filter(|p| p.outcome == outcome)
                    .map(|p| [p.payload_mass_kg, site_row(&p.launch_site)])
                    .collect();

                plot_ui.points(
                    Points::new(series)
                        .name(format!("class {outcome}"))
                        .color(outcome_color(outcome))
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(4.0),
                );
            }
        });
}

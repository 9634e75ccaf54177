use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::aggregate::SegmentKey;
use crate::data::model::Outcome;

pub const FAILURE_COLOR: Color32 = Color32::from_rgb(214, 39, 40);
pub const SUCCESS_COLOR: Color32 = Color32::from_rgb(31, 119, 180);

/// Fixed outcome colours: failures red, successes blue.
pub fn outcome_color(outcome: Outcome) -> Color32 {
    match outcome {
        Outcome::Failure => FAILURE_COLOR,
        Outcome::Success => SUCCESS_COLOR,
    }
}

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Site colours
// ---------------------------------------------------------------------------

/// Stable colour per launch site, assigned once from the site list at load.
#[derive(Debug, Clone)]
pub struct SiteColors {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl SiteColors {
    pub fn new(sites: &[String]) -> Self {
        let mapping = sites
            .iter()
            .cloned()
            .zip(generate_palette(sites.len()))
            .collect();

        SiteColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, site: &str) -> Color32 {
        self.mapping
            .get(site)
            .copied()
            .unwrap_or(self.default_color)
    }

    /// Colour of a pie segment, whichever kind of key it carries.
    pub fn segment_color(&self, key: &SegmentKey) -> Color32 {
        match key {
            SegmentKey::Site(site) => self.color_for(site),
            SegmentKey::Outcome(outcome) => outcome_color(*outcome),
        }
    }
}

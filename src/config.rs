use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;

use crate::data::model::{ALL_SITES, LaunchDataset};
use crate::state::SliderBounds;

/// Command line configuration.
#[derive(Debug, Parser)]
#[command(name = "launch-dash")]
#[command(about = "SpaceX launch records dashboard")]
pub struct Cli {
    /// Launch records file (.csv, .json or .parquet).
    #[arg(default_value = "spacex_launch_dash.csv")]
    pub data: PathBuf,

    /// Site selected when the window opens.
    #[arg(long, default_value = ALL_SITES)]
    pub site: String,

    /// Lower end of the payload slider in kg (default: floor of the smallest payload).
    #[arg(long)]
    pub slider_min: Option<f64>,

    /// Upper end of the payload slider in kg (default: ceiling of the largest payload).
    #[arg(long)]
    pub slider_max: Option<f64>,

    /// Payload slider step in kg.
    #[arg(long, default_value_t = 1000.0)]
    pub slider_step: f64,

    /// Print the site list and per-site success rates, then exit.
    #[arg(long, default_value_t = false)]
    pub summary: bool,
}

impl Cli {
    /// Slider extrema, fixed for the lifetime of the process.
    pub fn slider_bounds(&self, dataset: &LaunchDataset) -> Result<SliderBounds> {
        if !(self.slider_step.is_finite() && self.slider_step > 0.0) {
            bail!("--slider-step must be a positive number, got {}", self.slider_step);
        }

        let observed = SliderBounds::from_dataset(dataset, self.slider_step);
        let bounds = SliderBounds {
            min: self.slider_min.unwrap_or(observed.min),
            max: self.slider_max.unwrap_or(observed.max),
            step: self.slider_step,
        };
        if bounds.min > bounds.max {
            bail!(
                "payload slider minimum {} exceeds maximum {}",
                bounds.min,
                bounds.max
            );
        }
        Ok(bounds)
    }
}

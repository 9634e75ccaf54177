mod app;
mod color;
mod config;
mod data;
mod state;
mod summary;
mod ui;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use eframe::egui;

use app::LaunchDashApp;
use config::Cli;
use data::aggregate::site_success_breakdown;
use data::model::{ALL_SITES, SiteSelection};
use state::{AppState, ControlEvent};

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    // Nothing is served until the dataset has loaded cleanly.
    let dataset = data::loader::load_file(&cli.data)
        .with_context(|| format!("loading launch records from {}", cli.data.display()))
        .inspect_err(|e| log::error!("{e:#}"))?;

    log::info!(
        "Loaded {} launches from {:?} across sites {:?}",
        dataset.len(),
        cli.data,
        dataset.sites()
    );
    for seg in site_success_breakdown(&dataset, &SiteSelection::AllSites).segments {
        log::info!("success rate {}: {:.3}", seg.label, seg.value);
    }

    if cli.summary {
        let stdout = std::io::stdout();
        summary::write_summary(&mut stdout.lock(), &dataset).context("writing summary")?;
        return Ok(());
    }

    let slider = cli.slider_bounds(&dataset)?;
    let mut state = AppState::new(dataset, slider);
    let initial = state.dataset.selection_for(&cli.site);
    if initial == SiteSelection::AllSites && cli.site != ALL_SITES {
        log::warn!("unknown site {:?}, showing all sites", cli.site);
    }
    state.dispatch(ControlEvent::SiteSelected(initial));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "SpaceX Launch Records Dashboard",
        options,
        Box::new(|cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::light());
            Ok(Box::new(LaunchDashApp::new(state)))
        }),
    )
    .map_err(|e| anyhow!("running dashboard window: {e}"))
}

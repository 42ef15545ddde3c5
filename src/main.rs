mod app;
mod color;
mod config;
mod data;
mod error;
mod signals;
mod state;
mod ui;

use anyhow::Context;
use clap::Parser;
use eframe::egui;

use app::DashboardApp;
use config::{Cli, DashboardConfig};
use state::AppState;

fn main() -> anyhow::Result<()> {
    let config = DashboardConfig::from(Cli::parse());
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.default_log_filter()),
    )
    .init();

    // The dashboard has no partial-load mode: a bad table stops startup.
    let dataset = match data::loader::load_file(&config.data_path)
        .with_context(|| format!("loading {}", config.data_path.display()))
    {
        Ok(dataset) => dataset,
        Err(e) => {
            log::error!("Failed to load dataset: {e:#}");
            return Err(e);
        }
    };
    let state = AppState::new(dataset, &config.fallback_geography);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size),
        ..Default::default()
    };

    let debug = config.debug;
    eframe::run_native(
        "GDP Crossfilter",
        options,
        Box::new(move |_cc| Ok(Box::new(DashboardApp::new(state, debug)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {e}"))
}

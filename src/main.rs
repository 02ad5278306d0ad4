//! Brew Explorer - Beverage Nutrition EDA Dashboard
//!
//! A Rust application for exploring the Starbucks beverage nutrition dataset:
//! a welcome page, a dataset overview and interactive filtered charts.

mod charts;
mod config;
mod data;
mod gui;
mod stats;

use anyhow::Context;
use clap::Parser;
use config::AppConfig;
use eframe::egui;
use gui::ExplorerApp;
use std::path::PathBuf;

/// Command line options
#[derive(Parser, Debug)]
#[command(name = "brew_explorer", version, about = "☕ Starbucks nutrition EDA dashboard")]
struct Args {
    /// CSV dataset to explore
    #[arg(long)]
    data: Option<PathBuf>,

    /// Logo image shown on the home page
    #[arg(long)]
    logo: Option<PathBuf>,

    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = AppConfig::load_or_default(args.config.as_deref())
        .context("Failed to load configuration")?
        .with_overrides(args.data, args.logo);
    log::info!("Dataset: {}", config.data_path.display());

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([900.0, 600.0])
            .with_title("Starbucks EDA App"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Starbucks EDA App",
        options,
        Box::new(move |cc| Ok(Box::new(ExplorerApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {e}"))
}

//! ERP Dashboard - desktop business administration with tabular CRUD screens.

use std::path::PathBuf;

use anyhow::anyhow;
use clap::Parser;
use eframe::egui;
use erp_dashboard as app;

use app::config::{AppConfig, ConfigLoadResult};
use app::ui::App;

/// Desktop business administration dashboard.
#[derive(Parser)]
#[command(name = "erp-dashboard")]
struct Cli {
    /// Use config.toml from current directory (dev mode)
    #[arg(long)]
    dev: bool,

    /// Path to a config file
    #[arg(long, value_name = "PATH", conflicts_with = "dev")]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Determine config path based on mode
    let config_path = match (cli.config, cli.dev) {
        (Some(path), _) => path,
        (None, true) => PathBuf::from("config.toml"),
        (None, false) => AppConfig::default_path(),
    };

    let (config, load_note) = match AppConfig::try_load(&config_path) {
        ConfigLoadResult::Loaded(config) => (config, None),
        ConfigLoadResult::Missing => {
            let config = AppConfig::default();
            let note = match config.save(&config_path) {
                Ok(()) => format!("Config missing, wrote defaults to {}", config_path.display()),
                Err(e) => format!("Config missing and defaults could not be written: {e}"),
            };
            (config, Some(note))
        }
        ConfigLoadResult::Invalid(e) => (AppConfig::default(), Some(format!("Config invalid, using defaults: {e}"))),
    };

    // Initialize logging
    let _log_guard = app::logging::init(&config.logging);

    tracing::info!("ERP Dashboard starting...");
    tracing::info!("Config path: {:?}", config_path);
    if let Some(note) = load_note {
        tracing::warn!("{}", note);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("ERP Dashboard")
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([900.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "ERP Dashboard",
        options,
        Box::new(|cc| Ok(Box::new(App::new(cc, config, config_path)))),
    )
    .map_err(|e| anyhow!("Failed to run application: {e}"))?;

    tracing::info!("ERP Dashboard stopped");
    Ok(())
}

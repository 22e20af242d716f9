#![forbid(unsafe_code)]

mod color;
mod config;
mod constants;
mod controller;
mod crosshair;
mod event;
mod gui;
mod hotkeys;
mod placement;
mod tray;
mod visibility;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, Level as TraceLevel};
use tracing_subscriber::FmtSubscriber;

use config::SettingsDocument;
use gui::LaunchOptions;

/// Always-on-top crosshair overlay with a settings window
#[derive(Debug, Parser)]
#[command(name = "crossglobal", version, about)]
struct Cli {
    /// Settings file (default: <config dir>/crossglobal/settings.json)
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,

    /// Log level: trace, debug, info, warn, error (overrides LOG_LEVEL)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Do not listen for the global Alt+X hotkey on /dev/input
    #[arg(long)]
    no_hotkeys: bool,

    /// Start hidden in the tray
    #[arg(long)]
    minimized: bool,
}

fn parse_log_level(level: &str) -> TraceLevel {
    match level.to_lowercase().as_str() {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = cli
        .log_level
        .clone()
        .or_else(|| std::env::var("LOG_LEVEL").ok())
        .map(|level| parse_log_level(&level))
        .unwrap_or(TraceLevel::INFO);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let settings_path = cli.settings.unwrap_or_else(SettingsDocument::default_path);
    info!(settings = %settings_path.display(), "Starting CrossGlobal");

    gui::run_gui(LaunchOptions {
        settings_path,
        global_hotkeys: !cli.no_hotkeys,
        start_minimized: cli.minimized,
    })
}

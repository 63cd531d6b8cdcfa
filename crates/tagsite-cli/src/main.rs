//! tagsite - terminal admin dashboard for the tag table and game catalogues

mod tui;

use std::fs::OpenOptions;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tagsite_core::config::{Overrides, API_URL_ENV};
use tagsite_core::{paths, Config};

#[derive(Parser, Debug)]
#[command(name = "tagsite", version, about = "Tag table and game catalogue admin")]
struct Args {
    /// Base URL of the catalogue API
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Config file to read instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Initial platform for every platform selector
    #[arg(long, value_name = "CODE")]
    platform: Option<String>,

    /// Per-request timeout; omitted means the transport default
    #[arg(long, value_name = "SECS")]
    timeout_secs: Option<u64>,
}

/// Log to a file; the terminal belongs to the TUI
fn init_logging() -> Result<()> {
    let dir = paths::log_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(paths::log_file())
        .context("Failed to open log file")?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("tagsite=info,tagsite_core=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(true)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if !std::io::stdout().is_terminal() {
        eprintln!("tagsite requires an interactive terminal.");
        return Ok(());
    }

    init_logging()?;

    let mut config = Config::load(args.config.as_deref())?;
    config.apply_overrides(Overrides {
        api_url: args.api_url,
        platform: args.platform,
        timeout_secs: args.timeout_secs,
    });
    tracing::info!(
        api_url = %config.api_url,
        env_override = std::env::var(API_URL_ENV).is_ok(),
        platform = %config.default_platform,
        "Starting tagsite"
    );

    tui::run(config).await
}

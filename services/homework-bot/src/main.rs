//! Homework bot CLI
//!
//! Command-line entry point for the review status notifier.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use clap::Parser;
use homework_bot::{load_config, Config};
use tracing::Level;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

#[derive(Parser)]
#[command(name = "homework-bot")]
#[command(about = "Forwards homework review status changes to Telegram")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: Level,

    /// Also append log lines to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let file_layer = match &args.log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_line_number(true)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(LevelFilter::from_level(args.log_level))
        .with(
            fmt::layer()
                .with_line_number(true)
                .with_writer(std::io::stdout),
        )
        .with(file_layer)
        .init();

    if let Err(e) = dotenv::dotenv() {
        tracing::debug!("No .env file loaded: {}", e);
    }

    tracing::debug!(
        "Parsed command line arguments: config={:?}, log_level={:?}, log_file={:?}",
        args.config,
        args.log_level,
        args.log_file
    );

    let mut config = if let Some(config_path) = &args.config {
        tracing::debug!("Loading configuration from {:?}", config_path);
        load_config(config_path)?
    } else {
        tracing::debug!("Using default configuration");
        Config::default()
    };

    config.resolve_secrets();

    if let Err(e) = config.validate_tokens() {
        tracing::error!("{}", e);
        return Err(e.into());
    }

    tracing::info!("Starting homework bot");
    tracing::debug!(
        "Endpoint: {}, retry period: {}s",
        config.practicum.endpoint,
        config.retry_period_seconds
    );

    homework_bot::run(config).await?;

    Ok(())
}

//! Homework watch CLI
//!
//! Command-line interface for the homework review status watcher.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use homework_watch::{load_config, logging, Config};
use tracing::Level;

#[derive(Parser)]
#[command(name = "homework-watch")]
#[command(about = "Homework review status watcher with Telegram notifications")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Polling interval (overrides config file), e.g. "10m"
    #[arg(long, value_parser = humantime::parse_duration)]
    interval: Option<Duration>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: Level,

    /// Append-only log file
    #[arg(long, default_value = "homework-watch.log")]
    log_file: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    logging::init(args.log_level, &args.log_file)?;

    tracing::debug!(
        "Parsed command line arguments: config={:?}, interval={:?}, log_level={:?}, log_file={:?}",
        args.config,
        args.interval,
        args.log_level,
        args.log_file
    );

    let mut config = if let Some(config_path) = &args.config {
        tracing::debug!("Loading configuration from {:?}", config_path);
        load_config(config_path).inspect_err(|e| tracing::error!("{}", e))?
    } else {
        tracing::debug!("Using default configuration");
        Config::default()
    };

    config.resolve_secrets();

    if let Some(interval) = args.interval {
        config.polling.interval = interval;
    }

    if let Err(e) = config.check_credentials() {
        tracing::error!("{}", e);
        return Err(e.into());
    }

    tracing::info!("Starting homework watch");
    tracing::debug!(
        "Endpoint: {}, chat: {}, interval: {}",
        config.endpoint.url,
        config.telegram.chat_id,
        humantime::format_duration(config.polling.interval)
    );

    homework_watch::run(config).await?;

    Ok(())
}

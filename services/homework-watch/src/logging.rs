//! Tracing setup: stdout plus an append-only log file

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing::Level;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Open `path` for appending, creating it if needed
pub fn open_log_file(path: &Path) -> std::io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global subscriber.
///
/// Every event at or above `level` goes to stdout and, without colors, to
/// the file at `log_file`.
pub fn init(level: Level, log_file: &Path) -> crate::Result<()> {
    let file = open_log_file(log_file).map_err(|e| {
        crate::WatchError::Config(format!("Failed to open log file {:?}: {}", log_file, e))
    })?;

    tracing_subscriber::registry()
        .with(LevelFilter::from_level(level))
        .with(fmt::layer())
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .try_init()
        .map_err(|e| crate::WatchError::Config(format!("Failed to install logger: {}", e)))
}

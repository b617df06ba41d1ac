//! Homework watch - homework review status watcher
//!
//! Polls the homework status endpoint, detects review status changes, and
//! sends them to a Telegram chat.

pub mod config;
pub mod error;
pub mod fetcher;
pub mod io;
pub mod logging;
pub mod notifier;
pub mod poll_loop;
pub mod status;
pub mod telegram;
pub mod validator;

pub use config::{load_config, Config};
pub use error::{Result, WatchError};

use std::sync::Arc;

use crate::fetcher::{Fetcher, HomeworkApiFetcher};
use crate::io::{HttpClient, ReqwestHttpClient};
use crate::notifier::Notifier;
use crate::poll_loop::{PollLoop, Watermark};
use crate::telegram::TelegramNotifier;

/// Build the poll loop from a configuration.
///
/// Fails before any network activity if a credential is missing.
pub fn build(config: &Config) -> Result<PollLoop> {
    config.check_credentials()?;

    let http: Arc<dyn HttpClient> =
        Arc::new(ReqwestHttpClient::with_timeout(config.endpoint.request_timeout)?);
    let fetcher: Arc<dyn Fetcher> =
        Arc::new(HomeworkApiFetcher::new(&config.endpoint, Arc::clone(&http)));
    let notifier: Arc<dyn Notifier> = Arc::new(TelegramNotifier::new(&config.telegram, http));

    Ok(PollLoop::new(
        fetcher,
        notifier,
        Watermark::now(),
        config.polling.interval,
    ))
}

/// Run the watcher with the given configuration. Only returns on startup failure.
pub async fn run(config: Config) -> Result<()> {
    let poll_loop = build(&config)?;
    tracing::info!("Homework watch started");
    poll_loop.run().await;
    Ok(())
}

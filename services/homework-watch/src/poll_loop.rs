//! Poll loop: fetch, validate, translate and notify, once per interval

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::fetcher::Fetcher;
use crate::notifier::{send_logged, Notifier};
use crate::status::translate;
use crate::validator::validate;
use crate::WatchError;

/// Failed cycles in a row after which a warning is logged
pub const FAILURE_WARN_THRESHOLD: u32 = 5;

/// Index of the newest homework. The endpoint lists homeworks newest first.
const NEWEST_ITEM: usize = 0;

/// Current Unix time in seconds
pub fn unix_now() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp()).unwrap_or_default()
}

/// Lower bound (Unix seconds) of the next fetch window
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Watermark(u64);

impl Watermark {
    pub fn new(timestamp: u64) -> Self {
        Self(timestamp)
    }

    pub fn now() -> Self {
        Self(unix_now())
    }

    pub fn timestamp(self) -> u64 {
        self.0
    }

    /// Move forward to `timestamp`.
    ///
    /// Returns false and keeps the current value if `timestamp` is older.
    pub fn advance_to(&mut self, timestamp: u64) -> bool {
        if timestamp < self.0 {
            return false;
        }
        self.0 = timestamp;
        true
    }
}

impl fmt::Display for Watermark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let as_date = i64::try_from(self.0)
            .ok()
            .and_then(|secs| chrono::DateTime::from_timestamp(secs, 0));
        match as_date {
            Some(date) => write!(f, "{} ({})", self.0, date.to_rfc3339()),
            None => write!(f, "{}", self.0),
        }
    }
}

/// Where the loop currently is within a cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Fetching,
    Validating,
    NoChange,
    Translating,
    Notifying,
    Sleeping,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Idle => "idle",
            Phase::Fetching => "fetching",
            Phase::Validating => "validating",
            Phase::NoChange => "no change",
            Phase::Translating => "translating",
            Phase::Notifying => "notifying",
            Phase::Sleeping => "sleeping",
        };
        f.write_str(name)
    }
}

/// Result of one poll cycle
#[derive(Debug)]
pub enum CycleOutcome {
    /// The newest homework status was delivered
    Notified { message: String, watermark: u64 },
    /// The window held no homework updates
    NoChange { watermark: u64 },
    /// The cycle stopped early; the watermark was left alone
    Failed(WatchError),
}

/// Text sent to the chat when a cycle fails
pub fn failure_message(error: &WatchError) -> String {
    format!("Program failure: {}", error)
}

/// The poll-detect-notify state machine
pub struct PollLoop {
    fetcher: Arc<dyn Fetcher>,
    notifier: Arc<dyn Notifier>,
    watermark: Watermark,
    interval: Duration,
    phase: Phase,
    consecutive_failures: u32,
}

impl PollLoop {
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        notifier: Arc<dyn Notifier>,
        watermark: Watermark,
        interval: Duration,
    ) -> Self {
        Self {
            fetcher,
            notifier,
            watermark,
            interval,
            phase: Phase::Idle,
            consecutive_failures: 0,
        }
    }

    pub fn watermark(&self) -> Watermark {
        self.watermark
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    /// Poll forever, sleeping `interval` between cycles
    pub async fn run(mut self) {
        tracing::info!(
            "Polling every {} from watermark {}",
            humantime::format_duration(self.interval),
            self.watermark
        );

        loop {
            match self.run_cycle().await {
                CycleOutcome::Notified { watermark, .. } => {
                    tracing::debug!("Cycle delivered an update, watermark {}", watermark)
                }
                CycleOutcome::NoChange { watermark } => {
                    tracing::debug!("Cycle found no updates, watermark {}", watermark)
                }
                CycleOutcome::Failed(_) => {
                    tracing::debug!("Cycle failed, watermark stays {}", self.watermark)
                }
            }

            self.enter(Phase::Sleeping);
            tokio::time::sleep(self.interval).await;
        }
    }

    /// Run one fetch-validate-translate-notify cycle.
    ///
    /// Any failure is logged and reported to the chat (best effort) and
    /// leaves the watermark where it was.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        match self.process().await {
            Ok(outcome) => {
                self.consecutive_failures = 0;
                outcome
            }
            Err(e) => {
                self.report_failure(&e).await;
                CycleOutcome::Failed(e)
            }
        }
    }

    async fn process(&mut self) -> crate::Result<CycleOutcome> {
        self.enter(Phase::Fetching);
        let raw = self
            .fetcher
            .fetch(Some(self.watermark.timestamp()))
            .await?;

        self.enter(Phase::Validating);
        let response = validate(&raw)?;

        let Some(newest) = response.homeworks.get(NEWEST_ITEM) else {
            self.enter(Phase::NoChange);
            tracing::debug!("No homework updates since {}", self.watermark);
            self.advance(response.current_date);
            return Ok(CycleOutcome::NoChange {
                watermark: self.watermark.timestamp(),
            });
        };

        self.enter(Phase::Translating);
        let message = translate(newest)?;

        self.enter(Phase::Notifying);
        send_logged(self.notifier.as_ref(), &message).await.outcome?;

        self.advance(response.current_date);
        Ok(CycleOutcome::Notified {
            message,
            watermark: self.watermark.timestamp(),
        })
    }

    async fn report_failure(&mut self, error: &WatchError) {
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
        tracing::error!("Cycle failed while {}: {}", self.phase, error);

        if self.consecutive_failures == FAILURE_WARN_THRESHOLD {
            tracing::warn!(
                "{} consecutive poll cycles have failed",
                self.consecutive_failures
            );
        }

        // Delivery problems are already logged by send_logged.
        send_logged(self.notifier.as_ref(), &failure_message(error)).await;
    }

    fn advance(&mut self, timestamp: u64) {
        if self.watermark.advance_to(timestamp) {
            tracing::debug!("Watermark advanced to {}", self.watermark);
        } else {
            tracing::warn!(
                "Server date {} is older than watermark {}, keeping watermark",
                timestamp,
                self.watermark
            );
        }
    }

    fn enter(&mut self, phase: Phase) {
        tracing::trace!("Poll loop {} -> {}", self.phase, phase);
        self.phase = phase;
    }
}

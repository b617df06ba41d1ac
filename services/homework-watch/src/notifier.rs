//! Notifier trait for sending chat messages

use async_trait::async_trait;

use crate::error::DeliveryError;

/// Outcome of one message send, kept only long enough to log it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationAttempt {
    pub message: String,
    pub outcome: Result<(), DeliveryError>,
}

impl NotificationAttempt {
    pub fn delivered(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Trait for sending messages to the configured chat
#[async_trait]
pub trait Notifier: Send + Sync + std::fmt::Debug {
    /// Get the notifier type name (e.g. "telegram")
    fn type_name(&self) -> &str;

    /// Send a message. Failures are returned, never retried.
    async fn notify(&self, message: &str) -> Result<(), DeliveryError>;
}

/// Send `message` through `notifier`, logging before and after the attempt
pub async fn send_logged(notifier: &dyn Notifier, message: &str) -> NotificationAttempt {
    tracing::info!("Sending message via {}: {}", notifier.type_name(), message);

    let outcome = notifier.notify(message).await;
    match &outcome {
        Ok(()) => tracing::info!("Message sent via {}: {}", notifier.type_name(), message),
        Err(e) => tracing::error!(
            "Message via {} was not delivered: {}",
            notifier.type_name(),
            e
        ),
    }

    NotificationAttempt {
        message: message.to_string(),
        outcome,
    }
}

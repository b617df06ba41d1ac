//! Telegram Bot API notification client

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::TelegramConfig;
use crate::error::DeliveryError;
use crate::io::HttpClient;
use crate::notifier::Notifier;

/// Sends messages to one Telegram chat
pub struct TelegramNotifier {
    send_url: String,
    chat_id: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for TelegramNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramNotifier")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

impl TelegramNotifier {
    pub fn new(config: &TelegramConfig, http: Arc<dyn HttpClient>) -> Self {
        let send_url = format!(
            "{}/bot{}/sendMessage",
            config.api_base_url.trim_end_matches('/'),
            config.bot_token
        );

        tracing::debug!("Created TelegramNotifier for chat {}", config.chat_id);

        Self {
            send_url,
            chat_id: config.chat_id.clone(),
            http,
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn type_name(&self) -> &str {
        "telegram"
    }

    async fn notify(&self, message: &str) -> Result<(), DeliveryError> {
        let params = [("chat_id", self.chat_id.as_str()), ("text", message)];

        let response = self
            .http
            .post_form(&self.send_url, &params)
            .await
            .map_err(|e| DeliveryError::TransportFailure {
                cause: e.to_string(),
            })?;

        if response.status != 200 {
            return Err(DeliveryError::TransportFailure {
                cause: format!(
                    "Telegram API returned status {}: {}",
                    response.status, response.body
                ),
            });
        }

        tracing::debug!("Telegram message accepted for chat {}", self.chat_id);
        Ok(())
    }
}

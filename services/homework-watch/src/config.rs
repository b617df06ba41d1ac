//! Configuration types for the homework watcher

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Environment variable holding the status endpoint OAuth token
pub const PRACTICUM_TOKEN_VAR: &str = "PRACTICUM_TOKEN";
/// Environment variable holding the Telegram bot token
pub const TELEGRAM_TOKEN_VAR: &str = "TELEGRAM_TOKEN";
/// Environment variable holding the destination chat id
pub const TELEGRAM_CHAT_ID_VAR: &str = "TELEGRAM_CHAT_ID";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub endpoint: EndpointConfig,
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub polling: PollingConfig,
}

/// Homework status endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    #[serde(default = "default_endpoint_url")]
    pub url: String,
    #[serde(default)]
    pub api_token: String,
    #[serde(default = "default_request_timeout", with = "humantime_serde")]
    pub request_timeout: Duration,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            url: default_endpoint_url(),
            api_token: String::new(),
            request_timeout: default_request_timeout(),
        }
    }
}

/// Telegram chat that receives status and failure messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    #[serde(default = "default_telegram_api_url")]
    pub api_base_url: String,
    #[serde(default)]
    pub bot_token: String,
    #[serde(default)]
    pub chat_id: String,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_telegram_api_url(),
            bot_token: String::new(),
            chat_id: String::new(),
        }
    }
}

/// Poll loop timing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingConfig {
    #[serde(default = "default_polling_interval", with = "humantime_serde")]
    pub interval: Duration,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval: default_polling_interval(),
        }
    }
}

fn default_endpoint_url() -> String {
    "https://practicum.yandex.ru/api/user_api/homework_statuses/".to_string()
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_telegram_api_url() -> String {
    "https://api.telegram.org".to_string()
}

fn default_polling_interval() -> Duration {
    Duration::from_secs(600)
}

impl Config {
    /// Fill in credentials from the process environment.
    ///
    /// Variables that are set override values from the config file.
    pub fn resolve_secrets(&mut self) {
        self.resolve_secrets_with(|name| std::env::var(name).ok());
    }

    /// Fill in credentials using the given variable lookup
    pub fn resolve_secrets_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup(PRACTICUM_TOKEN_VAR) {
            tracing::debug!("Using {} from environment", PRACTICUM_TOKEN_VAR);
            self.endpoint.api_token = token;
        }
        if let Some(token) = lookup(TELEGRAM_TOKEN_VAR) {
            tracing::debug!("Using {} from environment", TELEGRAM_TOKEN_VAR);
            self.telegram.bot_token = token;
        }
        if let Some(chat_id) = lookup(TELEGRAM_CHAT_ID_VAR) {
            tracing::debug!("Using {} from environment", TELEGRAM_CHAT_ID_VAR);
            self.telegram.chat_id = chat_id;
        }
    }

    /// Fail if any of the three required credentials is empty
    pub fn check_credentials(&self) -> crate::Result<()> {
        let missing: Vec<&str> = [
            (PRACTICUM_TOKEN_VAR, &self.endpoint.api_token),
            (TELEGRAM_TOKEN_VAR, &self.telegram.bot_token),
            (TELEGRAM_CHAT_ID_VAR, &self.telegram.chat_id),
        ]
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(crate::WatchError::Config(format!(
                "Missing required credentials: {}",
                missing.join(", ")
            )))
        }
    }
}

/// Load configuration from a JSON file
pub fn load_config(path: &Path) -> crate::Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        crate::WatchError::Config(format!("Failed to read config file {:?}: {}", path, e))
    })?;
    serde_json::from_str(&content).map_err(|e| {
        crate::WatchError::Config(format!("Invalid config file {:?}: {}", path, e))
    })
}

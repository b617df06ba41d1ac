//! Homework status endpoint client

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::config::EndpointConfig;
use crate::error::FetchError;
use crate::io::HttpClient;

/// Source of raw status responses
#[async_trait]
pub trait Fetcher: Send + Sync + std::fmt::Debug {
    /// Fetch everything that changed since `since` (Unix seconds).
    ///
    /// `None` means "since now".
    async fn fetch(&self, since: Option<u64>) -> Result<Value, FetchError>;
}

/// Fetcher for the Practicum homework status API
pub struct HomeworkApiFetcher {
    url: String,
    authorization: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for HomeworkApiFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HomeworkApiFetcher")
            .field("url", &self.url)
            .finish()
    }
}

impl HomeworkApiFetcher {
    pub fn new(config: &EndpointConfig, http: Arc<dyn HttpClient>) -> Self {
        tracing::debug!("Created HomeworkApiFetcher for {}", config.url);

        Self {
            url: config.url.clone(),
            authorization: format!("OAuth {}", config.api_token),
            http,
        }
    }
}

#[async_trait]
impl Fetcher for HomeworkApiFetcher {
    async fn fetch(&self, since: Option<u64>) -> Result<Value, FetchError> {
        let timestamp = since.unwrap_or_else(crate::poll_loop::unix_now).to_string();

        let response = self
            .http
            .get(
                &self.url,
                &[("from_date", timestamp.as_str())],
                &[("Authorization", self.authorization.as_str())],
            )
            .await
            .map_err(|e| FetchError::Transport {
                cause: e.to_string(),
            })?;

        if response.status != 200 {
            tracing::debug!(
                "Status endpoint returned {}: {}",
                response.status,
                response.body
            );
            return Err(FetchError::EndpointUnavailable {
                code: response.status,
            });
        }

        serde_json::from_str(&response.body).map_err(|e| FetchError::Transport {
            cause: format!("Malformed response body: {}", e),
        })
    }
}

//! Error types for the homework watcher

/// Failures of a single request against the homework status endpoint
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("Endpoint unavailable: status code {code}")]
    EndpointUnavailable { code: u16 },

    #[error("Transport failure: {cause}")]
    Transport { cause: String },
}

/// A fetched payload does not have the shape the loop relies on
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Response is not a JSON object")]
    NotAMapping,

    #[error("Response is missing required field '{field}'")]
    MissingField { field: &'static str },

    #[error("Response field '{field}' is not {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },
}

/// A homework entry cannot be turned into a message
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranslationError {
    #[error("Homework is missing required field '{field}'")]
    MissingField { field: &'static str },

    #[error("Unknown homework status '{code}'")]
    UnknownStatus { code: String },
}

/// A message was not accepted by the chat API
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeliveryError {
    #[error("Message delivery failed: {cause}")]
    TransportFailure { cause: String },
}

/// Errors that can occur in the homework watcher
#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Translation(#[from] TranslationError),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

/// Result type alias for homework watcher operations
pub type Result<T> = std::result::Result<T, WatchError>;

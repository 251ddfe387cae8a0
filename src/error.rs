//! Error types for the Trak CLI client.

use thiserror::Error;

/// Transport-level errors raised by the HTTP API client
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Invalid response payload: {0}")]
    InvalidResponse(String),
}

/// Domain errors for identifier resolution and batch mutation
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid identifier format: '{0}' is neither an internal ID nor a key like ENG-123")]
    InvalidIdentifierFormat(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Remote operation failed: {0}")]
    RemoteOperationFailed(String),

    #[error("Unknown failure: {0}")]
    UnknownFailure(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Transport error: {0}")]
    TransportError(#[from] TransportError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

impl ApiError {
    /// Message surfaced on a per-item batch result. Remote-supplied messages
    /// are carried verbatim; everything else goes through Display.
    pub fn item_message(&self) -> String {
        match self {
            ApiError::RemoteOperationFailed(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

//! Error types and handling.

use thiserror::Error;

use crate::store::StoreError;

/// Application-wide error type.
///
/// The first four variants form the contract seen by API callers; their
/// message is the human-readable detail returned to the client.
#[derive(Error, Debug)]
pub enum AppError {
    /// Request is malformed or missing required input
    #[error("{0}")]
    InvalidRequest(String),

    /// Record with the same key already exists
    #[error("{0}")]
    Conflict(String),

    /// Record not found
    #[error("{0}")]
    NotFound(String),

    /// Unexpected failure or violated post-condition
    #[error("{0}")]
    Internal(String),

    /// Record store operation failed
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for AppError
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Create an invalid request error with message
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Create a conflict error with message
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// Create a not found error with message
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create an internal error with message
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Create a config error with message
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Rebuild an error from an HTTP status and the detail text the API sent.
    pub fn from_status(status: u16, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        match status {
            400 | 422 => Self::InvalidRequest(detail),
            404 => Self::NotFound(detail),
            409 => Self::Conflict(detail),
            _ => Self::Internal(detail),
        }
    }
}

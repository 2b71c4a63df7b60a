//! Error types for remote store access

use thiserror::Error;

/// Errors talking to the remote task store
#[derive(Debug, Error)]
pub enum SyncError {
    /// Transport-level failure (connect, timeout, TLS)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("server returned {status}: {body}")]
    Api { status: u16, body: String },

    /// Response body did not match the expected shape
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The task carrying the update panicked or was cancelled
    #[error("dispatch task failed: {0}")]
    Dispatch(String),
}

impl SyncError {
    /// Check if this is a retryable error
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            Self::Api { status, .. } => *status >= 500 || *status == 429,
            Self::Decode(_) | Self::Dispatch(_) => false,
        }
    }
}

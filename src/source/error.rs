//! Comment source error types

use thiserror::Error;

/// Errors raised while fetching comments
#[derive(Debug, Error)]
pub enum SourceError {
    /// HTTP transport error
    #[cfg(feature = "github")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body or reason
        message: String,
    },

    /// The API refused the request because the rate limit is exhausted
    #[error("rate limited{}", reset_hint(.reset_epoch))]
    RateLimited {
        /// Unix time at which the limit resets, if reported
        reset_epoch: Option<u64>,
    },

    /// Reading a local export failed
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A payload did not have the expected shape
    #[error("malformed comment payload: {0}")]
    Json(#[from] serde_json::Error),
}

#[allow(clippy::ref_option)]
fn reset_hint(reset_epoch: &Option<u64>) -> String {
    reset_epoch.map_or_else(String::new, |t| format!(", resets at unix time {t}"))
}

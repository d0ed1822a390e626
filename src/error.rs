//! Error types for the fan-out runner.

use thiserror::Error;

/// Result type alias using the volley error type.
pub type Result<T> = std::result::Result<T, VolleyError>;

/// Main error type for the fan-out runner.
///
/// Per-request transport errors never surface here: they are caught at the
/// request boundary and recorded as [`crate::Outcome::Failure`]. This type
/// covers everything that escapes the batch as a whole.
#[derive(Error, Debug)]
pub enum VolleyError {
    /// A dispatched request task panicked or was cancelled before it could
    /// produce an outcome. This is the batch-level aggregation failure.
    #[error("Batch aggregation failed: {0}")]
    Aggregation(#[from] tokio::task::JoinError),

    /// HTTP client error
    #[error("HTTP request failed: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// General error from anyhow
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

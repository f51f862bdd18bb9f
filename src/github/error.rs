//! Fetch-level error types.

use thiserror::Error;

/// Errors from a single request to a repository data source.
///
/// These are classified by the aggregator: required-source errors become
/// [`AggregateError`](crate::aggregate::AggregateError)s, optional-source
/// errors are absorbed into fallback content.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The source answered 404.
    #[error("not found")]
    NotFound,

    /// The source signalled an exhausted quota (429, or GitHub's 403).
    #[error("rate limited{}", reset_suffix(.retry_after))]
    RateLimited {
        /// Local wall-clock time the quota resets, when the source says.
        retry_after: Option<String>,
    },

    /// Any other non-success status.
    #[error("API error ({status}): {text}")]
    Status {
        status: u16,
        /// Canonical reason phrase for the status.
        text: String,
    },

    /// The response body could not be understood.
    #[error("decode error: {0}")]
    Decode(String),
}

fn reset_suffix(retry_after: &Option<String>) -> String {
    retry_after
        .as_deref()
        .map(|t| format!(", resets at {t}"))
        .unwrap_or_default()
}

/// Error types for the outbound fetch layer
use thiserror::Error;

use crate::models::FetchResult;

/// Errors that can occur while talking to a remote data source.
///
/// These never leave the fetchers: they are folded into a [`FetchResult`]
/// at the fetch boundary.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection failures and timeouts
    #[error("Network error: {0}")]
    Network(String),

    /// Upstream answered with a non-success status
    #[error("HTTP {status}: {detail}")]
    Http {
        status: u16,
        detail: String,
    },

    /// Upstream request-rate ceiling exceeded
    #[error("Upstream rate limit exceeded")]
    RateLimited,

    /// Body was not the JSON shape we expected
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Caller broke a precondition, no request was sent
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Network(format!("request timed out: {}", e))
        } else {
            FetchError::Network(e.to_string())
        }
    }
}

impl<T> From<Result<T, FetchError>> for FetchResult<T> {
    fn from(result: Result<T, FetchError>) -> Self {
        match result {
            Ok(data) => FetchResult::Success(data),
            Err(FetchError::RateLimited) => FetchResult::RateLimited,
            Err(e) => FetchResult::Unavailable(e.to_string()),
        }
    }
}

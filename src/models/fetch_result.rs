use serde::Serialize;

/// Outcome of a remote lookup, as seen by the dashboard.
///
/// Exactly one variant is populated. `RateLimited` is kept apart from
/// `Unavailable` so views can tell throttling from any other failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum FetchResult<T> {
    Success(T),
    RateLimited,
    Unavailable(String),
}

impl<T> FetchResult<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, FetchResult::Success(_))
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, FetchResult::RateLimited)
    }

    pub fn success(self) -> Option<T> {
        match self {
            FetchResult::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> FetchResult<U> {
        match self {
            FetchResult::Success(data) => FetchResult::Success(f(data)),
            FetchResult::RateLimited => FetchResult::RateLimited,
            FetchResult::Unavailable(reason) => FetchResult::Unavailable(reason),
        }
    }
}

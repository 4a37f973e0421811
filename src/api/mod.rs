// Outbound data sources
pub mod client;
pub mod error;
pub mod openfda;
pub mod trends;

// Re-export commonly used items
pub use client::{build_http_client, get_raw, set_silent, RawResponse};
pub use error::FetchError;
pub use openfda::OpenFdaClient;
pub use trends::{TimeWindow, TrendsClient, TrendsSettings};

//! Bounded concurrent URL fetching.
//!
//! A fixed set of workers pulls URLs from a shared intake channel, issues
//! one GET per URL through a shared HTTP client, and emits one
//! [`FetchResult`] per consumed URL to a shared output channel. The output
//! channel closes once every worker has exited.

pub mod http;
pub mod pool;

pub use http::{FetchError, FetchSetupError, HttpConfig, build_client, fetch_one};
pub use pool::spawn_pool;

use serde::Serialize;

/// Outcome of one fetch attempt.
///
/// Exactly one of these is emitted per URL pulled from the intake channel,
/// including URLs that were in flight when a shutdown was requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchResult {
    pub url: String,
    /// HTTP status code, 0 if the request never completed.
    pub status: u16,
    /// Bytes read from the response body, 0 on failure.
    pub length: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FetchResult {
    pub fn success(url: impl Into<String>, status: u16, length: u64) -> Self {
        Self {
            url: url.into(),
            status,
            length,
            error: None,
        }
    }

    pub fn failure(url: impl Into<String>, status: u16, error: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status,
            length: 0,
            error: Some(error.into()),
        }
    }
}

//! HTTP client construction and single-URL fetch logic.

use bytes::Bytes;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use super::FetchResult;

/// Failure to build the shared HTTP client. Fatal at startup, unlike
/// per-job errors which only ever land in a [`FetchResult`].
#[derive(Debug, Error)]
pub enum FetchSetupError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("request failed: {0}")]
    Transport(String),

    #[error("failed to read body: {message}")]
    BodyRead { status: u16, message: String },
}

impl FetchError {
    /// Status code received before the failure, 0 if the request never
    /// completed.
    pub fn status(&self) -> u16 {
        match self {
            FetchError::BodyRead { status, .. } => *status,
            _ => 0,
        }
    }
}

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(10),
            user_agent: "urlfetch/0.1.0".to_string(),
        }
    }
}

/// Build the shared client used by every worker. The per-request timeout
/// lives here and applies regardless of the pool's cancellation token.
pub fn build_client(config: &HttpConfig) -> Result<Client, FetchSetupError> {
    let client = Client::builder()
        .timeout(config.request_timeout)
        .user_agent(&config.user_agent)
        .build()?;

    Ok(client)
}

/// Fetch a single URL and fold the outcome into a [`FetchResult`].
///
/// Never fails: construction, transport, and body-read errors are captured
/// in the result's error field. A body-read failure keeps the status code
/// that was already received.
pub async fn fetch_one(client: &Client, url: &str) -> FetchResult {
    match fetch_once(client, url).await {
        Ok((status, length)) => {
            debug!(url, status, length, "fetch completed");
            FetchResult::success(url, status, length)
        }
        Err(e) => {
            debug!(url, status = e.status(), error = %e, "fetch failed");
            FetchResult::failure(url, e.status(), e.to_string())
        }
    }
}

async fn fetch_once(client: &Client, url: &str) -> Result<(u16, u64), FetchError> {
    let target = reqwest::Url::parse(url).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;

    let response = client
        .get(target)
        .send()
        .await
        .map_err(|e| FetchError::Transport(e.to_string()))?;

    let status = response.status().as_u16();

    let body: Bytes = response.bytes().await.map_err(|e| FetchError::BodyRead {
        status,
        message: e.to_string(),
    })?;

    Ok((status, body.len() as u64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_config_defaults() {
        let config = HttpConfig::default();
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.user_agent, "urlfetch/0.1.0");
    }

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(FetchError::InvalidUrl("bad".into()).status(), 0);
        assert_eq!(FetchError::Transport("refused".into()).status(), 0);
        assert_eq!(
            FetchError::BodyRead {
                status: 200,
                message: "truncated".into()
            }
            .status(),
            200
        );
    }

    #[tokio::test]
    async fn test_fetch_one_invalid_url() {
        let client = build_client(&HttpConfig::default()).unwrap();
        let result = fetch_one(&client, "not a url").await;

        assert_eq!(result.url, "not a url");
        assert_eq!(result.status, 0);
        assert_eq!(result.length, 0);
        assert!(result.error.is_some());
    }
}

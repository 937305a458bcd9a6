//! HTTP client abstraction

use crate::constants::DEFAULT_TIMEOUT_SECS;
use crate::error;
use chatrelay_core::Error;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use serde_json::Value;
use std::time::Duration;

/// Status and raw body of one exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Body text, empty if it could not be read
    pub body: String,
}

impl HttpResponse {
    /// Whether the status is 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP client abstraction
///
/// Only network-level failures are errors here; any received status is
/// returned as an [`HttpResponse`].
#[async_trait::async_trait]
pub trait HttpClient: Send + Sync {
    /// POST `body` as JSON to `url`
    async fn post_json(&self, url: &str, body: &Value) -> Result<HttpResponse, Error>;
}

/// Default HTTP client implementation using reqwest
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    /// Create a new HTTP client with the default timeout
    pub fn new() -> Result<Self, Error> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a new HTTP client with a custom timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(format!("chatrelay/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(error::network_error)?;

        Ok(Self { client })
    }

    /// Wrap an existing reqwest client
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl HttpClient for ReqwestClient {
    async fn post_json(&self, url: &str, body: &Value) -> Result<HttpResponse, Error> {
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .json(body)
            .send()
            .await
            .map_err(error::network_error)?;

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_range() {
        let ok = |status| HttpResponse {
            status,
            body: String::new(),
        };
        assert!(ok(200).is_success());
        assert!(ok(204).is_success());
        assert!(!ok(199).is_success());
        assert!(!ok(302).is_success());
        assert!(!ok(429).is_success());
    }

    #[test]
    fn test_client_creation() {
        assert!(ReqwestClient::new().is_ok());
        assert!(ReqwestClient::with_timeout(Duration::from_secs(1)).is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let client = ReqwestClient::with_timeout(Duration::from_secs(2)).unwrap();
        let result = client
            .post_json("http://127.0.0.1:1/hook", &serde_json::json!({}))
            .await;

        let error = result.unwrap_err();
        assert!(matches!(error, Error::Transport { status: None, .. }));
    }
}

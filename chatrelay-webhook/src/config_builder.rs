//! Builder for the webhook configuration

use crate::config::{WebhookConfig, WireFormat};
use std::time::Duration;

/// Builder for [`WebhookConfig`]
#[derive(Default)]
pub struct WebhookConfigBuilder {
    default_url: Option<String>,
    env_url: Option<String>,
    wire_format: Option<WireFormat>,
    timeout: Option<Duration>,
    store_key: Option<String>,
}

impl WebhookConfigBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fallback URL
    pub fn default_url(mut self, url: impl Into<String>) -> Self {
        self.default_url = Some(url.into());
        self
    }

    /// Set the deployment-provided URL
    pub fn env_url(mut self, url: impl Into<String>) -> Self {
        self.env_url = Some(url.into());
        self
    }

    /// Select the wire format
    pub fn wire_format(mut self, format: WireFormat) -> Self {
        self.wire_format = Some(format);
        self
    }

    /// Set the HTTP timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the key used to persist runtime overrides
    pub fn store_key(mut self, key: impl Into<String>) -> Self {
        self.store_key = Some(key.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> WebhookConfig {
        let defaults = WebhookConfig::default();
        WebhookConfig {
            default_url: self.default_url.unwrap_or(defaults.default_url),
            env_url: self.env_url.or(defaults.env_url),
            wire_format: self.wire_format.unwrap_or(defaults.wire_format),
            timeout: self.timeout.unwrap_or(defaults.timeout),
            store_key: self.store_key.unwrap_or(defaults.store_key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides() {
        let config = WebhookConfig::builder()
            .default_url("http://fallback")
            .env_url("http://env")
            .wire_format(WireFormat::LatestMessage)
            .timeout(Duration::from_secs(5))
            .store_key("staging_hook")
            .build();

        assert_eq!(config.default_url, "http://fallback");
        assert_eq!(config.env_url.as_deref(), Some("http://env"));
        assert_eq!(config.wire_format, WireFormat::LatestMessage);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.store_key, "staging_hook");
    }

    #[test]
    fn test_builder_falls_back_to_defaults() {
        let config = WebhookConfigBuilder::new().build();
        let defaults = WebhookConfig::default();
        assert_eq!(config.default_url, defaults.default_url);
        assert_eq!(config.store_key, defaults.store_key);
    }
}

//! Webhook relay configuration

use crate::constants::{
    DEFAULT_STORE_KEY, DEFAULT_TIMEOUT_SECS, DEFAULT_WEBHOOK_URL, WEBHOOK_URL_ENV,
    WIRE_FORMAT_ENV,
};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

/// Which body layout the remote workflow expects
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WireFormat {
    /// `{ clientId, messages, model?, temperature?, system? }`
    #[default]
    FullContext,
    /// `{ message }` carrying only the newest message text
    LatestMessage,
}

impl FromStr for WireFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" | "full-context" | "full_context" => Ok(Self::FullContext),
            "latest" | "latest-message" | "latest_message" => Ok(Self::LatestMessage),
            other => Err(format!("unknown wire format: {}", other)),
        }
    }
}

impl fmt::Display for WireFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FullContext => write!(f, "full"),
            Self::LatestMessage => write!(f, "latest"),
        }
    }
}

/// Configuration for the webhook client
#[derive(Debug, Clone)]
pub struct WebhookConfig {
    /// URL used when no override, environment or persisted value exists
    pub default_url: String,
    /// Deployment-provided URL, usually read from the environment
    pub env_url: Option<String>,
    /// Body layout sent to the workflow
    pub wire_format: WireFormat,
    /// HTTP timeout for one exchange
    pub timeout: Duration,
    /// Key under which runtime overrides are persisted
    pub store_key: String,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            default_url: DEFAULT_WEBHOOK_URL.to_string(),
            env_url: None,
            wire_format: WireFormat::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            store_key: DEFAULT_STORE_KEY.to_string(),
        }
    }
}

impl WebhookConfig {
    /// Create a new configuration builder
    pub fn builder() -> crate::config_builder::WebhookConfigBuilder {
        crate::config_builder::WebhookConfigBuilder::new()
    }

    /// Read `CHATRELAY_WEBHOOK_URL` and `CHATRELAY_WIRE_FORMAT` from the
    /// process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable lookup
    ///
    /// Blank values count as unset. An unrecognized wire format is logged
    /// and the default is used.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let env_url = lookup(WEBHOOK_URL_ENV).filter(|v| !v.trim().is_empty());

        let wire_format = match lookup(WIRE_FORMAT_ENV).filter(|v| !v.trim().is_empty()) {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                warn!("Ignoring {}: {}", WIRE_FORMAT_ENV, e);
                WireFormat::default()
            }),
            None => WireFormat::default(),
        };

        Self {
            env_url,
            wire_format,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = WebhookConfig::default();
        assert_eq!(config.default_url, DEFAULT_WEBHOOK_URL);
        assert_eq!(config.env_url, None);
        assert_eq!(config.wire_format, WireFormat::FullContext);
        assert_eq!(config.timeout, Duration::from_secs(300));
        assert_eq!(config.store_key, "webhook_url");
    }

    #[test]
    fn test_from_lookup_reads_values() {
        let config = WebhookConfig::from_lookup(lookup_from(&[
            (WEBHOOK_URL_ENV, "https://flows.example.com/webhook/chat"),
            (WIRE_FORMAT_ENV, "latest"),
        ]));
        assert_eq!(
            config.env_url.as_deref(),
            Some("https://flows.example.com/webhook/chat")
        );
        assert_eq!(config.wire_format, WireFormat::LatestMessage);
    }

    #[test]
    fn test_from_lookup_ignores_blank_and_invalid() {
        let config = WebhookConfig::from_lookup(lookup_from(&[
            (WEBHOOK_URL_ENV, "   "),
            (WIRE_FORMAT_ENV, "carrier-pigeon"),
        ]));
        assert_eq!(config.env_url, None);
        assert_eq!(config.wire_format, WireFormat::FullContext);
    }

    #[test]
    fn test_wire_format_parse() {
        assert_eq!("FULL".parse::<WireFormat>(), Ok(WireFormat::FullContext));
        assert_eq!(
            "latest-message".parse::<WireFormat>(),
            Ok(WireFormat::LatestMessage)
        );
        assert!("".parse::<WireFormat>().is_err());
        assert_eq!(WireFormat::LatestMessage.to_string(), "latest");
    }
}

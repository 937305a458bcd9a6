//! Webhook endpoint resolution
//!
//! The URL is recomputed on every send from four tiers, first non-blank
//! value wins:
//!
//! 1. runtime override set through [`EndpointResolver::set_endpoint`]
//! 2. deployment-provided value ([`WebhookConfig::env_url`])
//! 3. override persisted by a previous process
//! 4. [`WebhookConfig::default_url`]
//!
//! Storage failures never surface to the caller; the resolver logs them and
//! moves on to the next tier.

use crate::config::WebhookConfig;
use chatrelay_state::EndpointStore;
use std::fmt;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Which tier produced a resolved URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointSource {
    /// In-memory override for this process
    Runtime,
    /// Deployment-provided configuration
    Environment,
    /// Override persisted by an earlier run
    Persisted,
    /// Hardcoded fallback
    Default,
}

impl fmt::Display for EndpointSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Runtime => "runtime",
            Self::Environment => "environment",
            Self::Persisted => "persisted",
            Self::Default => "default",
        };
        f.write_str(name)
    }
}

/// Resolves the webhook URL for each send
pub struct EndpointResolver {
    runtime: RwLock<Option<String>>,
    env_url: Option<String>,
    store: Arc<dyn EndpointStore>,
    store_key: String,
    default_url: String,
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}

impl EndpointResolver {
    /// Create a resolver from configuration and an override store
    pub fn new(config: &WebhookConfig, store: Arc<dyn EndpointStore>) -> Self {
        Self {
            runtime: RwLock::new(None),
            env_url: config.env_url.clone(),
            store,
            store_key: config.store_key.clone(),
            default_url: config.default_url.clone(),
        }
    }

    /// Replace the deployment-provided value
    pub fn set_env_url(&mut self, url: Option<String>) {
        self.env_url = url;
    }

    /// Resolve the URL for the next send
    pub async fn resolve(&self) -> String {
        self.resolve_with_source().await.0
    }

    /// Resolve the URL and report which tier it came from
    pub async fn resolve_with_source(&self) -> (String, EndpointSource) {
        if let Some(url) = non_blank(self.runtime.read().await.as_deref()) {
            return (url, EndpointSource::Runtime);
        }

        if let Some(url) = non_blank(self.env_url.as_deref()) {
            return (url, EndpointSource::Environment);
        }

        match self.store.load(&self.store_key).await {
            Ok(stored) => {
                if let Some(url) = non_blank(stored.as_deref()) {
                    return (url, EndpointSource::Persisted);
                }
            }
            Err(e) => {
                warn!("Failed to read persisted webhook url: {}", e);
            }
        }

        (self.default_url.clone(), EndpointSource::Default)
    }

    /// Which tier the next send would use
    pub async fn source(&self) -> EndpointSource {
        self.resolve_with_source().await.1
    }

    /// Override the URL for this process and persist it for future runs
    ///
    /// Never fails: a store error is logged and the in-memory override still
    /// applies. A blank URL is never persisted, so it cannot shadow an
    /// override saved by an earlier run.
    pub async fn set_endpoint(&self, url: impl Into<String>) {
        let url = url.into();
        let trimmed = url.trim().to_string();
        *self.runtime.write().await = Some(url);

        if trimmed.is_empty() {
            debug!("Blank webhook url set, persisted override left untouched");
            return;
        }

        if let Err(e) = self.store.save(&self.store_key, &trimmed).await {
            warn!("Failed to persist webhook url: {}", e);
        }
        info!("Webhook url set: {}", trimmed);
    }

    /// Drop the runtime override; a persisted override still applies
    pub async fn clear_override(&self) {
        *self.runtime.write().await = None;
        debug!("Runtime webhook url override cleared");
    }

    /// Drop the runtime override and delete the persisted copy
    pub async fn forget_persisted(&self) {
        self.clear_override().await;

        if let Err(e) = self.store.clear(&self.store_key).await {
            warn!("Failed to clear persisted webhook url: {}", e);
        }
        debug!("Persisted webhook url forgotten");
    }
}

impl fmt::Debug for EndpointResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EndpointResolver")
            .field("env_url", &self.env_url)
            .field("store_key", &self.store_key)
            .field("default_url", &self.default_url)
            .finish_non_exhaustive()
    }
}

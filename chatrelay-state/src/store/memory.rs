//! In-memory endpoint storage implementation

use crate::{EndpointStore, StateResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, trace};

/// In-memory endpoint store
///
/// Suitable for tests and short-lived processes. Data is lost when the
/// store is dropped; clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Create a new empty memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a memory store holding one override
    pub fn with_entry(key: impl Into<String>, url: impl Into<String>) -> Self {
        let mut map = HashMap::new();
        map.insert(key.into(), url.into());
        Self {
            entries: Arc::new(RwLock::new(map)),
        }
    }

    /// Number of stored overrides
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Check if the store is empty
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl EndpointStore for MemoryStore {
    async fn load(&self, key: &str) -> StateResult<Option<String>> {
        trace!("Loading endpoint override {} from memory store", key);
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn save(&self, key: &str, url: &str) -> StateResult<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), url.to_string());
        debug!("Saved endpoint override {} to memory store", key);
        Ok(())
    }

    async fn clear(&self, key: &str) -> StateResult<()> {
        if self.entries.write().await.remove(key).is_some() {
            debug!("Cleared endpoint override {} from memory store", key);
        }
        Ok(())
    }
}

//! Endpoint override storage implementations

use crate::StateResult;
use async_trait::async_trait;

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Trait for storing and retrieving a persisted endpoint override
///
/// Overrides are keyed so several relays can share one backend.
#[async_trait]
pub trait EndpointStore: Send + Sync {
    /// Load the override stored under `key`, if any
    async fn load(&self, key: &str) -> StateResult<Option<String>>;

    /// Store `url` under `key`, replacing any previous value
    async fn save(&self, key: &str, url: &str) -> StateResult<()>;

    /// Remove the override stored under `key`. Missing keys are not an error.
    async fn clear(&self, key: &str) -> StateResult<()>;
}

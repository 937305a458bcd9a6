//! Durable storage for the chatrelay endpoint override
//!
//! A runtime endpoint override is written here so that later process runs
//! pick it up without being reconfigured. Two backends are provided: a
//! JSON file per key and an in-memory map for tests and short-lived use.

pub mod error;
pub mod store;
pub mod types;

pub use error::{StateError, StateResult};
pub use store::{EndpointStore, FileStore, MemoryStore};
pub use types::PersistedEndpoint;

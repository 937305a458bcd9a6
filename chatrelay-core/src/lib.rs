//! Core traits and types for the chatrelay webhook client
//!
//! This crate holds the conversation data model, the closed error taxonomy
//! surfaced to callers, the cancellation signal and the [`Relay`] trait that
//! concrete transports implement.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod cancel;
pub mod error;
pub mod relay;
pub mod types;

// Re-export commonly used items
pub use cancel::{cancel_pair, CancelHandle, CancelSignal};
pub use error::{Error, Result};
pub use relay::Relay;
pub use types::{
    message::{ConversationMessage, Role},
    request::{ChatRequest, ChatRequestBuilder, Meta},
    response::{Auxiliary, ChatResult},
};

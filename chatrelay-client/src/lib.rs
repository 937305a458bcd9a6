//! Conversation helper for the chatrelay webhook client
//!
//! [`Conversation`] keeps the running message history of one chat session
//! and relays it turn by turn through any [`Relay`](chatrelay_core::Relay).

#![warn(missing_docs)]

pub mod conversation;

pub use conversation::Conversation;

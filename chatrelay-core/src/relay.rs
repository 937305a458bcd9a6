//! Core relay trait for sending a conversation turn

use crate::cancel::CancelSignal;
use crate::error::Result;
use crate::types::request::ChatRequest;
use crate::types::response::ChatResult;
use async_trait::async_trait;

/// The fundamental trait for relaying a conversation to a remote workflow
///
/// One call is one conversation turn: a single exchange producing either a
/// normalized [`ChatResult`] or exactly one classified error. Implementations
/// never retry.
#[async_trait]
pub trait Relay: Send + Sync {
    /// Send a conversation and wait for the normalized reply
    async fn send(&self, request: &ChatRequest) -> Result<ChatResult>;

    /// Send a conversation that the caller may abort through `signal`
    ///
    /// Once cancellation is requested the call resolves with
    /// [`Error::Cancelled`](crate::Error::Cancelled) and never with a success.
    async fn send_with_cancel(
        &self,
        request: &ChatRequest,
        signal: CancelSignal,
    ) -> Result<ChatResult>;
}

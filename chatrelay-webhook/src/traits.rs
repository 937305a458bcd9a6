//! Common traits for the relay pipeline

use chatrelay_core::{ChatRequest, ChatResult, Error};
use serde_json::Value;

/// Convert a conversation into the webhook's JSON body
pub trait RequestConverter: Send + Sync {
    /// Validate and encode a request. Fails before any network I/O.
    fn convert_request(&self, request: &ChatRequest) -> Result<Value, Error>;
}

/// Parse a decoded webhook reply
pub trait ResponseParser: Send + Sync {
    /// Normalize a reply payload into a result or a classified failure
    fn parse_response(&self, value: &Value) -> Result<ChatResult, Error>;
}

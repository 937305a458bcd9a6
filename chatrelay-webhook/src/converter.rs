//! Conversion from chat requests to webhook request bodies

use crate::config::WireFormat;
use crate::traits::RequestConverter;
use chatrelay_core::{ChatRequest, ConversationMessage, Error};
use serde::Serialize;
use serde_json::Value;

/// Full-context body: the whole history plus lifted meta fields
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FullContextBody<'a> {
    client_id: &'a str,
    messages: &'a [ConversationMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
}

/// Latest-message body: only the newest message text
#[derive(Debug, Serialize)]
struct LatestMessageBody<'a> {
    message: &'a str,
}

fn encode(body: &impl Serialize) -> Result<Value, Error> {
    serde_json::to_value(body)
        .map_err(|e| Error::validation(format!("request could not be encoded: {}", e)))
}

fn ensure_messages(request: &ChatRequest) -> Result<(), Error> {
    if request.messages.is_empty() {
        return Err(Error::validation("message list must not be empty"));
    }
    Ok(())
}

/// Build the full-context body
///
/// Only `model` (string), `temperature` (number) and `system` (string) are
/// taken from `meta`; other keys are dropped.
pub fn to_full_context_body(request: &ChatRequest) -> Result<Value, Error> {
    ensure_messages(request)?;

    encode(&FullContextBody {
        client_id: &request.client_id,
        messages: &request.messages,
        model: request.meta_str("model"),
        temperature: request.meta_f64("temperature"),
        system: request.meta_str("system"),
    })
}

/// Build the latest-message body
pub fn to_latest_message_body(request: &ChatRequest) -> Result<Value, Error> {
    ensure_messages(request)?;

    let message = request
        .latest_message()
        .map(|m| m.content.trim())
        .unwrap_or_default();
    if message.is_empty() {
        return Err(Error::validation("no content to send"));
    }

    encode(&LatestMessageBody { message })
}

/// Converter selected by [`WireFormat`]
#[derive(Debug, Clone, Copy, Default)]
pub struct WebhookConverter {
    format: WireFormat,
}

impl WebhookConverter {
    /// Create a converter for the given format
    pub fn new(format: WireFormat) -> Self {
        Self { format }
    }

    /// The configured format
    pub fn format(&self) -> WireFormat {
        self.format
    }
}

impl RequestConverter for WebhookConverter {
    fn convert_request(&self, request: &ChatRequest) -> Result<Value, Error> {
        match self.format {
            WireFormat::FullContext => to_full_context_body(request),
            WireFormat::LatestMessage => to_latest_message_body(request),
        }
    }
}

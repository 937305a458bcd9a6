//! Request types for relaying a conversation

use crate::types::message::{ConversationMessage, Role};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Open mapping of optional request fields (model, temperature, system, ...)
pub type Meta = Map<String, Value>;

/// A conversation turn to relay to the remote workflow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// Opaque session identifier
    pub client_id: String,
    /// Conversation history, oldest first
    pub messages: Vec<ConversationMessage>,
    /// Optional extra fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

impl ChatRequest {
    /// Create a new request builder
    pub fn builder() -> ChatRequestBuilder {
        ChatRequestBuilder::default()
    }

    /// Create a request with just a client id and messages
    pub fn new(client_id: impl Into<String>, messages: Vec<ConversationMessage>) -> Self {
        Self {
            client_id: client_id.into(),
            messages,
            meta: None,
        }
    }

    /// Leniently decode an untyped conversation
    ///
    /// Entries of `messages` that are not valid messages (unknown role,
    /// non-string content, not an object) are dropped. A missing or
    /// non-array `messages` yields an empty history, and a non-object `meta`
    /// is ignored. The result may therefore have no messages; that is
    /// rejected at send time.
    pub fn from_value(value: &Value) -> Self {
        let client_id = match value.get("clientId") {
            Some(Value::String(id)) => id.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => String::new(),
        };

        let messages = value
            .get("messages")
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|entry| {
                        serde_json::from_value::<ConversationMessage>(entry.clone()).ok()
                    })
                    .collect()
            })
            .unwrap_or_default();

        let meta = value.get("meta").and_then(Value::as_object).cloned();

        Self {
            client_id,
            messages,
            meta,
        }
    }

    /// Most recent user message, falling back to the most recent message
    pub fn latest_message(&self) -> Option<&ConversationMessage> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .or_else(|| self.messages.last())
    }

    /// Read a string field from `meta`
    pub fn meta_str(&self, key: &str) -> Option<&str> {
        self.meta.as_ref()?.get(key)?.as_str()
    }

    /// Read a numeric field from `meta`
    pub fn meta_f64(&self, key: &str) -> Option<f64> {
        self.meta.as_ref()?.get(key)?.as_f64()
    }
}

/// Builder for [`ChatRequest`]
#[derive(Default)]
pub struct ChatRequestBuilder {
    client_id: String,
    messages: Vec<ConversationMessage>,
    meta: Option<Meta>,
}

impl ChatRequestBuilder {
    /// Set the client id
    pub fn client_id(mut self, id: impl Into<String>) -> Self {
        self.client_id = id.into();
        self
    }

    /// Add a message
    pub fn message(mut self, message: ConversationMessage) -> Self {
        self.messages.push(message);
        self
    }

    /// Add multiple messages
    pub fn messages(mut self, messages: impl IntoIterator<Item = ConversationMessage>) -> Self {
        self.messages.extend(messages);
        self
    }

    /// Set the model name
    pub fn model(self, model: impl Into<String>) -> Self {
        self.meta_field("model", Value::String(model.into()))
    }

    /// Set the sampling temperature
    pub fn temperature(self, temperature: f64) -> Self {
        self.meta_field("temperature", Value::from(temperature))
    }

    /// Override the system prompt
    pub fn system(self, prompt: impl Into<String>) -> Self {
        self.meta_field("system", Value::String(prompt.into()))
    }

    /// Set an arbitrary meta field
    pub fn meta_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.meta
            .get_or_insert_with(Map::new)
            .insert(key.into(), value);
        self
    }

    /// Replace the whole meta mapping
    pub fn meta(mut self, meta: Meta) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Build the request
    pub fn build(self) -> ChatRequest {
        ChatRequest {
            client_id: self.client_id,
            messages: self.messages,
            meta: self.meta,
        }
    }
}

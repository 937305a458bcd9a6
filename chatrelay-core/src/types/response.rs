//! Response types for relayed conversations

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The normalized reply of one conversation turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResult {
    /// Trimmed, non-empty reply text
    pub output: String,
    /// Fields echoed by the remote side, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auxiliary: Option<Auxiliary>,
}

/// Echo fields the remote workflow may attach to its reply
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Auxiliary {
    /// Session identifier echoed back
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    /// Model that produced the reply
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Remote timestamp, as sent (number or string)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Value>,
    /// Token usage block, as sent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Value>,
}

impl Auxiliary {
    /// True when no echo field is set
    pub fn is_empty(&self) -> bool {
        self.session_id.is_none()
            && self.model.is_none()
            && self.timestamp.is_none()
            && self.usage.is_none()
    }
}

impl ChatResult {
    /// Create a result without auxiliary data
    pub fn new(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            auxiliary: None,
        }
    }
}

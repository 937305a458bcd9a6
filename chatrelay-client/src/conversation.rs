//! History-keeping conversation over a relay

use chatrelay_core::{
    CancelSignal, ChatRequest, ChatResult, ConversationMessage, Meta, Relay, Result, Role,
};
use serde_json::Value;
use tracing::{debug, trace};
use uuid::Uuid;

/// A chat session that accumulates history across turns
///
/// Each [`ask`](Self::ask) appends the user message, relays the whole
/// history, and on success appends the reply as an assistant message. On
/// failure the user message stays in the history and nothing else is added,
/// so the caller can retry the turn with [`resend`](Self::resend).
///
/// # Example
///
/// ```no_run
/// use chatrelay_client::Conversation;
/// use chatrelay_webhook::WebhookClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = WebhookClient::from_env()?;
/// let mut chat = Conversation::new(client).with_system_prompt("You explain poetry.");
///
/// let reply = chat.ask("What is this poem about?").await?;
/// println!("{}", reply.output);
/// # Ok(())
/// # }
/// ```
pub struct Conversation<R: Relay> {
    relay: R,
    client_id: String,
    meta: Option<Meta>,
    messages: Vec<ConversationMessage>,
}

impl<R: Relay> Conversation<R> {
    /// Start a conversation with a random client id
    pub fn new(relay: R) -> Self {
        Self::with_client_id(relay, Uuid::new_v4().to_string())
    }

    /// Start a conversation with a given client id
    pub fn with_client_id(relay: R, client_id: impl Into<String>) -> Self {
        Self {
            relay,
            client_id: client_id.into(),
            meta: None,
            messages: Vec::new(),
        }
    }

    /// Seed the history with a system message
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.messages.push(ConversationMessage::system(prompt).stamped());
        self
    }

    /// Attach a meta field sent with every turn
    pub fn with_meta(mut self, key: impl Into<String>, value: Value) -> Self {
        self.meta
            .get_or_insert_with(Meta::new)
            .insert(key.into(), value);
        self
    }

    /// The session identifier sent as `clientId`
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// The history, oldest first
    pub fn messages(&self) -> &[ConversationMessage] {
        &self.messages
    }

    /// The underlying relay
    pub fn relay(&self) -> &R {
        &self.relay
    }

    /// Drop the history but keep the system prompt
    pub fn reset(&mut self) {
        self.messages.retain(|m| m.role == Role::System);
        debug!("Reset conversation {}", self.client_id);
    }

    /// Send one user turn and record the reply
    pub async fn ask(&mut self, text: impl Into<String>) -> Result<ChatResult> {
        self.push_user(text);
        self.resend().await
    }

    /// Like [`ask`](Self::ask), abortable through `signal`
    pub async fn ask_with_cancel(
        &mut self,
        text: impl Into<String>,
        signal: CancelSignal,
    ) -> Result<ChatResult> {
        self.push_user(text);
        let request = self.request();
        let result = self.relay.send_with_cancel(&request, signal).await?;
        self.record_reply(&result);
        Ok(result)
    }

    /// Relay the current history again without adding a user message
    pub async fn resend(&mut self) -> Result<ChatResult> {
        let request = self.request();
        let result = self.relay.send(&request).await?;
        self.record_reply(&result);
        Ok(result)
    }

    /// The request the next turn would send
    pub fn request(&self) -> ChatRequest {
        ChatRequest {
            client_id: self.client_id.clone(),
            messages: self.messages.clone(),
            meta: self.meta.clone(),
        }
    }

    fn push_user(&mut self, text: impl Into<String>) {
        self.messages.push(ConversationMessage::user(text).stamped());
        trace!(
            "Conversation {} now has {} messages",
            self.client_id,
            self.messages.len()
        );
    }

    fn record_reply(&mut self, result: &ChatResult) {
        self.messages
            .push(ConversationMessage::assistant(result.output.clone()).stamped());
    }
}

//! Webhook relay client
//!
//! Ties the pieces together: validate and encode the conversation, resolve
//! the endpoint, perform one exchange and normalize the reply.

use crate::config::WebhookConfig;
use crate::converter::WebhookConverter;
use crate::endpoint::{EndpointResolver, EndpointSource};
use crate::http::{HttpClient, ReqwestClient};
use crate::parser::ReplyNormalizer;
use crate::traits::{RequestConverter, ResponseParser};
use crate::transport;
use async_trait::async_trait;
use chatrelay_core::{CancelSignal, ChatRequest, ChatResult, Error, Relay, Result};
use chatrelay_state::{EndpointStore, FileStore, MemoryStore};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Client that relays conversations to a workflow webhook
///
/// # Example
///
/// ```no_run
/// use chatrelay_core::{ChatRequest, ConversationMessage, Relay};
/// use chatrelay_webhook::WebhookClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = WebhookClient::from_env()?;
/// client.set_endpoint("https://flows.example.com/webhook/ai-chat").await;
///
/// let request = ChatRequest::builder()
///     .client_id("session-1")
///     .message(ConversationMessage::user("Explain this poem"))
///     .model("deepseek-chat")
///     .build();
///
/// let result = client.send(&request).await?;
/// println!("{}", result.output);
/// # Ok(())
/// # }
/// ```
pub struct WebhookClient {
    config: WebhookConfig,
    resolver: EndpointResolver,
    http: Arc<dyn HttpClient>,
    converter: WebhookConverter,
    normalizer: ReplyNormalizer,
}

impl WebhookClient {
    /// Create a client from its collaborators
    pub fn new(
        config: WebhookConfig,
        http: Arc<dyn HttpClient>,
        store: Arc<dyn EndpointStore>,
    ) -> Self {
        Self {
            resolver: EndpointResolver::new(&config, store),
            converter: WebhookConverter::new(config.wire_format),
            normalizer: ReplyNormalizer::for_format(config.wire_format),
            http,
            config,
        }
    }

    /// Create a client configured from the process environment, persisting
    /// overrides in the platform config directory
    pub fn from_env() -> Result<Self> {
        Self::builder().config(WebhookConfig::from_env()).build()
    }

    /// Create a new client builder
    pub fn builder() -> WebhookClientBuilder {
        WebhookClientBuilder::new()
    }

    /// The active configuration
    pub fn config(&self) -> &WebhookConfig {
        &self.config
    }

    /// Replace the reply normalizer
    pub fn with_normalizer(mut self, normalizer: ReplyNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// The URL the next send would use
    pub async fn endpoint(&self) -> String {
        self.resolver.resolve().await
    }

    /// The URL the next send would use and where it came from
    pub async fn endpoint_with_source(&self) -> (String, EndpointSource) {
        self.resolver.resolve_with_source().await
    }

    /// Override the webhook URL for this process and future runs
    pub async fn set_endpoint(&self, url: impl Into<String>) {
        self.resolver.set_endpoint(url).await;
    }

    /// Which tier the next send would take its URL from
    pub async fn endpoint_source(&self) -> EndpointSource {
        self.resolver.source().await
    }

    /// Drop the runtime override, falling back to the persisted one if any
    pub async fn clear_override(&self) {
        self.resolver.clear_override().await;
    }

    /// Drop the runtime override and delete the persisted copy
    pub async fn forget_persisted(&self) {
        self.resolver.forget_persisted().await;
    }

    async fn dispatch(
        &self,
        request: &ChatRequest,
        signal: Option<CancelSignal>,
    ) -> Result<ChatResult> {
        let body = self.converter.convert_request(request)?;

        let (url, source) = self.resolver.resolve_with_source().await;
        info!(%url, %source, "Using webhook url");
        debug!(%body, "Sending webhook request");

        let payload = match signal {
            Some(signal) => {
                transport::fetch_json_cancellable(self.http.as_ref(), &url, &body, signal).await
            }
            None => transport::fetch_json(self.http.as_ref(), &url, &body).await,
        };

        let result = payload.and_then(|payload| {
            debug!(%payload, "Received webhook response");
            self.normalizer.parse_response(&payload)
        });

        match &result {
            Ok(_) => {}
            Err(Error::Cancelled) => info!("Webhook request cancelled"),
            Err(e) => error!(
                error = %e,
                status = ?e.status(),
                body = ?e.body(),
                "Webhook request failed"
            ),
        }
        result
    }
}

#[async_trait]
impl Relay for WebhookClient {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResult> {
        self.dispatch(request, None).await
    }

    async fn send_with_cancel(
        &self,
        request: &ChatRequest,
        signal: CancelSignal,
    ) -> Result<ChatResult> {
        self.dispatch(request, Some(signal)).await
    }
}

/// Builder for [`WebhookClient`]
#[derive(Default)]
pub struct WebhookClientBuilder {
    config: Option<WebhookConfig>,
    http: Option<Arc<dyn HttpClient>>,
    store: Option<Arc<dyn EndpointStore>>,
}

impl WebhookClientBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the configuration
    pub fn config(mut self, config: WebhookConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Use a custom HTTP client
    pub fn with_client(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.http = Some(client);
        self
    }

    /// Use a custom override store
    pub fn with_store(mut self, store: Arc<dyn EndpointStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Build the client
    ///
    /// Without an explicit store the platform config directory is used;
    /// if that is unavailable overrides are kept in memory only.
    pub fn build(self) -> Result<WebhookClient> {
        let config = self.config.unwrap_or_default();

        let http: Arc<dyn HttpClient> = match self.http {
            Some(http) => http,
            None => Arc::new(ReqwestClient::with_timeout(config.timeout)?),
        };

        let store: Arc<dyn EndpointStore> = match self.store {
            Some(store) => store,
            None => match FileStore::default_location() {
                Ok(store) => Arc::new(store),
                Err(e) => {
                    warn!("Persisted webhook url unavailable, using memory store: {}", e);
                    Arc::new(MemoryStore::new())
                }
            },
        };

        Ok(WebhookClient::new(config, http, store))
    }
}

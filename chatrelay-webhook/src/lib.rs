//! Webhook relay client for no-code workflow automation endpoints
//!
//! Sends a conversation to a remote workflow webhook with a single POST and
//! normalizes whatever reply shape comes back into a
//! [`ChatResult`](chatrelay_core::ChatResult).

#![warn(missing_docs)]

pub mod client;
pub mod config;
pub mod config_builder;
pub mod constants;
pub mod converter;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod parser;
pub mod traits;
pub mod transport;

pub use client::{WebhookClient, WebhookClientBuilder};
pub use config::{WebhookConfig, WireFormat};
pub use converter::WebhookConverter;
pub use endpoint::{EndpointResolver, EndpointSource};
pub use http::{HttpClient, HttpResponse, ReqwestClient};
pub use parser::{FailureProbe, ReplyExtractor, ReplyNormalizer};

// Re-export common traits
pub use traits::{RequestConverter, ResponseParser};

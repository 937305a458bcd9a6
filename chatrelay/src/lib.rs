//! Chatrelay - relay chat conversations to no-code workflow webhooks
//!
//! This crate packages a conversation, POSTs it to a configurable workflow
//! webhook, and normalizes whatever reply shape comes back into a single
//! [`ChatResult`] or one classified [`Error`].
//!
//! # Quick Start
//!
//! ```no_run
//! # use chatrelay::prelude::*;
//! #
//! # #[tokio::main]
//! # async fn main() -> Result<(), chatrelay::Error> {
//! #     #[cfg(feature = "webhook")]
//! #     {
//!     let client = WebhookClient::from_env()?;
//!
//!     let request = ChatRequest::builder()
//!         .client_id("session-1")
//!         .message(ConversationMessage::user("Hello, world!"))
//!         .build();
//!
//!     let result = client.send(&request).await?;
//!     println!("{}", result.output);
//! #     }
//! #     Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Re-export core types
pub use chatrelay_core::*;

#[cfg(feature = "webhook")]
#[cfg_attr(docsrs, doc(cfg(feature = "webhook")))]
pub mod webhook {
    //! Webhook transport, endpoint resolution and reply normalization
    pub use chatrelay_webhook::*;
}

#[cfg(feature = "state")]
#[cfg_attr(docsrs, doc(cfg(feature = "state")))]
pub mod state {
    //! Endpoint override persistence
    pub use chatrelay_state::*;
}

#[cfg(feature = "client")]
#[cfg_attr(docsrs, doc(cfg(feature = "client")))]
pub mod client {
    //! History-keeping conversations
    pub use chatrelay_client::*;
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use chatrelay_core::{
        cancel_pair, CancelHandle, CancelSignal, ChatRequest, ChatResult, ConversationMessage,
        Error, Relay, Role,
    };

    #[cfg(feature = "webhook")]
    pub use chatrelay_webhook::{WebhookClient, WebhookConfig, WireFormat};

    #[cfg(feature = "client")]
    pub use chatrelay_client::Conversation;
}

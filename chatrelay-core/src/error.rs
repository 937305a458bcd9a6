//! Error types for the chatrelay client

use std::error::Error as StdError;
use thiserror::Error;

/// The closed set of failures a relay send can surface
///
/// Every variant renders a short message suitable for showing to an end
/// user. Diagnostic details (status code, raw body, underlying error) are
/// kept on the variant and exposed through accessors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The conversation was rejected before any network I/O
    #[error("Validation error: {0}")]
    Validation(String),

    /// The caller aborted the exchange
    #[error("Request cancelled")]
    Cancelled,

    /// Network-level failure or a non-2xx HTTP status
    #[error("{message}")]
    Transport {
        /// User-facing message, tiered by status code
        message: String,
        /// HTTP status code, if a response was received
        status: Option<u16>,
        /// Raw response body, if one could be read
        body: Option<String>,
        /// Underlying error if available
        #[source]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },

    /// The remote workflow explicitly reported a business-logic failure
    #[error("Workflow error: {0}")]
    Workflow(String),

    /// The exchange succeeded but no usable reply text could be extracted
    #[error("Workflow returned no usable reply")]
    EmptyReply,
}

impl Error {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a workflow error
    pub fn workflow(msg: impl Into<String>) -> Self {
        Self::Workflow(msg.into())
    }

    /// HTTP status preserved on a transport error
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => *status,
            _ => None,
        }
    }

    /// Raw response body preserved on a transport error
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Transport { body, .. } => body.as_deref(),
            _ => None,
        }
    }

    /// Whether this error is the result of caller cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Result type alias for chatrelay operations
pub type Result<T> = std::result::Result<T, Error>;

//! Error types for endpoint storage

use std::io;
use thiserror::Error;

/// Result type for state operations
pub type StateResult<T> = Result<T, StateError>;

/// Errors that can occur while reading or writing a persisted override
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StateError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl StateError {
    /// Create a configuration error
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StateError::configuration("no config directory");
        assert_eq!(err.to_string(), "Configuration error: no config directory");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let state_err: StateError = io_err.into();

        match state_err {
            StateError::Io(err) => assert_eq!(err.kind(), io::ErrorKind::PermissionDenied),
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<String>("invalid").unwrap_err();
        let state_err: StateError = json_err.into();

        assert!(matches!(state_err, StateError::Serialization(_)));
    }
}

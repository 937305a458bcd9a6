//! Classification of transport failures into user-facing errors

use chatrelay_core::Error;

/// User-facing message for a non-2xx status
pub fn status_message(status: u16) -> String {
    match status {
        401 => "Authentication failed, check the webhook credentials".to_string(),
        404 => "Workflow endpoint not found, check the configured webhook URL".to_string(),
        429 => "Rate limited by the workflow service, try again later".to_string(),
        500 => "Workflow server error, try again later".to_string(),
        other => format!("Network request failed (HTTP {})", other),
    }
}

/// Convert a non-2xx response into a transport error
///
/// The status and the raw body are kept on the error for diagnostics.
pub fn classify_status(status: u16, body: String) -> Error {
    Error::Transport {
        message: status_message(status),
        status: Some(status),
        body: (!body.is_empty()).then_some(body),
        source: None,
    }
}

/// Convert a network error into a transport error
pub fn network_error(error: reqwest::Error) -> Error {
    let message = if error.is_timeout() {
        "Network request timed out".to_string()
    } else {
        format!("Network request failed: {}", error)
    };

    Error::Transport {
        message,
        status: error.status().map(|s| s.as_u16()),
        body: None,
        source: Some(Box::new(error)),
    }
}

//! One cancellable JSON exchange with the webhook

use crate::error::classify_status;
use crate::http::HttpClient;
use chatrelay_core::{CancelSignal, Error, Result};
use serde_json::{Map, Value};
use tracing::debug;

/// Decode a reply body, tolerating non-JSON text
///
/// Anything that is not valid JSON becomes an empty object; whether that
/// carries a usable reply is decided by the normalizer.
pub fn decode_body(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|e| {
        debug!("Reply body is not JSON ({}), treating as empty object", e);
        Value::Object(Map::new())
    })
}

/// POST `body` and decode the reply
///
/// A non-2xx status becomes a classified [`Error::Transport`].
pub async fn fetch_json(client: &dyn HttpClient, url: &str, body: &Value) -> Result<Value> {
    let response = client.post_json(url, body).await?;

    if !response.is_success() {
        return Err(classify_status(response.status, response.body));
    }

    Ok(decode_body(&response.body))
}

/// Like [`fetch_json`], aborted when `signal` fires
///
/// The pending exchange is dropped on cancellation, which aborts the
/// underlying request. Once cancellation has been requested the result is
/// always [`Error::Cancelled`].
pub async fn fetch_json_cancellable(
    client: &dyn HttpClient,
    url: &str,
    body: &Value,
    mut signal: CancelSignal,
) -> Result<Value> {
    if signal.is_cancelled() {
        return Err(Error::Cancelled);
    }

    let result = tokio::select! {
        biased;
        () = signal.cancelled() => Err(Error::Cancelled),
        result = fetch_json(client, url, body) => result,
    };

    if signal.is_cancelled() {
        return Err(Error::Cancelled);
    }
    result
}

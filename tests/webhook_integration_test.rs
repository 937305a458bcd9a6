//! Integration tests for the webhook client against a mock workflow server

use chatrelay::prelude::*;
use chatrelay::state::{FileStore, MemoryStore};
use chatrelay::webhook::EndpointSource;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const HOOK_PATH: &str = "/webhook/ai-chat";

fn hook_url(server: &MockServer) -> String {
    format!("{}{}", server.uri(), HOOK_PATH)
}

fn client_for(server: &MockServer, format: WireFormat) -> WebhookClient {
    let config = WebhookConfig::builder()
        .env_url(hook_url(server))
        .wire_format(format)
        .timeout(Duration::from_secs(10))
        .build();

    WebhookClient::builder()
        .config(config)
        .with_store(Arc::new(MemoryStore::new()))
        .build()
        .unwrap()
}

fn poetry_request() -> ChatRequest {
    ChatRequest::builder()
        .client_id("test-client-1")
        .message(ConversationMessage::user("Explain the poem Quiet Night Thoughts"))
        .model("deepseek-chat")
        .temperature(0.7)
        .system("You explain classical poetry.")
        .meta_field("debug", json!(true))
        .build()
}

async fn mount_reply(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path(HOOK_PATH))
        .respond_with(template)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_context_exchange() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(HOOK_PATH))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "clientId": "test-client-1",
            "messages": [
                { "role": "user", "content": "Explain the poem Quiet Night Thoughts" }
            ],
            "model": "deepseek-chat",
            "temperature": 0.7,
            "system": "You explain classical poetry."
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "reply": "  It is about longing for home.  ",
            "clientId": "test-client-1",
            "model": "deepseek-chat",
            "timestamp": 1_700_000_000_000_i64
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, WireFormat::FullContext);
    let result = client.send(&poetry_request()).await.unwrap();

    assert_eq!(result.output, "It is about longing for home.");
    let aux = result.auxiliary.unwrap();
    assert_eq!(aux.session_id.as_deref(), Some("test-client-1"));
    assert_eq!(aux.model.as_deref(), Some("deepseek-chat"));
    assert_eq!(aux.timestamp, Some(json!(1_700_000_000_000_i64)));
}

#[tokio::test]
async fn test_latest_message_exchange() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(HOOK_PATH))
        .and(body_json(json!({ "message": "second question" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "output": "answer" })))
        .expect(1)
        .mount(&server)
        .await;

    let request = ChatRequest::new(
        "c",
        vec![
            ConversationMessage::user("first question"),
            ConversationMessage::assistant("first answer"),
            ConversationMessage::user("  second question "),
        ],
    );

    let client = client_for(&server, WireFormat::LatestMessage);
    assert_eq!(client.send(&request).await.unwrap().output, "answer");
}

#[tokio::test]
async fn test_latest_message_workflow_error_reply() {
    let server = MockServer::start().await;
    mount_reply(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({ "message": "Error in workflow" })),
    )
    .await;

    let client = client_for(&server, WireFormat::LatestMessage);
    let error = client.send(&poetry_request()).await.unwrap_err();
    assert!(matches!(error, Error::Workflow(_)));
}

#[tokio::test]
async fn test_bare_string_reply() {
    let server = MockServer::start().await;
    mount_reply(&server, ResponseTemplate::new(200).set_body_json(json!(" plain "))).await;

    let client = client_for(&server, WireFormat::FullContext);
    assert_eq!(client.send(&poetry_request()).await.unwrap().output, "plain");
}

#[tokio::test]
async fn test_empty_messages_never_hit_the_network() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "output": "x" })))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server, WireFormat::FullContext);
    let error = client
        .send(&ChatRequest::new("c", vec![]))
        .await
        .unwrap_err();

    assert!(matches!(error, Error::Validation(_)));
    assert_eq!(server.received_requests().await.unwrap().len(), 0);
}

#[tokio::test]
async fn test_workflow_failure_reply() {
    let server = MockServer::start().await;
    mount_reply(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({ "ok": false, "error": "boom" })),
    )
    .await;

    let client = client_for(&server, WireFormat::FullContext);
    let error = client.send(&poetry_request()).await.unwrap_err();

    assert!(matches!(error, Error::Workflow(_)));
    assert!(error.to_string().contains("boom"));
}

#[tokio::test]
async fn test_empty_object_reply() {
    let server = MockServer::start().await;
    mount_reply(&server, ResponseTemplate::new(200).set_body_json(json!({}))).await;

    let client = client_for(&server, WireFormat::FullContext);
    let error = client.send(&poetry_request()).await.unwrap_err();
    assert!(matches!(error, Error::EmptyReply));
}

#[tokio::test]
async fn test_non_json_reply_is_empty_reply() {
    let server = MockServer::start().await;
    mount_reply(
        &server,
        ResponseTemplate::new(200).set_body_string("Workflow was started"),
    )
    .await;

    let client = client_for(&server, WireFormat::FullContext);
    let error = client.send(&poetry_request()).await.unwrap_err();
    assert!(matches!(error, Error::EmptyReply));
}

#[tokio::test]
async fn test_rate_limited_status() {
    let server = MockServer::start().await;
    mount_reply(
        &server,
        ResponseTemplate::new(429).set_body_string("{\"message\":\"quota exceeded\"}"),
    )
    .await;

    let client = client_for(&server, WireFormat::FullContext);
    let error = client.send(&poetry_request()).await.unwrap_err();

    assert!(matches!(error, Error::Transport { .. }));
    assert_eq!(error.status(), Some(429));
    assert_eq!(error.body(), Some("{\"message\":\"quota exceeded\"}"));
    assert!(error.to_string().to_lowercase().contains("rate limited"));
}

#[tokio::test]
async fn test_status_tiers() {
    for (status, needle) in [
        (401, "authentication"),
        (404, "not found"),
        (500, "server error"),
        (503, "http 503"),
    ] {
        let server = MockServer::start().await;
        mount_reply(&server, ResponseTemplate::new(status)).await;

        let client = client_for(&server, WireFormat::FullContext);
        let error = client.send(&poetry_request()).await.unwrap_err();

        assert_eq!(error.status(), Some(status));
        assert!(
            error.to_string().to_lowercase().contains(needle),
            "status {} produced {:?}",
            status,
            error.to_string()
        );
    }
}

#[tokio::test]
async fn test_unreachable_endpoint_is_transport_error() {
    let config = WebhookConfig::builder()
        .env_url("http://127.0.0.1:1/webhook/ai-chat")
        .timeout(Duration::from_secs(2))
        .build();
    let client = WebhookClient::builder()
        .config(config)
        .with_store(Arc::new(MemoryStore::new()))
        .build()
        .unwrap();

    let error = client.send(&poetry_request()).await.unwrap_err();
    assert!(matches!(error, Error::Transport { status: None, .. }));
}

#[tokio::test]
async fn test_cancel_in_flight_request() {
    let server = MockServer::start().await;
    mount_reply(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(json!({ "output": "too late" }))
            .set_delay(Duration::from_secs(5)),
    )
    .await;

    let client = client_for(&server, WireFormat::FullContext);
    let (handle, signal) = cancel_pair();

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        handle.cancel();
    });

    let result = tokio::time::timeout(
        Duration::from_secs(2),
        client.send_with_cancel(&poetry_request(), signal),
    )
    .await
    .expect("cancelled send must resolve promptly");

    assert!(matches!(result, Err(Error::Cancelled)));
}

#[tokio::test]
async fn test_runtime_override_beats_environment() {
    let env_server = MockServer::start().await;
    let override_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "output": "env" })))
        .mount(&env_server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "output": "override" })))
        .mount(&override_server)
        .await;

    let client = client_for(&env_server, WireFormat::FullContext);
    assert_eq!(client.send(&poetry_request()).await.unwrap().output, "env");

    client.set_endpoint(hook_url(&override_server)).await;
    assert_eq!(client.send(&poetry_request()).await.unwrap().output, "override");

    client.clear_override().await;
    assert_eq!(client.send(&poetry_request()).await.unwrap().output, "env");
}

#[tokio::test]
async fn test_override_persists_across_clients() {
    let server = MockServer::start().await;
    mount_reply(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({ "text": "persisted" })),
    )
    .await;

    let dir = TempDir::new().unwrap();

    {
        let first = WebhookClient::builder()
            .with_store(Arc::new(FileStore::new(dir.path()).unwrap()))
            .build()
            .unwrap();
        first.set_endpoint(hook_url(&server)).await;
    }

    let second = WebhookClient::builder()
        .with_store(Arc::new(FileStore::new(dir.path()).unwrap()))
        .build()
        .unwrap();

    assert_eq!(
        second.endpoint_with_source().await,
        (hook_url(&server), EndpointSource::Persisted)
    );
    assert_eq!(
        second.send(&poetry_request()).await.unwrap().output,
        "persisted"
    );

    second.clear_override().await;
    assert_eq!(second.endpoint_source().await, EndpointSource::Persisted);

    second.forget_persisted().await;
    let third = WebhookClient::builder()
        .with_store(Arc::new(FileStore::new(dir.path()).unwrap()))
        .build()
        .unwrap();
    assert_eq!(third.endpoint_source().await, EndpointSource::Default);
}

//! Send a short conversation to the configured workflow webhook
//!
//! Run with:
//!
//! ```text
//! CHATRELAY_WEBHOOK_URL=http://localhost:5678/webhook/ai-chat \
//! RUST_LOG=chatrelay_webhook=debug \
//! cargo run --example send_conversation -- "Explain the poem Quiet Night Thoughts"
//! ```

use chatrelay::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let question = std::env::args()
        .skip(1)
        .collect::<Vec<_>>()
        .join(" ");
    let question = if question.trim().is_empty() {
        "Hello! What can you do?".to_string()
    } else {
        question
    };

    let client = WebhookClient::from_env()?;
    let (url, source) = client.endpoint_with_source().await;
    println!("Relaying to {} ({})", url, source);

    let mut chat = Conversation::new(client)
        .with_system_prompt("You are a helpful assistant.")
        .with_meta("model", serde_json::json!("deepseek-chat"));

    let (handle, signal) = cancel_pair();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            handle.cancel();
        }
    });

    match chat.ask_with_cancel(question, signal).await {
        Ok(reply) => {
            println!("{}", reply.output);
            if let Some(aux) = reply.auxiliary {
                println!("(auxiliary: {:?})", aux);
            }
        }
        Err(Error::Cancelled) => println!("Cancelled."),
        Err(e) => {
            eprintln!("Request failed: {}", e);
            if let Some(status) = e.status() {
                eprintln!("HTTP status: {}", status);
            }
        }
    }

    Ok(())
}

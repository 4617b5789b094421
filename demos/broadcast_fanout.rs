//! Broadcast example: one live chat stream consumed by two subscribers.
//!
//! The primary subscriber prints deltas; a second subscriber attached via
//! `subscribe()` counts chunks from a separate task.
//!
//! Usage:
//!   OPENAI_API_KEY=your_key cargo run --example broadcast_fanout

use anyhow::Result;
use futures::StreamExt;
use openai_client::{BroadcastApi, ChatRequest, Config, Message, OpenAiClient, StreamEvent};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    if std::env::var("OPENAI_API_KEY").is_err() {
        eprintln!("Error: OPENAI_API_KEY environment variable is not set.");
        eprintln!("Run with: OPENAI_API_KEY=your_key cargo run --example broadcast_fanout");
        std::process::exit(1);
    }

    let client = OpenAiClient::new(Config::from_env()?)?;

    let request = ChatRequest::new("gpt-4o", vec![Message::user("Count from one to five.")]);
    let mut publisher = client.chat_completions_broadcast(request);
    let mut mirror = publisher.subscribe();

    let counter = tokio::spawn(async move {
        let mut chunks = 0usize;
        while let Some(event) = mirror.next().await {
            if let StreamEvent::Update(Ok(_)) = event {
                chunks += 1;
            }
        }
        chunks
    });

    while let Some(event) = publisher.next().await {
        match event {
            StreamEvent::Update(Ok(chunk)) => {
                print!("{}", chunk.first_delta().unwrap_or_default())
            }
            StreamEvent::Update(Err(err)) => eprintln!("\nupdate failed: {err}"),
            StreamEvent::Finished => break,
            StreamEvent::Failed(err) => {
                eprintln!("\nstream failed: {err}");
                break;
            }
        }
    }

    println!("\n\nmirror subscriber saw {} chunks", counter.await?);
    Ok(())
}

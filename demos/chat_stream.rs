//! Streaming chat completion example: prints deltas as they arrive.
//!
//! Usage:
//!   OPENAI_API_KEY=your_key cargo run --example chat_stream

use std::io::Write;

use anyhow::Result;
use futures::StreamExt;
use openai_client::{AsyncApi, ChatRequest, Config, Message, OpenAiClient};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    if std::env::var("OPENAI_API_KEY").is_err() {
        eprintln!("Error: OPENAI_API_KEY environment variable is not set.");
        eprintln!("Run with: OPENAI_API_KEY=your_key cargo run --example chat_stream");
        std::process::exit(1);
    }

    let client = OpenAiClient::new(Config::from_env()?)?;

    let request = ChatRequest::new(
        "gpt-4o",
        vec![Message::user("Tell me a two-sentence story about a lighthouse.")],
    );

    let mut stream = client.chat_completions_stream(request);
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        if let Some(delta) = chunk.first_delta() {
            print!("{delta}");
            std::io::stdout().flush()?;
        }
    }
    println!();

    Ok(())
}

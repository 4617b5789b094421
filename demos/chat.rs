//! Basic chat completion example.
//!
//! Usage:
//!   OPENAI_API_KEY=your_key cargo run --example chat

use anyhow::Result;
use openai_client::{AsyncApi, ChatRequest, Config, Message, OpenAiClient};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    if std::env::var("OPENAI_API_KEY").is_err() {
        eprintln!("Error: OPENAI_API_KEY environment variable is not set.");
        eprintln!("Run with: OPENAI_API_KEY=your_key cargo run --example chat");
        std::process::exit(1);
    }

    let client = OpenAiClient::new(Config::from_env()?)?;

    let request = ChatRequest::new(
        "gpt-4o",
        vec![
            Message::system("You are a helpful assistant."),
            Message::user("Say hello in one short sentence."),
        ],
    )
    .temperature(0.7)
    .max_tokens(100);

    let completion = client.chat_completions(request).await?;

    println!("Response:\n{}", completion.first_text().unwrap_or_default());
    if let Some(usage) = completion.usage {
        println!("\nUsage: {usage:?}");
    }

    Ok(())
}

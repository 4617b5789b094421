//! # openai-client
//!
//! OpenAI REST API 的异步 Rust 客户端，支持回调、async/await 与广播三种消费方式。
//!
//! An async Rust client for the OpenAI REST API with three consumption
//! surfaces: callback, async/await, and hot broadcast.
//!
//! ## Overview
//!
//! This library wraps the OpenAI HTTP endpoints (chat, images, embeddings,
//! models, moderations, audio) behind strongly typed requests and responses.
//! Every operation exists in a callback form ([`CallbackApi`]), an
//! async/await form ([`AsyncApi`]), and — for streamed chat — a multi-consumer
//! broadcast form ([`BroadcastApi`]). The async and broadcast surfaces are
//! blanket adapters over the callback surface, so a custom [`CallbackApi`]
//! implementation (a mock, a proxy) gets the other two for free.
//!
//! ## Key Features
//!
//! - **Unified Client**: [`OpenAiClient`] covers every supported endpoint
//! - **Tolerant Decoding**: role-discriminated messages and ordered content
//!   fallback with a precise error taxonomy via [`decode::DecodeError`]
//! - **Streaming-First**: native Server-Sent Events framing with chunk-level
//!   delivery and loss-free ordering
//! - **Broadcast**: one live chat stream fanned out to many subscribers,
//!   errors delivered as elements rather than tearing the feed down
//! - **Type-Safe Errors**: transport, decode, and configuration failures are
//!   distinct variants of [`Error`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use openai_client::{AsyncApi, ChatRequest, Config, Message, OpenAiClient};
//!
//! #[tokio::main]
//! async fn main() -> openai_client::Result<()> {
//!     let client = OpenAiClient::new(Config::new("your-api-key"))?;
//!
//!     let request = ChatRequest::new(
//!         "gpt-4o",
//!         vec![Message::user("Hello, how are you?")],
//!     );
//!     let completion = client.chat_completions(request).await?;
//!     println!("{}", completion.first_text().unwrap_or_default());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | The three API surfaces and the HTTP-backed client |
//! | [`types`] | Request and response bodies for every endpoint |
//! | [`decode`] | Discriminator dispatch and ordered-fallback decoding |
//! | [`bridge`] | Callback-to-future, -stream, and -broadcast adapters |
//! | [`transport`] | HTTP plumbing, error envelope, SSE framing |
//! | [`config`] | API key, base URL, organization, timeout |

pub mod bridge;
pub mod client;
pub mod config;
pub mod decode;
pub mod transport;
pub mod types;

// Re-export main types for convenience
pub use bridge::{ResponseBroadcast, ResponseFuture, ResponseStream, StreamEvent, Subscriber};
pub use client::{AsyncApi, BroadcastApi, CallbackApi, OpenAiClient};
pub use config::Config;
pub use decode::DecodeError;
pub use transport::TransportError;
pub use types::{
    chat::{ChatCompletion, ChatCompletionChunk, ChatRequest},
    message::{Content, Message, Role},
};

use futures::Stream;
use std::pin::Pin;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// A unified pinned, boxed stream of fallible elements
pub type BoxStream<'a, T> = Pin<Box<dyn Stream<Item = Result<T>> + Send + 'a>>;

/// Error type for the library
pub mod error;
pub use error::Error;

//! 类型系统模块：定义 OpenAI REST API 的请求与响应数据类型。
//!
//! # Types Module
//!
//! Strongly-typed request and response models for every operation the client
//! exposes. Most of this module is declarative serde mapping; the one place
//! with real decode logic is [`message`], where the wire format is
//! polymorphic (role-discriminated messages, untagged content).
//!
//! ## Submodules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`message`] | Role-discriminated messages and polymorphic content |
//! | [`chat`] | Chat completions: requests, responses, stream chunks, tools |
//! | [`images`] | Image generation, edits, and variations |
//! | [`embeddings`] | Embedding requests and vectors |
//! | [`models`] | Model listing and management |
//! | [`moderations`] | Moderation verdicts |
//! | [`audio`] | Speech synthesis, transcription, translation |
//!
//! ## Example
//!
//! ```rust
//! use openai_client::types::{ChatRequest, Content, ContentPart, Message};
//!
//! let request = ChatRequest::new(
//!     "gpt-4o",
//!     vec![
//!         Message::system("You are a helpful assistant"),
//!         Message::user(Content::parts(vec![
//!             ContentPart::text("What is in this image?"),
//!             ContentPart::image_url("https://example.com/photo.jpg"),
//!         ])),
//!     ],
//! )
//! .temperature(0.2);
//! assert_eq!(request.messages.len(), 2);
//! ```

pub mod audio;
pub mod chat;
pub mod embeddings;
pub mod images;
pub mod message;
pub mod models;
pub mod moderations;

pub use audio::{
    Speech, SpeechRequest, Transcription, TranscriptionRequest, Translation, TranslationRequest,
};
pub use chat::{
    ChatCompletion, ChatCompletionChunk, ChatRequest, Choice, ChoiceLogprobs, ChunkChoice,
    ChunkDelta, CompletionUsage, FunctionCall, FunctionCallDelta, FunctionDefinition, TokenLogprob,
    ToolCall, ToolCallDelta, ToolDefinition, TopLogprob,
};
pub use embeddings::{Embedding, EmbeddingInput, EmbeddingRequest, EmbeddingResponse, EmbeddingUsage};
pub use images::{
    ImageData, ImageEditRequest, ImageGenerationRequest, ImageVariationRequest, ImagesResponse,
};
pub use message::{
    AssistantMessage, Content, ContentPart, ImageContentPart, ImageUrl, Message, Role,
    SystemMessage, TextContentPart, ToolMessage, UserMessage,
};
pub use models::{ModelDeleted, ModelList, ModelObject};
pub use moderations::{ModerationRequest, ModerationResponse, ModerationResult};

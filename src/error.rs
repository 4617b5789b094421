//! Error types for openai-client.
//!
//! The crate-level [`Error`] wraps the two failure families this library
//! produces itself (payload decoding, configuration) plus the opaque
//! failures it forwards unchanged (transport, serialization). Decode
//! failures keep their own taxonomy in [`DecodeError`] so callers can
//! observe exactly which shape or discriminator was rejected.

use thiserror::Error;

use crate::decode::DecodeError;
use crate::transport::TransportError;

/// Unified error type for the crate.
#[derive(Error, Debug)]
pub enum Error {
    /// A polymorphic payload failed to decode. Carries the full taxonomy of
    /// discriminator and ordered-fallback failures.
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Failure reported by the HTTP transport, forwarded without
    /// reclassification.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Body (de)serialization failure outside the polymorphic decode path.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid client configuration (bad base URL, missing API key).
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The producing side of a bridge was dropped before it delivered a
    /// result, so the awaited value can never resolve.
    #[error("operation ended without delivering a result")]
    ChannelClosed,
}

impl Error {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
        }
    }
}

//! Audio speech, transcription, and translation types.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Request body for `POST /audio/speech`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechRequest {
    pub model: String,
    pub input: String,
    pub voice: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
}

impl SpeechRequest {
    pub fn new(
        model: impl Into<String>,
        input: impl Into<String>,
        voice: impl Into<String>,
    ) -> Self {
        Self {
            model: model.into(),
            input: input.into(),
            voice: voice.into(),
            response_format: None,
            speed: None,
        }
    }
}

/// Synthesized audio returned by `POST /audio/speech`. The body is raw
/// encoded audio, not JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Speech {
    pub audio: Bytes,
}

/// Multipart request for `POST /audio/transcriptions`. `file_name` matters:
/// the server detects the container format from its extension.
#[derive(Debug, Clone)]
pub struct TranscriptionRequest {
    pub file: Vec<u8>,
    pub file_name: String,
    pub model: String,
    pub language: Option<String>,
    pub prompt: Option<String>,
    pub response_format: Option<String>,
    pub temperature: Option<f64>,
}

impl TranscriptionRequest {
    pub fn new(file: Vec<u8>, file_name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            file,
            file_name: file_name.into(),
            model: model.into(),
            language: None,
            prompt: None,
            response_format: None,
            temperature: None,
        }
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

/// Response body for `POST /audio/transcriptions` (default `json` format).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcription {
    pub text: String,
}

/// Multipart request for `POST /audio/translations`.
#[derive(Debug, Clone)]
pub struct TranslationRequest {
    pub file: Vec<u8>,
    pub file_name: String,
    pub model: String,
    pub prompt: Option<String>,
    pub response_format: Option<String>,
    pub temperature: Option<f64>,
}

impl TranslationRequest {
    pub fn new(file: Vec<u8>, file_name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            file,
            file_name: file_name.into(),
            model: model.into(),
            prompt: None,
            response_format: None,
            temperature: None,
        }
    }
}

/// Response body for `POST /audio/translations`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Translation {
    pub text: String,
}

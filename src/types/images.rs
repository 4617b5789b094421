//! Image generation, edit, and variation types.

use serde::{Deserialize, Serialize};

/// Request body for `POST /images/generations`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageGenerationRequest {
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

impl ImageGenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            model: None,
            n: None,
            quality: None,
            response_format: None,
            size: None,
            style: None,
            user: None,
        }
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn n(mut self, n: u32) -> Self {
        self.n = Some(n);
        self
    }

    pub fn size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }
}

/// Multipart request for `POST /images/edits`. `image` and `mask` are raw
/// PNG bytes.
#[derive(Debug, Clone)]
pub struct ImageEditRequest {
    pub image: Vec<u8>,
    pub prompt: String,
    pub mask: Option<Vec<u8>>,
    pub model: Option<String>,
    pub n: Option<u32>,
    pub size: Option<String>,
    pub response_format: Option<String>,
    pub user: Option<String>,
}

impl ImageEditRequest {
    pub fn new(image: Vec<u8>, prompt: impl Into<String>) -> Self {
        Self {
            image,
            prompt: prompt.into(),
            mask: None,
            model: None,
            n: None,
            size: None,
            response_format: None,
            user: None,
        }
    }

    pub fn mask(mut self, mask: Vec<u8>) -> Self {
        self.mask = Some(mask);
        self
    }
}

/// Multipart request for `POST /images/variations`.
#[derive(Debug, Clone)]
pub struct ImageVariationRequest {
    pub image: Vec<u8>,
    pub model: Option<String>,
    pub n: Option<u32>,
    pub response_format: Option<String>,
    pub size: Option<String>,
    pub user: Option<String>,
}

impl ImageVariationRequest {
    pub fn new(image: Vec<u8>) -> Self {
        Self {
            image,
            model: None,
            n: None,
            response_format: None,
            size: None,
            user: None,
        }
    }
}

/// Response body shared by all three image operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImagesResponse {
    pub created: i64,
    pub data: Vec<ImageData>,
}

/// One generated image: a URL or inline base64, per `response_format`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub b64_json: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revised_prompt: Option<String>,
}

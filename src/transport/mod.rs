//! 传输模块：封装 reqwest 的 HTTP 调用、错误信封与 SSE 字节流。
//!
//! # Transport Module
//!
//! [`HttpTransport`] owns the `reqwest` client and the request plumbing
//! every operation shares: endpoint joining against the configured base URL,
//! bearer auth, the optional `OpenAI-Organization` header, and a fresh
//! `x-request-id` per call for log correlation. Response bodies come back as
//! raw [`Bytes`]; decoding into typed values happens in the client layer so
//! decode failures surface with their own taxonomy.
//!
//! Failures cross this boundary as [`TransportError`]: either the underlying
//! HTTP error or the API's error envelope (`{"error": {...}}`) parsed into
//! status, code, and message. The rest of the crate forwards transport
//! errors without reclassifying them.
//!
//! There is deliberately no retry or rate limiting here.

mod sse;

use bytes::Bytes;
use futures::StreamExt;
use reqwest::header::ACCEPT;
use reqwest::{Method, Response};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::Config;
use crate::{BoxStream, Error, Result};

/// Failure reported by the HTTP layer.
#[derive(Error, Debug)]
pub enum TransportError {
    /// Connection, TLS, timeout, or protocol failure from `reqwest`.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status with the API's error envelope.
    #[error("API error (status {status}): {message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },
}

/// Shared HTTP plumbing for every operation.
#[derive(Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    config: Config,
}

impl HttpTransport {
    pub fn new(config: Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(TransportError::Http)?;
        Ok(Self { client, config })
    }

    /// GET a JSON endpoint.
    pub async fn get(&self, path: &str) -> Result<Bytes> {
        self.send(self.request(Method::GET, path)?).await
    }

    /// DELETE a JSON endpoint.
    pub async fn delete(&self, path: &str) -> Result<Bytes> {
        self.send(self.request(Method::DELETE, path)?).await
    }

    /// POST a JSON body; returns the raw response body (JSON for most
    /// operations, encoded audio for speech).
    pub async fn post_json(&self, path: &str, body: &impl Serialize) -> Result<Bytes> {
        self.send(self.request(Method::POST, path)?.json(body)).await
    }

    /// POST a multipart form (image edits/variations, audio uploads).
    pub async fn post_multipart(&self, path: &str, form: reqwest::multipart::Form) -> Result<Bytes> {
        self.send(self.request(Method::POST, path)?.multipart(form))
            .await
    }

    /// POST a JSON body and consume the response as a stream of SSE data
    /// frames. The returned stream ends at the `[DONE]` sentinel or EOF;
    /// mid-stream transport errors appear as `Err` elements.
    pub async fn post_stream(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<BoxStream<'static, String>> {
        let response = self
            .request(Method::POST, path)?
            .header(ACCEPT, "text/event-stream")
            .json(body)
            .send()
            .await
            .map_err(TransportError::Http)?;
        let response = check_status(response).await?;
        debug!(path, "event stream opened");
        let bytes = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(|source| Error::Transport(TransportError::Http(source))));
        Ok(sse::frame_stream(Box::pin(bytes)))
    }

    fn request(&self, method: Method, path: &str) -> Result<reqwest::RequestBuilder> {
        let url = self
            .config
            .base_url
            .join(path)
            .map_err(|source| Error::config(format!("invalid endpoint path `{path}`: {source}")))?;
        let request_id = Uuid::new_v4();
        debug!(client_request_id = %request_id, %method, path, "dispatching request");
        let mut builder = self
            .client
            .request(method, url)
            .bearer_auth(&self.config.api_key)
            .header("x-request-id", request_id.to_string());
        if let Some(organization) = &self.config.organization {
            builder = builder.header("OpenAI-Organization", organization);
        }
        Ok(builder)
    }

    async fn send(&self, builder: reqwest::RequestBuilder) -> Result<Bytes> {
        let response = builder.send().await.map_err(TransportError::Http)?;
        let response = check_status(response).await?;
        Ok(response.bytes().await.map_err(TransportError::Http)?)
    }
}

/// Turn a non-success response into [`TransportError::Api`], reading the
/// error envelope when the body carries one.
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let path = response.url().path().to_owned();
    let body = response.text().await.unwrap_or_default();
    let (message, code) = parse_error_envelope(&body);
    let message = message.unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_owned()
    });
    info!(http_status = status.as_u16(), path = %path, message = %message, "request returned error status");
    Err(TransportError::Api {
        status: status.as_u16(),
        code,
        message,
    }
    .into())
}

/// Best-effort read of `{"error": {"message": ..., "code": ...}}`.
fn parse_error_envelope(body: &str) -> (Option<String>, Option<String>) {
    let Ok(envelope) = serde_json::from_str::<Value>(body) else {
        return (None, None);
    };
    let error = &envelope["error"];
    let message = error["message"].as_str().map(str::to_owned);
    let code = error["code"].as_str().map(str::to_owned);
    (message, code)
}

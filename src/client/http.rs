//! HTTP-backed [`CallbackApi`] implementation.

use std::future::Future;
use std::sync::Arc;

use bytes::Bytes;
use futures::StreamExt;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;

use crate::bridge::{CompletionHandle, Subscriber};
use crate::client::CallbackApi;
use crate::config::Config;
use crate::transport::HttpTransport;
use crate::types::{
    ChatCompletion, ChatCompletionChunk, ChatRequest, EmbeddingRequest, EmbeddingResponse,
    ImageEditRequest, ImageGenerationRequest, ImageVariationRequest, ImagesResponse, ModelDeleted,
    ModelList, ModelObject, ModerationRequest, ModerationResponse, Speech, SpeechRequest,
    Transcription, TranscriptionRequest, Translation, TranslationRequest,
};
use crate::{BoxStream, Result};

/// OpenAI API client over HTTP.
///
/// Cheap to clone; all clones share one connection pool. Operations spawn
/// onto the ambient Tokio runtime, so the client must be used from within
/// one.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    transport: Arc<HttpTransport>,
}

impl OpenAiClient {
    pub fn new(config: Config) -> Result<Self> {
        Ok(Self {
            transport: Arc::new(HttpTransport::new(config)?),
        })
    }

    /// Build from `OPENAI_API_KEY` and friends; see [`Config::from_env`].
    pub fn from_env() -> Result<Self> {
        Self::new(Config::from_env()?)
    }

    /// Run one exchange on the runtime and resolve the completion with its
    /// outcome, whatever thread that lands on.
    fn deliver<R, Fut>(
        &self,
        completion: CompletionHandle<R>,
        exchange: impl FnOnce(Arc<HttpTransport>) -> Fut,
    ) where
        R: Send + 'static,
        Fut: Future<Output = Result<R>> + Send + 'static,
    {
        let exchange = exchange(self.transport.clone());
        tokio::spawn(async move {
            completion.resolve(exchange.await);
        });
    }
}

fn decode_body<R: DeserializeOwned>(body: &Bytes) -> Result<R> {
    Ok(serde_json::from_slice(body)?)
}

fn decode_frame(frame: &str) -> Result<ChatCompletionChunk> {
    Ok(serde_json::from_str(frame)?)
}

/// Drive a subscriber from a stream of SSE data frames.
///
/// A frame that arrives but fails to decode is delivered through
/// `on_update`, where the handle decides what an error update means. A
/// failed read is different: the exchange is over, so it goes straight to
/// `on_complete` as the failure terminal and no further frames are read.
async fn pump_frames(
    mut frames: BoxStream<'static, String>,
    subscriber: Box<dyn Subscriber<ChatCompletionChunk>>,
) {
    while let Some(frame) = frames.next().await {
        match frame {
            Ok(raw) => {
                if !subscriber.on_update(decode_frame(&raw)) {
                    // Nothing is listening anymore (or an error update
                    // already became the terminal); stop reading frames.
                    return;
                }
            }
            Err(err) => {
                subscriber.on_complete(Some(err));
                return;
            }
        }
    }
    subscriber.on_complete(None);
}

impl CallbackApi for OpenAiClient {
    fn start_chat_completions(
        &self,
        request: ChatRequest,
        completion: CompletionHandle<ChatCompletion>,
    ) {
        self.deliver(completion, |transport| async move {
            let body = transport.post_json("chat/completions", &request).await?;
            decode_body(&body)
        });
    }

    fn start_chat_completions_stream(
        &self,
        mut request: ChatRequest,
        subscriber: Box<dyn Subscriber<ChatCompletionChunk>>,
    ) {
        let transport = self.transport.clone();
        request.stream = true;
        tokio::spawn(async move {
            match transport.post_stream("chat/completions", &request).await {
                Ok(frames) => pump_frames(frames, subscriber).await,
                Err(err) => {
                    subscriber.on_complete(Some(err));
                }
            }
        });
    }

    fn start_images_generate(
        &self,
        request: ImageGenerationRequest,
        completion: CompletionHandle<ImagesResponse>,
    ) {
        self.deliver(completion, |transport| async move {
            let body = transport.post_json("images/generations", &request).await?;
            decode_body(&body)
        });
    }

    fn start_images_edit(
        &self,
        request: ImageEditRequest,
        completion: CompletionHandle<ImagesResponse>,
    ) {
        self.deliver(completion, |transport| async move {
            let body = transport
                .post_multipart("images/edits", image_edit_form(request))
                .await?;
            decode_body(&body)
        });
    }

    fn start_images_variation(
        &self,
        request: ImageVariationRequest,
        completion: CompletionHandle<ImagesResponse>,
    ) {
        self.deliver(completion, |transport| async move {
            let body = transport
                .post_multipart("images/variations", image_variation_form(request))
                .await?;
            decode_body(&body)
        });
    }

    fn start_embeddings_create(
        &self,
        request: EmbeddingRequest,
        completion: CompletionHandle<EmbeddingResponse>,
    ) {
        self.deliver(completion, |transport| async move {
            let body = transport.post_json("embeddings", &request).await?;
            decode_body(&body)
        });
    }

    fn start_models_list(&self, completion: CompletionHandle<ModelList>) {
        self.deliver(completion, |transport| async move {
            let body = transport.get("models").await?;
            decode_body(&body)
        });
    }

    fn start_models_retrieve(&self, model: String, completion: CompletionHandle<ModelObject>) {
        self.deliver(completion, |transport| async move {
            let body = transport.get(&format!("models/{model}")).await?;
            decode_body(&body)
        });
    }

    fn start_models_delete(&self, model: String, completion: CompletionHandle<ModelDeleted>) {
        self.deliver(completion, |transport| async move {
            let body = transport.delete(&format!("models/{model}")).await?;
            decode_body(&body)
        });
    }

    fn start_moderations_create(
        &self,
        request: ModerationRequest,
        completion: CompletionHandle<ModerationResponse>,
    ) {
        self.deliver(completion, |transport| async move {
            let body = transport.post_json("moderations", &request).await?;
            decode_body(&body)
        });
    }

    fn start_audio_speech(&self, request: SpeechRequest, completion: CompletionHandle<Speech>) {
        self.deliver(completion, |transport| async move {
            // The response body is raw encoded audio, not JSON.
            let audio = transport.post_json("audio/speech", &request).await?;
            Ok(Speech { audio })
        });
    }

    fn start_audio_transcriptions(
        &self,
        request: TranscriptionRequest,
        completion: CompletionHandle<Transcription>,
    ) {
        self.deliver(completion, |transport| async move {
            let body = transport
                .post_multipart("audio/transcriptions", transcription_form(request))
                .await?;
            decode_body(&body)
        });
    }

    fn start_audio_translations(
        &self,
        request: TranslationRequest,
        completion: CompletionHandle<Translation>,
    ) {
        self.deliver(completion, |transport| async move {
            let body = transport
                .post_multipart("audio/translations", translation_form(request))
                .await?;
            decode_body(&body)
        });
    }
}

fn image_edit_form(request: ImageEditRequest) -> Form {
    let ImageEditRequest {
        image,
        prompt,
        mask,
        model,
        n,
        size,
        response_format,
        user,
    } = request;
    let mut form = Form::new()
        .part("image", Part::bytes(image).file_name("image.png"))
        .text("prompt", prompt);
    if let Some(mask) = mask {
        form = form.part("mask", Part::bytes(mask).file_name("mask.png"));
    }
    if let Some(model) = model {
        form = form.text("model", model);
    }
    if let Some(n) = n {
        form = form.text("n", n.to_string());
    }
    if let Some(size) = size {
        form = form.text("size", size);
    }
    if let Some(response_format) = response_format {
        form = form.text("response_format", response_format);
    }
    if let Some(user) = user {
        form = form.text("user", user);
    }
    form
}

fn image_variation_form(request: ImageVariationRequest) -> Form {
    let ImageVariationRequest {
        image,
        model,
        n,
        response_format,
        size,
        user,
    } = request;
    let mut form = Form::new().part("image", Part::bytes(image).file_name("image.png"));
    if let Some(model) = model {
        form = form.text("model", model);
    }
    if let Some(n) = n {
        form = form.text("n", n.to_string());
    }
    if let Some(response_format) = response_format {
        form = form.text("response_format", response_format);
    }
    if let Some(size) = size {
        form = form.text("size", size);
    }
    if let Some(user) = user {
        form = form.text("user", user);
    }
    form
}

fn transcription_form(request: TranscriptionRequest) -> Form {
    let TranscriptionRequest {
        file,
        file_name,
        model,
        language,
        prompt,
        response_format,
        temperature,
    } = request;
    let mut form = Form::new()
        .part("file", Part::bytes(file).file_name(file_name))
        .text("model", model);
    if let Some(language) = language {
        form = form.text("language", language);
    }
    if let Some(prompt) = prompt {
        form = form.text("prompt", prompt);
    }
    if let Some(response_format) = response_format {
        form = form.text("response_format", response_format);
    }
    if let Some(temperature) = temperature {
        form = form.text("temperature", temperature.to_string());
    }
    form
}

fn translation_form(request: TranslationRequest) -> Form {
    let TranslationRequest {
        file,
        file_name,
        model,
        prompt,
        response_format,
        temperature,
    } = request;
    let mut form = Form::new()
        .part("file", Part::bytes(file).file_name(file_name))
        .text("model", model);
    if let Some(prompt) = prompt {
        form = form.text("prompt", prompt);
    }
    if let Some(response_format) = response_format {
        form = form.text("response_format", response_format);
    }
    if let Some(temperature) = temperature {
        form = form.text("temperature", temperature.to_string());
    }
    form
}

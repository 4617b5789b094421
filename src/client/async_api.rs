//! Async/await surface over any [`CallbackApi`].

use async_trait::async_trait;

use crate::bridge::{completion_pair, stream_pair, ResponseStream};
use crate::client::CallbackApi;
use crate::types::{
    ChatCompletion, ChatCompletionChunk, ChatRequest, EmbeddingRequest, EmbeddingResponse,
    ImageEditRequest, ImageGenerationRequest, ImageVariationRequest, ImagesResponse, ModelDeleted,
    ModelList, ModelObject, ModerationRequest, ModerationResponse, Speech, SpeechRequest,
    Transcription, TranscriptionRequest, Translation, TranslationRequest,
};
use crate::Result;

/// Awaitable version of every operation, provided for free on top of
/// [`CallbackApi`] through the single-shot bridge.
///
/// ```rust,no_run
/// use openai_client::{AsyncApi, ChatRequest, Config, Message, OpenAiClient};
///
/// # async fn run() -> openai_client::Result<()> {
/// let client = OpenAiClient::new(Config::new("sk-..."))?;
/// let reply = client
///     .chat_completions(ChatRequest::new("gpt-4o", vec![Message::user("Hello!")]))
///     .await?;
/// println!("{}", reply.first_text().unwrap_or_default());
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait AsyncApi: CallbackApi {
    async fn chat_completions(&self, request: ChatRequest) -> Result<ChatCompletion> {
        let (completion, response) = completion_pair();
        self.start_chat_completions(request, completion);
        response.await
    }

    /// Live sequence of chunks. Returns immediately; the request runs in the
    /// background and the stream ends with a clean close or a single `Err`
    /// element. Dropping the stream stops delivery.
    fn chat_completions_stream(&self, request: ChatRequest) -> ResponseStream<ChatCompletionChunk> {
        let (handle, stream) = stream_pair();
        self.start_chat_completions_stream(request, Box::new(handle));
        stream
    }

    async fn images_generate(&self, request: ImageGenerationRequest) -> Result<ImagesResponse> {
        let (completion, response) = completion_pair();
        self.start_images_generate(request, completion);
        response.await
    }

    async fn images_edit(&self, request: ImageEditRequest) -> Result<ImagesResponse> {
        let (completion, response) = completion_pair();
        self.start_images_edit(request, completion);
        response.await
    }

    async fn images_variation(&self, request: ImageVariationRequest) -> Result<ImagesResponse> {
        let (completion, response) = completion_pair();
        self.start_images_variation(request, completion);
        response.await
    }

    async fn embeddings_create(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse> {
        let (completion, response) = completion_pair();
        self.start_embeddings_create(request, completion);
        response.await
    }

    async fn models_list(&self) -> Result<ModelList> {
        let (completion, response) = completion_pair();
        self.start_models_list(completion);
        response.await
    }

    async fn models_retrieve(&self, model: String) -> Result<ModelObject> {
        let (completion, response) = completion_pair();
        self.start_models_retrieve(model, completion);
        response.await
    }

    async fn models_delete(&self, model: String) -> Result<ModelDeleted> {
        let (completion, response) = completion_pair();
        self.start_models_delete(model, completion);
        response.await
    }

    async fn moderations_create(&self, request: ModerationRequest) -> Result<ModerationResponse> {
        let (completion, response) = completion_pair();
        self.start_moderations_create(request, completion);
        response.await
    }

    async fn audio_speech(&self, request: SpeechRequest) -> Result<Speech> {
        let (completion, response) = completion_pair();
        self.start_audio_speech(request, completion);
        response.await
    }

    async fn audio_transcriptions(&self, request: TranscriptionRequest) -> Result<Transcription> {
        let (completion, response) = completion_pair();
        self.start_audio_transcriptions(request, completion);
        response.await
    }

    async fn audio_translations(&self, request: TranslationRequest) -> Result<Translation> {
        let (completion, response) = completion_pair();
        self.start_audio_translations(request, completion);
        response.await
    }
}

#[async_trait]
impl<C: CallbackApi + ?Sized> AsyncApi for C {}

//! The callback-style operation surface.

use crate::bridge::{CompletionHandle, Subscriber};
use crate::types::{
    ChatCompletion, ChatCompletionChunk, ChatRequest, EmbeddingRequest, EmbeddingResponse,
    ImageEditRequest, ImageGenerationRequest, ImageVariationRequest, ImagesResponse, ModelDeleted,
    ModelList, ModelObject, ModerationRequest, ModerationResponse, Speech, SpeechRequest,
    Transcription, TranscriptionRequest, Translation, TranslationRequest,
};

/// Every API operation in fire-and-deliver form.
///
/// Each method returns immediately; the result arrives later through the
/// handle, possibly from another thread. Single-result operations resolve a
/// [`CompletionHandle`] exactly once. The streaming operation drives a
/// [`Subscriber`]: zero or more updates in delivery order, then one
/// terminal.
///
/// Most callers want the higher-level surfaces layered on top of this
/// trait — [`AsyncApi`](crate::client::AsyncApi) for async/await and
/// [`BroadcastApi`](crate::client::BroadcastApi) for hot multi-subscriber
/// streams. Implementing `CallbackApi` (for a mock, a replay harness, a
/// different transport) is enough to get both for free.
pub trait CallbackApi: Send + Sync {
    fn start_chat_completions(
        &self,
        request: ChatRequest,
        completion: CompletionHandle<ChatCompletion>,
    );

    /// Stream a chat completion. The implementation must set the request's
    /// `stream` flag and honor [`Subscriber::on_update`]'s return value by
    /// ceasing delivery once it reports `false`.
    fn start_chat_completions_stream(
        &self,
        request: ChatRequest,
        subscriber: Box<dyn Subscriber<ChatCompletionChunk>>,
    );

    fn start_images_generate(
        &self,
        request: ImageGenerationRequest,
        completion: CompletionHandle<ImagesResponse>,
    );

    fn start_images_edit(
        &self,
        request: ImageEditRequest,
        completion: CompletionHandle<ImagesResponse>,
    );

    fn start_images_variation(
        &self,
        request: ImageVariationRequest,
        completion: CompletionHandle<ImagesResponse>,
    );

    fn start_embeddings_create(
        &self,
        request: EmbeddingRequest,
        completion: CompletionHandle<EmbeddingResponse>,
    );

    fn start_models_list(&self, completion: CompletionHandle<ModelList>);

    fn start_models_retrieve(&self, model: String, completion: CompletionHandle<ModelObject>);

    fn start_models_delete(&self, model: String, completion: CompletionHandle<ModelDeleted>);

    fn start_moderations_create(
        &self,
        request: ModerationRequest,
        completion: CompletionHandle<ModerationResponse>,
    );

    fn start_audio_speech(&self, request: SpeechRequest, completion: CompletionHandle<Speech>);

    fn start_audio_transcriptions(
        &self,
        request: TranscriptionRequest,
        completion: CompletionHandle<Transcription>,
    );

    fn start_audio_translations(
        &self,
        request: TranslationRequest,
        completion: CompletionHandle<Translation>,
    );
}

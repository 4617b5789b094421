//! Hot-broadcast surface over any [`CallbackApi`].

use crate::bridge::{broadcast_pair, ResponseBroadcast, DEFAULT_BROADCAST_CAPACITY};
use crate::client::CallbackApi;
use crate::types::{ChatCompletionChunk, ChatRequest};

/// Multi-subscriber streaming, provided for free on top of [`CallbackApi`]
/// through the broadcast bridge.
///
/// Unlike [`AsyncApi::chat_completions_stream`](crate::client::AsyncApi),
/// per-update errors are ordinary elements here and the stream keeps going;
/// only the terminal event ends it. Extra subscribers attach hot via
/// [`ResponseBroadcast::subscribe`].
pub trait BroadcastApi: CallbackApi {
    fn chat_completions_broadcast(
        &self,
        request: ChatRequest,
    ) -> ResponseBroadcast<ChatCompletionChunk> {
        self.chat_completions_broadcast_with_capacity(request, DEFAULT_BROADCAST_CAPACITY)
    }

    /// Same as [`chat_completions_broadcast`](Self::chat_completions_broadcast)
    /// with an explicit per-subscriber buffer capacity.
    fn chat_completions_broadcast_with_capacity(
        &self,
        request: ChatRequest,
        capacity: usize,
    ) -> ResponseBroadcast<ChatCompletionChunk> {
        let (handle, publisher) = broadcast_pair(capacity);
        self.start_chat_completions_stream(request, Box::new(handle));
        publisher
    }
}

impl<C: CallbackApi + ?Sized> BroadcastApi for C {}

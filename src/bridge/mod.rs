//! 桥接模块：把回调式交付转换为 Future、Stream 与热广播。
//!
//! # Bridge Module
//!
//! The transport underneath this crate delivers results through callbacks:
//! single-result operations fire one completion callback, streaming
//! operations fire a per-update callback zero or more times and then exactly
//! one terminal callback. This module adapts those delivery shapes into the
//! three consumption models the public API exposes:
//!
//! | Adapter | Produced interface | Semantics |
//! |---------|--------------------|-----------|
//! | [`completion_pair`] | [`ResponseFuture`] | one deferred value, resolved at most once |
//! | [`stream_pair`] | [`ResponseStream`] | ordered live sequence, error ends it |
//! | [`broadcast_pair`] | [`ResponseBroadcast`] | hot multi-subscriber stream, errors are elements |
//!
//! Every pair is single-use and independent: each wrapped call creates its
//! own handle/consumer pair and no state is shared across calls. Handles are
//! safe to fire from any thread, never block the caller, and tolerate both a
//! vanished consumer (forwarding simply stops) and redundant terminal calls
//! (only the first one counts).
//!
//! The two streaming handles share the [`Subscriber`] delivery contract so
//! the transport can drive either one through the same loop; they differ in
//! what an error update means (see [`Subscriber::on_update`]).

mod broadcast;
mod completion;
mod stream;

pub use broadcast::{
    broadcast_pair, BroadcastHandle, ResponseBroadcast, SharedError, StreamEvent, Subscription,
    DEFAULT_BROADCAST_CAPACITY,
};
pub use completion::{completion_pair, CompletionHandle, ResponseFuture};
pub use stream::{stream_pair, ResponseStream, StreamHandle};

use crate::Result;

/// Delivery interface a streaming producer drives.
///
/// Implemented by [`StreamHandle`] (live sequence) and [`BroadcastHandle`]
/// (hot broadcast). Producers call [`on_update`](Self::on_update) once per
/// update in delivery order, then [`on_complete`](Self::on_complete) exactly
/// once; the handles enforce the exactly-once terminal even if the producer
/// misbehaves.
pub trait Subscriber<T>: Send {
    /// Forward one update.
    ///
    /// Returns `false` once nothing further can be delivered: the consumer
    /// is gone, the terminal already fired, or — for the live sequence,
    /// which has no non-terminal error elements — this update was an error
    /// and therefore became the terminal. A producer should stop when it
    /// sees `false`.
    fn on_update(&self, update: Result<T>) -> bool;

    /// Deliver the terminal signal: clean end (`None`) or failure (`Some`).
    ///
    /// Only the first terminal has any effect; returns `true` for that
    /// effective call and `false` for every later one.
    fn on_complete(&self, error: Option<crate::Error>) -> bool;
}

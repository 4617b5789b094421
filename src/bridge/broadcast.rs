//! Hot broadcast bridge: update/terminal callbacks to a multi-subscriber stream.

use std::pin::Pin;
use std::sync::{Arc, Mutex, OnceLock};
use std::task::{Context, Poll};

use futures::stream::{self, Stream};
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tracing::warn;

use crate::bridge::Subscriber;
use crate::{Error, Result};

/// Buffered events per subscriber before a slow one starts losing updates.
pub const DEFAULT_BROADCAST_CAPACITY: usize = 256;

/// Errors cross subscriber boundaries behind an `Arc` so events stay `Clone`.
pub type SharedError = Arc<Error>;

/// One element observed by a broadcast subscriber.
///
/// Unlike the live sequence, an error update here is an ordinary element
/// ([`StreamEvent::Update`] with `Err`) and the stream continues; only
/// [`StreamEvent::Finished`] and [`StreamEvent::Failed`] are terminal.
#[derive(Debug, Clone)]
pub enum StreamEvent<T> {
    /// One forwarded update, success or failure.
    Update(std::result::Result<T, SharedError>),
    /// Clean end of the broadcast.
    Finished,
    /// The broadcast ended with a failure.
    Failed(SharedError),
}

impl<T> StreamEvent<T> {
    pub fn is_terminal(&self) -> bool {
        matches!(self, StreamEvent::Finished | StreamEvent::Failed(_))
    }
}

/// Create a connected handle/publisher pair for one streaming operation.
///
/// The publisher itself is a stream (the primary subscription, attached from
/// the very first update) and can hand out further hot subscriptions via
/// [`ResponseBroadcast::subscribe`]. `capacity` bounds the per-subscriber
/// buffer; a subscriber that falls further behind is skipped forward and the
/// dropped count is logged at `warn`.
pub fn broadcast_pair<T: Clone + Send + 'static>(
    capacity: usize,
) -> (BroadcastHandle<T>, ResponseBroadcast<T>) {
    let (tx, primary) = broadcast::channel(capacity.max(1));
    let terminal = Arc::new(OnceLock::new());
    let handle = BroadcastHandle {
        tx: Mutex::new(Some(tx.clone())),
        terminal: terminal.clone(),
    };
    let publisher = ResponseBroadcast {
        primary: Subscription::live(primary),
        tx,
        terminal,
    };
    (handle, publisher)
}

/// Producer side of a hot broadcast.
#[derive(Debug)]
pub struct BroadcastHandle<T> {
    tx: Mutex<Option<broadcast::Sender<StreamEvent<T>>>>,
    terminal: Arc<OnceLock<Option<SharedError>>>,
}

impl<T: Clone + Send + 'static> Subscriber<T> for BroadcastHandle<T> {
    fn on_update(&self, update: Result<T>) -> bool {
        if let Ok(slot) = self.tx.lock() {
            if let Some(tx) = slot.as_ref() {
                // Fails only when no receiver exists anymore, meaning the
                // publisher and every subscription were dropped.
                return tx.send(StreamEvent::Update(update.map_err(Arc::new))).is_ok();
            }
        }
        false
    }

    fn on_complete(&self, error: Option<Error>) -> bool {
        if let Ok(mut slot) = self.tx.lock() {
            if let Some(tx) = slot.take() {
                let shared = error.map(Arc::new);
                let event = match &shared {
                    Some(err) => StreamEvent::Failed(err.clone()),
                    None => StreamEvent::Finished,
                };
                // Record the terminal before sending it, so a subscriber
                // attaching concurrently sees one of the two, never neither.
                let _ = self.terminal.set(shared);
                let _ = tx.send(event);
                return true;
            }
        }
        false
    }
}

/// Consumer side of a hot broadcast: a stream of [`StreamEvent`]s that is
/// also the subscription factory.
pub struct ResponseBroadcast<T> {
    tx: broadcast::Sender<StreamEvent<T>>,
    terminal: Arc<OnceLock<Option<SharedError>>>,
    primary: Subscription<T>,
}

impl<T: Clone + Send + 'static> ResponseBroadcast<T> {
    /// Attach another hot subscriber.
    ///
    /// Joins at the current position: earlier updates are not replayed. A
    /// subscriber attaching after the terminal observes exactly that
    /// terminal event.
    pub fn subscribe(&self) -> Subscription<T> {
        // Attach before checking: `on_complete` records the terminal before
        // sending it, so a receiver that exists while the record is still
        // unset is guaranteed to get the send.
        let rx = self.tx.subscribe();
        if let Some(terminal) = self.terminal.get() {
            return Subscription::completed(terminal.clone());
        }
        Subscription::live(rx)
    }
}

impl<T: Clone + Send + 'static> Stream for ResponseBroadcast<T> {
    type Item = StreamEvent<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.get_mut().primary).poll_next(cx)
    }
}

impl<T> std::fmt::Debug for ResponseBroadcast<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseBroadcast")
            .field("subscribers", &self.tx.receiver_count())
            .field("completed", &self.terminal.get().is_some())
            .finish()
    }
}

/// One subscriber's view of a broadcast; ends right after the terminal event.
pub struct Subscription<T> {
    inner: Pin<Box<dyn Stream<Item = StreamEvent<T>> + Send>>,
}

impl<T: Clone + Send + 'static> Subscription<T> {
    fn live(rx: broadcast::Receiver<StreamEvent<T>>) -> Self {
        let inner = stream::unfold((rx, false), |(mut rx, done)| async move {
            if done {
                return None;
            }
            loop {
                match rx.recv().await {
                    Ok(event) => {
                        let done = event.is_terminal();
                        return Some((event, (rx, done)));
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "broadcast subscriber lagging; missed updates dropped");
                    }
                    Err(RecvError::Closed) => return None,
                }
            }
        });
        Subscription {
            inner: Box::pin(inner),
        }
    }

    fn completed(terminal: Option<SharedError>) -> Self {
        let event = match terminal {
            Some(err) => StreamEvent::Failed(err),
            None => StreamEvent::Finished,
        };
        Subscription {
            inner: Box::pin(stream::iter([event])),
        }
    }
}

impl<T> Stream for Subscription<T> {
    type Item = StreamEvent<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().inner.as_mut().poll_next(cx)
    }
}

impl<T> std::fmt::Debug for Subscription<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

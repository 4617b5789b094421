//! Live-sequence bridge from update/terminal callbacks to a `Stream`.

use std::pin::Pin;
use std::sync::Mutex;
use std::task::{Context, Poll};

use futures::Stream;
use tokio::sync::mpsc;

use crate::bridge::Subscriber;
use crate::{Error, Result};

/// Create a connected handle/stream pair for one streaming operation.
///
/// The producer pushes updates through the [`StreamHandle`] (usually via the
/// [`Subscriber`] trait); the consumer iterates the [`ResponseStream`].
/// Updates arrive in push order and the stream ends after exactly one
/// terminal: a clean close, or a single `Err` element.
pub fn stream_pair<T>() -> (StreamHandle<T>, ResponseStream<T>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (
        StreamHandle {
            tx: Mutex::new(Some(tx)),
        },
        ResponseStream { rx, done: false },
    )
}

/// Producer side of a live sequence.
///
/// The sender slot empties at the terminal, which closes the channel; any
/// later push is a no-op reported through the `bool` returns.
#[derive(Debug)]
pub struct StreamHandle<T> {
    tx: Mutex<Option<mpsc::UnboundedSender<Result<T>>>>,
}

impl<T: Send> Subscriber<T> for StreamHandle<T> {
    fn on_update(&self, update: Result<T>) -> bool {
        if let Ok(mut slot) = self.tx.lock() {
            if let Some(tx) = slot.as_ref() {
                // An error update is the sequence's terminal: the stream
                // surface has no non-terminal error elements.
                let terminal = update.is_err();
                let delivered = tx.send(update).is_ok();
                if terminal || !delivered {
                    *slot = None;
                }
                return delivered && !terminal;
            }
        }
        false
    }

    fn on_complete(&self, error: Option<Error>) -> bool {
        if let Ok(mut slot) = self.tx.lock() {
            if let Some(tx) = slot.take() {
                if let Some(err) = error {
                    let _ = tx.send(Err(err));
                }
                return true;
            }
        }
        false
    }
}

/// Consumer side of a live sequence; fused after the terminal.
#[derive(Debug)]
pub struct ResponseStream<T> {
    rx: mpsc::UnboundedReceiver<Result<T>>,
    done: bool,
}

impl<T> Stream for ResponseStream<T> {
    type Item = Result<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if this.done {
            return Poll::Ready(None);
        }
        match this.rx.poll_recv(cx) {
            Poll::Ready(Some(item)) => {
                if item.is_err() {
                    this.done = true;
                }
                Poll::Ready(Some(item))
            }
            Poll::Ready(None) => {
                this.done = true;
                Poll::Ready(None)
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    #[tokio::test]
    async fn test_updates_arrive_in_order_then_clean_end() {
        let (handle, stream) = stream_pair();
        for n in 1..=5u32 {
            assert!(handle.on_update(Ok(n)));
        }
        assert!(handle.on_complete(None));

        let items: Vec<_> = stream.map(|item| item.unwrap()).collect().await;
        assert_eq!(items, vec![1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn test_failure_terminal_after_updates() {
        let (handle, stream) = stream_pair();
        assert!(handle.on_update(Ok(1u32)));
        assert!(handle.on_update(Ok(2u32)));
        assert!(handle.on_complete(Some(Error::config("boom"))));

        let items: Vec<_> = stream.collect().await;
        assert_eq!(items.len(), 3);
        assert_eq!(*items[0].as_ref().unwrap(), 1);
        assert_eq!(*items[1].as_ref().unwrap(), 2);
        assert!(matches!(items[2], Err(Error::Config { .. })));
    }

    #[tokio::test]
    async fn test_failure_terminal_with_zero_updates() {
        let (handle, stream) = stream_pair::<u32>();
        assert!(handle.on_complete(Some(Error::config("early"))));
        let items: Vec<_> = stream.collect().await;
        assert_eq!(items.len(), 1);
        assert!(items[0].is_err());
    }

    #[tokio::test]
    async fn test_error_update_terminates_the_sequence() {
        let (handle, stream) = stream_pair();
        assert!(handle.on_update(Ok(1u32)));
        assert!(!handle.on_update(Err(Error::config("mid-stream"))));
        // Everything after the terminal is dropped, including a redundant
        // completion.
        assert!(!handle.on_update(Ok(2u32)));
        assert!(!handle.on_complete(None));

        let items: Vec<_> = stream.collect().await;
        assert_eq!(items.len(), 2);
        assert_eq!(*items[0].as_ref().unwrap(), 1);
        assert!(items[1].is_err());
    }

    #[tokio::test]
    async fn test_terminal_fires_at_most_once() {
        let (handle, stream) = stream_pair::<u32>();
        assert!(handle.on_complete(Some(Error::config("first"))));
        assert!(!handle.on_complete(Some(Error::config("second"))));
        assert!(!handle.on_complete(None));

        let items: Vec<_> = stream.collect().await;
        assert_eq!(items.len(), 1);
        match &items[0] {
            Err(Error::Config { message }) => assert_eq!(message, "first"),
            other => panic!("expected the first terminal, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_dropped_consumer_stops_forwarding() {
        let (handle, stream) = stream_pair();
        assert!(handle.on_update(Ok(1u32)));
        drop(stream);
        assert!(!handle.on_update(Ok(2u32)));
        assert!(!handle.on_update(Ok(3u32)));
    }

    #[tokio::test]
    async fn test_stream_stays_done_after_terminal() {
        let (handle, mut stream) = stream_pair::<u32>();
        handle.on_complete(Some(Error::config("done")));
        assert!(stream.next().await.unwrap().is_err());
        assert!(stream.next().await.is_none());
        assert!(stream.next().await.is_none());
    }
}

//! Single-shot bridge from a completion callback to an awaitable value.

use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;
use std::task::{Context, Poll};

use tokio::sync::oneshot;
use tracing::trace;

use crate::{Error, Result};

/// Create a connected handle/future pair for one wrapped operation.
///
/// The producer resolves the [`CompletionHandle`] exactly once; the consumer
/// awaits the [`ResponseFuture`]. Dropping either side is safe: a late
/// resolution against a vanished consumer is discarded, and a handle dropped
/// unresolved fails the future with [`Error::ChannelClosed`].
pub fn completion_pair<T>() -> (CompletionHandle<T>, ResponseFuture<T>) {
    let (tx, rx) = oneshot::channel();
    (
        CompletionHandle {
            tx: Mutex::new(Some(tx)),
        },
        ResponseFuture { rx },
    )
}

/// Producer side of a single-result operation.
///
/// May be resolved from any thread. The first [`resolve`](Self::resolve)
/// wins; later calls are no-ops.
#[derive(Debug)]
pub struct CompletionHandle<T> {
    tx: Mutex<Option<oneshot::Sender<Result<T>>>>,
}

impl<T> CompletionHandle<T> {
    /// Deliver the operation's result.
    ///
    /// Returns `true` when this call resolved the future. Returns `false`
    /// when the result was discarded: either the future was already
    /// resolved, or the consumer dropped it.
    pub fn resolve(&self, result: Result<T>) -> bool {
        if let Ok(mut slot) = self.tx.lock() {
            if let Some(tx) = slot.take() {
                return tx.send(result).is_ok();
            }
        }
        trace!("completion already resolved; discarding late result");
        false
    }
}

/// Consumer side of a single-result operation.
#[derive(Debug)]
pub struct ResponseFuture<T> {
    rx: oneshot::Receiver<Result<T>>,
}

impl<T> Future for ResponseFuture<T> {
    type Output = Result<T>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.get_mut().rx).poll(cx).map(|received| {
            match received {
                Ok(result) => result,
                // Producer dropped the handle without resolving.
                Err(_) => Err(Error::ChannelClosed),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_pending, assert_ready};

    #[tokio::test]
    async fn test_resolve_delivers_value() {
        let (handle, response) = completion_pair();
        assert!(handle.resolve(Ok(42u32)));
        assert_eq!(response.await.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_resolve_delivers_failure() {
        let (handle, response) = completion_pair::<u32>();
        assert!(handle.resolve(Err(Error::config("boom"))));
        let err = response.await.unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[tokio::test]
    async fn test_second_resolution_has_no_effect() {
        let (handle, response) = completion_pair();
        assert!(handle.resolve(Ok(1u32)));
        assert!(!handle.resolve(Ok(2u32)));
        assert!(!handle.resolve(Err(Error::config("late"))));
        assert_eq!(response.await.unwrap(), 1);
    }

    #[test]
    fn test_future_pending_until_resolved() {
        let (handle, response) = completion_pair();
        let mut consumer = tokio_test::task::spawn(response);
        assert_pending!(consumer.poll());
        assert!(handle.resolve(Ok(7u32)));
        assert!(consumer.is_woken());
        let result = assert_ready!(consumer.poll());
        assert_eq!(result.unwrap(), 7);
    }

    #[test]
    fn test_abandoned_consumer_discards_late_callback() {
        let (handle, response) = completion_pair();
        drop(response);
        assert!(!handle.resolve(Ok(5u32)));
    }

    #[tokio::test]
    async fn test_dropped_handle_fails_the_future() {
        let (handle, response) = completion_pair::<u32>();
        drop(handle);
        assert!(matches!(response.await, Err(Error::ChannelClosed)));
    }
}

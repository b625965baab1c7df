// ── Reactive snapshot streams ──
//
// Subscription handles over the `watch`-published snapshots the
// scheduler and sampler maintain. Render loops that prefer push over
// per-frame polling consume these.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

/// A subscription to a snapshot-published collection.
///
/// Provides both point-in-time access and reactive change notification
/// via [`changed`](Self::changed) or by converting to a `Stream`.
pub struct SnapshotStream<T: Clone + Send + Sync + 'static> {
    current: Arc<Vec<T>>,
    receiver: watch::Receiver<Arc<Vec<T>>>,
}

impl<T: Clone + Send + Sync + 'static> SnapshotStream<T> {
    pub(crate) fn new(receiver: watch::Receiver<Arc<Vec<T>>>) -> Self {
        let current = receiver.borrow().clone();
        Self { current, receiver }
    }

    /// The snapshot captured at subscription time.
    pub fn current(&self) -> &Arc<Vec<T>> {
        &self.current
    }

    /// The latest snapshot (may have changed since subscription).
    pub fn latest(&self) -> Arc<Vec<T>> {
        self.receiver.borrow().clone()
    }

    /// Wait for the next change, returning the new snapshot. `None` once
    /// the publishing component has been dropped.
    pub async fn changed(&mut self) -> Option<Arc<Vec<T>>> {
        self.receiver.changed().await.ok()?;
        let snapshot = self.receiver.borrow_and_update().clone();
        self.current = snapshot.clone();
        Some(snapshot)
    }

    /// Convert into a `Stream` for use with `StreamExt` combinators.
    pub fn into_stream(self) -> SnapshotWatchStream<T> {
        SnapshotWatchStream {
            inner: WatchStream::new(self.receiver),
        }
    }
}

/// `Stream` adapter backed by a `watch::Receiver`. Yields a new snapshot
/// each time the underlying collection is republished.
pub struct SnapshotWatchStream<T: Clone + Send + Sync + 'static> {
    inner: WatchStream<Arc<Vec<T>>>,
}

impl<T: Clone + Send + Sync + 'static> Stream for SnapshotWatchStream<T> {
    type Item = Arc<Vec<T>>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        // Arc<Vec<T>> is always Unpin, so the inner WatchStream is too.
        Pin::new(&mut self.inner).poll_next(cx)
    }
}

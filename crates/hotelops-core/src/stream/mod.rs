// ── List state subscriptions ──
//
// Screens subscribe to a paginator and re-render from each snapshot.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::store::ListState;

/// A subscription to one paginator's list state.
///
/// Gives point-in-time access plus change notification via `changed()`
/// or by converting into a `Stream`.
pub struct ListStream<T: Send + Sync + 'static> {
    current: Arc<ListState<T>>,
    receiver: watch::Receiver<Arc<ListState<T>>>,
}

impl<T: Send + Sync + 'static> ListStream<T> {
    pub(crate) fn new(receiver: watch::Receiver<Arc<ListState<T>>>) -> Self {
        let current = receiver.borrow().clone();
        Self { current, receiver }
    }

    /// Snapshot captured at creation or at the last `changed()`.
    pub fn current(&self) -> &Arc<ListState<T>> {
        &self.current
    }

    /// Latest published snapshot.
    pub fn latest(&self) -> Arc<ListState<T>> {
        self.receiver.borrow().clone()
    }

    /// Wait for the next transition. `None` once the paginator is gone.
    pub async fn changed(&mut self) -> Option<Arc<ListState<T>>> {
        self.receiver.changed().await.ok()?;
        let snap = self.receiver.borrow_and_update().clone();
        self.current = Arc::clone(&snap);
        Some(snap)
    }

    pub fn into_stream(self) -> ListWatchStream<T> {
        ListWatchStream {
            inner: WatchStream::new(self.receiver),
        }
    }
}

/// `Stream` adapter yielding every published `ListState` snapshot,
/// starting with the current one.
pub struct ListWatchStream<T: Send + Sync + 'static> {
    inner: WatchStream<Arc<ListState<T>>>,
}

impl<T: Send + Sync + 'static> Stream for ListWatchStream<T> {
    type Item = Arc<ListState<T>>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use futures_util::StreamExt;

    #[tokio::test]
    async fn changed_tracks_latest_snapshot() {
        let (tx, rx) = watch::channel(Arc::new(ListState::<u32>::new(10)));
        let mut stream = ListStream::new(rx);
        assert_eq!(stream.current().current_page, 0);

        let mut next = ListState::new(10);
        next.current_page = 1;
        tx.send(Arc::new(next)).unwrap();

        let snap = stream.changed().await.unwrap();
        assert_eq!(snap.current_page, 1);
        assert_eq!(stream.current().current_page, 1);
    }

    #[test]
    fn changed_waits_for_a_publish() {
        let (tx, rx) = watch::channel(Arc::new(ListState::<u32>::new(10)));
        let mut stream = ListStream::new(rx);
        let mut changed = tokio_test::task::spawn(stream.changed());
        tokio_test::assert_pending!(changed.poll());

        tx.send_replace(Arc::new(ListState::new(30)));
        assert!(changed.is_woken());
        let snap = tokio_test::assert_ready!(changed.poll()).unwrap();
        assert_eq!(snap.per_page, 30);
    }

    #[tokio::test]
    async fn changed_ends_when_sender_dropped() {
        let (tx, rx) = watch::channel(Arc::new(ListState::<u32>::new(10)));
        let mut stream = ListStream::new(rx);
        drop(tx);
        assert!(stream.changed().await.is_none());
    }

    #[tokio::test]
    async fn into_stream_yields_initial_snapshot() {
        let (_tx, rx) = watch::channel(Arc::new(ListState::<u32>::new(25)));
        let mut stream = ListStream::new(rx).into_stream();
        let first = stream.next().await.unwrap();
        assert_eq!(first.per_page, 25);
    }
}

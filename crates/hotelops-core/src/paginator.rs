// ── Paginated fetch coordinator ──
//
// Owns one list screen's filters, accumulated records, and load flags.
// Three entry points mutate it: `load_first_page`, `load_next_page`,
// `refresh`. Every request is tagged with a sequence number; a response
// older than the newest one already applied is dropped, so overlapping
// refresh / load-more / filter changes can never regress the list.
//
// The state lock is never held across a fetch. Each transition
// publishes an immutable `ListState` snapshot on a watch channel.

use std::num::NonZeroU32;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::{Mutex, watch};
use tracing::{debug, trace, warn};

use crate::error::CoreError;
use crate::filter::{FilterCriteria, FilterState};
use crate::model::{EntityId, Identified};
use crate::page::{PageRequest, PageResult};
use crate::source::PageSource;
use crate::store::{ListState, ListStore};
use crate::stream::ListStream;

/// Which entry point issued a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FetchKind {
    FirstPage,
    Refresh,
    More,
    /// Load-more after the filters changed without page 1 landing:
    /// restarts at page 1 and replaces.
    Restart,
}

impl FetchKind {
    fn replaces(self) -> bool {
        matches!(self, Self::FirstPage | Self::Refresh | Self::Restart)
    }
}

/// What a paginator call ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The response was merged into the list.
    Applied { received: usize },
    /// `load_next_page` guard refused: nothing more, or a load in flight.
    Skipped,
    /// A newer response had already been applied; this one was dropped.
    Stale,
    /// The fetch failed; the message is now in `ListState::error`.
    Failed { message: String },
}

impl LoadOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

struct Inner<T> {
    filters: FilterState,
    store: ListStore<T>,
    current_page: u32,
    has_more: bool,
    error: Option<String>,
    total_items: Option<u64>,
    totals: Option<Value>,
    /// Filters changed but no page 1 for them has been applied yet, so
    /// the loaded rows belong to the previous filters.
    filters_pending: bool,
    next_seq: u64,
    /// Sequence of the newest response reflected in the state.
    applied_seq: u64,
    /// Newest in-flight request per entry point. A flag stays raised
    /// until that exact request settles.
    first_seq: Option<u64>,
    refresh_seq: Option<u64>,
    more_seq: Option<u64>,
}

impl<T: Identified> Inner<T> {
    fn issue(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    fn can_load_more(&self) -> bool {
        self.has_more
            && self.first_seq.is_none()
            && self.more_seq.is_none()
            && self.refresh_seq.is_none()
    }

    fn settle(&mut self, kind: FetchKind, seq: u64) {
        let slot = match kind {
            FetchKind::FirstPage => &mut self.first_seq,
            FetchKind::Refresh => &mut self.refresh_seq,
            FetchKind::More | FetchKind::Restart => &mut self.more_seq,
        };
        if *slot == Some(seq) {
            *slot = None;
        }
    }

    fn snapshot(&self, per_page: u32) -> ListState<T> {
        ListState {
            items: self.store.snapshot(),
            current_page: self.current_page,
            per_page,
            has_more: self.has_more,
            loading: self.first_seq.is_some(),
            is_loading_more: self.more_seq.is_some(),
            refreshing: self.refresh_seq.is_some(),
            error: self.error.clone(),
            total_items: self.total_items,
            totals: self.totals.clone(),
        }
    }
}

/// Coordinator for one paginated list.
pub struct Paginator<S: PageSource> {
    source: S,
    per_page: NonZeroU32,
    inner: Mutex<Inner<S::Item>>,
    state_tx: watch::Sender<Arc<ListState<S::Item>>>,
}

impl<S: PageSource> Paginator<S> {
    pub fn new(source: S, per_page: NonZeroU32) -> Self {
        let (state_tx, _) = watch::channel(Arc::new(ListState::new(per_page.get())));
        Self {
            source,
            per_page,
            inner: Mutex::new(Inner {
                filters: FilterState::default(),
                store: ListStore::new(),
                current_page: 0,
                has_more: true,
                error: None,
                total_items: None,
                totals: None,
                filters_pending: false,
                next_seq: 0,
                applied_seq: 0,
                first_seq: None,
                refresh_seq: None,
                more_seq: None,
            }),
            state_tx,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn per_page(&self) -> u32 {
        self.per_page.get()
    }

    /// Latest published snapshot.
    pub fn state(&self) -> Arc<ListState<S::Item>> {
        self.state_tx.borrow().clone()
    }

    pub fn subscribe(&self) -> ListStream<S::Item> {
        ListStream::new(self.state_tx.subscribe())
    }

    /// Filters the next `load_next_page`/`refresh` will use.
    pub async fn filters(&self) -> FilterCriteria {
        self.inner.lock().await.filters.criteria().clone()
    }

    // ── Entry points ─────────────────────────────────────────────────

    /// Replace the filters and fetch page 1. Always allowed.
    pub async fn load_first_page(&self, criteria: FilterCriteria) -> LoadOutcome {
        let (seq, request) = {
            let mut inner = self.inner.lock().await;
            let params = inner.filters.apply(criteria);
            let seq = inner.issue();
            inner.first_seq = Some(seq);
            inner.filters_pending = true;
            inner.error = None;
            debug!(seq, params = params.len(), "loading first page");
            let request = PageRequest::new(
                inner.filters.criteria().clone(),
                NonZeroU32::MIN,
                self.per_page,
            );
            self.publish(&inner);
            (seq, request)
        };
        self.run(FetchKind::FirstPage, seq, request).await
    }

    /// Fetch `current_page + 1` with the current filters.
    ///
    /// No-op unless more pages are expected and nothing else is loading.
    /// If the last filter change never got its page 1, this fetches page 1
    /// and replaces the list instead of appending to the old rows.
    pub async fn load_next_page(&self) -> LoadOutcome {
        let (kind, seq, request) = {
            let mut inner = self.inner.lock().await;
            if !inner.can_load_more() {
                trace!(has_more = inner.has_more, "load more refused by guard");
                return LoadOutcome::Skipped;
            }
            let (kind, page) = if inner.filters_pending {
                (FetchKind::Restart, NonZeroU32::MIN)
            } else {
                let Some(page) = inner.current_page.checked_add(1).and_then(NonZeroU32::new)
                else {
                    return LoadOutcome::Skipped;
                };
                (FetchKind::More, page)
            };
            let seq = inner.issue();
            inner.more_seq = Some(seq);
            debug!(seq, page = page.get(), ?kind, "loading next page");
            let request = PageRequest::new(inner.filters.criteria().clone(), page, self.per_page);
            self.publish(&inner);
            (kind, seq, request)
        };
        self.run(kind, seq, request).await
    }

    /// Re-fetch page 1 with the current filters. Always allowed.
    pub async fn refresh(&self) -> LoadOutcome {
        let (seq, request) = {
            let mut inner = self.inner.lock().await;
            let seq = inner.issue();
            inner.refresh_seq = Some(seq);
            debug!(seq, "refreshing");
            let request = PageRequest::new(
                inner.filters.criteria().clone(),
                NonZeroU32::MIN,
                self.per_page,
            );
            self.publish(&inner);
            (seq, request)
        };
        self.run(FetchKind::Refresh, seq, request).await
    }

    // ── Local edits ──────────────────────────────────────────────────

    /// Splice a created or edited record into the loaded list.
    pub async fn upsert_item(&self, item: S::Item) -> bool {
        let mut inner = self.inner.lock().await;
        let added = inner.store.upsert_by_id(item);
        self.publish(&inner);
        added
    }

    /// Drop a deleted record from the loaded list.
    pub async fn remove_item(&self, id: &EntityId) -> bool {
        let mut inner = self.inner.lock().await;
        let removed = inner.store.remove_by_id(id).is_some();
        if removed {
            self.publish(&inner);
        }
        removed
    }

    // ── Internals ────────────────────────────────────────────────────

    async fn run(&self, kind: FetchKind, seq: u64, request: PageRequest) -> LoadOutcome {
        let result = self.source.fetch_page(&request).await;
        self.finish(kind, seq, result).await
    }

    async fn finish(
        &self,
        kind: FetchKind,
        seq: u64,
        result: Result<PageResult<S::Item>, CoreError>,
    ) -> LoadOutcome {
        let mut inner = self.inner.lock().await;
        inner.settle(kind, seq);

        if seq < inner.applied_seq {
            warn!(seq, applied = inner.applied_seq, ?kind, "dropping stale response");
            self.publish(&inner);
            return LoadOutcome::Stale;
        }
        inner.applied_seq = seq;

        let outcome = match result {
            Ok(page) => {
                let received = page.items.len();
                if kind.replaces() {
                    inner.filters_pending = false;
                    inner.store.replace(page.items);
                    inner.total_items = page.total_items;
                    inner.totals = page.totals;
                } else {
                    let added = inner.store.append(page.items);
                    trace!(received, added, "merged page");
                    if page.total_items.is_some() {
                        inner.total_items = page.total_items;
                    }
                    if page.totals.is_some() {
                        inner.totals = page.totals;
                    }
                }
                inner.current_page = page.current_page;
                inner.has_more = page.has_more;
                inner.error = None;
                debug!(
                    seq,
                    page = inner.current_page,
                    received,
                    total = inner.store.len(),
                    has_more = inner.has_more,
                    "page applied"
                );
                LoadOutcome::Applied { received }
            }
            Err(e) => {
                let message = e.to_string();
                warn!(seq, ?kind, error = %message, "page fetch failed");
                inner.error = Some(message.clone());
                LoadOutcome::Failed { message }
            }
        };

        self.publish(&inner);
        outcome
    }

    fn publish(&self, inner: &Inner<S::Item>) {
        let snapshot = inner.snapshot(self.per_page.get());
        self.state_tx.send_replace(Arc::new(snapshot));
    }
}

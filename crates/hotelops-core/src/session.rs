// ── List screen session ──
//
// The surface a list screen talks to: UI events in, snapshots out.
// One session per mounted screen; dropping it discards the list.

use std::sync::Arc;

use tracing::debug;

use crate::filter::FilterCriteria;
use crate::paginator::{LoadOutcome, Paginator};
use crate::source::PageSource;
use crate::store::ListState;
use crate::stream::ListStream;

/// Event-driven wrapper around one [`Paginator`].
pub struct ListSession<S: PageSource> {
    paginator: Paginator<S>,
}

impl<S: PageSource> ListSession<S> {
    pub fn new(paginator: Paginator<S>) -> Self {
        Self { paginator }
    }

    /// First load when the screen appears.
    pub async fn mount(&self, initial: FilterCriteria) -> LoadOutcome {
        self.paginator.load_first_page(initial).await
    }

    pub async fn on_filters_applied(&self, criteria: FilterCriteria) -> LoadOutcome {
        self.paginator.load_first_page(criteria).await
    }

    pub async fn on_filters_cleared(&self) -> LoadOutcome {
        self.paginator.load_first_page(FilterCriteria::default()).await
    }

    pub async fn on_end_reached(&self) -> LoadOutcome {
        self.paginator.load_next_page().await
    }

    pub async fn on_pull_to_refresh(&self) -> LoadOutcome {
        self.paginator.refresh().await
    }

    /// Keep reaching the end until `max_pages` are loaded (or every
    /// page, for `None`). Returns the last outcome.
    ///
    /// Stops early on a failure or once the guard refuses, so a list
    /// that errors mid-way keeps what it has.
    pub async fn scroll_through(&self, max_pages: Option<u32>) -> LoadOutcome {
        let mut last = LoadOutcome::Skipped;
        loop {
            let state = self.view();
            if max_pages.is_some_and(|max| state.current_page >= max) || !state.can_load_more() {
                return last;
            }
            last = self.on_end_reached().await;
            match &last {
                LoadOutcome::Applied { received } => {
                    debug!(page = self.view().current_page, received, "scrolled");
                }
                _ => return last,
            }
        }
    }

    /// Read-only snapshot for rendering.
    pub fn view(&self) -> Arc<ListState<S::Item>> {
        self.paginator.state()
    }

    pub fn subscribe(&self) -> ListStream<S::Item> {
        self.paginator.subscribe()
    }

    pub fn paginator(&self) -> &Paginator<S> {
        &self.paginator
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::num::NonZeroU32;
    use std::sync::Mutex;

    use super::*;
    use crate::error::CoreError;
    use crate::model::Record;
    use crate::page::{PageRequest, PageResult};

    /// Serves `total` sequential ids in pages, recording each request.
    struct CountingSource {
        total: u64,
        fail_page: Option<u32>,
        seen: Mutex<Vec<(u32, Vec<(String, String)>)>>,
    }

    impl CountingSource {
        fn new(total: u64) -> Self {
            Self {
                total,
                fail_page: None,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl PageSource for CountingSource {
        type Item = Record;

        async fn fetch_page(&self, request: &PageRequest) -> Result<PageResult<Record>, CoreError> {
            self.seen
                .lock()
                .unwrap()
                .push((request.page(), request.filter_pairs()));
            if self.fail_page == Some(request.page()) {
                return Err(CoreError::Internal("page unavailable".into()));
            }
            let per_page = u64::from(request.per_page());
            let start = u64::from(request.page() - 1) * per_page + 1;
            let end = (start + per_page - 1).min(self.total);
            let items = (start..=end).map(Record::new).collect();
            Ok(PageResult::from_items(items, request))
        }
    }

    fn session(source: CountingSource, per_page: u32) -> ListSession<CountingSource> {
        ListSession::new(Paginator::new(source, NonZeroU32::new(per_page).unwrap()))
    }

    #[tokio::test]
    async fn scroll_through_loads_every_page() {
        let s = session(CountingSource::new(23), 10);
        s.mount(FilterCriteria::new()).await;
        let last = s.scroll_through(None).await;

        assert_eq!(last, LoadOutcome::Applied { received: 3 });
        let view = s.view();
        assert_eq!(view.len(), 23);
        assert_eq!(view.current_page, 3);
        assert!(!view.has_more);
    }

    #[tokio::test]
    async fn scroll_through_honours_page_limit() {
        let s = session(CountingSource::new(100), 10);
        s.mount(FilterCriteria::new()).await;
        s.scroll_through(Some(2)).await;

        assert_eq!(s.view().len(), 20);
        assert!(s.view().has_more);
    }

    #[tokio::test]
    async fn scroll_through_stops_on_failure() {
        let mut source = CountingSource::new(50);
        source.fail_page = Some(3);
        let s = session(source, 10);
        s.mount(FilterCriteria::new()).await;

        let last = s.scroll_through(None).await;
        assert!(matches!(last, LoadOutcome::Failed { .. }));
        assert_eq!(s.view().len(), 20);
        assert!(s.view().error.is_some());
    }

    #[tokio::test]
    async fn clearing_filters_reloads_unfiltered() {
        let s = session(CountingSource::new(5), 10);
        s.on_filters_applied(FilterCriteria::new().employee_id("12")).await;
        s.on_filters_cleared().await;

        let seen = s.paginator().source().seen.lock().unwrap().clone();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].1, vec![("employee_id".to_owned(), "12".to_owned())]);
        assert!(seen[1].1.is_empty());
        assert_eq!(seen[1].0, 1);
    }

    #[tokio::test]
    async fn pull_to_refresh_keeps_filters() {
        let s = session(CountingSource::new(5), 10);
        s.mount(FilterCriteria::new().hotel_id("4")).await;
        s.on_pull_to_refresh().await;

        let seen = s.paginator().source().seen.lock().unwrap().clone();
        assert_eq!(seen[1], (1, vec![("hotel_id".to_owned(), "4".to_owned())]));
        assert_eq!(s.view().len(), 5);
    }
}

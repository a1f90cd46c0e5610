// ── Read-through reference cache ──
//
// Reference data several screens need (the hotel list for filter
// pickers) is loaded once and shared until it ages out or is
// invalidated. Reads are lock-free; concurrent misses load once.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwapOption;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

use crate::error::CoreError;

/// How long reference data stays fresh unless configured otherwise.
pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(300);

struct Cached<T> {
    value: Arc<T>,
    loaded_at: Instant,
}

/// Single-value read-through cache with a maximum age.
pub struct ReferenceCache<T> {
    entry: ArcSwapOption<Cached<T>>,
    max_age: Duration,
    load_lock: Mutex<()>,
}

impl<T> ReferenceCache<T> {
    pub fn new(max_age: Duration) -> Self {
        Self {
            entry: ArcSwapOption::empty(),
            max_age,
            load_lock: Mutex::new(()),
        }
    }

    /// Cached value if still fresh, otherwise whatever `load` returns.
    ///
    /// A failed load leaves the previous entry untouched.
    pub async fn get_or_load<F, Fut>(&self, load: F) -> Result<Arc<T>, CoreError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, CoreError>>,
    {
        if let Some(value) = self.fresh() {
            return Ok(value);
        }

        let _loading = self.load_lock.lock().await;
        // Another caller may have filled it while we waited.
        if let Some(value) = self.fresh() {
            return Ok(value);
        }

        debug!(max_age_secs = self.max_age.as_secs(), "loading reference data");
        let value = Arc::new(load().await?);
        self.entry.store(Some(Arc::new(Cached {
            value: Arc::clone(&value),
            loaded_at: Instant::now(),
        })));
        Ok(value)
    }

    /// Cached value regardless of age.
    pub fn peek(&self) -> Option<Arc<T>> {
        self.entry.load_full().map(|c| Arc::clone(&c.value))
    }

    pub fn is_fresh(&self) -> bool {
        self.fresh().is_some()
    }

    /// Drop the entry so the next read reloads.
    pub fn invalidate(&self) {
        self.entry.store(None);
    }

    fn fresh(&self) -> Option<Arc<T>> {
        self.entry
            .load_full()
            .filter(|c| c.loaded_at.elapsed() < self.max_age)
            .map(|c| Arc::clone(&c.value))
    }
}

impl<T> Default for ReferenceCache<T> {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_AGE)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    async fn load_counted(counter: &AtomicUsize) -> Result<Vec<&'static str>, CoreError> {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(vec!["Seaside", "Hilltop"])
    }

    #[tokio::test(start_paused = true)]
    async fn loads_once_while_fresh() {
        let cache = ReferenceCache::new(Duration::from_secs(60));
        let loads = AtomicUsize::new(0);

        let first = cache.get_or_load(|| load_counted(&loads)).await.unwrap();
        tokio::time::advance(Duration::from_secs(30)).await;
        let second = cache.get_or_load(|| load_counted(&loads)).await.unwrap();

        assert_eq!(loads.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test(start_paused = true)]
    async fn reloads_after_max_age() {
        let cache = ReferenceCache::new(Duration::from_secs(60));
        let loads = AtomicUsize::new(0);

        cache.get_or_load(|| load_counted(&loads)).await.unwrap();
        tokio::time::advance(Duration::from_secs(61)).await;
        assert!(!cache.is_fresh());
        assert!(cache.peek().is_some());

        cache.get_or_load(|| load_counted(&loads)).await.unwrap();
        assert_eq!(loads.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn invalidate_forces_reload() {
        let cache = ReferenceCache::default();
        let loads = AtomicUsize::new(0);

        cache.get_or_load(|| load_counted(&loads)).await.unwrap();
        cache.invalidate();
        assert!(cache.peek().is_none());

        cache.get_or_load(|| load_counted(&loads)).await.unwrap();
        assert_eq!(loads.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failed_load_keeps_previous_entry() {
        let cache = ReferenceCache::new(Duration::ZERO);
        let loads = AtomicUsize::new(0);
        cache.get_or_load(|| load_counted(&loads)).await.unwrap();

        let err = cache
            .get_or_load(|| async { Err(CoreError::Internal("offline".into())) })
            .await;
        assert!(err.is_err());
        assert_eq!(cache.peek().unwrap().len(), 2);
    }
}

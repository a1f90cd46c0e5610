// ── Read-only list snapshot ──

use std::sync::Arc;

use serde_json::Value;

/// What a list screen is doing right now, derived from the flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Idle,
    LoadingFirstPage,
    LoadingMore,
    Refreshing,
}

/// Everything a list screen renders from.
///
/// Published by the paginator after every transition; consumers only
/// ever see immutable snapshots.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug)]
pub struct ListState<T> {
    pub items: Arc<Vec<Arc<T>>>,
    /// Last page merged into `items`; 0 before the first successful fetch.
    pub current_page: u32,
    pub per_page: u32,
    pub has_more: bool,
    /// First-page fetch in flight.
    pub loading: bool,
    /// Next-page fetch in flight.
    pub is_loading_more: bool,
    /// User-initiated refresh in flight.
    pub refreshing: bool,
    /// Message of the last failed fetch; cleared by the next success.
    pub error: Option<String>,
    pub total_items: Option<u64>,
    pub totals: Option<Value>,
}

impl<T> Clone for ListState<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
            current_page: self.current_page,
            per_page: self.per_page,
            has_more: self.has_more,
            loading: self.loading,
            is_loading_more: self.is_loading_more,
            refreshing: self.refreshing,
            error: self.error.clone(),
            total_items: self.total_items,
            totals: self.totals.clone(),
        }
    }
}

impl<T> ListState<T> {
    /// Fresh state at screen mount: empty, page 0, more expected.
    pub fn new(per_page: u32) -> Self {
        Self {
            items: Arc::new(Vec::new()),
            current_page: 0,
            per_page,
            has_more: true,
            loading: false,
            is_loading_more: false,
            refreshing: false,
            error: None,
            total_items: None,
            totals: None,
        }
    }

    pub fn phase(&self) -> LoadPhase {
        if self.refreshing {
            LoadPhase::Refreshing
        } else if self.loading {
            LoadPhase::LoadingFirstPage
        } else if self.is_loading_more {
            LoadPhase::LoadingMore
        } else {
            LoadPhase::Idle
        }
    }

    pub fn is_busy(&self) -> bool {
        self.phase() != LoadPhase::Idle
    }

    /// Whether `load_next_page` would issue a request right now.
    pub fn can_load_more(&self) -> bool {
        self.has_more && !self.loading && !self.is_loading_more && !self.refreshing
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

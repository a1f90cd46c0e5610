// ── Page request / result ──
//
// `PageRequest` is built fresh for every fetch and never mutated.
// `PageResult` is what a `PageSource` hands back, already stripped of
// any endpoint-specific envelope.

use std::num::NonZeroU32;

use serde_json::Value;

use crate::filter::{FilterCriteria, FilterError};

/// Page size used when a screen does not pick one.
pub const DEFAULT_PER_PAGE: NonZeroU32 = match NonZeroU32::new(20) {
    Some(n) => n,
    None => unreachable!(),
};

/// Validate a user-supplied page size.
pub fn page_size(per_page: u32) -> Result<NonZeroU32, FilterError> {
    NonZeroU32::new(per_page).ok_or(FilterError::ZeroPageSize)
}

/// One fetch: filters plus a 1-based page number and a page size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    filters: FilterCriteria,
    page: NonZeroU32,
    per_page: NonZeroU32,
}

impl PageRequest {
    pub fn new(filters: FilterCriteria, page: NonZeroU32, per_page: NonZeroU32) -> Self {
        Self {
            filters,
            page,
            per_page,
        }
    }

    pub fn filters(&self) -> &FilterCriteria {
        &self.filters
    }

    pub fn page(&self) -> u32 {
        self.page.get()
    }

    pub fn per_page(&self) -> u32 {
        self.per_page.get()
    }

    /// Normalized filter parameters followed by `page` and `per_page`.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = self.filter_pairs();
        pairs.push(("page".into(), self.page.to_string()));
        pairs.push(("per_page".into(), self.per_page.to_string()));
        pairs
    }

    /// Normalized filter parameters only.
    pub fn filter_pairs(&self) -> Vec<(String, String)> {
        self.filters.to_params().into_pairs()
    }
}

/// One page of items plus pagination metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub total_items: Option<u64>,
    pub current_page: u32,
    pub per_page: u32,
    pub has_more: bool,
    /// Aggregate figures for the whole filtered set, when the endpoint sends them.
    pub totals: Option<Value>,
}

impl<T> PageResult<T> {
    /// Page result with `has_more` derived from the item count: a full
    /// page means there may be more.
    pub fn from_items(items: Vec<T>, request: &PageRequest) -> Self {
        let has_more = items.len() == usize::try_from(request.per_page()).unwrap_or(usize::MAX);
        Self {
            items,
            total_items: None,
            current_page: request.page(),
            per_page: request.per_page(),
            has_more,
            totals: None,
        }
    }

    /// An empty, final page (the server's "no matching records").
    pub fn empty(request: &PageRequest) -> Self {
        Self::from_items(Vec::new(), request)
    }

    pub fn with_totals(mut self, totals: Option<Value>) -> Self {
        self.totals = totals;
        self
    }

    pub fn with_total_items(mut self, total: Option<u64>) -> Self {
        self.total_items = total;
        self
    }

    /// Override the derived `has_more` with an endpoint-supplied hint.
    pub fn with_has_more(mut self, has_more: bool) -> Self {
        self.has_more = has_more;
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn request(page: u32, per_page: u32) -> PageRequest {
        PageRequest::new(
            FilterCriteria::new().hotel_id("3"),
            NonZeroU32::new(page).unwrap(),
            NonZeroU32::new(per_page).unwrap(),
        )
    }

    #[test]
    fn full_page_has_more() {
        let req = request(1, 20);
        let result = PageResult::from_items((0..20).collect::<Vec<u32>>(), &req);
        assert!(result.has_more);
        assert_eq!(result.current_page, 1);
        assert_eq!(result.per_page, 20);
    }

    #[test]
    fn short_page_is_last() {
        let req = request(2, 20);
        let result = PageResult::from_items((0..5).collect::<Vec<u32>>(), &req);
        assert!(!result.has_more);
    }

    #[test]
    fn empty_page_is_last() {
        let result: PageResult<u32> = PageResult::empty(&request(1, 10));
        assert!(result.items.is_empty());
        assert!(!result.has_more);
    }

    #[test]
    fn zero_page_size_is_rejected() {
        assert_eq!(page_size(0), Err(FilterError::ZeroPageSize));
        assert_eq!(page_size(15).unwrap().get(), 15);
    }

    #[test]
    fn query_pairs_append_paging() {
        let pairs = request(3, 10).query_pairs();
        assert_eq!(
            pairs,
            vec![
                ("hotel_id".to_owned(), "3".to_owned()),
                ("page".to_owned(), "3".to_owned()),
                ("per_page".to_owned(), "10".to_owned()),
            ]
        );
    }
}

// ── Filter state holder ──

use super::criteria::FilterCriteria;
use super::params::QueryParams;

/// Current filter criteria of one screen.
///
/// Criteria are replaced wholesale on apply and clear, never edited in
/// place. Both operations hand back the normalized parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    criteria: FilterCriteria,
}

impl FilterState {
    pub fn new(criteria: FilterCriteria) -> Self {
        Self { criteria }
    }

    pub fn apply(&mut self, criteria: FilterCriteria) -> QueryParams {
        self.criteria = criteria;
        self.params()
    }

    pub fn clear(&mut self) -> QueryParams {
        self.apply(FilterCriteria::default())
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn params(&self) -> QueryParams {
        self.criteria.to_params()
    }
}

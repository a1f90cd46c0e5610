// ── Filter criteria ──
//
// Immutable value describing what a list screen is narrowed to.
// Setters consume and return `Self`; the date range is validated on
// every change so an inverted range can never reach the transport.

use chrono::NaiveDate;
use serde::Serialize;

use super::FilterError;
use super::params::{self, QueryParams};

/// Date format used on the wire and accepted from users.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// User-selected constraints for a list query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterCriteria {
    hotel_id: Option<String>,
    employee_id: Option<String>,
    material_id: Option<String>,
    platform_id: Option<String>,
    mode: Option<String>,
    from_date: Option<NaiveDate>,
    to_date: Option<NaiveDate>,
    search_text: Option<String>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Setters ──────────────────────────────────────────────────────

    pub fn hotel_id(mut self, id: impl Into<String>) -> Self {
        self.hotel_id = Some(id.into());
        self
    }

    pub fn employee_id(mut self, id: impl Into<String>) -> Self {
        self.employee_id = Some(id.into());
        self
    }

    pub fn material_id(mut self, id: impl Into<String>) -> Self {
        self.material_id = Some(id.into());
        self
    }

    pub fn platform_id(mut self, id: impl Into<String>) -> Self {
        self.platform_id = Some(id.into());
        self
    }

    /// Screen-specific mode/type selector (e.g. `credit`, `debit`, `cash`).
    pub fn mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = Some(mode.into());
        self
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search_text = Some(text.into());
        self
    }

    /// Set both ends of the date range at once.
    pub fn date_range(
        mut self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Self, FilterError> {
        check_range(from, to)?;
        self.from_date = from;
        self.to_date = to;
        Ok(self)
    }

    pub fn from_date(self, from: NaiveDate) -> Result<Self, FilterError> {
        let to = self.to_date;
        self.date_range(Some(from), to)
    }

    pub fn to_date(self, to: NaiveDate) -> Result<Self, FilterError> {
        let from = self.from_date;
        self.date_range(from, Some(to))
    }

    // ── Getters ──────────────────────────────────────────────────────

    pub fn hotel(&self) -> Option<&str> {
        self.hotel_id.as_deref()
    }

    pub fn employee(&self) -> Option<&str> {
        self.employee_id.as_deref()
    }

    pub fn material(&self) -> Option<&str> {
        self.material_id.as_deref()
    }

    pub fn platform(&self) -> Option<&str> {
        self.platform_id.as_deref()
    }

    pub fn selected_mode(&self) -> Option<&str> {
        self.mode.as_deref()
    }

    pub fn search_text(&self) -> Option<&str> {
        self.search_text.as_deref()
    }

    pub fn date_from(&self) -> Option<NaiveDate> {
        self.from_date
    }

    pub fn date_to(&self) -> Option<NaiveDate> {
        self.to_date
    }

    /// True when normalization would produce no parameters.
    pub fn is_empty(&self) -> bool {
        self.to_params().is_empty()
    }

    // ── Normalization ────────────────────────────────────────────────

    /// Flatten into query parameters: blank values dropped, strings
    /// trimmed, dates as `YYYY-MM-DD`.
    pub fn to_params(&self) -> QueryParams {
        let mut out = QueryParams::default();
        out.insert_text(params::HOTEL_ID, self.hotel_id.as_deref());
        out.insert_text(params::EMPLOYEE_ID, self.employee_id.as_deref());
        out.insert_text(params::MATERIAL_ID, self.material_id.as_deref());
        out.insert_text(params::PLATFORM_ID, self.platform_id.as_deref());
        out.insert_text(params::MODE, self.mode.as_deref());
        out.insert_date(params::FROM_DATE, self.from_date);
        out.insert_date(params::TO_DATE, self.to_date);
        out.insert_text(params::SEARCH, self.search_text.as_deref());
        out
    }
}

fn check_range(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Result<(), FilterError> {
    match (from, to) {
        (Some(from), Some(to)) if to < from => Err(FilterError::InvertedDateRange { from, to }),
        _ => Ok(()),
    }
}

/// Parse a user-entered calendar date (`YYYY-MM-DD`).
pub fn parse_date(raw: &str) -> Result<NaiveDate, FilterError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| FilterError::InvalidDate {
        value: raw.to_owned(),
    })
}

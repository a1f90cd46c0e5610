// ── Filter criteria and normalization ──
//
// Turns what the user picked (hotel, employee, material, platform, mode,
// date range, search text) into flat query parameters.

mod criteria;
pub mod params;
mod state;

use chrono::NaiveDate;
use thiserror::Error;

pub use criteria::{DATE_FORMAT, FilterCriteria, parse_date};
pub use params::QueryParams;
pub use state::FilterState;

/// Client-side filter validation failure. Never reaches the transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("end date {to} is before start date {from}")]
    InvertedDateRange { from: NaiveDate, to: NaiveDate },

    #[error("invalid date '{value}', expected YYYY-MM-DD")]
    InvalidDate { value: String },

    #[error("page size must be at least 1")]
    ZeroPageSize,
}

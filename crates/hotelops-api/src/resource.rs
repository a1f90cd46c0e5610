// ── Resource catalogue ──
//
// Every list endpoint the back-office screens page through, with the
// endpoint path and the page size the screen uses by default.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// A paginated collection exposed by the back-office API.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Resource {
    Hotels,
    Employees,
    Advances,
    Expenses,
    Materials,
    MaterialRequests,
    PaymentLedger,
    AdvanceReport,
    PaymentReport,
    MaterialReport,
}

impl Resource {
    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }

    /// Path relative to the API base URL (no leading slash).
    pub fn path(self) -> &'static str {
        match self {
            Self::Hotels => "hotels",
            Self::Employees => "employees",
            Self::Advances => "advances",
            Self::Expenses => "expenses",
            Self::Materials => "materials",
            Self::MaterialRequests => "material-requests",
            Self::PaymentLedger => "payment-ledger",
            Self::AdvanceReport => "reports/advances",
            Self::PaymentReport => "reports/payments",
            Self::MaterialReport => "reports/materials",
        }
    }

    /// Page size the corresponding screen requests by default.
    ///
    /// Report tables fetch 20 rows per page, entity lists fetch 10.
    pub fn default_per_page(self) -> u32 {
        if self.is_report() { 20 } else { 10 }
    }

    /// Report endpoints are read-only aggregates with totals.
    pub fn is_report(self) -> bool {
        matches!(
            self,
            Self::PaymentLedger | Self::AdvanceReport | Self::PaymentReport | Self::MaterialReport
        )
    }

    /// Whether single-record create/update/delete is available.
    pub fn supports_crud(self) -> bool {
        !self.is_report()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn parses_kebab_case_names() {
        let r: Resource = "material-requests".parse().unwrap();
        assert_eq!(r, Resource::MaterialRequests);
        assert_eq!(r.to_string(), "material-requests");
    }

    #[test]
    fn report_paths_are_nested() {
        assert_eq!(Resource::PaymentReport.path(), "reports/payments");
        assert!(Resource::PaymentReport.is_report());
        assert!(!Resource::PaymentReport.supports_crud());
    }

    #[test]
    fn page_sizes_follow_screen_defaults() {
        for resource in Resource::iter() {
            let expected = if resource.is_report() { 20 } else { 10 };
            assert_eq!(resource.default_per_page(), expected, "{resource}");
        }
    }
}

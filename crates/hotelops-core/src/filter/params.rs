// ── Normalized query parameters ──

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use super::criteria::DATE_FORMAT;

pub const HOTEL_ID: &str = "hotel_id";
pub const EMPLOYEE_ID: &str = "employee_id";
pub const MATERIAL_ID: &str = "material_id";
pub const PLATFORM_ID: &str = "platform_id";
pub const MODE: &str = "type";
pub const FROM_DATE: &str = "from_date";
pub const TO_DATE: &str = "to_date";
pub const SEARCH: &str = "search";

/// Flat, sorted key/value map ready for a query string.
///
/// Only ever built by `FilterCriteria::to_params`, so every value is
/// non-blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct QueryParams(BTreeMap<&'static str, String>);

impl QueryParams {
    pub(crate) fn insert_text(&mut self, key: &'static str, value: Option<&str>) {
        if let Some(v) = value.map(str::trim).filter(|v| !v.is_empty()) {
            self.0.insert(key, v.to_owned());
        }
    }

    pub(crate) fn insert_date(&mut self, key: &'static str, value: Option<NaiveDate>) {
        if let Some(d) = value {
            self.0.insert(key, d.format(DATE_FORMAT).to_string());
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Owned pairs in key order, the shape `reqwest::RequestBuilder::query` takes.
    pub fn into_pairs(self) -> Vec<(String, String)> {
        self.0
            .into_iter()
            .map(|(k, v)| (k.to_owned(), v))
            .collect()
    }
}

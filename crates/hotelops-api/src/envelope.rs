// ── Response envelope normalization ──
//
// The back-office endpoints disagree on their list envelope:
//
//   [ ...items ]                                       bare array
//   { "data": [ ...items ], "current_page", "last_page", "total" }
//   { "data": { "items": [ ...items ], "total" } }
//   { "data": { "data": [ ...items ], "last_page" } }   paginator dumps
//   { "status": false, "message": "No data found" }     empty result
//
// Everything is folded into `RawPage<T>` here so nothing above the
// transport ever looks at an envelope.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::Error;

/// Server messages that mean "no matching records" rather than failure.
///
/// Matching is case-insensitive substring matching against the
/// envelope's `message`. The list is configurable because the server
/// wording is not part of any contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyResultMarkers(Vec<String>);

impl Default for EmptyResultMarkers {
    fn default() -> Self {
        Self::new([
            "no data found",
            "no record found",
            "no records found",
            "data not found",
        ])
    }
}

impl EmptyResultMarkers {
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(
            markers
                .into_iter()
                .map(|m| m.into().trim().to_lowercase())
                .filter(|m| !m.is_empty())
                .collect(),
        )
    }

    /// Markers that never match: every failure stays a failure.
    pub fn none() -> Self {
        Self(Vec::new())
    }

    pub fn matches(&self, message: &str) -> bool {
        let message = message.to_lowercase();
        self.0.iter().any(|m| message.contains(m.as_str()))
    }
}

/// One page of items, independent of the envelope it arrived in.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPage<T> {
    pub items: Vec<T>,
    /// Page number that was requested (1-based).
    pub page: u32,
    /// Page size that was requested.
    pub per_page: u32,
    pub total: Option<u64>,
    pub last_page: Option<u32>,
    /// Aggregate figures (credit/debit sums etc.), shape owned by the endpoint.
    pub totals: Option<Value>,
}

impl<T> RawPage<T> {
    /// An empty final page.
    pub fn empty(page: u32, per_page: u32) -> Self {
        Self {
            items: Vec::new(),
            page,
            per_page,
            total: None,
            last_page: None,
            totals: None,
        }
    }

    /// Whether a further page is likely to hold data.
    ///
    /// Trusts `last_page` when the endpoint sends it; otherwise a full
    /// page means "maybe more" and a short page means "done".
    pub fn has_more_hint(&self) -> bool {
        match self.last_page {
            Some(last) => self.page < last,
            None => usize::try_from(self.per_page).is_ok_and(|n| n > 0 && self.items.len() == n),
        }
    }
}

// ── Wire shapes ──────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(untagged)]
enum Body<T> {
    Bare(Vec<T>),
    Envelope(Envelope<T>),
}

#[derive(Deserialize)]
struct Envelope<T> {
    data: Option<Payload<T>>,
    success: Option<bool>,
    status: Option<Value>,
    message: Option<String>,
    current_page: Option<u32>,
    last_page: Option<u32>,
    total: Option<u64>,
    totals: Option<Value>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Payload<T> {
    Items(Vec<T>),
    Nested(Nested<T>),
}

#[derive(Deserialize)]
struct Nested<T> {
    #[serde(alias = "data")]
    items: Vec<T>,
    total: Option<u64>,
    totals: Option<Value>,
    current_page: Option<u32>,
    last_page: Option<u32>,
}

impl<T> Envelope<T> {
    fn reports_failure(&self) -> bool {
        if self.success == Some(false) {
            return true;
        }
        match &self.status {
            Some(Value::Bool(ok)) => !ok,
            Some(Value::String(s)) => {
                matches!(s.to_lowercase().as_str(), "error" | "fail" | "failed")
            }
            _ => false,
        }
    }
}

// ── Decoding ─────────────────────────────────────────────────────────

/// Decode a successful (2xx) list response body into a `RawPage`.
///
/// `http_status` is only used to label in-band failures.
pub(crate) fn decode_page<T: DeserializeOwned>(
    body: &str,
    http_status: u16,
    page: u32,
    per_page: u32,
    markers: &EmptyResultMarkers,
) -> Result<RawPage<T>, Error> {
    let parsed: Body<T> = serde_json::from_str(body).map_err(|e| deserialization(&e, body))?;

    let envelope = match parsed {
        Body::Bare(items) => {
            return Ok(RawPage {
                items,
                ..RawPage::empty(page, per_page)
            });
        }
        Body::Envelope(envelope) => envelope,
    };

    if envelope.reports_failure() {
        let message = envelope.message.unwrap_or_else(|| "request failed".into());
        return Err(if markers.matches(&message) {
            Error::NoRecords { message }
        } else {
            Error::Api {
                status: http_status,
                message,
            }
        });
    }

    let mut raw = RawPage {
        total: envelope.total,
        last_page: envelope.last_page,
        totals: envelope.totals,
        ..RawPage::empty(page, per_page)
    };

    match envelope.data {
        Some(Payload::Items(items)) => raw.items = items,
        Some(Payload::Nested(nested)) => {
            raw.items = nested.items;
            raw.total = nested.total.or(raw.total);
            raw.totals = nested.totals.or(raw.totals);
            raw.last_page = nested.last_page.or(raw.last_page);
            if let Some(current) = nested.current_page.or(envelope.current_page) {
                raw.page = current;
            }
            return Ok(raw);
        }
        None => {}
    }

    if let Some(current) = envelope.current_page {
        raw.page = current;
    }
    Ok(raw)
}

/// Decode a single-record response: either the record itself or `{ "data": record }`.
pub(crate) fn decode_record<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
    #[derive(Deserialize)]
    struct Wrapped<T> {
        data: T,
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Single<T> {
        Wrapped(Wrapped<T>),
        Plain(T),
    }

    let single: Single<T> = serde_json::from_str(body).map_err(|e| deserialization(&e, body))?;
    Ok(match single {
        Single::Wrapped(w) => w.data,
        Single::Plain(t) => t,
    })
}

fn deserialization(err: &serde_json::Error, body: &str) -> Error {
    let preview: String = body.chars().take(200).collect();
    Error::Deserialization {
        message: format!("{err} (body preview: {preview:?})"),
        body: body.to_owned(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn decode(body: &Value, page: u32, per_page: u32) -> Result<RawPage<Value>, Error> {
        decode_page(
            &body.to_string(),
            200,
            page,
            per_page,
            &EmptyResultMarkers::default(),
        )
    }

    fn ids(page: &RawPage<Value>) -> Vec<i64> {
        page.items
            .iter()
            .map(|v| v["id"].as_i64().unwrap())
            .collect()
    }

    #[test]
    fn bare_array() {
        let page = decode(&json!([{ "id": 1 }, { "id": 2 }]), 1, 2).unwrap();
        assert_eq!(ids(&page), vec![1, 2]);
        assert!(page.has_more_hint());
    }

    #[test]
    fn data_as_array_with_meta() {
        let body = json!({
            "data": [{ "id": 7 }],
            "current_page": 3,
            "last_page": 3,
            "total": 41
        });
        let page = decode(&body, 3, 20).unwrap();
        assert_eq!(ids(&page), vec![7]);
        assert_eq!(page.total, Some(41));
        assert_eq!(page.page, 3);
        assert!(!page.has_more_hint());
    }

    #[test]
    fn data_with_nested_items_and_totals() {
        let body = json!({
            "data": {
                "items": [{ "id": 1 }, { "id": 2 }],
                "total": 2,
                "totals": { "credit": 150.0, "debit": 40.5 }
            }
        });
        let page = decode(&body, 1, 20).unwrap();
        assert_eq!(ids(&page), vec![1, 2]);
        assert_eq!(page.total, Some(2));
        assert_eq!(page.totals, Some(json!({ "credit": 150.0, "debit": 40.5 })));
        assert!(!page.has_more_hint());
    }

    #[test]
    fn paginator_dump_uses_inner_last_page() {
        let body = json!({
            "data": { "data": [{ "id": 5 }], "current_page": 1, "last_page": 4 }
        });
        let page = decode(&body, 1, 10).unwrap();
        assert_eq!(ids(&page), vec![5]);
        assert!(page.has_more_hint(), "page 1 of 4 has more");
    }

    #[test]
    fn full_page_without_meta_hints_more() {
        let items: Vec<Value> = (1..=20).map(|i| json!({ "id": i })).collect();
        let page = decode(&json!({ "data": items }), 1, 20).unwrap();
        assert!(page.has_more_hint());

        let short: Vec<Value> = (1..=5).map(|i| json!({ "id": i })).collect();
        let page = decode(&json!({ "data": short }), 1, 20).unwrap();
        assert!(!page.has_more_hint());
    }

    #[test]
    fn empty_marker_becomes_no_records() {
        let body = json!({ "status": false, "message": "No Data Found for selected filters" });
        let err = decode(&body, 1, 10).unwrap_err();
        assert!(err.is_empty_result(), "got {err:?}");
    }

    #[test]
    fn in_band_failure_without_marker_is_api_error() {
        let body = json!({ "success": false, "message": "hotel is archived" });
        let err = decode(&body, 1, 10).unwrap_err();
        assert!(
            matches!(err, Error::Api { status: 200, ref message } if message == "hotel is archived"),
            "got {err:?}"
        );
    }

    #[test]
    fn markers_none_never_match() {
        let body = json!({ "status": "error", "message": "No data found" }).to_string();
        let err = decode_page::<Value>(&body, 200, 1, 10, &EmptyResultMarkers::none()).unwrap_err();
        assert!(matches!(err, Error::Api { .. }));
    }

    #[test]
    fn null_data_is_empty_page() {
        let page = decode(&json!({ "data": null, "message": "ok" }), 2, 10).unwrap();
        assert!(page.items.is_empty());
        assert!(!page.has_more_hint());
    }

    #[test]
    fn garbage_is_deserialization_error() {
        let err = decode_page::<Value>("<html>", 200, 1, 10, &EmptyResultMarkers::default())
            .unwrap_err();
        assert!(matches!(err, Error::Deserialization { .. }));
    }

    #[test]
    fn record_plain_or_wrapped() {
        let plain: Value = decode_record(r#"{"id":3,"name":"Sea View"}"#).unwrap();
        assert_eq!(plain["name"], "Sea View");

        let wrapped: Value = decode_record(r#"{"data":{"id":3,"name":"Sea View"}}"#).unwrap();
        assert_eq!(wrapped["id"], 3);
    }
}

#![allow(clippy::unwrap_used)]
// Integration tests for `ApiClient` using wiremock.

use secrecy::SecretString;
use serde_json::{Value, json};
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use hotelops_api::{ApiClient, EmptyResultMarkers, Error, Resource, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let token = SecretString::from("test-token".to_string());
    let client =
        ApiClient::from_token(&format!("{}/api", server.uri()), &token, &TransportConfig::default())
            .unwrap();
    (server, client)
}

fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect()
}

// ── Paging ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_fetch_page_sends_filters_paging_and_token() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/employees"))
        .and(header("authorization", "Bearer test-token"))
        .and(query_param("hotel_id", "4"))
        .and(query_param("page", "2"))
        .and(query_param("per_page", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "id": 11, "name": "Asha" }, { "id": 12, "name": "Ravi" }],
            "current_page": 2
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = client
        .fetch_page::<Value>(Resource::Employees, &params(&[("hotel_id", "4")]), 2, 10)
        .await
        .unwrap();

    assert_eq!(page.items.len(), 2);
    assert_eq!(page.page, 2);
    assert!(!page.has_more_hint());
}

#[tokio::test]
async fn test_fetch_page_nested_items_envelope() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/payment-ledger"))
        .and(query_param_is_missing("hotel_id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "items": [{ "id": "L-1", "amount": 120 }],
                "total": 1,
                "totals": { "credit": 120, "debit": 0 }
            }
        })))
        .mount(&server)
        .await;

    let page = client
        .fetch_page::<Value>(Resource::PaymentLedger, &[], 1, 20)
        .await
        .unwrap();

    assert_eq!(page.items[0]["id"], "L-1");
    assert_eq!(page.total, Some(1));
    assert_eq!(page.totals.unwrap()["credit"], 120);
}

#[tokio::test]
async fn test_no_data_message_is_no_records() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/reports/advances"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "message": "No data found" })),
        )
        .mount(&server)
        .await;

    let result = client
        .fetch_page::<Value>(Resource::AdvanceReport, &[], 1, 20)
        .await;

    assert!(
        matches!(result, Err(Error::NoRecords { .. })),
        "expected NoRecords, got: {result:?}"
    );
}

#[tokio::test]
async fn test_custom_markers_disable_empty_mapping() {
    let (server, client) = setup().await;
    let client = client.with_empty_markers(EmptyResultMarkers::none());

    Mock::given(method("GET"))
        .and(path("/api/reports/advances"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "message": "No data found" })),
        )
        .mount(&server)
        .await;

    let result = client
        .fetch_page::<Value>(Resource::AdvanceReport, &[], 1, 20)
        .await;

    assert!(
        matches!(result, Err(Error::Api { status: 404, .. })),
        "expected Api 404, got: {result:?}"
    );
}

#[tokio::test]
async fn test_unauthorized_is_authentication_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/hotels"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Unauthenticated." })),
        )
        .mount(&server)
        .await;

    let result = client.fetch_page::<Value>(Resource::Hotels, &[], 1, 10).await;

    assert!(
        matches!(result, Err(Error::Authentication { ref message }) if message == "Unauthenticated."),
        "expected Authentication error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_server_error_is_transient_api_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/materials"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let err = client
        .fetch_page::<Value>(Resource::Materials, &[], 1, 10)
        .await
        .unwrap_err();

    assert!(err.is_transient(), "got {err:?}");
    assert_eq!(err.status(), Some(502));
}

#[tokio::test]
async fn test_list_all_walks_pages() {
    let (server, client) = setup().await;

    let first: Vec<Value> = (1..=10).map(|i| json!({ "id": i })).collect();
    Mock::given(method("GET"))
        .and(path("/api/hotels"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": first })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/hotels"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [{ "id": 11 }] })))
        .mount(&server)
        .await;

    let all: Vec<Value> = client.list_all(Resource::Hotels, &[]).await.unwrap();
    assert_eq!(all.len(), 11);
}

// ── Single records ──────────────────────────────────────────────────

#[tokio::test]
async fn test_get_record_unwraps_data() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/hotels/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "id": 3, "name": "Harbour Inn" }
        })))
        .mount(&server)
        .await;

    let hotel: Value = client.get_record(Resource::Hotels, "3").await.unwrap();
    assert_eq!(hotel["name"], "Harbour Inn");
}

#[tokio::test]
async fn test_create_update_delete_record() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/expenses"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "id": 90, "amount": 15.5 })),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/expenses/90"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "data": { "id": 90, "amount": 20 } })),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/expenses/90"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let created: Value = client
        .create_record(Resource::Expenses, &json!({ "amount": 15.5 }))
        .await
        .unwrap();
    assert_eq!(created["id"], 90);

    let updated: Value = client
        .update_record(Resource::Expenses, "90", &json!({ "amount": 20 }))
        .await
        .unwrap();
    assert_eq!(updated["amount"], 20);

    client.delete_record(Resource::Expenses, "90").await.unwrap();
}

#[tokio::test]
async fn test_missing_record_is_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/employees/999"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "message": "Employee not found" })),
        )
        .mount(&server)
        .await;

    let err = client
        .get_record::<Value>(Resource::Employees, "999")
        .await
        .unwrap_err();
    assert!(err.is_not_found(), "got {err:?}");
}

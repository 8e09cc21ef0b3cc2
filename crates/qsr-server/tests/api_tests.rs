//! End-to-end tests of the HTTP surface

use pretty_assertions::assert_eq;
use qsr_core::FetchOrchestrator;
use qsr_server::{app, AppState};
use qsr_test_utils::{full_kissflow_record, live_config, test_config, FakeKissflow, FakeResponse};
use serde_json::{json, Value};
use warp::http::StatusCode;

fn mock_state() -> AppState {
    let config = test_config();
    AppState::new(FetchOrchestrator::mock_only(&config), &config)
}

async fn send(state: AppState, request: warp::test::RequestBuilder) -> (StatusCode, Value) {
    let response = request.reply(&app(state)).await;
    let status = response.status();
    let body = serde_json::from_slice(response.body()).unwrap_or(Value::Null);
    (status, body)
}

async fn fetch(state: AppState, body: Value) -> (StatusCode, Value) {
    send(
        state,
        warp::test::request()
            .method("POST")
            .path("/api/v1/qsr/fetch-data")
            .json(&body),
    )
    .await
}

async fn get(state: AppState, path: &str) -> (StatusCode, Value) {
    send(state, warp::test::request().method("GET").path(path)).await
}

#[tokio::test]
async fn fetch_valid_item_returns_mock_report() {
    let (status, body) = fetch(mock_state(), json!({ "item_id": "KFF-0111" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["dataSource"], "mock");
    assert!(body["data"]["FeatureName"]
        .as_str()
        .unwrap()
        .contains("Flow Lock"));
    assert_eq!(body["data"]["TestExecutionData"].as_array().unwrap().len(), 3);
    assert_eq!(body["data"]["DefectData"].as_array().unwrap().len(), 7);

    let missing: Vec<&str> = body["missingFields"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(Value::as_str)
        .collect();
    assert!(missing.contains(&"env"));
    assert!(!missing.contains(&"FeatureName"));
    assert!(!missing.contains(&"TestExecutionData"));
}

#[tokio::test]
async fn fetch_rejects_bad_prefix() {
    let (status, body) = fetch(mock_state(), json!({ "item_id": "bad-id" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status_code"], 400);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("Invalid Item ID format"));
}

#[tokio::test]
async fn fetch_rejects_empty_and_blank_ids() {
    for raw in ["", "   "] {
        let (status, body) = fetch(mock_state(), json!({ "item_id": raw })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "id {raw:?}");
        assert_eq!(body["message"], "Item ID is required");
    }
}

#[tokio::test]
async fn fetch_rejects_leading_whitespace() {
    let (status, _) = fetch(mock_state(), json!({ "item_id": " KFF-0111" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn fetch_rejects_malformed_body() {
    let (status, body) = send(
        mock_state(),
        warp::test::request()
            .method("POST")
            .path("/api/v1/qsr/fetch-data")
            .header("content-type", "application/json")
            .body("{\"item\": 1"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Bad Request");
}

#[tokio::test]
async fn fetch_rejects_missing_item_id() {
    let (status, _) = fetch(mock_state(), json!({ "id": "KFF-0111" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn fetch_uses_kissflow_when_configured() {
    let fake = FakeKissflow::spawn(FakeResponse::json(200, &full_kissflow_record())).await;
    let config = live_config(&fake.base_url());
    let state = AppState::from_config(&config).unwrap();

    let (status, body) = fetch(state, json!({ "item_id": "KFF-0600" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["dataSource"], "kissflow");
    assert_eq!(body["data"]["FeatureName"], "Audit Trail");
    assert_eq!(body["data"]["PreparedBy"], "Priya, Arun");
    assert_eq!(fake.requests().len(), 1);
}

#[tokio::test]
async fn fetch_falls_back_when_kissflow_fails() {
    let fake = FakeKissflow::spawn(FakeResponse::raw(500, "boom")).await;
    let state = AppState::from_config(&live_config(&fake.base_url())).unwrap();

    let (status, body) = fetch(state, json!({ "item_id": "KFF-0111" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["dataSource"], "mock");
}

#[tokio::test]
async fn status_reports_mock_mode() {
    let (status, body) = get(mock_state(), "/api/v1/qsr/status").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "status": "healthy",
            "service": "QSR Backend API",
            "version": "1.0.0",
            "kissflow_configured": false,
            "data_source": "mock",
        })
    );
}

#[tokio::test]
async fn status_reports_live_mode() {
    let config = live_config("http://127.0.0.1:9/items");
    let state = AppState::from_config(&config).unwrap();

    let (_, body) = get(state, "/api/v1/qsr/status").await;

    assert_eq!(body["kissflow_configured"], true);
    assert_eq!(body["data_source"], "kissflow");
}

#[tokio::test]
async fn health_endpoints() {
    let (status, body) = get(mock_state(), "/api/v1/qsr/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], "1.0.0");

    let (status, body) = get(mock_state(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "status": "healthy", "service": "QSR Backend API" })
    );
}

#[tokio::test]
async fn root_describes_service() {
    let (status, body) = get(mock_state(), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "QSR Automation Backend API");
    assert_eq!(body["docs"], "/docs");
}

#[tokio::test]
async fn defects_for_known_item() {
    let (status, body) = get(mock_state(), "/api/v1/qsr/defects/KFF-0111").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["item_id"], "KFF-0111");
    let defects = body["defects"].as_array().unwrap();
    assert!(!defects.is_empty());
    assert_eq!(body["summary"]["total"], defects.len());
}

#[tokio::test]
async fn defects_filtered_by_cycle() {
    let (_, all) = get(mock_state(), "/api/v1/qsr/defects/KFF-0111").await;
    let (status, body) = get(mock_state(), "/api/v1/qsr/defects/KFF-0111?cycle=1").await;

    assert_eq!(status, StatusCode::OK);
    let filtered = body["defects"].as_array().unwrap();
    assert!(filtered.iter().all(|d| d["cycle"] == 1));
    assert!(filtered.len() <= all["defects"].as_array().unwrap().len());
    assert_eq!(body["summary"], all["summary"]);
}

#[tokio::test]
async fn defects_rejects_invalid_id_and_query() {
    let (status, _) = get(mock_state(), "/api/v1/qsr/defects/ABC-1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get(mock_state(), "/api/v1/qsr/defects/KFF-0111?cycle=first").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let (status, body) = get(mock_state(), "/api/v1/qsr/nope").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status_code"], 404);
}

#[tokio::test]
async fn wrong_method_is_rejected() {
    let (status, body) = get(mock_state(), "/api/v1/qsr/fetch-data").await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["status_code"], 405);
}

#[tokio::test]
async fn cors_allows_local_frontend() {
    let response = warp::test::request()
        .method("OPTIONS")
        .path("/api/v1/qsr/fetch-data")
        .header("origin", "http://localhost:3000")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type")
        .reply(&app(mock_state()))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "http://localhost:3000"
    );
}

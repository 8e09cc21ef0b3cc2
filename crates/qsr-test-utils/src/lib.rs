//! Testing utilities for the QSR workspace
//!
//! Shared fixtures and an in-process fake of the Kissflow item endpoint.

#![allow(missing_docs)]

use parking_lot::Mutex;
use qsr_core::{KissflowCredentials, QsrConfig};
use qsr_model::{ItemId, QsrData, QsrField, TestBuild};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use warp::http::{HeaderMap, StatusCode};
use warp::path::FullPath;
use warp::Filter;

pub const TEST_ACCESS_KEY_ID: &str = "test-key-id";
pub const TEST_ACCESS_KEY_SECRET: &str = "test-key-secret";

/// Mock-mode configuration without artificial latency
pub fn test_config() -> QsrConfig {
    QsrConfig::new().with_mock_latency(Duration::ZERO)
}

/// Live-mode configuration pointing at `base_url`
pub fn live_config(base_url: &str) -> QsrConfig {
    test_config().with_credentials(KissflowCredentials::new(
        base_url,
        TEST_ACCESS_KEY_ID,
        TEST_ACCESS_KEY_SECRET,
    ))
}

/// Base URL nothing listens on
pub fn unreachable_base_url() -> String {
    "http://127.0.0.1:1/items".to_string()
}

pub fn item(raw: &str) -> ItemId {
    ItemId::parse(raw).unwrap()
}

/// Feature record with every required field and one build
pub fn complete_qsr_data() -> QsrData {
    let mut data = QsrData::default();
    for field in QsrField::ALL {
        *data.text_mut(field) = Some(format!("{field} value"));
    }
    data.test_execution_data = Some(vec![TestBuild::from_counts(1, 10, 10, 9, 1)]);
    data
}

/// Kissflow item carrying only a name and a team
pub fn sparse_kissflow_record() -> Value {
    json!({
        "_id": "KFF-0500",
        "Name": "Sparse Feature",
        "Team": "Platform"
    })
}

/// Kissflow item with every mapped key populated
pub fn full_kissflow_record() -> Value {
    json!({
        "_id": "KFF-0600",
        "Name": "Audit Trail",
        "Team": "Core",
        "Estimated_launch_quarter": "Q1 2026",
        "Frontend_PR_link": "https://github.com/example/fe/pull/7",
        "Backend_PR_Link": "https://github.com/example/be/pull/8",
        "TDD_Link_1": "https://docs.example/tdd",
        "Test_Case_Link": "https://docs.example/tc",
        "TC_Prepared_by": [{ "Name": "Priya" }, { "Name": "Arun" }],
        "AssignedTo": [{ "Name": "Meena" }],
        "Frontend_Developer": { "Name": "Karthik" },
        "Backend_Developer": [{ "Name": "Divya" }],
        "TDD_Prepared_by": [{ "Name": "Divya" }]
    })
}

/// Canned answer of the fake Kissflow endpoint
#[derive(Debug, Clone)]
pub struct FakeResponse {
    pub status: u16,
    pub body: String,
    pub delay: Duration,
}

impl FakeResponse {
    pub fn json(status: u16, body: &Value) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn raw(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// One request seen by the fake endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub item_id: String,
    /// Request path exactly as sent, still percent-encoded
    pub raw_path: String,
    pub access_key_id: Option<String>,
    pub access_key_secret: Option<String>,
    pub accept: Option<String>,
}

/// Running fake of `GET {base}/items/{item_id}`
#[derive(Debug)]
pub struct FakeKissflow {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl FakeKissflow {
    /// Start a fake answering every item with `response`
    pub async fn spawn(response: FakeResponse) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);
        let response = Arc::new(response);

        let route = warp::get()
            .and(warp::path!("items" / String))
            .and(warp::path::full())
            .and(warp::header::headers_cloned())
            .then(move |item_id: String, path: FullPath, headers: HeaderMap| {
                let recorded = Arc::clone(&recorded);
                let response = Arc::clone(&response);
                async move {
                    recorded.lock().push(RecordedRequest {
                        item_id,
                        raw_path: path.as_str().to_string(),
                        access_key_id: header(&headers, "x-access-key-id"),
                        access_key_secret: header(&headers, "x-access-key-secret"),
                        accept: header(&headers, "accept"),
                    });
                    if !response.delay.is_zero() {
                        tokio::time::sleep(response.delay).await;
                    }
                    let status =
                        StatusCode::from_u16(response.status).unwrap_or(StatusCode::OK);
                    warp::reply::with_status(response.body.clone(), status)
                }
            });

        let (addr, server) = warp::serve(route).bind_ephemeral(([127, 0, 0, 1], 0));
        tokio::spawn(server);

        Self { addr, requests }
    }

    /// Base URL to configure as `KISSFLOW_BASE_URL`
    pub fn base_url(&self) -> String {
        format!("http://{}/items", self.addr)
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

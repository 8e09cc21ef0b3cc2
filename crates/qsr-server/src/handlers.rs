//! Request handlers

use crate::rejection::ApiError;
use crate::state::AppState;
use crate::{API_VERSION, SERVICE_NAME};
use qsr_core::{feature_for_item, DefectSummary};
use qsr_model::{DataSource, Defect, ItemId, ItemRequest};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};
use warp::{Rejection, Reply};

/// `POST /api/v1/qsr/fetch-data`
pub async fn fetch_data(request: ItemRequest, state: AppState) -> Result<impl Reply, Rejection> {
    info!(item_id = %request.item_id, "Received request to fetch data");

    let item_id = parse_item_id(&request.item_id)?;
    let response = state.orchestrator.fetch(&item_id).await;
    info!(
        item_id = %item_id,
        missing = response.missing_fields.len(),
        "Processed fetch request"
    );
    Ok(warp::reply::json(&response))
}

#[derive(Debug, Serialize)]
struct StatusReport {
    status: &'static str,
    service: &'static str,
    version: &'static str,
    kissflow_configured: bool,
    data_source: DataSource,
}

/// `GET /api/v1/qsr/status`
pub async fn status(state: AppState) -> Result<impl Reply, Rejection> {
    let mode = state.orchestrator.mode();
    Ok(warp::reply::json(&StatusReport {
        status: "healthy",
        service: SERVICE_NAME,
        version: API_VERSION,
        kissflow_configured: state.orchestrator.is_live(),
        data_source: mode.data_source(),
    }))
}

/// `GET /api/v1/qsr/health`
pub async fn qsr_health() -> Result<impl Reply, Rejection> {
    Ok(warp::reply::json(&json!({
        "status": "healthy",
        "service": SERVICE_NAME,
        "version": API_VERSION,
    })))
}

/// `GET /health`
pub async fn health() -> Result<impl Reply, Rejection> {
    Ok(warp::reply::json(&json!({
        "status": "healthy",
        "service": SERVICE_NAME,
    })))
}

/// `GET /`
pub async fn root() -> Result<impl Reply, Rejection> {
    Ok(warp::reply::json(&json!({
        "message": "QSR Automation Backend API",
        "version": API_VERSION,
        "docs": "/docs",
    })))
}

/// Query string of the defect endpoint
#[derive(Debug, Default, Deserialize)]
pub struct DefectQuery {
    pub cycle: Option<u32>,
}

#[derive(Debug, Serialize)]
struct DefectReport<'a> {
    item_id: &'a str,
    feature_id: &'static str,
    defects: Vec<Defect>,
    summary: DefectSummary,
}

/// `GET /api/v1/qsr/defects/{item_id}`
pub async fn defects(
    raw_item_id: String,
    query: DefectQuery,
    state: AppState,
) -> Result<impl Reply, Rejection> {
    let item_id = parse_item_id(&raw_item_id)?;
    let feature_id = feature_for_item(item_id.as_str());

    let defects = match query.cycle {
        Some(cycle) => state.defects.by_cycle(feature_id, cycle),
        None => state.defects.by_feature(feature_id).to_vec(),
    };
    let summary = state.defects.summary(feature_id);

    Ok(warp::reply::json(&DefectReport {
        item_id: item_id.as_str(),
        feature_id,
        defects,
        summary,
    }))
}

fn parse_item_id(raw: &str) -> Result<ItemId, Rejection> {
    ItemId::parse(raw).map_err(|err| {
        warn!(item_id = raw, error = %err, "Rejected item id");
        ApiError::from(err).into()
    })
}

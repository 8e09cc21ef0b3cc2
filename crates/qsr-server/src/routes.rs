//! Route table

use crate::handlers::{self, DefectQuery};
use crate::rejection::handle_rejection;
use crate::state::AppState;
use qsr_model::ItemRequest;
use std::convert::Infallible;
use warp::http::Uri;
use warp::{Filter, Rejection, Reply};

/// Largest accepted request body
const MAX_BODY_BYTES: u64 = 16 * 1024;

/// Development origins always allowed besides the configured frontend
const DEV_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://127.0.0.1:3000"];

/// Complete application filter: routes, error mapping, CORS and request tracing
pub fn app(state: AppState) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let cors = cors(&state.frontend_url);
    api(state)
        .or(root())
        .or(health())
        .recover(handle_rejection)
        .with(cors)
        .with(warp::trace::request())
}

/// Routes under `/api/v1/qsr`
pub fn api(state: AppState) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    fetch_data(state.clone())
        .or(status(state.clone()))
        .or(qsr_health())
        .or(defects(state))
}

fn fetch_data(state: AppState) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    warp::path!("api" / "v1" / "qsr" / "fetch-data")
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json::<ItemRequest>())
        .and(with_state(state))
        .and_then(handlers::fetch_data)
}

fn status(state: AppState) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    warp::path!("api" / "v1" / "qsr" / "status")
        .and(warp::get())
        .and(with_state(state))
        .and_then(handlers::status)
}

fn qsr_health() -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    warp::path!("api" / "v1" / "qsr" / "health")
        .and(warp::get())
        .and_then(handlers::qsr_health)
}

fn defects(state: AppState) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    warp::path!("api" / "v1" / "qsr" / "defects" / String)
        .and(warp::get())
        .and(warp::query::<DefectQuery>())
        .and(with_state(state))
        .and_then(handlers::defects)
}

fn health() -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    warp::path!("health")
        .and(warp::get())
        .and_then(handlers::health)
}

fn root() -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    warp::path::end()
        .and(warp::get())
        .and_then(handlers::root)
}

fn with_state(state: AppState) -> impl Filter<Extract = (AppState,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

fn cors(frontend_url: &str) -> warp::cors::Builder {
    let mut origins: Vec<String> = Vec::with_capacity(DEV_ORIGINS.len() + 1);
    match normalize_origin(frontend_url) {
        Some(origin) => origins.push(origin),
        None => tracing::warn!(frontend_url, "Ignoring invalid frontend origin"),
    }
    for origin in DEV_ORIGINS {
        if !origins.iter().any(|o| o == origin) {
            origins.push(origin.to_string());
        }
    }

    warp::cors()
        .allow_origins(origins.iter().map(String::as_str))
        .allow_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allow_headers(vec![
            "accept",
            "authorization",
            "content-type",
            "x-requested-with",
        ])
        .allow_credentials(true)
}

/// `scheme://authority` form of a URL, or `None` if it cannot be an origin
fn normalize_origin(url: &str) -> Option<String> {
    let uri: Uri = url.trim().parse().ok()?;
    let scheme = uri.scheme_str()?;
    let authority = uri.authority()?;
    if !matches!(scheme, "http" | "https") || !matches!(uri.path(), "" | "/") {
        return None;
    }
    if uri.query().is_some() {
        return None;
    }
    Some(format!("{scheme}://{authority}"))
}

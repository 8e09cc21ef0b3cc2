//! Rejection handling
//!
//! Every failure leaves the server as an [`ErrorBody`] so clients see one
//! error shape regardless of which filter rejected the request.

use qsr_model::{ErrorBody, ItemIdError};
use std::convert::Infallible;
use warp::filters::body::BodyDeserializeError;
use warp::http::StatusCode;
use warp::reject::{InvalidQuery, MethodNotAllowed, PayloadTooLarge, UnsupportedMediaType};
use warp::{Rejection, Reply};

/// Request-level failures raised by handlers
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    InvalidItemId(#[from] ItemIdError),
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidItemId(_) => StatusCode::BAD_REQUEST,
        }
    }
}

// `From<ApiError> for Rejection` comes from warp's blanket impl over `Reject`.
impl warp::reject::Reject for ApiError {}

/// Turn any rejection into a JSON error response
pub async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let (status, message) = classify(&err);
    let error = status.canonical_reason().unwrap_or("Error");
    let body = ErrorBody::new(error, message, status.as_u16());
    Ok(warp::reply::with_status(warp::reply::json(&body), status))
}

fn classify(err: &Rejection) -> (StatusCode, String) {
    if let Some(api) = err.find::<ApiError>() {
        return (api.status(), api.to_string());
    }
    if let Some(e) = err.find::<BodyDeserializeError>() {
        return (StatusCode::BAD_REQUEST, format!("Invalid request body: {e}"));
    }
    if let Some(e) = err.find::<InvalidQuery>() {
        return (StatusCode::BAD_REQUEST, e.to_string());
    }
    if err.find::<UnsupportedMediaType>().is_some() {
        return (
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "Request body must be application/json".to_string(),
        );
    }
    if err.find::<PayloadTooLarge>().is_some() {
        return (
            StatusCode::PAYLOAD_TOO_LARGE,
            "Request body too large".to_string(),
        );
    }
    if err.is_not_found() {
        return (StatusCode::NOT_FOUND, "Resource not found".to_string());
    }
    if err.find::<MethodNotAllowed>().is_some() {
        return (
            StatusCode::METHOD_NOT_ALLOWED,
            "Method not allowed".to_string(),
        );
    }

    tracing::error!(rejection = ?err, "Unhandled rejection");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "An unexpected error occurred".to_string(),
    )
}

//! QSR Server - HTTP API for Quality Summary Report data
//!
//! Routes under `/api/v1/qsr` validate item ids, delegate to the fetch
//! orchestrator and translate outcomes to HTTP responses. Liveness endpoints
//! live at `/` and `/health`.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod handlers;
pub mod rejection;
pub mod routes;
pub mod state;
pub mod telemetry;

pub use rejection::{handle_rejection, ApiError};
pub use routes::app;
pub use state::AppState;
pub use telemetry::{init_tracing, LogFormat};

/// Service name reported by health endpoints
pub const SERVICE_NAME: &str = "QSR Backend API";

/// Public API version
pub const API_VERSION: &str = "1.0.0";

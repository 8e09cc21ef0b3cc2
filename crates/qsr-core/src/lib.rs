//! QSR Core - fetch pipeline for Quality Summary Report data
//!
//! Turns a Kissflow item id into a QSR response:
//! - Fetches the item from Kissflow, or from canned mock data
//! - Maps the Kissflow document to a feature record
//! - Lists the required fields still missing
//! - Serves per-feature defect fixtures
//!
//! # Example
//!
//! ```rust,ignore
//! use qsr_core::{FetchOrchestrator, QsrConfig};
//! use qsr_model::ItemId;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = QsrConfig::from_env()?;
//! let orchestrator = FetchOrchestrator::new(&config)?;
//!
//! let response = orchestrator.fetch(&ItemId::parse("KFF-0111")?).await;
//! println!("{} fields missing", response.missing_fields.len());
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod config;
pub mod defects;
pub mod error;
pub mod kissflow;
pub mod mapper;
pub mod missing;
pub mod mock;
pub mod orchestrator;

pub use config::{KissflowCredentials, QsrConfig, DEFAULT_MOCK_LATENCY, UPSTREAM_TIMEOUT};
pub use defects::{feature_for_item, DefectCatalog, DefectSummary};
pub use error::{ConfigError, UpstreamError};
pub use kissflow::{ItemSource, KissflowClient};
pub use mapper::{map_kissflow_record, PersonRef};
pub use missing::identify_missing_fields;
pub use mock::{MockDataProvider, MOCK_FEATURE_TITLE};
pub use orchestrator::{FetchOrchestrator, SourceMode};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with QSR Core
    pub use crate::{
        identify_missing_fields, map_kissflow_record, DefectCatalog, FetchOrchestrator,
        ItemSource, QsrConfig, SourceMode,
    };
    pub use qsr_model::{DataSource, ItemId, QsrData, QsrResponse};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! QSR Model - shared vocabulary for Quality Summary Reports
//!
//! Pure data shapes exchanged between the fetch pipeline and the HTTP surface:
//! - Feature records and the canonical required-field list
//! - Test build (execution cycle) records
//! - Defect records with status, severity and priority
//! - Response envelope and error body
//! - Validated item identifiers
//!
//! # Example
//!
//! ```rust
//! use qsr_model::{ItemId, QsrData, QsrField};
//!
//! let id = ItemId::parse("KFF-0111").unwrap();
//! assert_eq!(id.as_str(), "KFF-0111");
//!
//! let data = QsrData::default();
//! assert!(data.text(QsrField::FeatureName).is_none());
//! ```

#![warn(unreachable_pub)]

pub mod defect;
pub mod envelope;
pub mod error;
pub mod feature;
pub mod item_id;
pub mod test_build;

pub use defect::{Defect, DefectStatus, Priority, Severity};
pub use envelope::{DataSource, ErrorBody, ItemRequest, QsrResponse};
pub use error::ModelError;
pub use feature::{QsrData, QsrField, TEST_EXECUTION_DATA};
pub use item_id::{ItemId, ItemIdError, ITEM_ID_PREFIX};
pub use test_build::TestBuild;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

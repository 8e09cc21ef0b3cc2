//! Shared, read-only request state

use qsr_core::{DefectCatalog, FetchOrchestrator, QsrConfig, UpstreamError};
use std::sync::Arc;

/// Everything handlers need, cloned per request
#[derive(Debug, Clone)]
pub struct AppState {
    pub orchestrator: Arc<FetchOrchestrator>,
    pub defects: Arc<DefectCatalog>,
    /// Frontend origin allowed by CORS
    pub frontend_url: String,
}

impl AppState {
    /// Build state from configuration
    pub fn from_config(config: &QsrConfig) -> Result<Self, UpstreamError> {
        let orchestrator = FetchOrchestrator::new(config)?;
        Ok(Self::new(orchestrator, config))
    }

    /// Build state around an existing orchestrator
    #[must_use]
    pub fn new(orchestrator: FetchOrchestrator, config: &QsrConfig) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
            defects: Arc::new(DefectCatalog::new()),
            frontend_url: config.frontend_url.clone(),
        }
    }
}

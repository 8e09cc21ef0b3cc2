//! Fetch orchestration: live Kissflow call with a per-request mock fallback
//!
//! The mode is chosen once, at construction, from the injected
//! configuration. A failing live call degrades that single request to mock
//! data; it never switches the orchestrator into mock mode.

use crate::config::QsrConfig;
use crate::error::UpstreamError;
use crate::kissflow::{ItemSource, KissflowClient};
use crate::mapper::map_kissflow_record;
use crate::missing::identify_missing_fields;
use crate::mock::MockDataProvider;
use qsr_model::{DataSource, ItemId, QsrResponse};
use std::sync::Arc;

/// Which source the orchestrator was configured with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceMode {
    /// Credentials present: call Kissflow, fall back per request
    Live,
    /// No credentials: always mock
    Mock,
}

impl SourceMode {
    /// Data source reported for this mode
    #[inline]
    #[must_use]
    pub fn data_source(self) -> DataSource {
        match self {
            SourceMode::Live => DataSource::Kissflow,
            SourceMode::Mock => DataSource::Mock,
        }
    }
}

/// Produces QSR responses for item ids
#[derive(Debug, Clone)]
pub struct FetchOrchestrator {
    live: Option<Arc<dyn ItemSource>>,
    mock: MockDataProvider,
}

impl FetchOrchestrator {
    /// Create an orchestrator from configuration
    ///
    /// Builds the Kissflow client when credentials are configured.
    pub fn new(config: &QsrConfig) -> Result<Self, UpstreamError> {
        let live = match &config.credentials {
            Some(credentials) => {
                let client = KissflowClient::new(credentials.clone(), config.upstream_timeout)?;
                Some(Arc::new(client) as Arc<dyn ItemSource>)
            }
            None => {
                tracing::warn!("Kissflow credentials not configured. Will use mock data.");
                None
            }
        };

        Ok(Self {
            live,
            mock: MockDataProvider::new(config.mock_latency),
        })
    }

    /// Create a live orchestrator over a custom item source
    #[must_use]
    pub fn with_source(config: &QsrConfig, source: Arc<dyn ItemSource>) -> Self {
        Self {
            live: Some(source),
            mock: MockDataProvider::new(config.mock_latency),
        }
    }

    /// Create an orchestrator that only serves mock data
    #[must_use]
    pub fn mock_only(config: &QsrConfig) -> Self {
        Self {
            live: None,
            mock: MockDataProvider::new(config.mock_latency),
        }
    }

    /// Configured mode
    #[inline]
    #[must_use]
    pub fn mode(&self) -> SourceMode {
        if self.live.is_some() {
            SourceMode::Live
        } else {
            SourceMode::Mock
        }
    }

    /// Whether live credentials are in use
    #[inline]
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.mode() == SourceMode::Live
    }

    /// Fetch, map and inspect one item
    ///
    /// Always succeeds; live failures are logged and answered with mock data.
    pub async fn fetch(&self, item_id: &ItemId) -> QsrResponse {
        let Some(source) = &self.live else {
            tracing::info!(item_id = %item_id, "Using mock data (no credentials configured)");
            return self.mock.fetch(item_id).await;
        };

        tracing::info!(item_id = %item_id, "Fetching data from Kissflow");
        match source.fetch_item(item_id).await {
            Ok(record) => {
                let data = map_kissflow_record(&record);
                let missing = identify_missing_fields(&data);
                tracing::info!(
                    item_id = %item_id,
                    missing = missing.len(),
                    "Successfully fetched data from Kissflow"
                );
                QsrResponse::new(data, missing, DataSource::Kissflow)
            }
            Err(err) => {
                tracing::error!(item_id = %item_id, error = %err, "Kissflow request failed");
                tracing::info!(
                    item_id = %item_id,
                    "Falling back to mock data due to {}",
                    err.fallback_reason()
                );
                self.mock.fetch(item_id).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KissflowCredentials;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[derive(Debug)]
    struct FixedSource {
        result: fn() -> Result<Value, UpstreamError>,
        calls: AtomicUsize,
    }

    impl FixedSource {
        fn new(result: fn() -> Result<Value, UpstreamError>) -> Arc<Self> {
            Arc::new(Self {
                result,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl ItemSource for FixedSource {
        async fn fetch_item(&self, _item_id: &ItemId) -> Result<Value, UpstreamError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.result)()
        }
    }

    fn config() -> QsrConfig {
        QsrConfig::new().with_mock_latency(Duration::ZERO)
    }

    fn item() -> ItemId {
        ItemId::parse("KFF-0111").unwrap()
    }

    #[test]
    fn mode_follows_credentials() {
        let mock = FetchOrchestrator::new(&config()).unwrap();
        assert_eq!(mock.mode(), SourceMode::Mock);
        assert!(!mock.is_live());

        let live = FetchOrchestrator::new(
            &config().with_credentials(KissflowCredentials::new("https://k", "id", "secret")),
        )
        .unwrap();
        assert_eq!(live.mode(), SourceMode::Live);
        assert_eq!(live.mode().data_source(), DataSource::Kissflow);
    }

    #[tokio::test]
    async fn live_success_maps_record() {
        let source = FixedSource::new(|| Ok(json!({ "Name": "Live Feature", "Team": "Core" })));
        let orchestrator = FetchOrchestrator::with_source(&config(), source.clone());

        let response = orchestrator.fetch(&item()).await;

        assert!(response.success);
        assert_eq!(response.data_source, DataSource::Kissflow);
        assert_eq!(response.data.feature_name.as_deref(), Some("Live Feature"));
        assert_eq!(response.data.test_execution_data, None);
        assert!(response.missing_fields.contains(&"TestExecutionData".to_string()));
        assert!(!response.missing_fields.contains(&"TeamName".to_string()));
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn live_failure_falls_back_per_request() {
        let source = FixedSource::new(|| {
            Err(UpstreamError::Status {
                status: 503,
                body: "unavailable".to_string(),
            })
        });
        let orchestrator = FetchOrchestrator::with_source(&config(), source.clone());

        let first = orchestrator.fetch(&item()).await;
        let second = orchestrator.fetch(&item()).await;

        assert!(first.success);
        assert_eq!(first.data_source, DataSource::Mock);
        assert_eq!(first.data.build_count(), 3);
        // still live: each request tries Kissflow again
        assert_eq!(second.data_source, DataSource::Mock);
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
        assert!(orchestrator.is_live());
    }

    #[tokio::test]
    async fn decode_failure_falls_back() {
        let source = FixedSource::new(|| Err(UpstreamError::Decode("not json".to_string())));
        let orchestrator = FetchOrchestrator::with_source(&config(), source);

        let response = orchestrator.fetch(&item()).await;
        assert_eq!(response.data_source, DataSource::Mock);
    }

    #[tokio::test]
    async fn mock_only_never_calls_upstream() {
        let orchestrator = FetchOrchestrator::mock_only(&config());
        let response = orchestrator.fetch(&item()).await;

        assert!(response.success);
        assert_eq!(response.data_source, DataSource::Mock);
        assert!(response.missing_fields.contains(&"env".to_string()));
    }
}

//! Canned Kissflow data used when the live API is unavailable
//!
//! Every call returns the same "Flow Lock" feature regardless of the item id;
//! the id is only echoed into the record's `_id` and `_item_id` keys.

use crate::mapper::map_kissflow_record;
use crate::missing::identify_missing_fields;
use qsr_model::{DataSource, Defect, DefectStatus, ItemId, QsrResponse, Severity, TestBuild};
use serde_json::{json, Value};
use std::time::Duration;

/// Title of the canned feature
pub const MOCK_FEATURE_TITLE: &str = "Flow Lock - Concurrent edit prevention";

/// Deterministic stand-in for the Kissflow API
#[derive(Debug, Clone)]
pub struct MockDataProvider {
    latency: Duration,
}

impl MockDataProvider {
    /// Create a provider that waits `latency` before answering
    #[inline]
    #[must_use]
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    /// Artificial delay applied to each fetch
    #[inline]
    #[must_use]
    pub fn latency(&self) -> Duration {
        self.latency
    }

    /// Full mock response for an item
    pub async fn fetch(&self, item_id: &ItemId) -> QsrResponse {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let mut data = map_kissflow_record(&Self::kissflow_record(item_id.as_str()));
        data.test_execution_data = Some(Self::test_builds());
        data.defect_data = Some(Self::defects());

        let missing = identify_missing_fields(&data);
        tracing::info!(item_id = %item_id, missing = missing.len(), "Returning mock data");

        QsrResponse::new(data, missing, DataSource::Mock)
    }

    /// Kissflow-shaped item document for the canned feature
    #[must_use]
    pub fn kissflow_record(item_id: &str) -> Value {
        json!({
            "_id": item_id,
            "Name": format!("[ Enhancement ][ App ] :  {MOCK_FEATURE_TITLE}"),
            "_created_by": {
                "_id": "UsRb8oInnN4Rf",
                "Name": "Abdul Raghmaan K",
                "Kind": "User"
            },
            "_modified_by": {
                "_id": "Us7w_cRKhwOP",
                "Name": "Sankaran Baskaran",
                "Kind": "User"
            },
            "_created_at": "2025-07-10T08:04:19Z",
            "_modified_at": "2025-09-04T04:04:43Z",
            "_flow_name": "Kissflow Product Features",
            "_item_id": item_id,
            "AssignedTo": {
                "_id": "Us7w_cRKhwOP",
                "Name": "Sankaran Baskaran",
                "Kind": "User"
            },
            "_status_name": "TST",
            "_priority_name": "High",
            "Title_1": MOCK_FEATURE_TITLE,
            "Description_1": "When multiple users work on a single flow, flow meta is getting overridden. \
                Planning to introduce flow lock similar to process form builder outside of Apps.",
            "Work_type": "Enhancement",
            "TDD_Link_1": "https://coda.io/d/Engineering-Docs_ddWl30dEZao/Technical-Design-Document_suhbp8Px#Recently-Added_tuOVp5CP/r336&view=full",
            "TDD_Prepared_by": [
                { "_id": "Us7Fl4YvVlsI", "Name": "Roshini R S", "Kind": "User" },
                { "_id": "Us2G2k5nWTZZR", "Name": "Rashmi Subramani", "Kind": "User" }
            ],
            "Backend_PR_Link": "https://github.com/OrangeScape/kissflow-xg/pull/18089",
            "Frontend_PR_link": "https://github.com/OrangeScape/kf-xg-frontend/pull/11421",
            "Frontend_Developer": {
                "_id": "Us2G2k5nWTZZR",
                "Name": "Rashmi Subramani",
                "Kind": "User"
            },
            "Backend_Developer": {
                "_id": "Us7Fl4YvVlsI",
                "Name": "Roshini R S",
                "Kind": "User"
            },
            "Test_Case_Link": "https://docs.google.com/spreadsheets/d/1izR25BXTYRfvNvXCDZJ5TmpZ2INGkjRFyOW9JItewE4/edit?gid=0#gid=0",
            "TC_Prepared_by": [
                { "_id": "Us7w_cRKhwOP", "Name": "Sankaran Baskaran", "Kind": "User" }
            ],
            "Epic": "App",
            "Estimated_launch_quarter": "Q3 2025",
            "Team": "Apps",
            "Required_Stakeholders": ["Design", "Backend", "Frontend", "QA", "Content", "PM"],
            "Bugs_Reported": false
        })
    }

    /// The three execution cycles of the canned feature
    #[must_use]
    pub fn test_builds() -> Vec<TestBuild> {
        vec![
            TestBuild::from_counts(1, 45, 42, 35, 7)
                .with_dates("2025-11-01", "2025-11-03")
                .with_defects_found(7),
            TestBuild::from_counts(2, 45, 45, 40, 5)
                .with_dates("2025-11-05", "2025-11-07")
                .with_defects_found(5),
            TestBuild::from_counts(3, 45, 45, 43, 2)
                .with_dates("2025-11-08", "2025-11-10")
                .with_defects_found(2),
        ]
    }

    /// The seven defects of the canned feature
    #[must_use]
    pub fn defects() -> Vec<Defect> {
        use DefectStatus::{Closed, InProgress, Open};
        use Severity::{Critical, High, Low, Medium};

        [
            ("FL-001", Closed, High),
            ("FL-002", Closed, Medium),
            ("FL-003", Closed, Low),
            ("FL-004", Closed, Medium),
            ("FL-005", Closed, Low),
            ("FL-006", InProgress, Medium),
            ("FL-007", Open, Critical),
        ]
        .into_iter()
        .map(|(id, status, severity)| Defect::new(id, status, severity))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn item(raw: &str) -> ItemId {
        ItemId::parse(raw).unwrap()
    }

    #[tokio::test]
    async fn fetch_returns_flow_lock() {
        let provider = MockDataProvider::new(Duration::ZERO);
        let response = provider.fetch(&item("KFF-0111")).await;

        assert!(response.success);
        assert_eq!(response.data_source, DataSource::Mock);
        assert!(response
            .data
            .feature_name
            .as_deref()
            .unwrap()
            .contains("Flow Lock"));
        assert_eq!(response.data.build_count(), 3);
        assert_eq!(response.data.defect_data.as_ref().map(Vec::len), Some(7));
    }

    #[tokio::test]
    async fn fetch_ignores_item_id() {
        let provider = MockDataProvider::new(Duration::ZERO);
        let a = provider.fetch(&item("KFF-0111")).await;
        let b = provider.fetch(&item("KFF-9999")).await;
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn mock_missing_fields() {
        let provider = MockDataProvider::new(Duration::ZERO);
        let response = provider.fetch(&item("KFF-0111")).await;

        assert_eq!(
            response.missing_fields,
            vec![
                "env",
                "URL",
                "PRNumber",
                "SpecDocLink",
                "DesignLink",
                "TestCaseExecutionLink",
                "EvidenceDocLink",
                "ReviewedBy",
            ]
        );
    }

    #[tokio::test]
    async fn mock_people_fields() {
        let response = MockDataProvider::new(Duration::ZERO)
            .fetch(&item("KFF-0111"))
            .await;

        assert_eq!(response.data.prepared_by.as_deref(), Some("Sankaran Baskaran"));
        assert_eq!(response.data.tested_by.as_deref(), Some("Sankaran Baskaran"));
        assert_eq!(
            response.data.developed_by.as_deref(),
            Some("Rashmi Subramani, Roshini R S")
        );
        assert_eq!(
            response.data.designed_by.as_deref(),
            Some("Roshini R S, Rashmi Subramani")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn fetch_waits_for_latency() {
        let provider = MockDataProvider::new(Duration::from_secs(1));
        let started = tokio::time::Instant::now();
        provider.fetch(&item("KFF-0111")).await;
        assert!(started.elapsed() >= Duration::from_secs(1));
    }

    #[test]
    fn builds_satisfy_invariants() {
        for build in MockDataProvider::test_builds() {
            build.validate().unwrap();
        }
    }

    #[test]
    fn record_echoes_item_id() {
        let record = MockDataProvider::kissflow_record("KFF-0042");
        assert_eq!(record["_id"], "KFF-0042");
        assert_eq!(record["_item_id"], "KFF-0042");
    }
}

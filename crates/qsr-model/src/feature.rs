//! Feature record and the canonical required-field list

use crate::defect::Defect;
use crate::test_build::TestBuild;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Wire name of the test execution list, reported when no builds are present
pub const TEST_EXECUTION_DATA: &str = "TestExecutionData";

/// QSR metadata for one feature
///
/// Every field is independently optional. `None` means "not yet provided";
/// absent values are omitted from the serialized JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QsrData {
    #[serde(rename = "FeatureName", default, skip_serializing_if = "Option::is_none")]
    pub feature_name: Option<String>,
    #[serde(rename = "TeamName", default, skip_serializing_if = "Option::is_none")]
    pub team_name: Option<String>,
    #[serde(rename = "QuarterRelease", default, skip_serializing_if = "Option::is_none")]
    pub quarter_release: Option<String>,
    #[serde(rename = "env", default, skip_serializing_if = "Option::is_none")]
    pub env: Option<String>,
    #[serde(rename = "URL", default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(rename = "FrontendPRLink", default, skip_serializing_if = "Option::is_none")]
    pub frontend_pr_link: Option<String>,
    #[serde(rename = "BackendPRLink", default, skip_serializing_if = "Option::is_none")]
    pub backend_pr_link: Option<String>,
    #[serde(rename = "PRNumber", default, skip_serializing_if = "Option::is_none")]
    pub pr_number: Option<String>,
    #[serde(rename = "SpecDocLink", default, skip_serializing_if = "Option::is_none")]
    pub spec_doc_link: Option<String>,
    #[serde(rename = "DesignLink", default, skip_serializing_if = "Option::is_none")]
    pub design_link: Option<String>,
    #[serde(rename = "TDDLink", default, skip_serializing_if = "Option::is_none")]
    pub tdd_link: Option<String>,
    #[serde(rename = "TestCaseDocLink", default, skip_serializing_if = "Option::is_none")]
    pub test_case_doc_link: Option<String>,
    #[serde(
        rename = "TestCaseExecutionLink",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub test_case_execution_link: Option<String>,
    #[serde(rename = "EvidenceDocLink", default, skip_serializing_if = "Option::is_none")]
    pub evidence_doc_link: Option<String>,
    #[serde(rename = "RTMDocLink", default, skip_serializing_if = "Option::is_none")]
    pub rtm_doc_link: Option<String>,
    #[serde(rename = "PreparedBy", default, skip_serializing_if = "Option::is_none")]
    pub prepared_by: Option<String>,
    #[serde(rename = "TestedBy", default, skip_serializing_if = "Option::is_none")]
    pub tested_by: Option<String>,
    #[serde(rename = "DevelopedBy", default, skip_serializing_if = "Option::is_none")]
    pub developed_by: Option<String>,
    #[serde(rename = "DesignedBy", default, skip_serializing_if = "Option::is_none")]
    pub designed_by: Option<String>,
    #[serde(rename = "ReviewedBy", default, skip_serializing_if = "Option::is_none")]
    pub reviewed_by: Option<String>,
    #[serde(rename = "TestExecutionData", default, skip_serializing_if = "Option::is_none")]
    pub test_execution_data: Option<Vec<TestBuild>>,
    #[serde(rename = "DefectData", default, skip_serializing_if = "Option::is_none")]
    pub defect_data: Option<Vec<Defect>>,
}

impl QsrData {
    /// Read one of the canonical text fields
    #[must_use]
    pub fn text(&self, field: QsrField) -> Option<&str> {
        let value = match field {
            QsrField::FeatureName => &self.feature_name,
            QsrField::TeamName => &self.team_name,
            QsrField::QuarterRelease => &self.quarter_release,
            QsrField::Env => &self.env,
            QsrField::Url => &self.url,
            QsrField::FrontendPrLink => &self.frontend_pr_link,
            QsrField::BackendPrLink => &self.backend_pr_link,
            QsrField::PrNumber => &self.pr_number,
            QsrField::SpecDocLink => &self.spec_doc_link,
            QsrField::DesignLink => &self.design_link,
            QsrField::TddLink => &self.tdd_link,
            QsrField::TestCaseDocLink => &self.test_case_doc_link,
            QsrField::TestCaseExecutionLink => &self.test_case_execution_link,
            QsrField::EvidenceDocLink => &self.evidence_doc_link,
            QsrField::PreparedBy => &self.prepared_by,
            QsrField::TestedBy => &self.tested_by,
            QsrField::DevelopedBy => &self.developed_by,
            QsrField::DesignedBy => &self.designed_by,
            QsrField::ReviewedBy => &self.reviewed_by,
        };
        value.as_deref()
    }

    /// Mutable access to one of the canonical text fields
    pub fn text_mut(&mut self, field: QsrField) -> &mut Option<String> {
        match field {
            QsrField::FeatureName => &mut self.feature_name,
            QsrField::TeamName => &mut self.team_name,
            QsrField::QuarterRelease => &mut self.quarter_release,
            QsrField::Env => &mut self.env,
            QsrField::Url => &mut self.url,
            QsrField::FrontendPrLink => &mut self.frontend_pr_link,
            QsrField::BackendPrLink => &mut self.backend_pr_link,
            QsrField::PrNumber => &mut self.pr_number,
            QsrField::SpecDocLink => &mut self.spec_doc_link,
            QsrField::DesignLink => &mut self.design_link,
            QsrField::TddLink => &mut self.tdd_link,
            QsrField::TestCaseDocLink => &mut self.test_case_doc_link,
            QsrField::TestCaseExecutionLink => &mut self.test_case_execution_link,
            QsrField::EvidenceDocLink => &mut self.evidence_doc_link,
            QsrField::PreparedBy => &mut self.prepared_by,
            QsrField::TestedBy => &mut self.tested_by,
            QsrField::DevelopedBy => &mut self.developed_by,
            QsrField::DesignedBy => &mut self.designed_by,
            QsrField::ReviewedBy => &mut self.reviewed_by,
        }
    }

    /// Number of recorded test builds
    #[inline]
    #[must_use]
    pub fn build_count(&self) -> usize {
        self.test_execution_data.as_ref().map_or(0, Vec::len)
    }
}

/// Canonical required text fields of a QSR, in report order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QsrField {
    FeatureName,
    TeamName,
    QuarterRelease,
    Env,
    Url,
    FrontendPrLink,
    BackendPrLink,
    PrNumber,
    SpecDocLink,
    DesignLink,
    TddLink,
    TestCaseDocLink,
    TestCaseExecutionLink,
    EvidenceDocLink,
    PreparedBy,
    TestedBy,
    DevelopedBy,
    DesignedBy,
    ReviewedBy,
}

impl QsrField {
    /// All required fields in canonical order
    pub const ALL: [QsrField; 19] = [
        QsrField::FeatureName,
        QsrField::TeamName,
        QsrField::QuarterRelease,
        QsrField::Env,
        QsrField::Url,
        QsrField::FrontendPrLink,
        QsrField::BackendPrLink,
        QsrField::PrNumber,
        QsrField::SpecDocLink,
        QsrField::DesignLink,
        QsrField::TddLink,
        QsrField::TestCaseDocLink,
        QsrField::TestCaseExecutionLink,
        QsrField::EvidenceDocLink,
        QsrField::PreparedBy,
        QsrField::TestedBy,
        QsrField::DevelopedBy,
        QsrField::DesignedBy,
        QsrField::ReviewedBy,
    ];

    /// Wire name of the field
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            QsrField::FeatureName => "FeatureName",
            QsrField::TeamName => "TeamName",
            QsrField::QuarterRelease => "QuarterRelease",
            QsrField::Env => "env",
            QsrField::Url => "URL",
            QsrField::FrontendPrLink => "FrontendPRLink",
            QsrField::BackendPrLink => "BackendPRLink",
            QsrField::PrNumber => "PRNumber",
            QsrField::SpecDocLink => "SpecDocLink",
            QsrField::DesignLink => "DesignLink",
            QsrField::TddLink => "TDDLink",
            QsrField::TestCaseDocLink => "TestCaseDocLink",
            QsrField::TestCaseExecutionLink => "TestCaseExecutionLink",
            QsrField::EvidenceDocLink => "EvidenceDocLink",
            QsrField::PreparedBy => "PreparedBy",
            QsrField::TestedBy => "TestedBy",
            QsrField::DevelopedBy => "DevelopedBy",
            QsrField::DesignedBy => "DesignedBy",
            QsrField::ReviewedBy => "ReviewedBy",
        }
    }
}

impl fmt::Display for QsrField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

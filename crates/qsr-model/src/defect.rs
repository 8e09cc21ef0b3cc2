//! Defect records

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a defect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DefectStatus {
    Open,
    #[serde(rename = "In Progress")]
    InProgress,
    Resolved,
    Closed,
}

impl DefectStatus {
    /// All statuses in reporting order
    pub const ALL: [DefectStatus; 4] = [
        DefectStatus::Open,
        DefectStatus::Closed,
        DefectStatus::InProgress,
        DefectStatus::Resolved,
    ];

    /// Wire name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            DefectStatus::Open => "Open",
            DefectStatus::InProgress => "In Progress",
            DefectStatus::Resolved => "Resolved",
            DefectStatus::Closed => "Closed",
        }
    }

    /// Whether the defect counts as fixed
    #[inline]
    #[must_use]
    pub fn is_fixed(self) -> bool {
        matches!(self, DefectStatus::Resolved | DefectStatus::Closed)
    }
}

impl fmt::Display for DefectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Defect severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    /// All severities, most severe first
    pub const ALL: [Severity; 4] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
    ];

    /// Wire name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fix priority, P1 highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    P1,
    P2,
    P3,
    P4,
}

impl Priority {
    /// All priorities, highest first
    pub const ALL: [Priority; 4] = [Priority::P1, Priority::P2, Priority::P3, Priority::P4];

    /// Wire name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Priority::P1 => "P1",
            Priority::P2 => "P2",
            Priority::P3 => "P3",
            Priority::P4 => "P4",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A defect raised against a feature
///
/// The compact form carries only id, status and severity. The rich form adds
/// assignment, timestamps, reproduction detail and the originating test case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Defect {
    pub defect_id: String,
    pub status: DefectStatus,
    pub severity: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reported_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_case_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cycle: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reproduction_steps: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_result: Option<String>,
}

impl Defect {
    /// Create a compact defect
    #[must_use]
    pub fn new(defect_id: impl Into<String>, status: DefectStatus, severity: Severity) -> Self {
        Self {
            defect_id: defect_id.into(),
            status,
            severity,
            title: None,
            description: None,
            priority: None,
            assigned_to: None,
            reported_by: None,
            created_at: None,
            updated_at: None,
            resolved_at: None,
            test_case_id: None,
            cycle: None,
            environment: None,
            reproduction_steps: None,
            expected_result: None,
            actual_result: None,
        }
    }

    /// With title and description
    #[must_use]
    pub fn with_summary(mut self, title: impl Into<String>, description: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self.description = Some(description.into());
        self
    }

    /// With priority
    #[inline]
    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// With assignee and reporter
    #[must_use]
    pub fn with_assignment(
        mut self,
        assigned_to: impl Into<String>,
        reported_by: impl Into<String>,
    ) -> Self {
        self.assigned_to = Some(assigned_to.into());
        self.reported_by = Some(reported_by.into());
        self
    }

    /// With lifecycle timestamps
    #[must_use]
    pub fn with_timestamps(
        mut self,
        created_at: impl Into<String>,
        updated_at: impl Into<String>,
        resolved_at: Option<String>,
    ) -> Self {
        self.created_at = Some(created_at.into());
        self.updated_at = Some(updated_at.into());
        self.resolved_at = resolved_at;
        self
    }

    /// With originating test case, cycle and environment
    #[must_use]
    pub fn found_in(
        mut self,
        test_case_id: impl Into<String>,
        cycle: u32,
        environment: impl Into<String>,
    ) -> Self {
        self.test_case_id = Some(test_case_id.into());
        self.cycle = Some(cycle);
        self.environment = Some(environment.into());
        self
    }

    /// With reproduction steps and expected/actual outcome
    #[must_use]
    pub fn with_reproduction(
        mut self,
        steps: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        self.reproduction_steps = Some(steps.into());
        self.expected_result = Some(expected.into());
        self.actual_result = Some(actual.into());
        self
    }
}

//! Test build (execution cycle) records

use crate::error::ModelError;
use serde::{Deserialize, Serialize};

/// Allowed drift between pass + fail percentage and 100
const PERCENTAGE_TOLERANCE: f64 = 0.1;

/// One test execution cycle of a feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestBuild {
    /// Build number (1-based)
    pub build_number: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_designed: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_executed: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_passed: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_failed: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pass_percentage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_percentage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defects_found: Option<u32>,
}

impl TestBuild {
    /// Create a build with only its number set
    #[inline]
    #[must_use]
    pub fn new(build_number: u32) -> Self {
        Self {
            build_number,
            start_date: None,
            end_date: None,
            total_designed: None,
            total_executed: None,
            total_passed: None,
            total_failed: None,
            pass_percentage: None,
            fail_percentage: None,
            defects_found: None,
        }
    }

    /// Create a build from raw counts
    ///
    /// Pass/fail percentages are derived as a share of executed tests, rounded
    /// to two decimals. Nothing is derived when no test was executed.
    #[must_use]
    pub fn from_counts(
        build_number: u32,
        designed: u32,
        executed: u32,
        passed: u32,
        failed: u32,
    ) -> Self {
        let (pass_percentage, fail_percentage) = if executed == 0 {
            (None, None)
        } else {
            let executed = f64::from(executed);
            (
                Some(round2(f64::from(passed) * 100.0 / executed)),
                Some(round2(f64::from(failed) * 100.0 / executed)),
            )
        };

        Self {
            total_designed: Some(designed),
            total_executed: Some(executed),
            total_passed: Some(passed),
            total_failed: Some(failed),
            pass_percentage,
            fail_percentage,
            ..Self::new(build_number)
        }
    }

    /// With start and end dates
    #[inline]
    #[must_use]
    pub fn with_dates(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start_date = Some(start.into());
        self.end_date = Some(end.into());
        self
    }

    /// With defect count
    #[inline]
    #[must_use]
    pub fn with_defects_found(mut self, defects: u32) -> Self {
        self.defects_found = Some(defects);
        self
    }

    /// Check the count and percentage invariants
    ///
    /// Only rules whose inputs are all present are checked.
    pub fn validate(&self) -> Result<(), ModelError> {
        let build = self.build_number;

        if let (Some(passed), Some(failed), Some(executed)) =
            (self.total_passed, self.total_failed, self.total_executed)
        {
            let outcomes = u64::from(passed) + u64::from(failed);
            if outcomes > u64::from(executed) {
                return Err(ModelError::OutcomesExceedExecuted {
                    build,
                    outcomes,
                    executed,
                });
            }
        }

        if let (Some(executed), Some(designed)) = (self.total_executed, self.total_designed) {
            if executed > designed {
                return Err(ModelError::ExecutedExceedsDesigned {
                    build,
                    executed,
                    designed,
                });
            }
        }

        if let (Some(pass), Some(fail)) = (self.pass_percentage, self.fail_percentage) {
            let sum = pass + fail;
            if (sum - 100.0).abs() > PERCENTAGE_TOLERANCE {
                return Err(ModelError::PercentagesDoNotSum { build, sum });
            }
        }

        Ok(())
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

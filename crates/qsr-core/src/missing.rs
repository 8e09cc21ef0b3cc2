//! Missing-field detection

use qsr_model::{QsrData, QsrField, TEST_EXECUTION_DATA};

/// Names of required fields that still need manual entry
///
/// Canonical fields come first in [`QsrField::ALL`] order, counting absent
/// and whitespace-only values as missing. `TestExecutionData` is appended
/// last when no test build is recorded.
#[must_use]
pub fn identify_missing_fields(data: &QsrData) -> Vec<&'static str> {
    let mut missing: Vec<&'static str> = QsrField::ALL
        .into_iter()
        .filter(|field| is_blank(data.text(*field)))
        .map(QsrField::as_str)
        .collect();

    if data.test_execution_data.as_ref().map_or(true, Vec::is_empty) {
        missing.push(TEST_EXECUTION_DATA);
    }

    missing
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

//! Kissflow record → QSR feature record
//!
//! Kissflow items are loosely typed JSON objects. A target field is set only
//! when its source key holds a non-empty string (or resolvable person
//! reference); everything else is left unset.

use qsr_model::{QsrData, QsrField};
use serde_json::{Map, Value};

/// Kissflow field keys read by the mapper
pub mod keys {
    /// Feature title
    pub const NAME: &str = "Name";
    /// Owning team
    pub const TEAM: &str = "Team";
    /// Planned release quarter
    pub const LAUNCH_QUARTER: &str = "Estimated_launch_quarter";
    /// Frontend pull request URL
    pub const FRONTEND_PR_LINK: &str = "Frontend_PR_link";
    /// Backend pull request URL
    pub const BACKEND_PR_LINK: &str = "Backend_PR_Link";
    /// Technical design document URL
    pub const TDD_LINK: &str = "TDD_Link_1";
    /// Test case document URL
    pub const TEST_CASE_LINK: &str = "Test_Case_Link";
    /// People who wrote the test cases
    pub const TC_PREPARED_BY: &str = "TC_Prepared_by";
    /// People who wrote the design document
    pub const TDD_PREPARED_BY: &str = "TDD_Prepared_by";
    /// Tester the item is assigned to
    pub const ASSIGNED_TO: &str = "AssignedTo";
    /// Frontend developer
    pub const FRONTEND_DEVELOPER: &str = "Frontend_Developer";
    /// Backend developer
    pub const BACKEND_DEVELOPER: &str = "Backend_Developer";
    /// Display name inside a person reference
    pub const PERSON_NAME: &str = "Name";
}

/// Plain string fields copied one-to-one
const DIRECT_FIELDS: [(&str, QsrField); 7] = [
    (keys::NAME, QsrField::FeatureName),
    (keys::TEAM, QsrField::TeamName),
    (keys::LAUNCH_QUARTER, QsrField::QuarterRelease),
    (keys::FRONTEND_PR_LINK, QsrField::FrontendPrLink),
    (keys::BACKEND_PR_LINK, QsrField::BackendPrLink),
    (keys::TDD_LINK, QsrField::TddLink),
    (keys::TEST_CASE_LINK, QsrField::TestCaseDocLink),
];

/// Separator for multi-person fields
const NAME_SEPARATOR: &str = ", ";

/// A Kissflow person reference: one user object, or a list of them
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PersonRef<'a> {
    One(&'a Map<String, Value>),
    Many(&'a [Value]),
}

impl<'a> PersonRef<'a> {
    /// Interpret a JSON value as a person reference
    ///
    /// Empty lists and non-object scalars are not references.
    #[must_use]
    pub fn from_value(value: &'a Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self::One(map)),
            Value::Array(items) if !items.is_empty() => Some(Self::Many(items)),
            _ => None,
        }
    }

    /// Name of the person, or of the first person of a list
    #[must_use]
    pub fn first_name(self) -> Option<&'a str> {
        match self {
            Self::One(map) => person_name(map),
            Self::Many(items) => items.first().and_then(Value::as_object).and_then(person_name),
        }
    }

    /// Every name, skipping entries without one
    #[must_use]
    pub fn names(self) -> Vec<&'a str> {
        match self {
            Self::One(map) => person_name(map).into_iter().collect(),
            Self::Many(items) => items
                .iter()
                .filter_map(Value::as_object)
                .filter_map(person_name)
                .collect(),
        }
    }
}

/// Map a Kissflow item into a QSR feature record
///
/// Never fails: anything that is not a JSON object maps to an empty record,
/// and missing or mistyped keys are skipped.
#[must_use]
pub fn map_kissflow_record(record: &Value) -> QsrData {
    let mut data = QsrData::default();
    let Some(record) = record.as_object() else {
        return data;
    };

    for (key, field) in DIRECT_FIELDS {
        if let Some(value) = record.get(key).and_then(truthy_str) {
            *data.text_mut(field) = Some(value.to_string());
        }
    }

    data.prepared_by = joined_list_names(record.get(keys::TC_PREPARED_BY));
    data.tested_by = record
        .get(keys::ASSIGNED_TO)
        .and_then(PersonRef::from_value)
        .and_then(PersonRef::first_name)
        .map(str::to_string);

    // frontend before backend
    let developers: Vec<&str> = [keys::FRONTEND_DEVELOPER, keys::BACKEND_DEVELOPER]
        .into_iter()
        .filter_map(|key| record.get(key))
        .filter_map(PersonRef::from_value)
        .filter_map(PersonRef::first_name)
        .collect();
    if !developers.is_empty() {
        data.developed_by = Some(developers.join(NAME_SEPARATOR));
    }

    data.designed_by = joined_list_names(record.get(keys::TDD_PREPARED_BY));

    data
}

/// Join the names of a list-typed person field; non-lists are ignored
fn joined_list_names(value: Option<&Value>) -> Option<String> {
    let items = value?.as_array()?;
    let names = PersonRef::Many(items).names();
    if names.is_empty() {
        None
    } else {
        Some(names.join(NAME_SEPARATOR))
    }
}

fn person_name(person: &Map<String, Value>) -> Option<&str> {
    person.get(keys::PERSON_NAME).and_then(truthy_str)
}

fn truthy_str(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| !s.is_empty())
}

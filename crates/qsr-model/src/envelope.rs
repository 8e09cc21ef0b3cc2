//! Request, response and error bodies of the QSR API

use crate::feature::QsrData;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a response's feature record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// Live Kissflow API
    Kissflow,
    /// Canned fixture data
    Mock,
}

impl DataSource {
    /// Wire name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            DataSource::Kissflow => "kissflow",
            DataSource::Mock => "mock",
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `POST /api/v1/qsr/fetch-data`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRequest {
    pub item_id: String,
}

/// Response envelope of a QSR fetch
///
/// `success` is true for both live and fallback data; `data_source` tells
/// them apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QsrResponse {
    pub success: bool,
    pub data: QsrData,
    pub missing_fields: Vec<String>,
    pub data_source: DataSource,
}

impl QsrResponse {
    /// Successful response for a mapped record
    #[must_use]
    pub fn new<S: Into<String>>(
        data: QsrData,
        missing_fields: impl IntoIterator<Item = S>,
        data_source: DataSource,
    ) -> Self {
        Self {
            success: true,
            data,
            missing_fields: missing_fields.into_iter().map(Into::into).collect(),
            data_source,
        }
    }
}

/// Error body returned for every non-2xx response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl ErrorBody {
    #[must_use]
    pub fn new(error: impl Into<String>, message: impl Into<String>, status_code: u16) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status_code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_wire_shape() {
        let response = QsrResponse::new(QsrData::default(), ["env", "URL"], DataSource::Mock);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["missingFields"], serde_json::json!(["env", "URL"]));
        assert_eq!(json["dataSource"], "mock");
        assert!(json["data"].as_object().unwrap().is_empty());
    }

    #[test]
    fn item_request_from_json() {
        let request: ItemRequest = serde_json::from_str(r#"{"item_id":"KFF-0111"}"#).unwrap();
        assert_eq!(request.item_id, "KFF-0111");
    }

    #[test]
    fn error_body_wire_shape() {
        let body = ErrorBody::new("Internal Server Error", "An unexpected error occurred", 500);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["status_code"], 500);
        assert_eq!(json["error"], "Internal Server Error");
    }
}

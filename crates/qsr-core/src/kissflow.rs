//! Live Kissflow item source

use crate::config::KissflowCredentials;
use crate::error::UpstreamError;
use async_trait::async_trait;
use qsr_model::ItemId;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{StatusCode, Url};
use serde_json::Value;
use std::fmt;
use std::time::Duration;

/// Header carrying the access key id
pub const ACCESS_KEY_ID_HEADER: &str = "X-Access-Key-Id";
/// Header carrying the access key secret
pub const ACCESS_KEY_SECRET_HEADER: &str = "X-Access-Key-Secret";

/// Source of raw Kissflow item documents
///
/// Implementations return the item as a JSON object or an error; the
/// orchestrator decides what to do with failures.
#[async_trait]
pub trait ItemSource: Send + Sync + fmt::Debug {
    /// Fetch one item document
    async fn fetch_item(&self, item_id: &ItemId) -> Result<Value, UpstreamError>;
}

/// HTTP client for the Kissflow item endpoint
#[derive(Debug, Clone)]
pub struct KissflowClient {
    http: reqwest::Client,
    credentials: KissflowCredentials,
}

impl KissflowClient {
    /// Create a client whose requests time out after `timeout`
    pub fn new(credentials: KissflowCredentials, timeout: Duration) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, credentials })
    }

    /// Endpoint URL for an item
    ///
    /// The id is appended as a single percent-encoded path segment, so it
    /// can never change the path, query or fragment of the base URL.
    pub fn item_url(&self, item_id: &ItemId) -> Result<Url, UpstreamError> {
        let base = &self.credentials.base_url;
        let mut url = Url::parse(base)
            .map_err(|e| UpstreamError::InvalidUrl(format!("{base}: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| UpstreamError::InvalidUrl(format!("{base}: cannot be a base")))?
            .pop_if_empty()
            .push(item_id.as_str());
        Ok(url)
    }
}

#[async_trait]
impl ItemSource for KissflowClient {
    async fn fetch_item(&self, item_id: &ItemId) -> Result<Value, UpstreamError> {
        let url = self.item_url(item_id)?;
        tracing::debug!(%url, "Requesting Kissflow item");

        let response = self
            .http
            .get(url)
            .header(ACCESS_KEY_ID_HEADER, &self.credentials.access_key_id)
            .header(ACCESS_KEY_SECRET_HEADER, &self.credentials.access_key_secret)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let value: Value =
            serde_json::from_str(&body).map_err(|e| UpstreamError::Decode(e.to_string()))?;
        if !value.is_object() {
            return Err(UpstreamError::Decode("expected a JSON object".to_string()));
        }

        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> KissflowClient {
        KissflowClient::new(
            KissflowCredentials::new(base_url, "id", "secret"),
            Duration::from_secs(30),
        )
        .unwrap()
    }

    fn url_for(base_url: &str, raw_id: &str) -> Url {
        client(base_url)
            .item_url(&ItemId::parse(raw_id).unwrap())
            .unwrap()
    }

    #[test]
    fn item_url_appends_id() {
        assert_eq!(
            url_for("https://kissflow.example/items", "KFF-0111").as_str(),
            "https://kissflow.example/items/KFF-0111"
        );
        assert_eq!(
            url_for("https://kissflow.example/items/", "KFF-0111").as_str(),
            "https://kissflow.example/items/KFF-0111"
        );
    }

    #[test]
    fn item_url_keeps_id_in_one_segment() {
        let base = "https://kissflow.example/api/items";

        let url = url_for(base, "KFF-1/../../admin/keys");
        assert_eq!(url.path(), "/api/items/KFF-1%2F..%2F..%2Fadmin%2Fkeys");

        let url = url_for(base, "KFF-1?delete=true");
        assert_eq!(url.path(), "/api/items/KFF-1%3Fdelete=true");
        assert_eq!(url.query(), None);

        let url = url_for(base, "KFF-1#frag");
        assert_eq!(url.path(), "/api/items/KFF-1%23frag");
        assert_eq!(url.fragment(), None);
    }

    #[test]
    fn item_url_rejects_bad_base() {
        let id = ItemId::parse("KFF-0111").unwrap();
        for base in ["not a url", "mailto:team@example.com"] {
            let err = client(base).item_url(&id).unwrap_err();
            assert!(matches!(err, UpstreamError::InvalidUrl(_)), "{base}: {err}");
        }
    }

    #[test]
    fn debug_hides_secret() {
        let rendered = format!("{:?}", client("https://k"));
        assert!(!rendered.contains("\"secret\""));
    }
}

//! Service configuration
//!
//! Read once at startup and injected into the orchestrator and the HTTP
//! surface. The presence of all three Kissflow values selects live mode.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Environment variable holding the Kissflow item endpoint
pub const ENV_BASE_URL: &str = "KISSFLOW_BASE_URL";
/// Environment variable holding the access key id
pub const ENV_ACCESS_KEY_ID: &str = "KISSFLOW_ACCESS_KEY_ID";
/// Environment variable holding the access key secret
pub const ENV_ACCESS_KEY_SECRET: &str = "KISSFLOW_ACCESS_KEY_SECRET";
/// Environment variable holding the mock delay in milliseconds
pub const ENV_MOCK_LATENCY_MS: &str = "QSR_MOCK_LATENCY_MS";
/// Environment variable holding the frontend origin for CORS
pub const ENV_FRONTEND_URL: &str = "FRONTEND_URL";
/// Environment variable holding the bind address
pub const ENV_HOST: &str = "HOST";
/// Environment variable holding the listen port
pub const ENV_PORT: &str = "PORT";

/// Transport timeout for the live Kissflow call
pub const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(30);

/// Artificial delay of the mock provider
pub const DEFAULT_MOCK_LATENCY: Duration = Duration::from_secs(1);

/// Kissflow API credentials
#[derive(Clone, PartialEq, Eq)]
pub struct KissflowCredentials {
    pub base_url: String,
    pub access_key_id: String,
    pub access_key_secret: String,
}

impl KissflowCredentials {
    #[must_use]
    pub fn new(
        base_url: impl Into<String>,
        access_key_id: impl Into<String>,
        access_key_secret: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            access_key_id: access_key_id.into(),
            access_key_secret: access_key_secret.into(),
        }
    }

    /// Credentials only when every part is present and non-blank
    ///
    /// Whitespace-only values count as absent.
    #[must_use]
    pub fn from_parts(
        base_url: Option<String>,
        access_key_id: Option<String>,
        access_key_secret: Option<String>,
    ) -> Option<Self> {
        let present = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
        Some(Self {
            base_url: present(base_url)?,
            access_key_id: present(access_key_id)?,
            access_key_secret: present(access_key_secret)?,
        })
    }
}

impl fmt::Debug for KissflowCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KissflowCredentials")
            .field("base_url", &self.base_url)
            .field("access_key_id", &self.access_key_id)
            .field("access_key_secret", &"<redacted>")
            .finish()
    }
}

/// QSR service configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QsrConfig {
    /// Live credentials; `None` selects mock mode
    pub credentials: Option<KissflowCredentials>,
    /// Timeout of the live call
    pub upstream_timeout: Duration,
    /// Delay applied by the mock provider
    pub mock_latency: Duration,
    /// Frontend origin allowed by CORS
    pub frontend_url: String,
    /// Listen host
    pub host: String,
    /// Listen port
    pub port: u16,
}

impl QsrConfig {
    /// Create default configuration (mock mode)
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from any key/value lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let credentials = KissflowCredentials::from_parts(
            lookup(ENV_BASE_URL),
            lookup(ENV_ACCESS_KEY_ID),
            lookup(ENV_ACCESS_KEY_SECRET),
        );

        let mock_latency = match lookup(ENV_MOCK_LATENCY_MS) {
            Some(raw) => Duration::from_millis(parse_value(ENV_MOCK_LATENCY_MS, &raw)?),
            None => defaults.mock_latency,
        };

        let port = match lookup(ENV_PORT) {
            Some(raw) => parse_value(ENV_PORT, &raw)?,
            None => defaults.port,
        };

        Ok(Self {
            credentials,
            mock_latency,
            port,
            frontend_url: lookup(ENV_FRONTEND_URL).unwrap_or(defaults.frontend_url),
            host: lookup(ENV_HOST).unwrap_or(defaults.host),
            upstream_timeout: defaults.upstream_timeout,
        })
    }

    /// Whether live Kissflow credentials are configured
    #[inline]
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// With live credentials
    #[inline]
    #[must_use]
    pub fn with_credentials(mut self, credentials: KissflowCredentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Force mock mode
    #[inline]
    #[must_use]
    pub fn without_credentials(mut self) -> Self {
        self.credentials = None;
        self
    }

    /// With mock provider latency
    #[inline]
    #[must_use]
    pub fn with_mock_latency(mut self, latency: Duration) -> Self {
        self.mock_latency = latency;
        self
    }

    /// With live call timeout
    #[inline]
    #[must_use]
    pub fn with_upstream_timeout(mut self, timeout: Duration) -> Self {
        self.upstream_timeout = timeout;
        self
    }

    /// With listen host
    #[inline]
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// With listen port
    #[inline]
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// With CORS frontend origin
    #[inline]
    #[must_use]
    pub fn with_frontend_url(mut self, url: impl Into<String>) -> Self {
        self.frontend_url = url.into();
        self
    }
}

impl Default for QsrConfig {
    fn default() -> Self {
        Self {
            credentials: None,
            upstream_timeout: UPSTREAM_TIMEOUT,
            mock_latency: DEFAULT_MOCK_LATENCY,
            frontend_url: "http://localhost:3000".to_string(),
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

fn parse_value<T>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_is_mock_mode() {
        let config = QsrConfig::from_lookup(lookup_from(&[])).unwrap();
        assert!(!config.has_credentials());
        assert_eq!(config.port, 8000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.mock_latency, DEFAULT_MOCK_LATENCY);
        assert_eq!(config.upstream_timeout, Duration::from_secs(30));
    }

    #[test]
    fn all_three_values_enable_live_mode() {
        let config = QsrConfig::from_lookup(lookup_from(&[
            (ENV_BASE_URL, "https://kissflow.example/api/items"),
            (ENV_ACCESS_KEY_ID, "key-id"),
            (ENV_ACCESS_KEY_SECRET, "key-secret"),
        ]))
        .unwrap();

        let credentials = config.credentials.unwrap();
        assert_eq!(credentials.base_url, "https://kissflow.example/api/items");
        assert_eq!(credentials.access_key_id, "key-id");
    }

    #[test]
    fn partial_credentials_stay_mock() {
        let config = QsrConfig::from_lookup(lookup_from(&[
            (ENV_BASE_URL, "https://kissflow.example/api/items"),
            (ENV_ACCESS_KEY_ID, "key-id"),
            (ENV_ACCESS_KEY_SECRET, "  "),
        ]))
        .unwrap();
        assert!(!config.has_credentials());
    }

    #[test]
    fn blank_parts_are_absent() {
        let some = |v: &str| Some(v.to_string());
        assert!(KissflowCredentials::from_parts(some("https://k"), some(" "), some("s")).is_none());
        assert!(KissflowCredentials::from_parts(some("\t"), some("id"), some("s")).is_none());
        assert!(KissflowCredentials::from_parts(some("https://k"), some("id"), None).is_none());
        assert!(KissflowCredentials::from_parts(some("https://k"), some("id"), some("s")).is_some());
    }

    #[test]
    fn parses_port_and_latency() {
        let config = QsrConfig::from_lookup(lookup_from(&[
            (ENV_PORT, "9090"),
            (ENV_MOCK_LATENCY_MS, "0"),
            (ENV_FRONTEND_URL, "https://qsr.example"),
        ]))
        .unwrap();
        assert_eq!(config.port, 9090);
        assert_eq!(config.mock_latency, Duration::ZERO);
        assert_eq!(config.frontend_url, "https://qsr.example");
    }

    #[test]
    fn rejects_bad_port() {
        let err = QsrConfig::from_lookup(lookup_from(&[(ENV_PORT, "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "PORT", .. }));
    }

    #[test]
    fn debug_redacts_secret() {
        let credentials = KissflowCredentials::new("https://k", "id", "super-secret");
        let rendered = format!("{credentials:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}

//! Error types for the QSR fetch pipeline
//!
//! Upstream errors never reach API callers: the orchestrator logs them and
//! degrades to mock data. Configuration errors stop the process at startup.

/// Failures talking to the Kissflow API
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// Kissflow answered with a non-200 status
    #[error("kissflow returned status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, as text
        body: String,
    },

    /// Connection, TLS or timeout failure
    #[error("kissflow request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Body was not a JSON object
    #[error("kissflow response could not be decoded: {0}")]
    Decode(String),

    /// Configured base URL cannot address an item
    #[error("invalid kissflow base url {0}")]
    InvalidUrl(String),
}

impl UpstreamError {
    /// Short reason used in fallback logs
    #[must_use]
    pub fn fallback_reason(&self) -> &'static str {
        match self {
            Self::Status { .. } => "API error",
            Self::Transport(_) => "network error",
            Self::Decode(_) | Self::InvalidUrl(_) => "unexpected error",
        }
    }

    /// Whether the request timed out
    #[inline]
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }
}

/// Invalid startup configuration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// An environment value could not be parsed
    #[error("invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        /// Variable name
        key: &'static str,
        /// Raw value
        value: String,
        /// Parse failure
        reason: String,
    },
}

//! Backend connection settings.
//!
//! [`ClientConfig`] names the backend origin and a few request knobs. The
//! defaults talk to a backend on `http://localhost:5000` with no client-side
//! timeout, leaving the transport's own defaults in charge.

use crate::error::TransportError;

/// Base address used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Environment variable holding the backend base address.
pub const API_URL_ENV: &str = "TRUTHLENS_API_URL";

/// Path of the text-analysis endpoint, relative to the base address.
pub const TEXT_ENDPOINT: &str = "/api/analyze-news";

/// Path of the video-analysis endpoint, relative to the base address.
pub const VIDEO_ENDPOINT: &str = "/api/analyze-video";

/// Configuration for an [`HttpBackend`](crate::backend::HttpBackend).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend origin, e.g. `http://localhost:5000`.
    pub base_url: String,
    /// Whole-request timeout in seconds. `None` leaves it to reqwest.
    pub timeout_seconds: Option<u64>,
    /// Custom User-Agent header. `None` uses reqwest's default.
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_owned(),
            timeout_seconds: None,
            user_agent: None,
        }
    }
}

impl ClientConfig {
    /// Resolve the base address from [`API_URL_ENV`], falling back to
    /// [`DEFAULT_API_URL`] when it is unset or blank.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`ClientConfig::from_env`] but with an injectable variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = lookup(API_URL_ENV)
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_owned());
        Self {
            base_url,
            ..Self::default()
        }
    }

    /// Builder-style override of the base address.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Validates this configuration.
    ///
    /// Checks:
    /// - `base_url` parses as an absolute `http` or `https` URL
    /// - `timeout_seconds`, when set, is greater than 0
    pub fn validate(&self) -> Result<(), TransportError> {
        let parsed = url::Url::parse(self.base_url.trim())
            .map_err(|e| TransportError::Config(format!("invalid base_url {:?}: {e}", self.base_url)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(TransportError::Config(format!(
                "base_url scheme must be http or https, got {}",
                parsed.scheme()
            )));
        }
        if self.timeout_seconds == Some(0) {
            return Err(TransportError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    /// Join the base address with an endpoint path.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim().trim_end_matches('/'), path)
    }
}

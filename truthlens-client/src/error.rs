//! Error types for the truthlens-client crate.
//!
//! Display strings are stable, never empty, and never include the text or
//! file that was submitted for analysis.

/// Fallback message used when a failed response carries nothing readable.
pub const GENERIC_FAILURE: &str = "request failed";

/// Longest plain-text response body that is surfaced verbatim.
const MAX_PLAIN_MESSAGE: usize = 200;

/// Errors that can occur while talking to the analysis backend.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The request could not be completed (connection refused, DNS, reset).
    #[error("request failed: {0}")]
    Network(String),

    /// The backend answered with a non-success status.
    #[error("backend returned HTTP {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the response body, or [`GENERIC_FAILURE`].
        message: String,
    },

    /// The response body was not the JSON shape we expect.
    #[error("malformed response: {0}")]
    Decode(String),

    /// The multipart upload could not be assembled.
    #[error("upload error: {0}")]
    Upload(String),

    /// Invalid client configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Reading a local file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TransportError {
    /// Build a [`TransportError::Status`] from a status code and raw body.
    pub fn from_status(status: u16, body: &str) -> Self {
        Self::Status {
            status,
            message: extract_error_message(body),
        }
    }

    /// Returns the HTTP status when the backend answered with a failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Pull a human-readable message out of a failed response body.
///
/// JSON bodies are searched for `error` (string or `{ "message": .. }`),
/// `message` and `detail`. Short non-HTML text bodies are used as-is.
/// Anything else yields [`GENERIC_FAILURE`].
pub fn extract_error_message(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return GENERIC_FAILURE.to_owned();
    }

    if let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) {
        let from_json = value
            .get("error")
            .and_then(|e| e.as_str().or_else(|| e.get("message").and_then(|m| m.as_str())))
            .or_else(|| value.get("message").and_then(|m| m.as_str()))
            .or_else(|| value.get("detail").and_then(|d| d.as_str()))
            .map(str::trim)
            .filter(|m| !m.is_empty());
        return from_json.map_or_else(|| GENERIC_FAILURE.to_owned(), str::to_owned);
    }

    if trimmed.len() <= MAX_PLAIN_MESSAGE && !trimmed.starts_with('<') {
        return trimmed.to_owned();
    }

    GENERIC_FAILURE.to_owned()
}

/// Convenience type alias for truthlens-client results.
pub type Result<T> = std::result::Result<T, TransportError>;

//! Shared HTTP client construction.

use crate::config::ClientConfig;
use crate::error::TransportError;
use std::time::Duration;

/// Build a [`reqwest::Client`] for backend requests.
///
/// A timeout is only installed when the config asks for one; otherwise the
/// request runs until the transport gives up on its own.
///
/// # Errors
///
/// Returns [`TransportError::Config`] if the client cannot be constructed.
pub fn build_client(config: &ClientConfig) -> Result<reqwest::Client, TransportError> {
    let mut builder = reqwest::Client::builder();
    if let Some(secs) = config.timeout_seconds {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    if let Some(ref ua) = config.user_agent {
        builder = builder.user_agent(ua.clone());
    }
    builder
        .build()
        .map_err(|e| TransportError::Config(format!("failed to build HTTP client: {e}")))
}

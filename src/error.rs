//! Error types for the truthlens front end.

use truthlens_client::TransportError;

/// Top-level error type for configuration and session setup.
///
/// Analysis failures never surface here during a session: the controller
/// turns them into UI state. This type covers what happens around it.
#[derive(Debug, thiserror::Error)]
pub enum TruthLensError {
    /// Configuration file or value error.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Transport setup or call error, passed through unchanged.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, TruthLensError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_errors_display_unchanged() {
        let err: TruthLensError = TransportError::Network("refused".into()).into();
        assert_eq!(err.to_string(), "request failed: refused");
    }

    #[test]
    fn config_display() {
        let err = TruthLensError::Config("bad toml".into());
        assert_eq!(err.to_string(), "config error: bad toml");
    }
}

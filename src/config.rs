//! Configuration file for the truthlens front end.
//!
//! Values resolve in this order, later winning: built-in defaults, the TOML
//! file, the `TRUTHLENS_API_URL` environment variable, then command-line flags.

use crate::error::{Result, TruthLensError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use truthlens_client::config::API_URL_ENV;
use truthlens_client::{ClientConfig, DEFAULT_API_URL};

/// Default upload cap: 50 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 50 * 1024 * 1024;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TruthLensConfig {
    /// Where the analysis backend lives and how to talk to it.
    pub backend: BackendConfig,
    /// Limits applied to video uploads before they are accepted.
    pub upload: UploadConfig,
}

/// Analysis backend settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Backend origin.
    pub api_url: String,
    /// Whole-request timeout in seconds. Unset means no client-side timeout.
    pub timeout_seconds: Option<u64>,
    /// Custom User-Agent header.
    pub user_agent: Option<String>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_owned(),
            timeout_seconds: None,
            user_agent: None,
        }
    }
}

/// Video upload settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Largest file accepted for analysis, in bytes. `0` disables the cap.
    pub max_bytes: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl UploadConfig {
    /// The effective cap, or `None` when uploads are unbounded.
    pub fn limit(&self) -> Option<u64> {
        (self.max_bytes > 0).then_some(self.max_bytes)
    }
}

impl TruthLensConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| TruthLensError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| TruthLensError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path: `~/.config/truthlens/config.toml`.
    pub fn default_config_path() -> PathBuf {
        if let Some(config) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(config).join("truthlens").join("config.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("truthlens")
                .join("config.toml")
        } else {
            PathBuf::from("/tmp/truthlens-config/config.toml")
        }
    }

    /// Load from an explicit path, or from the default path when it exists,
    /// or fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit path is missing or any chosen file is invalid.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let path = Self::default_config_path();
                if path.is_file() {
                    Self::from_file(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Apply the `TRUTHLENS_API_URL` environment override.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Like [`TruthLensConfig::with_env_overrides`] with an injectable lookup.
    #[must_use]
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(API_URL_ENV)
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
        {
            self.backend.api_url = url;
        }
        self
    }

    /// Transport configuration for the backend section.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.backend.api_url.clone(),
            timeout_seconds: self.backend.timeout_seconds,
            user_agent: self.backend.user_agent.clone(),
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TruthLensError::Transport`] when the backend section is invalid.
    pub fn validate(&self) -> Result<()> {
        self.client_config().validate()?;
        Ok(())
    }
}

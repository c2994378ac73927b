//! CLI configuration.
//!
//! Read from `<config dir>/ctk-mail/config.json` unless `--config` names
//! another file. A missing default file means defaults. `CTK_MAIL_API_URL`
//! and `CTK_MAIL_API_TOKEN` override the file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default backend location.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

const API_URL_VAR: &str = "CTK_MAIL_API_URL";
const API_TOKEN_VAR: &str = "CTK_MAIL_API_TOKEN";

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read.
    #[error("Failed to read {path:?}: {source}")]
    Read {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// File is not valid JSON for [`Config`].
    #[error("Failed to parse {path:?}: {source}")]
    Parse {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        source: serde_json::Error,
    },
}

/// Settings for the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the backend API.
    pub api_base_url: String,
    /// Bearer token for the send endpoint.
    pub api_token: Option<String>,
    /// Replacement code tables.
    pub taxonomy_path: Option<PathBuf>,
    /// Sender used when a draft does not name one.
    pub default_sender: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            api_token: None,
            taxonomy_path: None,
            default_sender: None,
        }
    }
}

impl Config {
    /// Default location of the config file.
    #[must_use]
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ctk-mail")
            .join("config.json")
    }

    /// Loads configuration.
    ///
    /// An explicit `path` must exist; the default file is optional.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub async fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (Self::default_path(), false),
        };

        if !required && !path.exists() {
            tracing::debug!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let contents = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.clone(),
                source,
            })?;
        let config =
            serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.clone(),
                source,
            })?;

        tracing::debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Applies environment overrides. `lookup` is normally `std::env::var`.
    #[must_use]
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(API_URL_VAR).filter(|v| !v.is_empty()) {
            self.api_base_url = url;
        }
        if let Some(token) = lookup(API_TOKEN_VAR).filter(|v| !v.is_empty()) {
            self.api_token = Some(token);
        }
        self
    }
}

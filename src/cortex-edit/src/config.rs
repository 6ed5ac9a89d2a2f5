//! Edit engine configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::patch::DEFAULT_CONTEXT_LINES;

/// Environment variable overriding [`EditConfig::context_lines`].
pub const ENV_CONTEXT_LINES: &str = "CORTEX_EDIT_CONTEXT_LINES";
/// Environment variable overriding [`EditConfig::max_file_size`].
pub const ENV_MAX_FILE_SIZE: &str = "CORTEX_EDIT_MAX_FILE_SIZE";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML in {}: {source}", path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid value for {var}: {value:?}")]
    InvalidEnv { var: &'static str, value: String },
}

/// Edit engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditConfig {
    /// Context lines around each hunk in generated patches.
    #[serde(default = "default_context_lines")]
    pub context_lines: usize,

    /// Largest file, in bytes, the filesystem accessor will load. `None` means unlimited.
    #[serde(default)]
    pub max_file_size: Option<u64>,
}

fn default_context_lines() -> usize {
    DEFAULT_CONTEXT_LINES
}

impl Default for EditConfig {
    fn default() -> Self {
        Self {
            context_lines: default_context_lines(),
            max_file_size: None,
        }
    }
}

impl EditConfig {
    /// Load from a file. `.toml` files are parsed as TOML, anything else as JSON.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        if path.extension().is_some_and(|ext| ext == "toml") {
            toml::from_str(&content).map_err(|source| ConfigError::Toml {
                path: path.to_path_buf(),
                source,
            })
        } else {
            serde_json::from_str(&content).map_err(|source| ConfigError::Json {
                path: path.to_path_buf(),
                source,
            })
        }
    }

    /// Defaults with environment overrides applied.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_overrides(|var| std::env::var(var).ok())
    }

    /// Apply overrides from `lookup`, which maps a variable name to its value.
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(value) = lookup(ENV_CONTEXT_LINES) {
            self.context_lines = value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                var: ENV_CONTEXT_LINES,
                value: value.clone(),
            })?;
        }

        if let Some(value) = lookup(ENV_MAX_FILE_SIZE) {
            let trimmed = value.trim();
            self.max_file_size = if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.parse().map_err(|_| ConfigError::InvalidEnv {
                    var: ENV_MAX_FILE_SIZE,
                    value: value.clone(),
                })?)
            };
        }

        Ok(self)
    }
}

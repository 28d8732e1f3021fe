//! Configuration for the engine binary.
//!
//! The canonical configuration lives in `ethnoatlas-config.yaml` at the
//! project root (overridable via `ETHNOATLAS_CONFIG`). Every field has a
//! default, so a missing file falls back to a fully usable configuration.
//! Environment variables override individual fields after load.

use std::path::Path;

use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EngineConfig {
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Query settings.
    #[serde(default)]
    pub query: QueryConfig,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Emit JSON log lines instead of the human-readable format.
    #[serde(default = "default_log_json")]
    pub json: bool,

    /// Tracing filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            json: default_log_json(),
            filter: default_log_filter(),
        }
    }
}

/// Query settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct QueryConfig {
    /// Path to a JSON `SearchQuery` file. The built-in showcase query runs
    /// when unset.
    #[serde(default)]
    pub file: Option<String>,
}

const fn default_log_json() -> bool {
    false
}

fn default_log_filter() -> String {
    "info".to_owned()
}

impl EngineConfig {
    /// Load configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_yml::from_str(&contents)?)
    }

    /// Load from `path` when it exists, defaults otherwise, then apply
    /// environment overrides. The flag reports whether defaults were used.
    pub fn load_or_default(path: &Path) -> Result<(Self, bool), ConfigError> {
        let (mut config, defaulted) = if path.exists() {
            (Self::load(path)?, false)
        } else {
            (Self::default(), true)
        };
        config.apply_env_overrides();
        Ok((config, defaulted))
    }

    /// Apply `ETHNOATLAS_*` environment overrides to individual fields.
    fn apply_env_overrides(&mut self) {
        if let Ok(value) = std::env::var("ETHNOATLAS_LOG_JSON") {
            if let Ok(json) = value.parse() {
                self.logging.json = json;
            }
        }
        if let Ok(value) = std::env::var("ETHNOATLAS_QUERY_FILE") {
            self.query.file = Some(value);
        }
    }
}

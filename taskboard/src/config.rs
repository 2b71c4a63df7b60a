//! Board configuration using Figment.
//!
//! Sources, later overriding earlier:
//! 1. Built-in defaults
//! 2. An optional TOML, YAML or JSON file (by extension)
//! 3. `TASKBOARD_` environment variables, `__` separating nested keys
//!    (`TASKBOARD_API__BASE_URL`, `TASKBOARD_SYNC__ON_FAILURE`)

use crate::defaults::default_columns;
use crate::types::{ColumnId, ColumnSpec};
use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "TASKBOARD_";

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration parsing failed
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] Box<figment::Error>),

    /// Configuration validation failed
    #[error("configuration validation failed: {message}")]
    Validation { message: String },

    /// Configuration file format not supported
    #[error("unsupported configuration file format: {path}")]
    UnsupportedFormat { path: String },
}

impl From<figment::Error> for ConfigError {
    fn from(error: figment::Error) -> Self {
        Self::Parse(Box::new(error))
    }
}

/// What to do with local state when a status update finally fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Keep the local move and notify the user
    #[default]
    Keep,
    /// Move the task back to the column of its last acknowledged status
    Revert,
}

/// Remote store connection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
            token: None,
            timeout_ms: 10_000,
        }
    }
}

/// Status sync behaviour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    pub max_attempts: u32,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
    pub on_failure: FailurePolicy,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff_ms: 200,
            max_backoff_ms: 5_000,
            on_failure: FailurePolicy::Keep,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub api: ApiConfig,
    pub sync: SyncConfig,
    pub columns: Vec<ColumnSpec>,
    pub log_level: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            sync: SyncConfig::default(),
            columns: default_columns(),
            log_level: "info".to_string(),
        }
    }
}

impl BoardConfig {
    /// Load and validate configuration from all sources
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config: Self = Self::figment(path)?.extract()?;
        config.validate()?;
        debug!(
            base_url = %config.api.base_url,
            columns = config.columns.len(),
            "configuration loaded"
        );
        Ok(config)
    }

    /// Build the figment with all sources in precedence order
    pub fn figment(path: Option<&Path>) -> Result<Figment, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(path) = path {
            let ext = path
                .extension()
                .and_then(|e| e.to_str())
                .map(str::to_ascii_lowercase);
            figment = match ext.as_deref() {
                Some("toml") => figment.merge(Toml::file(path)),
                Some("yaml") | Some("yml") => figment.merge(Yaml::file(path)),
                Some("json") => figment.merge(Json::file(path)),
                _ => {
                    return Err(ConfigError::UnsupportedFormat {
                        path: path.display().to_string(),
                    })
                }
            };
        }

        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    /// Check values the engine relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::Validation { message };

        if self.columns.is_empty() {
            return Err(invalid("at least one column is required".into()));
        }
        for column in &self.columns {
            ColumnId::parse(&column.id).map_err(|e| invalid(e.to_string()))?;
        }
        if self.sync.max_attempts == 0 {
            return Err(invalid("sync.max_attempts must be at least 1".into()));
        }
        if self.api.base_url.trim().is_empty() {
            return Err(invalid("api.base_url must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    #[serial]
    fn test_defaults() {
        let config = BoardConfig::load(None).unwrap();
        assert_eq!(config.columns.len(), 8);
        assert_eq!(config.sync.max_attempts, 3);
        assert_eq!(config.sync.on_failure, FailurePolicy::Keep);
        assert!(config.api.token.is_none());
    }

    #[test]
    #[serial]
    fn test_toml_file_overrides_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "board.toml",
            r#"
log_level = "debug"

[api]
base_url = "https://hr.example.com/api"

[sync]
on_failure = "revert"

[[columns]]
id = "todo"
title = "Backlog"

[[columns]]
id = "done"
title = "Done"
"#,
        );

        let config = BoardConfig::load(Some(&path)).unwrap();
        assert_eq!(config.api.base_url, "https://hr.example.com/api");
        assert_eq!(config.api.timeout_ms, 10_000);
        assert_eq!(config.sync.on_failure, FailurePolicy::Revert);
        assert_eq!(config.columns.len(), 2);
        assert_eq!(config.columns[0].title, "Backlog");
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    #[serial]
    fn test_yaml_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_file(&dir, "board.yaml", "sync:\n  max_attempts: 5\n");
        let config = BoardConfig::load(Some(&path)).unwrap();
        assert_eq!(config.sync.max_attempts, 5);
    }

    #[test]
    #[serial]
    fn test_env_overrides_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_file(&dir, "board.json", r#"{"api": {"timeout_ms": 500}}"#);

        std::env::set_var("TASKBOARD_API__TIMEOUT_MS", "750");
        std::env::set_var("TASKBOARD_API__TOKEN", "secret");
        let result = BoardConfig::load(Some(&path));
        std::env::remove_var("TASKBOARD_API__TIMEOUT_MS");
        std::env::remove_var("TASKBOARD_API__TOKEN");

        let config = result.unwrap();
        assert_eq!(config.api.timeout_ms, 750);
        assert_eq!(config.api.token.as_deref(), Some("secret"));
    }

    #[test]
    fn test_unsupported_extension() {
        let result = BoardConfig::figment(Some(Path::new("board.ini")));
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat { .. })));
    }

    #[test]
    fn test_validation() {
        let mut config = BoardConfig::default();
        assert!(config.validate().is_ok());

        config.sync.max_attempts = 0;
        assert!(config.validate().is_err());

        let mut config = BoardConfig::default();
        config.columns.push(ColumnSpec::new("In Review", "Review"));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation { .. })
        ));

        let mut config = BoardConfig::default();
        config.columns.clear();
        assert!(config.validate().is_err());
    }
}

//! Configuration loading and path resolution.
//!
//! Focuses on I/O and filesystem-related helpers for config management.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::Config;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadFailed(String),
    #[error("failed to parse config: {0}")]
    ParseFailed(String),
    #[error("missing $HOME, unable to resolve config directory")]
    MissingHome,
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl Config {
    /// Load configuration from a specific path.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            fs::read_to_string(path).map_err(|err| ConfigError::ReadFailed(err.to_string()))?;
        Self::from_toml_str(&contents)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Config =
            toml::from_str(contents).map_err(|err| ConfigError::ParseFailed(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the default XDG config location, if present.
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = Self::default_config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from_path(&path)
    }

    /// Return the default config directory based on XDG or $HOME.
    pub fn default_config_dir() -> Result<PathBuf, ConfigError> {
        if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
            return Ok(PathBuf::from(xdg).join("setupvisor"));
        }
        let home = env::var("HOME").map_err(|_| ConfigError::MissingHome)?;
        Ok(PathBuf::from(home).join(".config").join("setupvisor"))
    }

    /// Return the default config file path.
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        Ok(Self::default_config_dir()?.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
            [supervisor]
            tick_interval_ms = 250
            "#,
        )
        .expect("parse partial config");
        assert_eq!(config.supervisor.tick_interval_ms, 250);
        assert_eq!(config.supervisor.catch_up_interval_ms, 5);
        assert_eq!(config.supervisor.expected_minutes, 5);
        assert_eq!(config.general.log_level, None);
    }

    #[test]
    fn empty_file_is_default() {
        let config = Config::from_toml_str("").expect("parse empty config");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn general_log_level_is_read() {
        let config = Config::from_toml_str("[general]\nlog_level = \"debug\"\n")
            .expect("parse general config");
        assert_eq!(config.general.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn malformed_and_invalid_files_are_rejected() {
        let err = Config::from_toml_str("[supervisor\n").unwrap_err();
        assert!(matches!(err, ConfigError::ParseFailed(_)));

        let err = Config::from_toml_str("[supervisor]\nprogress_maximum = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn missing_file_reports_read_failure() {
        let path = env::temp_dir().join("setupvisor-missing-config-for-test.toml");
        let err = Config::load_from_path(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ReadFailed(_)));
    }
}

//! Session configuration with documented defaults
//!
//! Loaded from TOML (see `data/session.toml`). Every field has a default, so a
//! partial file or no file at all is valid.

use crate::core::error::{HealthError, Result};
use crate::core::types::Health;
use crate::narration::DEFAULT_NARRATION_CAPACITY;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default location of the session config, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "data/session.toml";

/// Configuration for a play session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Health a fresh or restarted session begins with
    ///
    /// Must be positive: a session cannot start terminated.
    pub starting_health: Health,

    /// Number of narration entries the driver keeps for display
    ///
    /// Older entries are evicted first. Must be at least 1.
    pub narration_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            starting_health: 100,
            narration_capacity: DEFAULT_NARRATION_CAPACITY,
        }
    }
}

impl SessionConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text and validate it
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: SessionConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loaded session config");
        Self::from_toml_str(&contents)
    }

    /// Load `path` if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "no session config, using defaults");
            Ok(Self::default())
        }
    }

    /// Override the starting health, re-validating the result
    pub fn with_starting_health(mut self, starting_health: Health) -> Result<Self> {
        self.starting_health = starting_health;
        self.validate()?;
        Ok(self)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.starting_health <= 0 {
            return Err(HealthError::InvalidConfig(format!(
                "starting_health ({}) must be positive",
                self.starting_health
            )));
        }

        if self.narration_capacity == 0 {
            return Err(HealthError::InvalidConfig(
                "narration_capacity must be at least 1".into(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SessionConfig::default();
        assert_eq!(config.starting_health, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = SessionConfig::from_toml_str("starting_health = 42").unwrap();
        assert_eq!(config.starting_health, 42);
        assert_eq!(config.narration_capacity, DEFAULT_NARRATION_CAPACITY);
    }

    #[test]
    fn test_rejects_non_positive_health() {
        let err = SessionConfig::from_toml_str("starting_health = 0").unwrap_err();
        assert!(matches!(err, HealthError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_zero_capacity() {
        let err = SessionConfig::from_toml_str("narration_capacity = 0").unwrap_err();
        assert!(matches!(err, HealthError::InvalidConfig(_)));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let err = SessionConfig::from_toml_str("starting_health = \"lots\"").unwrap_err();
        assert!(matches!(err, HealthError::ConfigParse(_)));
    }

    #[test]
    fn test_starting_health_override() {
        let config = SessionConfig::default().with_starting_health(250).unwrap();
        assert_eq!(config.starting_health, 250);

        for bad in [0, -5] {
            let err = SessionConfig::default().with_starting_health(bad).unwrap_err();
            assert!(matches!(err, HealthError::InvalidConfig(msg) if msg.contains("must be positive")));
        }
    }

    #[test]
    fn test_missing_file_falls_back() {
        let config =
            SessionConfig::load_or_default(Path::new("does/not/exist/session.toml")).unwrap();
        assert_eq!(config, SessionConfig::default());
    }

    #[test]
    fn test_load_shipped_config() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_CONFIG_PATH);
        let config = SessionConfig::load(&path).expect("Should load shipped session config");
        assert_eq!(config.starting_health, 100);
    }
}

//! Configuration loading for the demo binary
//!
//! Configuration is read from a TOML file. Every section and field is
//! optional and falls back to its default.

use crate::error::ConfigError;
use crate::observer::DeliveryPolicy;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub registry: RegistryConfig,
    pub demo: DemoConfig,
}

/// Settings for the observer registry
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RegistryConfig {
    /// How broadcasts react to a failing observer
    pub delivery: DeliveryPolicy,
}

/// Scenario run by the demo binary
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DemoConfig {
    /// Factory labels, each attached as a listener in this order
    pub animals: Vec<String>,
    /// Payloads broadcast in this order
    pub messages: Vec<String>,
    /// Detach the first listener after this many messages, 0 to never detach
    pub detach_first_after: usize,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            animals: vec!["dog".to_string(), "cat".to_string()],
            messages: vec!["x".to_string(), "y".to_string()],
            detach_first_after: 1,
        }
    }
}

impl Config {
    /// Load and validate configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadError` if the file cannot be read,
    /// `ConfigError::TomlError` if it is not valid TOML for this schema, and
    /// `ConfigError::ValidationError` if a value is out of range.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&contents)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the demo scenario can actually run
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.demo.animals.is_empty() {
            return Err(ConfigError::ValidationError(
                "demo.animals must list at least one animal".to_string(),
            ));
        }
        if self.demo.messages.is_empty() {
            return Err(ConfigError::ValidationError(
                "demo.messages must list at least one message".to_string(),
            ));
        }
        if self.demo.detach_first_after > self.demo.messages.len() {
            return Err(ConfigError::ValidationError(format!(
                "demo.detach_first_after ({}) exceeds the number of messages ({})",
                self.demo.detach_first_after,
                self.demo.messages.len()
            )));
        }
        Ok(())
    }
}

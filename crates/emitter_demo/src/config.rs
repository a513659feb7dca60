//! Configuration management for the emitter demo.
//!
//! Loads and validates demo settings from a TOML file. Missing sections and
//! fields fall back to their defaults.

use crate::error::{DemoError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

fn default_level() -> String {
    "info".to_string()
}

fn default_greeting_target() -> String {
    "world".to_string()
}

fn default_echo_message() -> String {
    "echo".to_string()
}

fn default_rounds() -> u32 {
    1
}

/// Demo configuration loaded from a TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Logging configuration settings
    #[serde(default)]
    pub logging: LoggingSettings,
    /// Scenario configuration settings
    #[serde(default)]
    pub scenario: ScenarioSettings,
}

/// Logging system configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level filter (trace, debug, info, warn, error)
    #[serde(default = "default_level")]
    pub level: String,
    /// Whether to output logs in JSON format
    #[serde(default)]
    pub json_format: bool,
}

/// Inputs for the hello/buy/echo scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioSettings {
    /// Argument emitted with the "hello" and "buy" events
    #[serde(default = "default_greeting_target")]
    pub greeting_target: String,
    /// Argument emitted with the "echo" event
    #[serde(default = "default_echo_message")]
    pub echo_message: String,
    /// How many times the "hello" and "echo" emissions repeat
    #[serde(default = "default_rounds")]
    pub rounds: u32,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_level(),
            json_format: false,
        }
    }
}

impl Default for ScenarioSettings {
    fn default() -> Self {
        Self {
            greeting_target: default_greeting_target(),
            echo_message: default_echo_message(),
            rounds: default_rounds(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    ///
    /// If the file doesn't exist, writes the default configuration to `path`
    /// and returns it.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: AppConfig = toml::from_str(&content)?;
            Ok(config)
        } else {
            let default_config = AppConfig::default();
            let toml_content = toml::to_string_pretty(&default_config)?;
            std::fs::write(path, toml_content)?;
            info!("Created default configuration file: {}", path.display());
            Ok(default_config)
        }
    }

    /// Validates the configuration for consistency and correctness.
    pub fn validate(&self) -> Result<()> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(DemoError::InvalidConfig(format!(
                "Invalid log level: {}. Must be one of: {valid_levels:?}",
                &self.logging.level
            )));
        }

        if self.scenario.rounds == 0 {
            return Err(DemoError::InvalidConfig(
                "scenario.rounds must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

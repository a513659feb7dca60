//! Error types for the emitter demo.

/// Errors raised while configuring or running the demo
#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    /// Reading or writing the configuration file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file is not valid TOML for [`AppConfig`](crate::config::AppConfig)
    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Default configuration could not be rendered as TOML
    #[error("Failed to serialize configuration: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// Configuration parsed but holds unusable values
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Global tracing subscriber could not be installed
    #[error("Logging setup failed: {0}")]
    Logging(String),

    /// An emitter invariant did not hold during the scenario
    #[error("Scenario failed: {0}")]
    ScenarioFailed(String),
}

/// Result type used throughout the demo
pub type Result<T> = std::result::Result<T, DemoError>;

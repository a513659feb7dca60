//! Main application logic.
//!
//! The `Application` struct merges configuration with CLI overrides,
//! validates the result, and drives the scenario.

use crate::cli::CliArgs;
use crate::config::AppConfig;
use crate::error::Result;
use crate::logging::display_banner;
use crate::scenario::{run_scenario, ScenarioReport};
use tracing::info;

/// Configured demo, ready to run.
pub struct Application {
    /// Loaded application configuration
    config: AppConfig,
}

impl Application {
    /// Loads configuration, applies CLI overrides and validates the merged
    /// settings.
    ///
    /// # Process
    ///
    /// 1. Load configuration from file (creating default if missing)
    /// 2. Apply command-line argument overrides
    /// 3. Validate merged configuration
    pub fn new(args: CliArgs) -> Result<Self> {
        info!("🔧 Loading configuration from: {}", args.config_path.display());
        let config = AppConfig::load_from_file(&args.config_path)?;
        Self::with_config(config, &args)
    }

    /// Builds the application from an already loaded configuration.
    pub fn with_config(mut config: AppConfig, args: &CliArgs) -> Result<Self> {
        if let Some(log_level) = &args.log_level {
            config.logging.level = log_level.clone();
        }

        if args.json_logs {
            config.logging.json_format = true;
        }

        if let Some(rounds) = args.rounds {
            config.scenario.rounds = rounds;
        }

        config.validate()?;
        info!("✅ Configuration loaded and validated successfully");

        Ok(Self { config })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Runs the scenario and logs its summary.
    pub fn run(&self) -> Result<ScenarioReport> {
        display_banner();

        let report = run_scenario(&self.config.scenario)?;

        info!(
            hello = report.hello_calls,
            echo = report.echo_calls,
            buy = report.buy_calls,
            remaining = report.remaining_listeners,
            "📊 Scenario complete"
        );
        info!(
            "📈 Emitted {} events ({} unhandled), invoked {} listeners, {} once-listeners fired",
            report.stats.events_emitted,
            report.stats.events_unhandled,
            report.stats.listeners_invoked,
            report.stats.once_fired
        );

        Ok(report)
    }
}

//! Logging system setup and configuration.
//!
//! Installs a tracing-subscriber registry with either human-readable or JSON
//! output. `RUST_LOG` takes precedence over the configured level.

use crate::config::LoggingSettings;
use crate::error::{DemoError, Result};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the global subscriber.
///
/// # Arguments
///
/// * `config` - Logging configuration from the config file
/// * `json_format` - Whether to force JSON output format (CLI override)
pub fn setup_logging(config: &LoggingSettings, json_format: bool) -> Result<()> {
    let log_level = config.level.as_str();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    let registry = tracing_subscriber::registry().with(filter);

    let installed = if json_format || config.json_format {
        registry
            .with(fmt::layer()
                .json()
                .with_file(false)
                .with_line_number(false)
                .with_thread_names(true)
            )
            .try_init()
    } else {
        registry
            .with(fmt::layer()
                .with_ansi(true)
                .with_file(false)
                .with_line_number(false)
                .with_thread_names(true)
            )
            .try_init()
    };
    installed.map_err(|e| DemoError::Logging(e.to_string()))?;

    info!("🔧 Logging initialized with level: {}", log_level);
    Ok(())
}

/// Logs the startup banner.
pub fn display_banner() {
    let version = option_env!("CARGO_PKG_VERSION").unwrap_or("UNK");
    info!("╔══════════════════════════════════════════╗");
    info!("║           📣 EVENT EMITTER DEMO          ║");
    info!("║  emitter v{:<8} demo v{:<8}        ║", event_emitter::EVENT_EMITTER_VERSION, version);
    info!("╚══════════════════════════════════════════╝");
}

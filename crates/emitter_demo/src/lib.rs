//! # Event Emitter Demo
//!
//! Command-line driver for the `event_emitter` crate. It registers a
//! persistent "hello" listener, a fire-once "buy" listener and a persistent
//! "echo" listener, emits them, and removes them again by identity and by
//! key, checking the live listener count after every step.
//!
//! ## Quick Start
//!
//! ```bash
//! # Run with default configuration (creates emitter_demo.toml if missing)
//! emitter_demo
//!
//! # Repeat the hello/echo emissions with debug logging
//! emitter_demo --rounds 3 --log-level debug
//!
//! # JSON logging
//! emitter_demo --json-logs
//! ```

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod scenario;

use app::Application;
use cli::CliArgs;
use config::AppConfig;

pub use error::{DemoError, Result};

/// Entry point used by the binary.
///
/// Parses the CLI, sets up logging from the configuration file (with CLI
/// overrides applied), then builds and runs the [`Application`].
pub fn init() -> Result<()> {
    let args = CliArgs::parse();

    let mut log_settings = AppConfig::load_from_file(&args.config_path)
        .unwrap_or_default()
        .logging;
    if let Some(level) = &args.log_level {
        log_settings.level = level.clone();
    }

    if let Err(e) = logging::setup_logging(&log_settings, args.json_logs) {
        eprintln!("❌ Failed to setup logging: {e}");
        return Err(e);
    }

    let app = Application::new(args)?;
    app.run()?;

    Ok(())
}

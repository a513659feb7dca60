//! Command-line interface handling for the emitter demo.

use clap::{value_parser, Arg, ArgMatches, Command};
use std::path::PathBuf;

/// Command line arguments parsed from user input.
///
/// Every option except the config path overrides the matching setting from
/// the configuration file.
#[derive(Debug, Clone)]
pub struct CliArgs {
    /// Path to the configuration file
    pub config_path: PathBuf,
    /// Optional override for log level
    pub log_level: Option<String>,
    /// Whether to force JSON log output
    pub json_logs: bool,
    /// Optional override for the number of scenario rounds
    pub rounds: Option<u32>,
}

impl CliArgs {
    /// Builds the clap command describing all options.
    pub fn command() -> Command {
        Command::new("Event Emitter Demo")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Drives the keyed event emitter through the hello/buy/echo scenario")
            .arg(
                Arg::new("config")
                    .short('c')
                    .long("config")
                    .value_name("FILE")
                    .help("Configuration file path")
                    .default_value("emitter_demo.toml"),
            )
            .arg(
                Arg::new("log-level")
                    .short('l')
                    .long("log-level")
                    .value_name("LEVEL")
                    .help("Log level (trace, debug, info, warn, error)"),
            )
            .arg(
                Arg::new("json-logs")
                    .long("json-logs")
                    .help("Output logs in JSON format")
                    .action(clap::ArgAction::SetTrue),
            )
            .arg(
                Arg::new("rounds")
                    .short('r')
                    .long("rounds")
                    .value_name("N")
                    .help("Number of hello/echo emission rounds")
                    .value_parser(value_parser!(u32)),
            )
    }

    /// Parses the process arguments, exiting with usage on error.
    pub fn parse() -> Self {
        Self::from_matches(&Self::command().get_matches())
    }

    pub fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            config_path: matches
                .get_one::<String>("config")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("emitter_demo.toml")),
            log_level: matches.get_one::<String>("log-level").cloned(),
            json_logs: matches.get_flag("json-logs"),
            rounds: matches.get_one::<u32>("rounds").copied(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_from(args: &[&str]) -> CliArgs {
        let matches = CliArgs::command()
            .try_get_matches_from(args)
            .expect("Arguments should parse");
        CliArgs::from_matches(&matches)
    }

    #[test]
    fn test_defaults() {
        let args = parse_from(&["emitter_demo"]);

        assert_eq!(args.config_path, PathBuf::from("emitter_demo.toml"));
        assert_eq!(args.log_level, None);
        assert!(!args.json_logs);
        assert_eq!(args.rounds, None);
    }

    #[test]
    fn test_overrides() {
        let args = parse_from(&[
            "emitter_demo",
            "--config",
            "custom.toml",
            "-l",
            "debug",
            "--json-logs",
            "--rounds",
            "4",
        ]);

        assert_eq!(args.config_path, PathBuf::from("custom.toml"));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert!(args.json_logs);
        assert_eq!(args.rounds, Some(4));
    }

    #[test]
    fn test_rejects_non_numeric_rounds() {
        let result = CliArgs::command().try_get_matches_from(["emitter_demo", "--rounds", "many"]);
        assert!(result.is_err());
    }
}

//! Command line interface definition

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// pkgweb - transient operation states for package daemon front ends
#[derive(Parser)]
#[command(name = "pkgweb")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Transient operation states for package daemon front ends")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Global arguments available for all commands
#[derive(Parser)]
pub struct GlobalArgs {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Use alternate config file
    #[arg(long, global = true, value_name = "PATH", env = "PKGWEB_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Print the effective configuration
    Config,

    /// Replay a scenario against the in-memory package daemon
    Replay {
        /// Scenario file (JSON)
        #[arg(value_name = "SCENARIO")]
        scenario: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["pkgweb", "replay", "demo.json", "--json"]).unwrap();
        assert!(cli.global.json);
        assert!(!cli.global.debug);
        match cli.command {
            Commands::Replay { scenario } => assert_eq!(scenario, PathBuf::from("demo.json")),
            Commands::Config => panic!("expected replay"),
        }
    }

    #[test]
    fn replay_requires_scenario() {
        assert!(Cli::try_parse_from(["pkgweb", "replay"]).is_err());
    }
}

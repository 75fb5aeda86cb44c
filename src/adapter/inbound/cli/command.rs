//! Command-line interface definitions.
//!
//! Defines the CLI structure for the lndwarden daemon using `clap`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Decision daemon for LND: channel acceptance and event monitoring
#[derive(Parser, Debug)]
#[command(name = "lndwarden")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the lndwarden CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the daemon in the foreground until SIGINT or SIGTERM
    Run(RunArgs),

    /// Load and validate the configuration, then print the effective policy
    CheckConfig(LocationArgs),
}

/// Where to find the home directory and configuration file.
#[derive(Args, Debug, Clone, Default)]
pub struct LocationArgs {
    /// Home directory (default: $LNDWARDEN_HOME, then ~/.lndwarden).
    #[arg(long, value_name = "DIR")]
    pub home: Option<PathBuf>,

    /// Configuration file (default: <home>/lndwarden.toml).
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Arguments for `lndwarden run`.
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    #[command(flatten)]
    pub location: LocationArgs,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Use JSON log format instead of pretty-printed logs.
    #[arg(long)]
    pub json_logs: bool,
}

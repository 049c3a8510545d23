//! CLI argument definitions using clap
//!
//! Commands:
//! - legol check --config <path>
//! - legol query --config <path>
//! - legol start --config <path>
//! - legol applicable|graph|timeline --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// legol - A deterministic rules engine for obligations, dependencies and deadlines
#[derive(Parser, Debug)]
#[command(name = "legol")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate the rule store and report duplicate ids and dangling dependencies
    Check {
        /// Path to configuration file
        #[arg(long, default_value = "./legol.json")]
        config: PathBuf,
    },

    /// Answer a single JSON request from stdin and exit
    Query {
        /// Path to configuration file
        #[arg(long, default_value = "./legol.json")]
        config: PathBuf,
    },

    /// Serve line-delimited JSON requests from stdin until EOF
    Start {
        /// Path to configuration file
        #[arg(long, default_value = "./legol.json")]
        config: PathBuf,
    },

    /// List the rules applicable to the facts on stdin
    Applicable {
        /// Path to configuration file
        #[arg(long, default_value = "./legol.json")]
        config: PathBuf,
    },

    /// Print the dependency graph for the facts on stdin
    Graph {
        /// Path to configuration file
        #[arg(long, default_value = "./legol.json")]
        config: PathBuf,
    },

    /// Print the deadline timeline for the facts on stdin
    Timeline {
        /// Path to configuration file
        #[arg(long, default_value = "./legol.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

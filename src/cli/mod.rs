//! CLI module
//!
//! Provides command-line interface for:
//! - check: Validate the rule store
//! - query: One-shot request execution
//! - start: Boot once and enter the serving loop
//! - applicable / graph / timeline: One-shot evaluation of a facts document

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{check, query, run, run_command, run_op, start};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_document, read_request, read_requests, write_error, write_json, write_response};

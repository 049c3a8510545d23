//! legol CLI entry point
//!
//! Hands argument parsing and dispatch to `cli::run`. Configuration and the
//! rule store are loaded by the command being run. Errors are printed to
//! stderr and the process exits with status 1.

use legol::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

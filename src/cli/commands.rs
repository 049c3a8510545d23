//! CLI command implementations
//!
//! Every command boots the same way and loads the rule store exactly once:
//!
//! 1. Load and validate the config file
//! 2. Apply the configured log level
//! 3. Load the rule store into a [`RuleEvaluator`]
//!
//! FATAL: any boot failure stops the command before input is read.

use std::io::{self, BufRead, Read, Write};
use std::path::Path;

use serde_json::{json, Value};

use crate::api::{facts_from_value, ApiError, ApiHandler, Operation, Request};
use crate::evaluator::RuleEvaluator;
use crate::observability::{log_event, log_event_with_fields, Event, Logger, ObservationScope};

use super::args::Command;
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::{read_document, read_request, read_requests, write_error, write_json, write_response};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command against stdin/stdout
pub fn run_command(cmd: Command) -> CliResult<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut input = stdin.lock();
    let mut output = stdout.lock();

    match cmd {
        Command::Check { config } => check(&config, &mut output),
        Command::Query { config } => query(&config, &mut input, &mut output),
        Command::Start { config } => start(&config, &mut input, &mut output),
        Command::Applicable { config } => {
            run_op(&config, Operation::Applicable, &mut input, &mut output)
        }
        Command::Graph { config } => run_op(&config, Operation::Graph, &mut input, &mut output),
        Command::Timeline { config } => {
            run_op(&config, Operation::Timeline, &mut input, &mut output)
        }
    }
}

/// Load the rule store and report its integrity
///
/// Prints `{rules, duplicate_ids, dangling_dependencies}`. Duplicates and
/// dangling references are reported, not rejected.
pub fn check<W: Write>(config_path: &Path, output: &mut W) -> CliResult<()> {
    let evaluator = boot(config_path)?;
    let scope = ObservationScope::new("CHECK");

    let rules = evaluator.rules();
    let duplicates = rules.duplicate_ids();
    let dangling: Vec<Value> = rules
        .dangling_dependencies()
        .into_iter()
        .map(|(rule, missing)| json!({"rule": rule, "missing": missing}))
        .collect();

    let duplicate_count = duplicates.len().to_string();
    let dangling_count = dangling.len().to_string();

    let written = write_response(
        output,
        json!({
            "rules": rules.len(),
            "duplicate_ids": duplicates,
            "dangling_dependencies": dangling,
        }),
    );
    if let Err(e) = written {
        scope.fail(&e.to_string());
        return Err(e);
    }

    scope.complete_with_fields(&[
        ("dangling", dangling_count.as_str()),
        ("duplicates", duplicate_count.as_str()),
    ]);
    Ok(())
}

/// Answer a single request line and exit
pub fn query<R: BufRead, W: Write>(
    config_path: &Path,
    input: &mut R,
    output: &mut W,
) -> CliResult<()> {
    let evaluator = boot(config_path)?;
    let handler = ApiHandler::new(&evaluator);

    let request = read_request(input)?;
    let response = handler.handle(&request);
    write_json(output, &response.to_json())
}

/// Boot, then serve line-delimited requests until EOF
///
/// Blank lines are skipped. A failure to read input ends the loop with an
/// error response.
pub fn start<R: BufRead, W: Write>(
    config_path: &Path,
    input: &mut R,
    output: &mut W,
) -> CliResult<()> {
    let evaluator = boot(config_path)?;
    let handler = ApiHandler::new(&evaluator);

    log_event(Event::Serving);

    let mut served: usize = 0;
    for request_result in read_requests(input) {
        match request_result {
            Ok(request) => {
                let response = handler.handle(&request);
                write_json(output, &response.to_json())?;
                served += 1;
            }
            Err(e) => {
                write_error(output, &ApiError::invalid_request(e.message()))?;
                break;
            }
        }
    }

    let served = served.to_string();
    log_event_with_fields(Event::ShutdownComplete, &[("requests", served.as_str())]);
    Ok(())
}

/// Read one facts document and print the result of `op`
///
/// Invalid facts and evaluation errors are printed as error responses.
pub fn run_op<R: Read, W: Write>(
    config_path: &Path,
    op: Operation,
    input: &mut R,
    output: &mut W,
) -> CliResult<()> {
    let evaluator = boot(config_path)?;
    let handler = ApiHandler::new(&evaluator);

    let document = read_document(input)?;
    let result = serde_json::from_str::<Value>(&document)
        .map_err(|e| ApiError::invalid_request(format!("Invalid JSON: {}", e)))
        .and_then(facts_from_value)
        .and_then(|facts| handler.execute(&Request::new(op, facts)));

    match result {
        Ok(data) => write_response(output, data),
        Err(e) => write_error(output, &e),
    }
}

/// Load config and rule store
fn boot(config_path: &Path) -> CliResult<RuleEvaluator> {
    let config = Config::load(config_path)?;
    Logger::set_min_severity(config.log_severity()?);

    let config_display = config_path.display().to_string();
    log_event_with_fields(Event::BootStart, &[("config", config_display.as_str())]);

    let rules_path = config.rules_path();
    let rules_display = rules_path.display().to_string();
    log_event_with_fields(
        Event::ConfigLoaded,
        &[
            ("log_level", config.log_level.as_str()),
            ("reference_date_key", config.reference_date_key.as_str()),
            ("rules_file", rules_display.as_str()),
        ],
    );

    let evaluator =
        RuleEvaluator::from_file(&rules_path, config.timeline_config()).map_err(|e| {
            log_event_with_fields(
                Event::RulesLoadFailed,
                &[("code", e.code().code()), ("reason", e.message())],
            );
            CliError::boot_failed(format!("Rule store load failed: {}", e))
        })?;

    let count = evaluator.rules().len().to_string();
    log_event_with_fields(Event::BootComplete, &[("rules", count.as_str())]);

    Ok(evaluator)
}

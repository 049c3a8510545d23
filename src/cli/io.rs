//! JSON I/O handling for CLI
//!
//! - Input: JSON via stdin (one request, one facts document, or one request per line)
//! - Output: one JSON object per line via stdout
//! - UTF-8 only

use std::io::{BufRead, Read, Write};

use serde_json::Value;

use crate::api::{ApiError, Response};

use super::errors::{CliError, CliResult};

/// Read a single request line
pub fn read_request<R: BufRead>(input: &mut R) -> CliResult<String> {
    let mut line = String::new();
    input.read_line(&mut line)?;

    if line.trim().is_empty() {
        return Err(CliError::io_error("Empty input"));
    }
    Ok(line)
}

/// Read request lines until EOF, skipping blank lines (for start command)
pub fn read_requests<R: BufRead>(input: R) -> impl Iterator<Item = CliResult<String>> {
    input
        .lines()
        .map(|line| line.map_err(CliError::from))
        .filter(|line| !matches!(line, Ok(l) if l.trim().is_empty()))
}

/// Read the whole input as one document
pub fn read_document<R: Read>(input: &mut R) -> CliResult<String> {
    let mut content = String::new();
    input.read_to_string(&mut content)?;

    if content.trim().is_empty() {
        return Err(CliError::io_error("Empty input"));
    }
    Ok(content)
}

/// Write a success response
pub fn write_response<W: Write>(output: &mut W, data: Value) -> CliResult<()> {
    write_json(output, &Response::success(data).to_json())
}

/// Write an error response
pub fn write_error<W: Write>(output: &mut W, err: &ApiError) -> CliResult<()> {
    write_json(output, &Response::error(err).to_json())
}

/// Write a raw JSON string followed by a newline
pub fn write_json<W: Write>(output: &mut W, json_str: &str) -> CliResult<()> {
    writeln!(output, "{}", json_str)?;
    output.flush()?;
    Ok(())
}

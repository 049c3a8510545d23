//! API request types
//!
//! A request is `{"op": "...", "facts": {...}}`.

use std::fmt;

use serde::Deserialize;
use serde_json::Value;

use crate::evaluator::{type_name, Facts};

use super::errors::{ApiError, ApiResult};

/// Operation type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Rules whose condition the facts satisfy
    Applicable,
    /// Dependency graph rooted at the applicable rules
    Graph,
    /// Deadline timeline for the applicable rules
    Timeline,
    /// All three views at once
    Evaluate,
}

impl Operation {
    /// Parses a wire op name
    pub fn parse(op: &str) -> ApiResult<Self> {
        match op {
            "applicable" => Ok(Operation::Applicable),
            "graph" => Ok(Operation::Graph),
            "timeline" => Ok(Operation::Timeline),
            "evaluate" => Ok(Operation::Evaluate),
            other => Err(ApiError::unknown_op(other)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Applicable => "applicable",
            Operation::Graph => "graph",
            Operation::Timeline => "timeline",
            Operation::Evaluate => "evaluate",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parsed request
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub op: Operation,
    pub facts: Facts,
}

/// Raw request for parsing
#[derive(Debug, Deserialize)]
struct RawRequest {
    op: String,
    #[serde(default)]
    facts: Option<Value>,
}

impl Request {
    pub fn new(op: Operation, facts: Facts) -> Self {
        Self { op, facts }
    }

    /// Parse a request from JSON string
    pub fn parse(json: &str) -> ApiResult<Self> {
        let raw: RawRequest = serde_json::from_str(json)
            .map_err(|e| ApiError::invalid_request(format!("Invalid JSON: {}", e)))?;

        let op = Operation::parse(&raw.op)?;
        let facts = match raw.facts {
            None => Facts::new(),
            Some(value) => facts_from_value(value)?,
        };

        Ok(Request { op, facts })
    }
}

/// Accepts only a JSON object as a fact set
pub fn facts_from_value(value: Value) -> ApiResult<Facts> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(ApiError::invalid_request(format!(
            "facts must be an object, got {}",
            type_name(&other)
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_with_facts() {
        let req = Request::parse(r#"{"op": "graph", "facts": {"status": "reservist", "age": 30}}"#)
            .unwrap();
        assert_eq!(req.op, Operation::Graph);
        assert_eq!(req.facts.get("age"), Some(&json!(30)));
        assert_eq!(req.facts.len(), 2);
    }

    #[test]
    fn test_parse_without_facts() {
        let req = Request::parse(r#"{"op": "evaluate"}"#).unwrap();
        assert_eq!(req.op, Operation::Evaluate);
        assert!(req.facts.is_empty());
    }

    #[test]
    fn test_parse_unknown_op() {
        let err = Request::parse(r#"{"op": "explain", "facts": {}}"#).unwrap_err();
        assert_eq!(err.code(), "LEGOL_UNKNOWN_OP");
    }

    #[test]
    fn test_parse_missing_op() {
        let err = Request::parse(r#"{"facts": {}}"#).unwrap_err();
        assert_eq!(err.code(), "LEGOL_INVALID_REQUEST");
    }

    #[test]
    fn test_parse_non_object_facts() {
        let err = Request::parse(r#"{"op": "timeline", "facts": [1, 2]}"#).unwrap_err();
        assert_eq!(err.code(), "LEGOL_INVALID_REQUEST");
        assert!(err.message().contains("array"));
    }

    #[test]
    fn test_parse_invalid_json() {
        let err = Request::parse("op=graph").unwrap_err();
        assert_eq!(err.code(), "LEGOL_INVALID_REQUEST");
        assert!(err.message().starts_with("Invalid JSON"));
    }

    #[test]
    fn test_op_names() {
        for op in [
            Operation::Applicable,
            Operation::Graph,
            Operation::Timeline,
            Operation::Evaluate,
        ] {
            assert_eq!(Operation::parse(op.as_str()).unwrap(), op);
        }
    }
}

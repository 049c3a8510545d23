//! API Handler
//!
//! Dispatches parsed requests to a shared [`RuleEvaluator`]. The handler only
//! borrows the evaluator immutably, so any number of handlers may run at once.

use serde::Serialize;
use serde_json::Value;

use crate::evaluator::RuleEvaluator;
use crate::observability::{log_event_with_fields, Event, Logger};

use super::errors::{ApiError, ApiResult};
use super::request::{Operation, Request};
use super::response::Response;

/// API Handler over a loaded rule set
pub struct ApiHandler<'a> {
    evaluator: &'a RuleEvaluator,
}

impl<'a> ApiHandler<'a> {
    /// Create a new API handler
    pub fn new(evaluator: &'a RuleEvaluator) -> Self {
        Self { evaluator }
    }

    /// Handle a raw JSON request string
    pub fn handle(&self, json_request: &str) -> Response {
        let request = match Request::parse(json_request) {
            Ok(r) => r,
            Err(e) => return self.reject(None, &e),
        };

        match self.execute(&request) {
            Ok(data) => Response::success(data),
            Err(e) => self.reject(Some(request.op), &e),
        }
    }

    /// Runs one parsed request and returns its `data` payload
    pub fn execute(&self, request: &Request) -> ApiResult<Value> {
        let op = request.op.as_str();
        let fact_count = request.facts.len().to_string();
        Logger::trace(
            Event::EvaluationBegin.as_str(),
            &[("op", op), ("facts", fact_count.as_str())],
        );

        let facts = &request.facts;
        let data = match request.op {
            Operation::Applicable => to_data(&self.evaluator.find_applicable_rules(facts)?),
            Operation::Graph => to_data(&self.evaluator.build_dependency_graph(facts)?),
            Operation::Timeline => to_data(&self.evaluator.extract_timeline(facts)?),
            Operation::Evaluate => to_data(&self.evaluator.evaluate(facts)?),
        }?;

        log_event_with_fields(Event::EvaluationComplete, &[("op", op)]);
        Ok(data)
    }

    fn reject(&self, op: Option<Operation>, err: &ApiError) -> Response {
        Logger::warn(
            Event::EvaluationRejected.as_str(),
            &[
                ("code", err.code()),
                ("op", op.map(|o| o.as_str()).unwrap_or("")),
                ("reason", err.message()),
            ],
        );
        Response::error(err)
    }
}

fn to_data<T: Serialize>(result: &T) -> ApiResult<Value> {
    serde_json::to_value(result)
        .map_err(|e| ApiError::evaluation_failed(format!("Failed to serialize result: {}", e)))
}

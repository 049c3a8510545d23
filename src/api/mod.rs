//! API Layer
//!
//! JSON request/response surface over a loaded [`crate::evaluator::RuleEvaluator`].
//!
//! # Design Principles
//!
//! - The evaluator is borrowed immutably; requests never mutate it
//! - Every failure becomes an error response, never a panic
//! - Evaluator error codes are passed through unchanged
//!
//! # Supported Operations
//!
//! - applicable
//! - graph
//! - timeline
//! - evaluate

mod errors;
mod handler;
mod request;
mod response;

pub use errors::{ApiError, ApiErrorCode, ApiResult};
pub use handler::ApiHandler;
pub use request::{facts_from_value, Operation, Request};
pub use response::{ErrorResponse, Response, SuccessResponse};

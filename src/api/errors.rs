//! API error types
//!
//! Evaluator errors pass through with their own code.

use std::fmt;

use crate::evaluator::EvaluatorError;

/// API-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCode {
    /// Invalid request format
    LegolInvalidRequest,
    /// Unknown operation
    LegolUnknownOp,
    /// Result could not be produced
    LegolEvaluationFailed,
}

impl ApiErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            ApiErrorCode::LegolInvalidRequest => "LEGOL_INVALID_REQUEST",
            ApiErrorCode::LegolUnknownOp => "LEGOL_UNKNOWN_OP",
            ApiErrorCode::LegolEvaluationFailed => "LEGOL_EVALUATION_FAILED",
        }
    }
}

impl fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// API error carrying the code reported to the caller
///
/// API errors are always recoverable; the evaluator is never left in a bad state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    code: &'static str,
    message: String,
}

impl ApiError {
    /// Create an invalid request error
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Self {
            code: ApiErrorCode::LegolInvalidRequest.code(),
            message: reason.into(),
        }
    }

    /// Create an unknown operation error
    pub fn unknown_op(op: &str) -> Self {
        Self {
            code: ApiErrorCode::LegolUnknownOp.code(),
            message: format!(
                "Unknown operation '{}' (expected applicable, graph, timeline or evaluate)",
                op
            ),
        }
    }

    /// Create an evaluation failure that has no more specific code
    pub fn evaluation_failed(reason: impl Into<String>) -> Self {
        Self {
            code: ApiErrorCode::LegolEvaluationFailed.code(),
            message: reason.into(),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> &str {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<EvaluatorError> for ApiError {
    fn from(err: EvaluatorError) -> Self {
        Self {
            code: err.code(),
            message: err.to_string(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ERROR] {}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_request_error() {
        let err = ApiError::invalid_request("missing op");
        assert_eq!(err.code(), "LEGOL_INVALID_REQUEST");
        assert_eq!(err.to_string(), "[ERROR] LEGOL_INVALID_REQUEST: missing op");
    }

    #[test]
    fn test_unknown_op_error() {
        let err = ApiError::unknown_op("explain");
        assert_eq!(err.code(), "LEGOL_UNKNOWN_OP");
        assert!(err.message().contains("explain"));
    }

    #[test]
    fn test_evaluator_error_passes_through() {
        let err: ApiError = EvaluatorError::NonComparable {
            key: "age".into(),
            op: "lt",
            fact_type: "null",
            threshold_type: "number",
        }
        .into();

        assert_eq!(err.code(), "LEGOL_TYPE_MISMATCH");
        assert!(err.message().contains("age"));
    }
}

//! # Evaluator Errors

use thiserror::Error;

/// Result type for evaluator operations
pub type EvaluatorResult<T> = Result<T, EvaluatorError>;

/// Evaluator errors
///
/// Only caller contract violations surface here. Malformed reference dates
/// and dangling dependencies are absorbed by the evaluator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluatorError {
    #[error("Fact '{key}' of type {fact_type} cannot be compared with {op} threshold of type {threshold_type}")]
    NonComparable {
        key: String,
        op: &'static str,
        fact_type: &'static str,
        threshold_type: &'static str,
    },
}

impl EvaluatorError {
    /// Get the error code
    pub fn code(&self) -> &'static str {
        match self {
            EvaluatorError::NonComparable { .. } => "LEGOL_TYPE_MISMATCH",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_comparable_display() {
        let err = EvaluatorError::NonComparable {
            key: "age".into(),
            op: "gt",
            fact_type: "string",
            threshold_type: "number",
        };
        assert_eq!(err.code(), "LEGOL_TYPE_MISMATCH");

        let display = err.to_string();
        assert!(display.contains("'age'"));
        assert!(display.contains("gt"));
        assert!(display.contains("string"));
    }
}

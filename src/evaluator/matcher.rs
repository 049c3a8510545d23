//! Condition matching
//!
//! Matches a rule condition against caller-supplied facts.
//! No type coercion: literals match on JSON type and value, range bounds are
//! strict and only defined between values of the same kind.

use std::cmp::Ordering;

use serde_json::{Number, Value};

use crate::rules::{Condition, Literal, Predicate, RangeBounds};

use super::errors::{EvaluatorError, EvaluatorResult};
use super::Facts;

/// Evaluates rule conditions against facts
pub struct ConditionMatcher;

impl ConditionMatcher {
    /// Checks if the facts satisfy every clause of the condition.
    ///
    /// Clauses are checked in declaration order and the first failing clause
    /// ends the check. A fact that cannot be ordered against a range threshold
    /// is an error, not a mismatch.
    pub fn matches(condition: &Condition, facts: &Facts) -> EvaluatorResult<bool> {
        for (key, predicate) in condition.clauses() {
            let fact = match facts.get(key) {
                Some(v) => v,
                None => return Ok(false), // Missing fact = no match
            };

            let satisfied = match predicate {
                Predicate::Literal(expected) => Self::literal_match(fact, expected),
                Predicate::Range(bounds) => Self::range_match(key, fact, bounds)?,
            };

            if !satisfied {
                return Ok(false);
            }
        }

        Ok(true)
    }

    /// Exact equality match (type and value)
    fn literal_match(actual: &Value, expected: &Literal) -> bool {
        match (actual, expected) {
            (Value::String(a), Literal::String(e)) => a == e,
            (Value::Number(a), Literal::Int(e)) => !a.is_f64() && a.as_i64() == Some(*e),
            (Value::Bool(a), Literal::Bool(e)) => a == e,
            _ => false,
        }
    }

    /// Strict range match; `gt` is checked before `lt`
    fn range_match(key: &str, actual: &Value, bounds: &RangeBounds) -> EvaluatorResult<bool> {
        if let Some(threshold) = &bounds.gt {
            if Self::ordering(key, "gt", actual, threshold)? != Ordering::Greater {
                return Ok(false);
            }
        }

        if let Some(threshold) = &bounds.lt {
            if Self::ordering(key, "lt", actual, threshold)? != Ordering::Less {
                return Ok(false);
            }
        }

        Ok(true)
    }

    fn ordering(
        key: &str,
        op: &'static str,
        actual: &Value,
        threshold: &Value,
    ) -> EvaluatorResult<Ordering> {
        Self::compare(actual, threshold).ok_or_else(|| EvaluatorError::NonComparable {
            key: key.to_string(),
            op,
            fact_type: type_name(actual),
            threshold_type: type_name(threshold),
        })
    }

    /// Orders two JSON values of the same kind.
    ///
    /// Defined for number/number, string/string and bool/bool.
    pub fn compare(a: &Value, b: &Value) -> Option<Ordering> {
        match (a, b) {
            (Value::Number(a), Value::Number(b)) => Self::compare_numbers(a, b),
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    fn compare_numbers(a: &Number, b: &Number) -> Option<Ordering> {
        match (as_integer(a), as_integer(b)) {
            (Some(ai), Some(bi)) => Some(ai.cmp(&bi)),
            _ => a.as_f64()?.partial_cmp(&b.as_f64()?),
        }
    }
}

fn as_integer(n: &Number) -> Option<i128> {
    n.as_i64()
        .map(i128::from)
        .or_else(|| n.as_u64().map(i128::from))
}

/// JSON type name for diagnostics
pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

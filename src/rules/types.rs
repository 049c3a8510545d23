//! Rule record definitions
//!
//! A rule store holds an ordered list of rule records. Each record carries a
//! condition (per-fact predicates), provenance, an optional deadline offset
//! and the ids of the rules it depends on.
//!
//! Supported predicate shapes:
//! - literal: string, integer or boolean, matched by exact equality
//! - range: object with optional `gt` / `lt` thresholds (strict bounds)

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::Value;

/// Default provenance for rules that do not declare a source.
pub const UNKNOWN_SOURCE: &str = "Unknown";

/// Literal value a fact must equal exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Literal {
    String(String),
    Int(i64),
    Bool(bool),
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::String(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Literal::String(value)
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::Int(value)
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::Bool(value)
    }
}

/// Strict bounds on a fact value. Both bounds apply when present.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RangeBounds {
    /// Fact must be strictly greater than this threshold
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gt: Option<Value>,
    /// Fact must be strictly less than this threshold
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lt: Option<Value>,
}

/// Predicate applied to a single fact
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Predicate {
    /// Exact equality on type and value
    Literal(Literal),
    /// Strict range comparison
    Range(RangeBounds),
}

impl Predicate {
    /// Create an equality predicate
    pub fn eq(value: impl Into<Literal>) -> Self {
        Predicate::Literal(value.into())
    }

    /// Create a strict lower bound predicate
    pub fn gt(threshold: Value) -> Self {
        Predicate::Range(RangeBounds {
            gt: Some(threshold),
            lt: None,
        })
    }

    /// Create a strict upper bound predicate
    pub fn lt(threshold: Value) -> Self {
        Predicate::Range(RangeBounds {
            gt: None,
            lt: Some(threshold),
        })
    }

    /// Create a predicate bounded on both sides (exclusive)
    pub fn between(gt: Value, lt: Value) -> Self {
        Predicate::Range(RangeBounds {
            gt: Some(gt),
            lt: Some(lt),
        })
    }

    /// Parses a predicate from its rule-store JSON form.
    ///
    /// Arrays, nulls, floating point literals and integers outside the i64
    /// range are rejected, as are range thresholds that are not scalars.
    /// Keys other than `gt` / `lt` in a range object are ignored.
    pub fn from_json(value: &Value) -> Result<Self, String> {
        match value {
            Value::String(s) => Ok(Predicate::Literal(Literal::String(s.clone()))),
            Value::Bool(b) => Ok(Predicate::Literal(Literal::Bool(*b))),
            Value::Number(n) => match n.as_i64() {
                Some(i) if !n.is_f64() => Ok(Predicate::Literal(Literal::Int(i))),
                _ => Err(format!("unsupported numeric literal {}: only 64-bit integers are allowed", n)),
            },
            Value::Object(map) => {
                let gt = map.get("gt").map(Self::threshold).transpose()?;
                let lt = map.get("lt").map(Self::threshold).transpose()?;
                Ok(Predicate::Range(RangeBounds { gt, lt }))
            }
            Value::Array(_) => Err("array predicates are not supported".into()),
            Value::Null => Err("null predicates are not supported".into()),
        }
    }

    fn threshold(value: &Value) -> Result<Value, String> {
        match value {
            Value::Number(_) | Value::String(_) | Value::Bool(_) => Ok(value.clone()),
            other => Err(format!("range threshold must be a scalar, got {}", other)),
        }
    }
}

/// Ordered set of per-fact predicates. Empty matches everything.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Condition {
    clauses: Vec<(String, Predicate)>,
}

impl Condition {
    /// Create an empty condition
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a clause, keeping declaration order
    pub fn with(mut self, key: impl Into<String>, predicate: Predicate) -> Self {
        self.clauses.push((key.into(), predicate));
        self
    }

    /// Clauses in declaration order
    pub fn clauses(&self) -> impl Iterator<Item = (&str, &Predicate)> {
        self.clauses.iter().map(|(k, p)| (k.as_str(), p))
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

impl Serialize for Condition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.clauses.len()))?;
        for (key, predicate) in &self.clauses {
            map.serialize_entry(key, predicate)?;
        }
        map.end()
    }
}

/// A single rule as loaded from the rule store
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleRecord {
    /// Unique rule identifier
    pub id: String,
    /// Display name; absent names are tolerated
    pub name: Option<String>,
    /// Facts the rule requires
    pub condition: Condition,
    /// Human-readable provenance
    pub source: String,
    /// Link to the provenance, may be empty
    pub source_url: String,
    /// Deadline wording, may be empty
    pub deadline_description: String,
    /// Calendar-day offset from the reference date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline_days: Option<i64>,
    /// Ids of rules this rule depends on, in declaration order
    pub depends_on: Vec<String>,
}

impl RuleRecord {
    /// Create a rule with an empty condition and default provenance
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
            condition: Condition::new(),
            source: UNKNOWN_SOURCE.to_string(),
            source_url: String::new(),
            deadline_description: String::new(),
            deadline_days: None,
            depends_on: Vec::new(),
        }
    }

    /// Create a rule without a name
    pub fn unnamed(id: impl Into<String>) -> Self {
        Self {
            name: None,
            ..Self::new(id, "")
        }
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = condition;
        self
    }

    pub fn with_source(mut self, source: impl Into<String>, source_url: impl Into<String>) -> Self {
        self.source = source.into();
        self.source_url = source_url.into();
        self
    }

    pub fn with_deadline(mut self, days: i64, description: impl Into<String>) -> Self {
        self.deadline_days = Some(days);
        self.deadline_description = description.into();
        self
    }

    pub fn depends_on<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.depends_on = ids.into_iter().map(Into::into).collect();
        self
    }
}

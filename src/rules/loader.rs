//! Rule store loader
//!
//! The rule store is a JSON document of the form `{"rules": [...]}`.
//! - Read once at startup, never reloaded
//! - Missing or malformed stores are FATAL
//! - Every predicate is validated before the rule set is handed out

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::observability::{log_event_with_fields, Event, Logger};

use super::errors::{RuleStoreError, RuleStoreResult};
use super::set::RuleSet;
use super::types::{Condition, Predicate, RuleRecord, UNKNOWN_SOURCE};

/// Top-level rule store document
#[derive(Debug, Deserialize)]
struct RuleDocument {
    #[serde(default)]
    rules: Vec<RawRule>,
}

/// Rule record as it appears on disk, before predicate validation
#[derive(Debug, Deserialize)]
struct RawRule {
    id: String,
    name: Option<String>,
    condition: Option<Map<String, Value>>,
    source: Option<String>,
    source_url: Option<String>,
    deadline_description: Option<String>,
    deadline_days: Option<i64>,
    depends_on: Option<Vec<String>>,
}

impl RawRule {
    fn into_record(self) -> RuleStoreResult<RuleRecord> {
        let mut condition = Condition::new();
        for (key, value) in self.condition.unwrap_or_default() {
            let predicate = Predicate::from_json(&value)
                .map_err(|reason| RuleStoreError::invalid_predicate(&self.id, &key, reason))?;
            condition = condition.with(key, predicate);
        }

        Ok(RuleRecord {
            id: self.id,
            name: self.name,
            condition,
            source: self.source.unwrap_or_else(|| UNKNOWN_SOURCE.to_string()),
            source_url: self.source_url.unwrap_or_default(),
            deadline_description: self.deadline_description.unwrap_or_default(),
            deadline_days: self.deadline_days,
            depends_on: self.depends_on.unwrap_or_default(),
        })
    }
}

/// Loads a rule store file into an immutable [`RuleSet`].
pub struct RuleLoader {
    /// Rule store file
    path: PathBuf,
}

impl RuleLoader {
    /// Creates a loader for the given rule store file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the rule store path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and validates the whole rule store.
    pub fn load(&self) -> RuleStoreResult<RuleSet> {
        let origin = self.path.display().to_string();

        let content = fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            io::ErrorKind::InvalidData => {
                RuleStoreError::malformed(&origin, format!("Not valid UTF-8: {}", e))
            }
            _ => RuleStoreError::file_missing(&origin, e.to_string()),
        })?;

        Self::parse(&content, &origin)
    }

    /// Parses an in-memory rule store document.
    ///
    /// `origin` names the document in errors and logs.
    pub fn parse(content: &str, origin: &str) -> RuleStoreResult<RuleSet> {
        let document: RuleDocument = serde_json::from_str(content)
            .map_err(|e| RuleStoreError::malformed(origin, format!("Invalid JSON: {}", e)))?;

        let rules = document
            .rules
            .into_iter()
            .map(RawRule::into_record)
            .collect::<RuleStoreResult<Vec<_>>>()?;

        let set = RuleSet::new(rules);

        for id in set.duplicate_ids() {
            Logger::warn(Event::RuleDuplicateId.as_str(), &[("rule_id", id), ("origin", origin)]);
        }

        let count = set.len().to_string();
        log_event_with_fields(Event::RulesLoaded, &[("origin", origin), ("rules", count.as_str())]);

        Ok(set)
    }
}

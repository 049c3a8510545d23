//! Immutable, ordered rule set
//!
//! Rules keep their load order. Lookup by id resolves to the first record
//! carrying that id.

use std::collections::{HashMap, HashSet};

use super::types::RuleRecord;

/// Ordered collection of rule records with an id index
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<RuleRecord>,
    /// id -> position of the first record with that id
    index: HashMap<String, usize>,
}

impl RuleSet {
    /// Builds a rule set, indexing the first occurrence of every id.
    pub fn new(rules: Vec<RuleRecord>) -> Self {
        let mut index = HashMap::with_capacity(rules.len());
        for (pos, rule) in rules.iter().enumerate() {
            index.entry(rule.id.clone()).or_insert(pos);
        }
        Self { rules, index }
    }

    /// Rules in load order
    pub fn rules(&self) -> &[RuleRecord] {
        &self.rules
    }

    /// Gets the first rule with the given id
    pub fn get(&self, id: &str) -> Option<&RuleRecord> {
        self.index.get(id).map(|&pos| &self.rules[pos])
    }

    /// Checks if a rule id exists
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Ids declared by more than one record, in first-seen order.
    pub fn duplicate_ids(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        let mut duplicates = Vec::new();

        for rule in &self.rules {
            let id = rule.id.as_str();
            if !seen.insert(id) && reported.insert(id) {
                duplicates.push(id);
            }
        }
        duplicates
    }

    /// `(rule id, missing dependency id)` pairs in rule and dependency order.
    pub fn dangling_dependencies(&self) -> Vec<(&str, &str)> {
        let mut dangling = Vec::new();
        for rule in &self.rules {
            for dep in &rule.depends_on {
                if !self.contains(dep) {
                    dangling.push((rule.id.as_str(), dep.as_str()));
                }
            }
        }
        dangling
    }
}

//! Rule evaluation subsystem
//!
//! Turns a set of facts into three views over the loaded rules.
//!
//! # Evaluation Flow
//!
//! 1. Match every rule condition against the facts (applicable rules)
//! 2. Expand applicable rules through their dependencies (dependency graph)
//! 3. Anchor applicable rules' deadlines to the reference date (timeline)
//!
//! # Guarantees
//!
//! - Pure: the same facts always produce the same output
//! - Applicable rules keep rule-set order
//! - A non-comparable fact under a range predicate fails the whole call
//! - Bad reference dates never fail a call; the timeline is just empty

mod errors;
mod graph;
mod matcher;
mod rule_evaluator;
mod timeline;

pub use errors::{EvaluatorError, EvaluatorResult};
pub use rule_evaluator::{Evaluation, RuleEvaluator};
pub use graph::{DependencyGraph, EdgeType, GraphBuilder, GraphEdge, GraphNode, NodeType};
pub use matcher::ConditionMatcher;
pub(crate) use matcher::type_name;
pub use timeline::{
    TimelineConfig, TimelineEntry, TimelineExtractor, DEFAULT_NOTICE_EVENT, DEFAULT_NOTICE_SOURCE,
    DEFAULT_REFERENCE_DATE_KEY,
};

/// Caller-supplied facts, keyed by name
pub type Facts = serde_json::Map<String, serde_json::Value>;

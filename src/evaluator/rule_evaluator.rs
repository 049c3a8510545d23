//! Rule evaluator
//!
//! Holds the immutable rule set and answers per-call questions about a set
//! of facts. No call mutates the evaluator, so one instance can serve any
//! number of callers.

use std::path::Path;

use serde::Serialize;

use crate::rules::{RuleLoader, RuleRecord, RuleSet, RuleStoreResult};

use super::errors::EvaluatorResult;
use super::graph::{DependencyGraph, GraphBuilder};
use super::matcher::ConditionMatcher;
use super::timeline::{TimelineConfig, TimelineEntry, TimelineExtractor};
use super::Facts;

/// All derived views for one set of facts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation<'a> {
    pub applicable: Vec<&'a RuleRecord>,
    pub graph: DependencyGraph,
    pub timeline: Vec<TimelineEntry>,
}

/// Evaluates facts against a loaded rule set
#[derive(Debug, Clone)]
pub struct RuleEvaluator {
    rules: RuleSet,
    timeline: TimelineConfig,
}

impl RuleEvaluator {
    /// Create an evaluator with the default timeline settings
    pub fn new(rules: RuleSet) -> Self {
        Self::with_timeline_config(rules, TimelineConfig::default())
    }

    /// Create an evaluator with custom timeline settings
    pub fn with_timeline_config(rules: RuleSet, timeline: TimelineConfig) -> Self {
        Self { rules, timeline }
    }

    /// Loads the rule store at `path`. Fails if the store is missing or malformed.
    pub fn from_file(path: impl AsRef<Path>, timeline: TimelineConfig) -> RuleStoreResult<Self> {
        let rules = RuleLoader::new(path.as_ref()).load()?;
        Ok(Self::with_timeline_config(rules, timeline))
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn timeline_config(&self) -> &TimelineConfig {
        &self.timeline
    }

    /// Rules whose condition the facts satisfy, in rule-set order.
    pub fn find_applicable_rules(&self, facts: &Facts) -> EvaluatorResult<Vec<&RuleRecord>> {
        let mut applicable = Vec::new();
        for rule in self.rules.rules() {
            if ConditionMatcher::matches(&rule.condition, facts)? {
                applicable.push(rule);
            }
        }
        Ok(applicable)
    }

    /// Applicable rules plus their transitive dependencies.
    pub fn build_dependency_graph(&self, facts: &Facts) -> EvaluatorResult<DependencyGraph> {
        let applicable = self.find_applicable_rules(facts)?;
        Ok(GraphBuilder::new(&self.rules).build(&applicable))
    }

    /// Dated deadline events anchored to the reference date fact.
    ///
    /// Only condition matching can fail; date problems produce an empty timeline.
    pub fn extract_timeline(&self, facts: &Facts) -> EvaluatorResult<Vec<TimelineEntry>> {
        let applicable = self.find_applicable_rules(facts)?;
        Ok(TimelineExtractor::new(&self.timeline).extract(facts, &applicable))
    }

    /// Computes all three views from a single applicability pass.
    pub fn evaluate(&self, facts: &Facts) -> EvaluatorResult<Evaluation<'_>> {
        let applicable = self.find_applicable_rules(facts)?;
        let graph = GraphBuilder::new(&self.rules).build(&applicable);
        let timeline = TimelineExtractor::new(&self.timeline).extract(facts, &applicable);

        Ok(Evaluation {
            applicable,
            graph,
            timeline,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::EvaluatorError;
    use crate::rules::{Condition, Predicate};
    use serde_json::{json, Value};

    fn facts(value: Value) -> Facts {
        match value {
            Value::Object(map) => map,
            _ => panic!("facts must be an object"),
        }
    }

    fn sample_evaluator() -> RuleEvaluator {
        RuleEvaluator::new(RuleSet::new(vec![
            RuleRecord::new("always", "Keep documents").with_deadline(7, "One week"),
            RuleRecord::new("reservist", "Notify employer")
                .with_condition(Condition::new().with("status", Predicate::eq("reservist")))
                .with_deadline(14, "Two weeks")
                .depends_on(["always", "missing"]),
            RuleRecord::new("long_service", "Apply for leave")
                .with_condition(Condition::new().with("months", Predicate::gt(json!(12)))),
        ]))
    }

    #[test]
    fn test_applicable_preserves_order() {
        let evaluator = sample_evaluator();
        let applicable = evaluator
            .find_applicable_rules(&facts(json!({"status": "reservist", "months": 20})))
            .unwrap();

        let ids: Vec<_> = applicable.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["always", "reservist", "long_service"]);
    }

    #[test]
    fn test_applicable_with_no_facts() {
        let evaluator = sample_evaluator();
        let applicable = evaluator.find_applicable_rules(&Facts::new()).unwrap();
        assert_eq!(applicable.len(), 1);
        assert_eq!(applicable[0].id, "always");
    }

    #[test]
    fn test_type_error_propagates() {
        let evaluator = sample_evaluator();
        let f = facts(json!({"months": "many"}));

        assert!(matches!(
            evaluator.find_applicable_rules(&f),
            Err(EvaluatorError::NonComparable { .. })
        ));
        assert!(evaluator.build_dependency_graph(&f).is_err());
        assert!(evaluator.extract_timeline(&f).is_err());
        assert!(evaluator.evaluate(&f).is_err());
    }

    #[test]
    fn test_graph_from_applicable_roots() {
        let evaluator = sample_evaluator();
        let graph = evaluator
            .build_dependency_graph(&facts(json!({"status": "reservist"})))
            .unwrap();

        let ids: Vec<_> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["always", "reservist"]);
        assert!(graph.has_edge("always", "reservist"));
        assert!(graph.has_edge("missing", "reservist"));
        assert_eq!(graph.edges.len(), 2);
    }

    #[test]
    fn test_evaluate_matches_individual_calls() {
        let evaluator = sample_evaluator();
        let f = facts(json!({"status": "reservist", "military_notice_date": "2024-01-10"}));

        let evaluation = evaluator.evaluate(&f).unwrap();
        assert_eq!(evaluation.applicable, evaluator.find_applicable_rules(&f).unwrap());
        assert_eq!(evaluation.graph, evaluator.build_dependency_graph(&f).unwrap());
        assert_eq!(evaluation.timeline, evaluator.extract_timeline(&f).unwrap());
        assert_eq!(evaluation.timeline.len(), 3);
    }

    #[test]
    fn test_evaluator_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RuleEvaluator>();
    }
}

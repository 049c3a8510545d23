//! legol - A deterministic rules engine
//!
//! Given a set of facts about a person or situation, legol answers three
//! questions against a static rule store:
//!
//! - which rules apply (`evaluator::RuleEvaluator::find_applicable_rules`)
//! - what those rules depend on (`evaluator::RuleEvaluator::build_dependency_graph`)
//! - when their deadlines fall (`evaluator::RuleEvaluator::extract_timeline`)
//!
//! The rule store is loaded once at boot and never mutated afterwards.

pub mod api;
pub mod cli;
pub mod evaluator;
pub mod observability;
pub mod rules;

//! Dependency graph construction
//!
//! Expands applicable rules depth-first through `depends_on`.
//!
//! # Traversal
//!
//! - Roots are processed in applicability order at depth 0
//! - Each hop to a dependency adds 1 to the depth
//! - An edge (dependency -> dependent) is recorded before descending
//! - A rule id is visited at most once per build; the first visit fixes its depth
//! - Unknown dependency ids keep their edge but produce no node
//!
//! The visited set also terminates dependency cycles.

use std::collections::HashSet;

use serde::Serialize;

use crate::rules::{RuleRecord, RuleSet};

/// Node kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Rule,
}

/// Edge kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeType {
    Dependency,
}

/// A rule reached during traversal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    pub id: String,
    /// Rule name
    pub label: Option<String>,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub source: String,
    pub source_url: String,
    /// Deadline wording of the rule
    pub deadline: String,
    /// Hops from the first root that reached this rule
    pub depth: usize,
}

impl GraphNode {
    fn from_rule(rule: &RuleRecord, depth: usize) -> Self {
        Self {
            id: rule.id.clone(),
            label: rule.name.clone(),
            node_type: NodeType::Rule,
            source: rule.source.clone(),
            source_url: rule.source_url.clone(),
            deadline: rule.deadline_description.clone(),
            depth,
        }
    }
}

/// Directed edge from a dependency to the rule that depends on it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
    #[serde(rename = "type")]
    pub edge_type: EdgeType,
}

impl GraphEdge {
    /// Create a dependency edge
    pub fn dependency(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            edge_type: EdgeType::Dependency,
        }
    }
}

/// Applicable rules and everything they transitively depend on
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct DependencyGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl DependencyGraph {
    /// Gets a node by rule id
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Checks if an edge exists
    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        self.edges.iter().any(|e| e.from == from && e.to == to)
    }
}

/// Pending expansion of one rule's dependencies
struct Frame<'a> {
    rule: &'a RuleRecord,
    depth: usize,
    next_dep: usize,
}

/// Builds a [`DependencyGraph`] with an explicit stack.
///
/// Frames resume where they left off, so nodes and edges come out in the
/// same order as a recursive depth-first walk.
pub struct GraphBuilder<'a> {
    rules: &'a RuleSet,
    visited: HashSet<&'a str>,
    stack: Vec<Frame<'a>>,
    graph: DependencyGraph,
}

impl<'a> GraphBuilder<'a> {
    /// Create a builder resolving dependencies against `rules`
    pub fn new(rules: &'a RuleSet) -> Self {
        Self {
            rules,
            visited: HashSet::new(),
            stack: Vec::new(),
            graph: DependencyGraph::default(),
        }
    }

    /// Expands every root in order and returns the accumulated graph.
    pub fn build(mut self, roots: &[&'a RuleRecord]) -> DependencyGraph {
        for &root in roots {
            self.visit(&root.id, 0);
            self.expand();
        }
        self.graph
    }

    fn visit(&mut self, id: &'a str, depth: usize) {
        if !self.visited.insert(id) {
            return;
        }

        // Dangling reference: edge already recorded, nothing to expand
        let rules = self.rules;
        let Some(rule) = rules.get(id) else {
            return;
        };

        self.graph.nodes.push(GraphNode::from_rule(rule, depth));
        self.stack.push(Frame {
            rule,
            depth,
            next_dep: 0,
        });
    }

    fn expand(&mut self) {
        while let Some(frame) = self.stack.last_mut() {
            let rule = frame.rule;
            let Some(dep) = rule.depends_on.get(frame.next_dep) else {
                self.stack.pop();
                continue;
            };
            frame.next_dep += 1;
            let depth = frame.depth + 1;

            self.graph.edges.push(GraphEdge::dependency(dep.as_str(), rule.id.as_str()));
            self.visit(dep, depth);
        }
    }
}

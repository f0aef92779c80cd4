//! Match results
//!
//!     A successful match is a tree of [MatchNode]s. Only rules create nodes: sequences,
//!     choices, optionals and repetitions splice their children into the enclosing rule
//!     node, so the tree shape follows the grammar's named rules and nothing else. Every
//!     matched token is a leaf that refers back to the token stream by index.
//!
//!     Nodes are shared through `Arc` so memoized results can be handed out repeatedly
//!     without copying subtrees.

use crate::python::token::Token;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MatchNode {
    Rule {
        rule: String,
        start: usize,
        consumed: usize,
        children: Vec<Arc<MatchNode>>,
    },
    Token {
        index: usize,
    },
}

impl MatchNode {
    pub fn rule(rule: impl Into<String>, start: usize, children: Vec<Arc<MatchNode>>) -> Self {
        let consumed = children.iter().map(|child| child.consumed()).sum();
        MatchNode::Rule {
            rule: rule.into(),
            start,
            consumed,
            children,
        }
    }

    pub fn token(index: usize) -> Self {
        MatchNode::Token { index }
    }

    pub fn start(&self) -> usize {
        match self {
            MatchNode::Rule { start, .. } => *start,
            MatchNode::Token { index } => *index,
        }
    }

    /// Number of tokens covered. A token leaf always covers exactly one.
    pub fn consumed(&self) -> usize {
        match self {
            MatchNode::Rule { consumed, .. } => *consumed,
            MatchNode::Token { .. } => 1,
        }
    }

    pub fn end(&self) -> usize {
        self.start() + self.consumed()
    }

    pub fn rule_name(&self) -> Option<&str> {
        match self {
            MatchNode::Rule { rule, .. } => Some(rule.as_str()),
            MatchNode::Token { .. } => None,
        }
    }

    pub fn children(&self) -> &[Arc<MatchNode>] {
        match self {
            MatchNode::Rule { children, .. } => children.as_slice(),
            MatchNode::Token { .. } => &[],
        }
    }

    /// First node for `rule` in depth-first order, this node included.
    pub fn find(&self, rule: &str) -> Option<&MatchNode> {
        if self.rule_name() == Some(rule) {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find(rule))
    }

    /// Every node for `rule`, depth-first.
    pub fn find_all<'a>(&'a self, rule: &str) -> Vec<&'a MatchNode> {
        let mut found = Vec::new();
        self.collect(rule, &mut found);
        found
    }

    fn collect<'a>(&'a self, rule: &str, found: &mut Vec<&'a MatchNode>) {
        if self.rule_name() == Some(rule) {
            found.push(self);
        }
        for child in self.children() {
            child.collect(rule, found);
        }
    }

    /// Whether every rule node's token count equals its children's, and children are
    /// contiguous.
    pub fn is_consistent(&self) -> bool {
        match self {
            MatchNode::Token { .. } => true,
            MatchNode::Rule {
                start,
                consumed,
                children,
                ..
            } => {
                let mut position = *start;
                for child in children {
                    if child.start() != position || !child.is_consistent() {
                        return false;
                    }
                    position += child.consumed();
                }
                position == start + consumed
            }
        }
    }
}

/// Where and why a match attempt stopped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchFailure {
    /// Index of the token the furthest attempt failed on.
    pub position: usize,
    /// Innermost rule being matched at that point.
    pub rule: String,
    /// Descriptions of the tokens that would have let matching continue.
    pub expected: Vec<String>,
}

impl MatchFailure {
    pub fn expected_list(&self) -> String {
        match self.expected.as_slice() {
            [] => "nothing".to_string(),
            [single] => single.clone(),
            [init @ .., last] => format!("{} or {}", init.join(", "), last),
        }
    }
}

impl fmt::Display for MatchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "expected {} at token {} in rule '{}'",
            self.expected_list(),
            self.position,
            self.rule
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum MatchResult {
    Success(Arc<MatchNode>),
    Failure(MatchFailure),
}

impl MatchResult {
    pub fn is_success(&self) -> bool {
        matches!(self, MatchResult::Success(_))
    }

    /// Tokens consumed by a successful match.
    pub fn consumed(&self) -> Option<usize> {
        self.node().map(|node| node.consumed())
    }

    pub fn node(&self) -> Option<&Arc<MatchNode>> {
        match self {
            MatchResult::Success(node) => Some(node),
            MatchResult::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&MatchFailure> {
        match self {
            MatchResult::Success(_) => None,
            MatchResult::Failure(failure) => Some(failure),
        }
    }
}

/// A complete match together with the tokens it indexes into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseTree {
    pub tokens: Vec<Token>,
    pub root: Arc<MatchNode>,
}

impl ParseTree {
    pub fn token(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// Source text of the tokens a node covers, joined with single spaces. Synthetic
    /// tokens are skipped.
    pub fn text(&self, node: &MatchNode) -> String {
        self.tokens[node.start()..node.end().min(self.tokens.len())]
            .iter()
            .filter(|token| !token.kind.is_synthetic() && !token.text.trim().is_empty())
            .map(|token| token.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

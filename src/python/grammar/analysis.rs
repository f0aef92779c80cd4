//! Grammar analysis: nullable rules and left recursion.
//!
//! A recursive descent matcher loops forever on a left-recursive rule, so grammars are
//! checked up front. A rule `a` left-calls `b` when `b` can be entered without consuming
//! a token first; that happens for the first element of a sequence, and for every later
//! element whose predecessors are all nullable. Any cycle in the left-call graph is left
//! recursion, direct or indirect.

use super::expr::Expression;
use super::registry::Grammar;
use std::collections::{BTreeMap, BTreeSet};

/// Rules that can succeed without consuming any token, computed to a fixpoint.
pub fn nullable_rules(grammar: &Grammar) -> BTreeSet<String> {
    let mut nullable = BTreeSet::new();
    loop {
        let before = nullable.len();
        for rule in grammar.rules() {
            if !nullable.contains(&rule.name) && is_nullable(rule.effective(), &nullable) {
                nullable.insert(rule.name.clone());
            }
        }
        if nullable.len() == before {
            return nullable;
        }
    }
}

pub fn is_nullable(expr: &Expression, nullable: &BTreeSet<String>) -> bool {
    match expr {
        Expression::Literal { .. } | Expression::Mock => false,
        Expression::RuleRef(name) => nullable.contains(name),
        Expression::Sequence(items) => items.iter().all(|item| is_nullable(item, nullable)),
        Expression::Choice(items) => items.iter().any(|item| is_nullable(item, nullable)),
        Expression::Optional(_) | Expression::ZeroOrMore(_) => true,
        Expression::OneOrMore(inner) => is_nullable(inner, nullable),
    }
}

/// Rules `expr` may enter at its own starting position.
pub fn left_calls<'a>(expr: &'a Expression, nullable: &BTreeSet<String>, out: &mut Vec<&'a str>) {
    match expr {
        Expression::Literal { .. } | Expression::Mock => {}
        Expression::RuleRef(name) => {
            if !out.contains(&name.as_str()) {
                out.push(name);
            }
        }
        Expression::Sequence(items) => {
            for item in items {
                left_calls(item, nullable, out);
                if !is_nullable(item, nullable) {
                    break;
                }
            }
        }
        Expression::Choice(items) => {
            for item in items {
                left_calls(item, nullable, out);
            }
        }
        Expression::Optional(inner) | Expression::ZeroOrMore(inner) | Expression::OneOrMore(inner) => {
            left_calls(inner, nullable, out)
        }
    }
}

/// The first left-recursive cycle, as a path that starts and ends with the same rule.
pub fn find_left_recursion(grammar: &Grammar) -> Option<Vec<String>> {
    let nullable = nullable_rules(grammar);
    let graph: BTreeMap<&str, Vec<&str>> = grammar
        .rules()
        .map(|rule| {
            let mut calls = Vec::new();
            left_calls(rule.effective(), &nullable, &mut calls);
            (rule.name.as_str(), calls)
        })
        .collect();

    let mut done = BTreeSet::new();
    for &start in graph.keys() {
        let mut path = Vec::new();
        if let Some(cycle) = visit(start, &graph, &mut path, &mut done) {
            return Some(cycle);
        }
    }
    None
}

fn visit<'a>(
    node: &'a str,
    graph: &BTreeMap<&'a str, Vec<&'a str>>,
    path: &mut Vec<&'a str>,
    done: &mut BTreeSet<&'a str>,
) -> Option<Vec<String>> {
    if let Some(index) = path.iter().position(|&on_path| on_path == node) {
        let mut cycle: Vec<String> = path[index..].iter().map(|s| s.to_string()).collect();
        cycle.push(node.to_string());
        return Some(cycle);
    }
    if done.contains(node) {
        return None;
    }

    path.push(node);
    // Undefined references have no outgoing edges; validation reports them separately
    for &next in graph.get(node).into_iter().flatten() {
        if let Some(cycle) = visit(next, graph, path, done) {
            return Some(cycle);
        }
    }
    path.pop();
    done.insert(node);
    None
}

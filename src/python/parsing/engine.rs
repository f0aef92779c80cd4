//! Matching engine
//!
//!     A recursive descent matcher over a token slice, driven by the rule expressions of
//!     a [Grammar]. Choices are ordered and backtrack: when an alternative fails, the next
//!     one starts again from the same token. Sequences never retry an earlier choice once
//!     a later element fails.
//!
//!     Rule results are memoized per (rule, position, override generation), which keeps
//!     the heavy backtracking of the expression grammar linear in practice. The memo only
//!     lives as long as one top-level match call. A left-recursive re-entry fails, and
//!     any result that saw such a failure is left out of the memo, since it only holds
//!     while the same rules are active.
//!
//! Failure Diagnostics
//!
//!     Every failed token test is recorded, including the ones an optional or a repetition
//!     swallows. The failure reported for a match is the one that got furthest into the
//!     input, with the innermost rule active there and every token description tried at
//!     that position. That is almost always where the input actually goes wrong.

use super::result::{MatchFailure, MatchNode, MatchResult};
use crate::python::grammar::{Expression, Grammar, GrammarError};
use crate::python::token::{Token, TokenKind};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Tokens matched so far and the position after them, or `None` on failure.
type Step = Option<(usize, Vec<Arc<MatchNode>>)>;

#[derive(Debug, Default)]
struct Furthest {
    position: usize,
    rule: String,
    expected: Vec<String>,
    recorded: bool,
}

pub struct Matcher<'g, 't> {
    grammar: &'g Grammar,
    tokens: &'t [Token],
    memoize: bool,
    memo: HashMap<(&'g str, usize, u64), Option<Arc<MatchNode>>>,
    /// Rules currently being matched at a position; re-entry means left recursion.
    active: HashSet<(&'g str, usize)>,
    /// Re-entries refused so far. A result computed while this grows depends on the
    /// rules active around it and is not memoized.
    blocked: usize,
    stack: Vec<&'g str>,
    furthest: Furthest,
}

impl<'g, 't> Matcher<'g, 't> {
    pub fn new(grammar: &'g Grammar, tokens: &'t [Token]) -> Self {
        Self {
            grammar,
            tokens,
            memoize: true,
            memo: HashMap::new(),
            active: HashSet::new(),
            blocked: 0,
            stack: Vec::new(),
            furthest: Furthest::default(),
        }
    }

    pub fn with_memoization(mut self, memoize: bool) -> Self {
        self.memoize = memoize;
        self
    }

    /// Number of cached rule results from the last match.
    pub fn memoized(&self) -> usize {
        self.memo.len()
    }

    /// Index of the EndOfFile token, or the slice length when there is none.
    pub fn end_of_input(&self) -> usize {
        self.tokens
            .iter()
            .position(|token| token.is(TokenKind::EndOfFile))
            .unwrap_or(self.tokens.len())
    }

    /// Match `rule` starting at token `start`. Trailing tokens are allowed.
    pub fn match_rule(&mut self, rule: &str, start: usize) -> Result<MatchResult, GrammarError> {
        let grammar = self.grammar;
        let name = grammar.get(rule)?.name.as_str();

        self.memo.clear();
        self.active.clear();
        self.blocked = 0;
        self.stack.clear();
        self.furthest = Furthest::default();

        let result = match self.match_named(name, start)? {
            Some(node) => MatchResult::Success(node),
            None => MatchResult::Failure(self.failure(name, start)),
        };

        tracing::trace!(
            rule = name,
            start,
            success = result.is_success(),
            memoized = self.memo.len(),
            "match finished"
        );
        Ok(result)
    }

    /// Match `rule` against the whole input: every token before EndOfFile must be
    /// consumed. A shorter match fails at the first token left over.
    pub fn match_entirely(&mut self, rule: &str) -> Result<MatchResult, GrammarError> {
        let end = self.end_of_input();
        match self.match_rule(rule, 0)? {
            MatchResult::Success(node) if node.end() < end => {
                let position = node.end();
                let mut failure = if self.furthest.recorded && self.furthest.position == position
                {
                    MatchFailure {
                        position,
                        rule: self.furthest.rule.clone(),
                        expected: self.furthest.expected.clone(),
                    }
                } else {
                    MatchFailure {
                        position,
                        rule: rule.to_string(),
                        expected: Vec::new(),
                    }
                };
                let eof = TokenKind::EndOfFile.name().to_string();
                if !failure.expected.contains(&eof) {
                    failure.expected.push(eof);
                }
                Ok(MatchResult::Failure(failure))
            }
            result => Ok(result),
        }
    }

    fn failure(&self, rule: &str, start: usize) -> MatchFailure {
        if self.furthest.recorded {
            MatchFailure {
                position: self.furthest.position,
                rule: self.furthest.rule.clone(),
                expected: self.furthest.expected.clone(),
            }
        } else {
            MatchFailure {
                position: start,
                rule: rule.to_string(),
                expected: Vec::new(),
            }
        }
    }

    fn record_failure(&mut self, position: usize, expected: String) {
        let rule = self.stack.last().copied().unwrap_or_default();
        let furthest = &mut self.furthest;

        if !furthest.recorded || position > furthest.position {
            *furthest = Furthest {
                position,
                rule: rule.to_string(),
                expected: vec![expected],
                recorded: true,
            };
        } else if position == furthest.position && !furthest.expected.contains(&expected) {
            furthest.expected.push(expected);
        }
    }

    fn match_named(
        &mut self,
        name: &'g str,
        position: usize,
    ) -> Result<Option<Arc<MatchNode>>, GrammarError> {
        let grammar = self.grammar;
        let rule = grammar.get(name)?;
        let name = rule.name.as_str();
        let key = (name, position, grammar.generation());

        if self.memoize {
            if let Some(cached) = self.memo.get(&key) {
                tracing::trace!(rule = name, position, "memo hit");
                return Ok(cached.clone());
            }
        }

        if !self.active.insert((name, position)) {
            tracing::trace!(rule = name, position, "left-recursive re-entry");
            self.blocked += 1;
            return Ok(None);
        }

        let blocked = self.blocked;
        tracing::trace!(rule = name, position, "enter rule");
        self.stack.push(name);
        let step = match rule.effective() {
            Expression::Mock => Ok(self.match_mock(name, position)),
            expression => self.match_expression(expression, position),
        };
        self.stack.pop();
        self.active.remove(&(name, position));

        let node = step?.map(|(_, children)| Arc::new(MatchNode::rule(name, position, children)));
        if self.memoize && self.blocked == blocked {
            self.memo.insert(key, node.clone());
        }
        Ok(node)
    }

    /// A mocked rule matches one token spelling the rule's name, in either case.
    fn match_mock(&mut self, name: &str, position: usize) -> Step {
        match self.tokens.get(position) {
            Some(token)
                if !token.kind.is_synthetic()
                    && (token.text == name || token.text == name.to_uppercase()) =>
            {
                Some((position + 1, vec![Arc::new(MatchNode::token(position))]))
            }
            _ => {
                self.record_failure(position, format!("'{name}'"));
                None
            }
        }
    }

    fn match_expression(
        &mut self,
        expression: &'g Expression,
        position: usize,
    ) -> Result<Step, GrammarError> {
        match expression {
            Expression::Literal { kind, text } => {
                let matched = self.tokens.get(position).is_some_and(|token| {
                    token.kind == *kind && text.as_ref().map_or(true, |text| token.text == *text)
                });
                if matched {
                    Ok(Some((position + 1, vec![Arc::new(MatchNode::token(position))])))
                } else {
                    self.record_failure(position, expression.describe());
                    Ok(None)
                }
            }

            Expression::RuleRef(name) => Ok(self
                .match_named(name, position)?
                .map(|node| (node.end(), vec![node]))),

            Expression::Sequence(items) => {
                let mut current = position;
                let mut children = Vec::new();
                for item in items {
                    match self.match_expression(item, current)? {
                        Some((next, nodes)) => {
                            current = next;
                            children.extend(nodes);
                        }
                        None => return Ok(None),
                    }
                }
                Ok(Some((current, children)))
            }

            Expression::Choice(alternatives) => {
                for alternative in alternatives {
                    if let Some(step) = self.match_expression(alternative, position)? {
                        return Ok(Some(step));
                    }
                }
                Ok(None)
            }

            Expression::Optional(inner) => Ok(Some(
                self.match_expression(inner, position)?
                    .unwrap_or((position, Vec::new())),
            )),

            Expression::ZeroOrMore(inner) => self.repeat(inner, position, 0),
            Expression::OneOrMore(inner) => self.repeat(inner, position, 1),

            Expression::Mock => {
                let name = self.stack.last().copied().unwrap_or_default();
                Ok(self.match_mock(name, position))
            }
        }
    }

    /// Repeat until the inner expression fails or stops making progress.
    fn repeat(
        &mut self,
        inner: &'g Expression,
        position: usize,
        minimum: usize,
    ) -> Result<Step, GrammarError> {
        let mut current = position;
        let mut children = Vec::new();
        let mut count = 0;

        while let Some((next, nodes)) = self.match_expression(inner, current)? {
            count += 1;
            if next == current {
                break;
            }
            current = next;
            children.extend(nodes);
        }

        Ok((count >= minimum).then_some((current, children)))
    }
}

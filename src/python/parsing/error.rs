//! Parse errors

use super::result::MatchFailure;
use crate::python::grammar::GrammarError;
use crate::python::lexing::LexError;
use crate::python::token::{Position, Token};
use thiserror::Error;

/// A match failure located in the source, for callers that treat no-match as an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{position}: expected {expected} in rule '{rule}', found {found}")]
pub struct MatchError {
    pub position: Position,
    pub rule: String,
    pub expected: String,
    pub found: String,
}

impl MatchError {
    pub fn new(failure: &MatchFailure, tokens: &[Token]) -> Self {
        let token = tokens.get(failure.position).or_else(|| tokens.last());
        Self {
            position: token.map(|t| t.position).unwrap_or_default(),
            rule: failure.rule.clone(),
            expected: failure.expected_list(),
            found: token
                .map(Token::describe)
                .unwrap_or_else(|| "end of input".to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Grammar(#[from] GrammarError),

    #[error("no match: {0}")]
    NoMatch(#[from] MatchError),
}

//! Parsing
//!
//!     Matching a rule of a [Grammar] against tokens. The [engine] does the work; this
//!     module is the entry point and adds the conveniences most callers want:
//!
//!         - [match_rule] and [match_entirely] work on tokens and return a [MatchResult],
//!           where a failure is an ordinary value.
//!         - [matches_entirely] and [parse] start from source text. [parse] turns a
//!           failure into [ParseError::NoMatch], located at the offending token.
//!
//!     Every entry point validates the grammar from the requested rule first, so a
//!     missing rule is always reported as [GrammarError] and never as a failed match.

pub mod engine;
pub mod error;
pub mod result;

pub use engine::Matcher;
pub use error::{MatchError, ParseError};
pub use result::{MatchFailure, MatchNode, MatchResult, ParseTree};

use crate::python::config::GrammarConfig;
use crate::python::grammar::{Grammar, GrammarError};
use crate::python::lexing;
use crate::python::token::Token;

/// Match `rule` at token index `start`. Tokens after the match are left alone.
pub fn match_rule(
    grammar: &Grammar,
    rule: &str,
    tokens: &[Token],
    start: usize,
) -> Result<MatchResult, GrammarError> {
    grammar.validate(rule)?;
    Matcher::new(grammar, tokens).match_rule(rule, start)
}

/// Match `rule` against all of `tokens` up to EndOfFile.
pub fn match_entirely(
    grammar: &Grammar,
    rule: &str,
    tokens: &[Token],
) -> Result<MatchResult, GrammarError> {
    grammar.validate(rule)?;
    Matcher::new(grammar, tokens).match_entirely(rule)
}

/// Tokenize `source` and report whether `rule` matches all of it.
pub fn matches_entirely(grammar: &Grammar, rule: &str, source: &str) -> Result<bool, ParseError> {
    let tokens = lexing::tokenize(source)?;
    Ok(match_entirely(grammar, rule, &tokens)?.is_success())
}

/// Tokenize `source` and match all of it against `rule`, with default settings.
pub fn parse(grammar: &Grammar, rule: &str, source: &str) -> Result<ParseTree, ParseError> {
    parse_with(grammar, rule, source, &GrammarConfig::default())
}

pub fn parse_with(
    grammar: &Grammar,
    rule: &str,
    source: &str,
    config: &GrammarConfig,
) -> Result<ParseTree, ParseError> {
    let tokens = lexing::lex(source, &config.lexer)?;
    grammar.validate(rule)?;

    let result = Matcher::new(grammar, &tokens)
        .with_memoization(config.engine.memoize)
        .match_entirely(rule)?;

    match result {
        MatchResult::Success(root) => Ok(ParseTree { tokens, root }),
        MatchResult::Failure(failure) => Err(MatchError::new(&failure, &tokens).into()),
    }
}

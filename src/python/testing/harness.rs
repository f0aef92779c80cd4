//! Rule assertions with scoped mocks.

use crate::python::grammar::{python_grammar, Grammar, GrammarError};
use crate::python::lexing;
use crate::python::parsing::{self, MatchError, MatchResult};

/// Assertions available on anything that knows a grammar and a root rule.
pub trait MatchAssertions {
    fn grammar(&self) -> &Grammar;
    fn root(&self) -> &str;

    /// The root rule must match all of `input`.
    #[track_caller]
    fn assert_matches(&self, input: &str) -> &Self
    where
        Self: Sized,
    {
        check_matches(self.grammar(), self.root(), input);
        self
    }

    /// The root rule must not match all of `input`. Input that does not even tokenize
    /// counts as not matching.
    #[track_caller]
    fn assert_not_matches(&self, input: &str) -> &Self
    where
        Self: Sized,
    {
        check_not_matches(self.grammar(), self.root(), input);
        self
    }

    /// The root rule must match a prefix of `input` exactly `count` tokens long.
    #[track_caller]
    fn assert_consumes(&self, input: &str, count: usize) -> &Self
    where
        Self: Sized,
    {
        check_consumes(self.grammar(), self.root(), input, count);
        self
    }
}

/// Owns a grammar and tests one root rule of it.
pub struct RuleTester {
    grammar: Grammar,
    root: String,
}

impl RuleTester {
    /// Fails if `root`, or anything it reaches, is undefined.
    pub fn new(grammar: Grammar, root: &str) -> Result<Self, GrammarError> {
        grammar.validate(root)?;
        Ok(Self {
            grammar,
            root: root.to_string(),
        })
    }

    /// A tester over a fresh copy of the built-in Python grammar.
    pub fn python(root: &str) -> Result<Self, GrammarError> {
        Self::new(python_grammar(), root)
    }

    /// Mock `names` until the returned scope is dropped. Rules that were already mocked
    /// stay mocked afterwards.
    pub fn mock(&mut self, names: &[&str]) -> Result<MockScope<'_>, GrammarError> {
        let mut scope = MockScope {
            grammar: &mut self.grammar,
            root: &self.root,
            mocked: Vec::new(),
        };
        for &name in names {
            if scope.grammar.is_mocked(name) {
                continue;
            }
            // On error the partially built scope drops and undoes what it did
            scope.grammar.mock(name)?;
            scope.mocked.push(name.to_string());
        }
        Ok(scope)
    }
}

impl MatchAssertions for RuleTester {
    fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    fn root(&self) -> &str {
        &self.root
    }
}

/// Mocks held for the lifetime of the scope, released on drop, including during a
/// panic unwind out of a failed assertion.
pub struct MockScope<'a> {
    grammar: &'a mut Grammar,
    root: &'a str,
    mocked: Vec<String>,
}

impl MockScope<'_> {
    pub fn mocked(&self) -> &[String] {
        &self.mocked
    }
}

impl MatchAssertions for MockScope<'_> {
    fn grammar(&self) -> &Grammar {
        self.grammar
    }

    fn root(&self) -> &str {
        self.root
    }
}

impl Drop for MockScope<'_> {
    fn drop(&mut self) {
        for name in self.mocked.drain(..) {
            if let Err(err) = self.grammar.unmock(&name) {
                tracing::warn!(rule = %name, %err, "failed to release mock");
            }
        }
    }
}

/// `root` of `grammar` must match all of `input`.
#[track_caller]
pub fn assert_matches(grammar: &Grammar, root: &str, input: &str) {
    check_matches(grammar, root, input);
}

/// `root` of `grammar` must not match all of `input`.
#[track_caller]
pub fn assert_not_matches(grammar: &Grammar, root: &str, input: &str) {
    check_not_matches(grammar, root, input);
}

/// Python's `suite` needs its closing NEWLINE, which the tokenizer only emits for a
/// line terminator that is actually there.
pub fn append_newline(input: &str) -> String {
    format!("{input}\n")
}

#[track_caller]
fn check_matches(grammar: &Grammar, root: &str, input: &str) {
    let tokens = match lexing::tokenize(input) {
        Ok(tokens) => tokens,
        Err(err) => panic!("rule '{root}' could not match {input:?}: {err}"),
    };
    match parsing::match_entirely(grammar, root, &tokens) {
        Ok(MatchResult::Success(_)) => {}
        Ok(MatchResult::Failure(failure)) => panic!(
            "rule '{root}' did not match {input:?}: {}",
            MatchError::new(&failure, &tokens)
        ),
        Err(err) => panic!("rule '{root}' could not match {input:?}: {err}"),
    }
}

#[track_caller]
fn check_not_matches(grammar: &Grammar, root: &str, input: &str) {
    let Ok(tokens) = lexing::tokenize(input) else {
        return;
    };
    match parsing::match_entirely(grammar, root, &tokens) {
        Ok(MatchResult::Success(node)) => panic!(
            "rule '{root}' unexpectedly matched {input:?} ({} tokens)",
            node.consumed()
        ),
        Ok(MatchResult::Failure(_)) => {}
        Err(err) => panic!("rule '{root}' could not match {input:?}: {err}"),
    }
}

#[track_caller]
fn check_consumes(grammar: &Grammar, root: &str, input: &str, count: usize) {
    let tokens = match lexing::tokenize(input) {
        Ok(tokens) => tokens,
        Err(err) => panic!("rule '{root}' could not match {input:?}: {err}"),
    };
    match parsing::match_rule(grammar, root, &tokens, 0) {
        Ok(MatchResult::Success(node)) => assert_eq!(
            node.consumed(),
            count,
            "rule '{root}' consumed {} tokens of {input:?}, expected {count}",
            node.consumed()
        ),
        Ok(MatchResult::Failure(failure)) => panic!(
            "rule '{root}' did not match {input:?}: {}",
            MatchError::new(&failure, &tokens)
        ),
        Err(err) => panic!("rule '{root}' could not match {input:?}: {err}"),
    }
}

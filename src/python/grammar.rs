//! Grammar
//!
//!     A grammar is a registry of named rules. Each rule body is an [Expression] built
//!     from a handful of combinators: token literals, references to other rules by name,
//!     sequences, ordered choices, optionals and repetitions. Rules only ever refer to
//!     each other by name, so recursive and mutually recursive grammars need no special
//!     handling at construction time.
//!
//!     Reference resolution is eager: [Grammar::validate] walks everything reachable from
//!     a root rule before any matching starts, so an undefined rule is reported as a
//!     grammar error rather than as a failure deep inside a match.
//!
//!     Any rule can be temporarily replaced by a mock (see [Grammar::mock]), which matches
//!     the single token spelling the rule's name. This lets a production be tested in
//!     isolation from the rules it depends on.
//!
//!     The built-in Python grammar lives in [python].

pub mod analysis;
pub mod expr;
pub mod python;
pub mod registry;

pub use expr::{
    choice, comma_list, keyword, one_or_more, op, opt, rule, seq, token, zero_or_more, Expression,
};
pub use python::{python_grammar, PYTHON_GRAMMAR};
pub use registry::{Grammar, Rule};

use thiserror::Error;

/// Problems with the grammar itself, independent of any input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("undefined rule '{name}'{}", referenced_from(.referenced_by))]
    UndefinedRule {
        name: String,
        referenced_by: Option<String>,
    },

    #[error("left recursion: {}", .0.join(" -> "))]
    LeftRecursion(Vec<String>),
}

fn referenced_from(referenced_by: &Option<String>) -> String {
    referenced_by
        .as_ref()
        .map(|rule| format!(" referenced by '{rule}'"))
        .unwrap_or_default()
}

impl GrammarError {
    pub fn undefined(name: impl Into<String>) -> Self {
        GrammarError::UndefinedRule {
            name: name.into(),
            referenced_by: None,
        }
    }
}

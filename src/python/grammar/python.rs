//! The Python grammar
//!
//!     Rules are split the way the language reference splits them:
//!
//!         - [compound_statements]: `suite`, `except_clause` and the block statements
//!           that own suites (`if`, `while`, `for`, `try`, `with`, `def`, `class`).
//!         - [simple_statements]: `stmt_list` and everything that fits on one logical
//!           line.
//!         - [expressions]: `test` down to `atom`.
//!
//!     The grammar is built once and cloned by callers that need to mock rules; the
//!     shared instance is never mutated.

pub mod compound_statements;
pub mod expressions;
pub mod simple_statements;

use super::registry::Grammar;
use once_cell::sync::Lazy;

/// The built-in grammar, without any mocks.
pub static PYTHON_GRAMMAR: Lazy<Grammar> = Lazy::new(|| {
    let mut grammar = Grammar::new();
    compound_statements::define(&mut grammar);
    simple_statements::define(&mut grammar);
    expressions::define(&mut grammar);
    tracing::debug!(rules = grammar.len(), "python grammar built");
    grammar
});

/// A private copy of the built-in grammar, free to be mocked.
pub fn python_grammar() -> Grammar {
    PYTHON_GRAMMAR.clone()
}

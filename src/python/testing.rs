//! Testing utilities for grammar rules
//!
//!     Grammar rules are tested by matching them against small inputs, and the point of
//!     such a test is usually one production. A test for `suite` should fail because
//!     `suite` is wrong, not because something deep in the expression grammar is.
//!
//! Mocking
//!
//!     Any rule can be mocked for the duration of a scope. A mocked rule matches exactly
//!     one token spelling its own name, so with `stmt_list` mocked, `suite` is tested
//!     against the literal input `stmt_list\n`:
//!
//!     ```rust,ignore
//!     use crate::python::testing::{MatchAssertions, RuleTester};
//!
//!     let mut tester = RuleTester::python("suite").unwrap();
//!     tester
//!         .mock(&["stmt_list"])
//!         .unwrap()
//!         .assert_matches("stmt_list\n")
//!         .assert_not_matches("stmt_list");
//!
//!     // The scope is gone; stmt_list is real again
//!     tester.assert_matches("pass\n");
//!     ```
//!
//!     The scope releases its mocks when it is dropped, and dropping also happens while
//!     a failed assertion unwinds. Tests never leak mocks into each other.
//!
//! Whole-Input Matching
//!
//!     [assert_matches](MatchAssertions::assert_matches) requires the rule to consume
//!     every token up to EOF. Use [assert_consumes](MatchAssertions::assert_consumes) to
//!     check a prefix match and its exact length.
//!
//!     The tokenizer never invents a final NEWLINE. Inputs for rules that end in one must
//!     carry it; [append_newline] exists for tables of one-line statements.
//!
//! Sample Files
//!
//!     Tests over whole programs read curated files through [Samples], never inline
//!     strings.

mod harness;
pub mod samples;

pub use harness::{
    append_newline, assert_matches, assert_not_matches, MatchAssertions, MockScope, RuleTester,
};
pub use samples::{SampleError, Samples};

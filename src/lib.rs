//! # pygrammar
//!
//! A grammar-rule engine for the structure of Python compound statements.
//!
//! File Layout
//!
//!     The crate follows the pipeline the source text goes through:
//!
//!     src/python
//!       ├── token        Token types, keyword set and source locations
//!       ├── lexing       Base tokenization plus logical-line and indentation transformations
//!       ├── grammar      Expressions, the rule registry, grammar analysis and the Python rules
//!       ├── parsing      The matching engine and its results
//!       ├── formats      Renderings of match trees
//!       ├── config       Layered configuration
//!       └── testing      The conformance harness used by rule tests
//!
//! For the testing conventions, see the [testing module](python::testing).

pub mod python;

//! Token stream transformations
//!
//!     Each transformation takes the output of the previous stage and returns a new
//!     stream. They run in a fixed order:
//!
//!         1. [logical_lines]: raw logos tokens to logical lines (trivia dropped,
//!            continuations joined, blank lines removed, names classified).
//!         2. [semantic_indentation]: logical lines to the flat grammar token stream with
//!            INDENT/DEDENT and a final EOF.

pub mod logical_lines;
pub mod semantic_indentation;

pub use logical_lines::{LogicalLine, LogicalLineMapper};
pub use semantic_indentation::SemanticIndentationMapper;

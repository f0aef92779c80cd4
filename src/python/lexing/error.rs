//! Errors that can occur during lexing

use crate::python::token::Position;
use thiserror::Error;

/// A lexing failure. Fatal to the tokenization pass that raised it; no recovery is
/// attempted, the caller decides whether to abort or resynchronize.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unexpected character {character:?} at {position}")]
    UnexpectedCharacter { character: char, position: Position },

    #[error("unterminated string literal starting at {position}")]
    UnterminatedString { position: Position },

    #[error("unindent to width {width} does not match any outer indentation level at {position}")]
    InconsistentDedent { width: usize, position: Position },
}

impl LexError {
    pub fn position(&self) -> Position {
        match self {
            LexError::UnexpectedCharacter { position, .. }
            | LexError::UnterminatedString { position }
            | LexError::InconsistentDedent { position, .. } => *position,
        }
    }
}

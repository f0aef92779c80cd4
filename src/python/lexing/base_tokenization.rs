//! Base tokenization implementation
//!
//! This module provides the raw tokenization using the logos lexer library.
//! This is the entry point where source strings become token streams.
//!
//! This is NOT a transformation - transformations operate on token streams.
//! Unlike a permissive document lexer, anything logos cannot match is an error here:
//! Python source with a stray character is not valid input.

use crate::python::lexing::LexError;
use crate::python::token::{RawToken, SourceLocation};
use logos::Logos;
use std::ops::Range;

/// Tokenize source code with byte ranges.
pub fn tokenize(source: &str) -> Result<Vec<(RawToken, Range<usize>)>, LexError> {
    let mut lexer = RawToken::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        match result {
            Ok(token) => tokens.push((token, lexer.span())),
            Err(()) => return Err(unmatched(source, lexer.span())),
        }
    }

    Ok(tokens)
}

fn unmatched(source: &str, span: Range<usize>) -> LexError {
    let position = SourceLocation::new(source).position(span.start);
    let slice = &source[span.clone()];

    if RawToken::starts_string(slice) {
        return LexError::UnterminatedString { position };
    }

    let character = source[span.start..].chars().next().unwrap_or('\0');
    LexError::UnexpectedCharacter {
        character,
        position,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::python::token::Position;

    #[test]
    fn test_tokenizes() {
        let tokens = tokenize("except test").unwrap();
        assert_eq!(
            tokens,
            vec![
                (RawToken::Name, 0..6),
                (RawToken::Whitespace, 6..7),
                (RawToken::Name, 7..11),
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(tokenize("").unwrap(), vec![]);
    }

    #[test]
    fn test_unexpected_character() {
        let err = tokenize("x = 1\ny = $").unwrap_err();
        assert_eq!(
            err,
            LexError::UnexpectedCharacter {
                character: '$',
                position: Position::new(10, 1, 4),
            }
        );
    }

    #[test]
    fn test_unterminated_string() {
        let err = tokenize("s = '''open").unwrap_err();
        assert!(matches!(err, LexError::UnterminatedString { .. }), "{err:?}");
        assert_eq!(err.position().offset, 4);
    }
}

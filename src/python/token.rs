//! Core token types shared across the lexer, the matching engine, and tooling.
//!
//! Token Layers
//!
//!     Raw Tokens:
//!         Character/word level tokens produced by the logos lexer. They still carry
//!         whitespace, comments, physical newlines and line continuations. See [core].
//!
//!     Grammar Tokens:
//!         The [Token] values the grammar matches against. Trivia is gone, newlines only
//!         end logical lines, and indentation has become INDENT/DEDENT pairs. Every stream
//!         ends with exactly one EndOfFile token.
//!
//!     Indent, Dedent and EndOfFile are synthetic: they have no source text and their
//!     span is empty, positioned where the structural change is observed.

pub mod core;
pub mod location;

pub use self::core::RawToken;
pub use location::{Position, SourceLocation};

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::ops::Range;

/// Reserved words. A name in this set is classified as a keyword, never an identifier.
pub static KEYWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
        "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
        "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise",
        "return", "try", "while", "with", "yield",
    ]
    .into_iter()
    .collect()
});

pub fn is_keyword(name: &str) -> bool {
    KEYWORDS.contains(name)
}

/// Token categories the grammar can match on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    Identifier,
    Keyword,
    Operator,
    Literal,
    Newline,
    Indent,
    Dedent,
    EndOfFile,
}

impl TokenKind {
    /// Grammar notation for the kind, as used in rule listings and diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Identifier => "NAME",
            TokenKind::Keyword => "KEYWORD",
            TokenKind::Operator => "OPERATOR",
            TokenKind::Literal => "LITERAL",
            TokenKind::Newline => "NEWLINE",
            TokenKind::Indent => "INDENT",
            TokenKind::Dedent => "DEDENT",
            TokenKind::EndOfFile => "EOF",
        }
    }

    /// Synthetic kinds never have source text.
    pub fn is_synthetic(self) -> bool {
        matches!(
            self,
            TokenKind::Indent | TokenKind::Dedent | TokenKind::EndOfFile
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A lexical token as seen by the grammar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Range<usize>,
    pub position: Position,
}

impl Token {
    pub fn new(
        kind: TokenKind,
        text: impl Into<String>,
        span: Range<usize>,
        position: Position,
    ) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
            position,
        }
    }

    /// Create a synthetic (textless) token at a byte offset.
    pub fn synthetic(kind: TokenKind, offset: usize, position: Position) -> Self {
        Self::new(kind, "", offset..offset, position)
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// Human-readable description used in diagnostics: the text for real tokens,
    /// the kind name for synthetic ones and newlines.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Newline | TokenKind::Indent | TokenKind::Dedent | TokenKind::EndOfFile => {
                self.kind.name().to_string()
            }
            _ => format!("'{}'", self.text),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind.is_synthetic() || self.kind == TokenKind::Newline {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{} {:?}", self.kind, self.text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_classification() {
        assert!(is_keyword("except"));
        assert!(is_keyword("None"));
        assert!(!is_keyword("print"));
        assert!(!is_keyword("exec"));
        assert!(!is_keyword("Except"));
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(TokenKind::Identifier.name(), "NAME");
        assert_eq!(TokenKind::EndOfFile.to_string(), "EOF");
        assert!(TokenKind::Dedent.is_synthetic());
        assert!(!TokenKind::Newline.is_synthetic());
    }

    #[test]
    fn test_token_display() {
        let pos = Position::new(0, 0, 0);
        let name = Token::new(TokenKind::Identifier, "x", 0..1, pos);
        assert_eq!(name.to_string(), "NAME \"x\"");
        assert_eq!(name.describe(), "'x'");

        let newline = Token::new(TokenKind::Newline, "\n", 1..2, pos);
        assert_eq!(newline.to_string(), "NEWLINE");
        assert_eq!(newline.describe(), "NEWLINE");

        let eof = Token::synthetic(TokenKind::EndOfFile, 2, pos);
        assert_eq!(eof.span, 2..2);
        assert_eq!(eof.text, "");
    }
}

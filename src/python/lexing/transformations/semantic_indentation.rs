//! Semantic indentation mapper
//!
//!     This mapper turns the indentation width of each logical line into semantic Indent
//!     and Dedent tokens, and flattens the lines into the final grammar token stream.
//!
//!     We don't want to know how many columns a line is indented, we want to know about
//!     indentation levels and what's inside each one. Indent/Dedent play the role that
//!     braces play in c-style syntaxes, which is what lets the grammar describe a block as
//!     `NEWLINE INDENT statement+ DEDENT`.
//!
//!     Indent and Dedent are synthetic: empty span, positioned at the first token of the
//!     line whose indentation triggered them. The closing Dedents and the EndOfFile token
//!     sit at the end of the source.
//!
//! Algorithm
//!
//!     1. Keep a stack of open indentation widths, starting with [0]
//!     2. For each logical line, compare its width with the top of the stack:
//!        - If greater: push it and emit one Indent
//!        - If less: pop and emit one Dedent per level until the top equals the width;
//!          a width that lands between two levels is an inconsistent dedent
//!        - If equal: nothing
//!     3. Emit the line's tokens followed by its Newline, if it has one
//!     4. At the end, emit a Dedent for every level still open, then EndOfFile

use super::logical_lines::LogicalLine;
use crate::python::lexing::LexError;
use crate::python::token::{SourceLocation, Token, TokenKind};

/// Converts logical lines to a flat token stream with Indent/Dedent tokens.
pub struct SemanticIndentationMapper {
    levels: Vec<usize>,
}

impl SemanticIndentationMapper {
    pub fn new() -> Self {
        Self { levels: vec![0] }
    }

    /// Number of indentation levels currently open, the outermost level excluded.
    pub fn depth(&self) -> usize {
        self.levels.len() - 1
    }

    pub fn map(
        &mut self,
        lines: Vec<LogicalLine>,
        source_len: usize,
        location: &SourceLocation<'_>,
    ) -> Result<Vec<Token>, LexError> {
        let mut result = Vec::new();

        for line in lines {
            let position = location.position(line.start);
            let current = self.levels.last().copied().unwrap_or(0);

            if line.indent > current {
                self.levels.push(line.indent);
                result.push(Token::synthetic(TokenKind::Indent, line.start, position));
            } else {
                while self.levels.last().is_some_and(|&top| top > line.indent) {
                    self.levels.pop();
                    result.push(Token::synthetic(TokenKind::Dedent, line.start, position));
                }
                if self.levels.last() != Some(&line.indent) {
                    return Err(LexError::InconsistentDedent {
                        width: line.indent,
                        position,
                    });
                }
            }

            result.extend(line.tokens);
            result.extend(line.newline);
        }

        let end = location.position(source_len);
        for _ in 0..self.depth() {
            result.push(Token::synthetic(TokenKind::Dedent, source_len, end));
        }
        self.levels.truncate(1);
        result.push(Token::synthetic(TokenKind::EndOfFile, source_len, end));

        Ok(result)
    }
}

impl Default for SemanticIndentationMapper {
    fn default() -> Self {
        Self::new()
    }
}

//! Source location utilities for converting byte offsets to line/column positions
//!
//! Tokens keep their byte span; the line/column position is computed once when the
//! token is produced so diagnostics never have to go back to the source text. Columns
//! count characters, not bytes.

use serde::Serialize;
use std::fmt;

/// A point in the source. All fields are 0-based; `Display` prints 1-based line:column.
/// `offset` is in bytes, `column` in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

/// Provides fast conversion from byte offsets to line/column positions
pub struct SourceLocation<'a> {
    source: &'a str,
    /// Byte offsets where each line starts
    line_starts: Vec<usize>,
}

impl<'a> SourceLocation<'a> {
    /// Create a new SourceLocation from source code. `\n`, `\r\n` and lone `\r` all
    /// terminate a line, matching what the tokenizer accepts as a newline.
    pub fn new(source: &'a str) -> Self {
        let mut line_starts = vec![0];
        let bytes = source.as_bytes();

        for (byte_pos, &b) in bytes.iter().enumerate() {
            match b {
                b'\n' => line_starts.push(byte_pos + 1),
                b'\r' if bytes.get(byte_pos + 1) != Some(&b'\n') => {
                    line_starts.push(byte_pos + 1)
                }
                _ => {}
            }
        }

        Self {
            source,
            line_starts,
        }
    }

    /// Convert a byte offset to a position
    pub fn position(&self, byte_offset: usize) -> Position {
        let line = self
            .line_starts
            .binary_search(&byte_offset)
            .unwrap_or_else(|i| i - 1);

        let start = self.line_starts[line];
        let column = self
            .source
            .get(start..byte_offset)
            .map_or(byte_offset - start, |prefix| prefix.chars().count());

        Position::new(byte_offset, line, column)
    }

    /// Get the total number of lines in the source
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Get the byte offset for the start of a line
    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.line_starts.get(line).copied()
    }
}

//! Logical line mapper
//!
//!     Python's grammar is defined over logical lines, not physical ones. This mapper
//!     walks the raw token stream and groups grammar tokens into logical lines:
//!
//!         - Whitespace and comments are dropped.
//!         - A backslash continuation joins the next physical line to the current one.
//!         - Newlines inside `()`, `[]` or `{}` are ignored (implicit line joining).
//!         - A line with only whitespace and/or a comment produces nothing at all.
//!         - The leading whitespace of a logical line is measured as an indentation width,
//!           which the semantic indentation mapper turns into INDENT/DEDENT tokens.
//!
//!     Names are classified here: anything in the keyword set becomes a Keyword token,
//!     everything else an Identifier.

use crate::python::token::{is_keyword, RawToken, SourceLocation, Token, TokenKind};
use std::ops::Range as ByteRange;

/// One logical line of grammar tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine {
    /// Indentation width in columns, with tabs expanded.
    pub indent: usize,
    /// Byte offset of the first token of the line.
    pub start: usize,
    pub tokens: Vec<Token>,
    /// The NEWLINE ending the line; absent when the source ends without a terminator.
    pub newline: Option<Token>,
}

/// Groups raw tokens into logical lines.
pub struct LogicalLineMapper {
    tab_size: usize,
}

impl LogicalLineMapper {
    pub fn new(tab_size: usize) -> Self {
        Self {
            tab_size: tab_size.max(1),
        }
    }

    /// Width of a leading whitespace run. Tabs advance to the next multiple of the tab
    /// size; a form feed resets the count.
    pub fn indentation_width(&self, whitespace: &str, start: usize) -> usize {
        whitespace.chars().fold(start, |width, c| match c {
            '\t' => (width / self.tab_size + 1) * self.tab_size,
            '\x0C' => 0,
            _ => width + 1,
        })
    }

    pub fn map(
        &self,
        tokens: &[(RawToken, ByteRange<usize>)],
        source: &str,
        location: &SourceLocation<'_>,
    ) -> Vec<LogicalLine> {
        let mut lines = Vec::new();
        let mut current: Option<LogicalLine> = None;
        let mut pending_indent = 0;
        let mut depth: usize = 0;

        for (raw, span) in tokens {
            let text = &source[span.clone()];

            let Some(line) = current.as_mut() else {
                // Still at the beginning of a logical line
                match raw {
                    RawToken::Whitespace => {
                        pending_indent = self.indentation_width(text, pending_indent)
                    }
                    RawToken::Newline => pending_indent = 0,
                    RawToken::Comment | RawToken::LineContinuation => {}
                    _ => {
                        let mut line = LogicalLine {
                            indent: pending_indent,
                            start: span.start,
                            tokens: Vec::new(),
                            newline: None,
                        };
                        push_token(&mut line, *raw, text, span, location, &mut depth);
                        current = Some(line);
                    }
                }
                continue;
            };

            match raw {
                RawToken::Whitespace | RawToken::Comment | RawToken::LineContinuation => {}
                RawToken::Newline if depth > 0 => {}
                RawToken::Newline => {
                    line.newline = Some(Token::new(
                        TokenKind::Newline,
                        text,
                        span.clone(),
                        location.position(span.start),
                    ));
                    lines.extend(current.take());
                    pending_indent = 0;
                }
                _ => push_token(line, *raw, text, span, location, &mut depth),
            }
        }

        lines.extend(current);
        lines
    }
}

fn push_token(
    line: &mut LogicalLine,
    raw: RawToken,
    text: &str,
    span: &ByteRange<usize>,
    location: &SourceLocation<'_>,
    depth: &mut usize,
) {
    let kind = match raw {
        RawToken::Name if is_keyword(text) => TokenKind::Keyword,
        RawToken::Name => TokenKind::Identifier,
        RawToken::Number | RawToken::String => TokenKind::Literal,
        RawToken::OpenBracket => {
            *depth += 1;
            TokenKind::Operator
        }
        RawToken::CloseBracket => {
            *depth = depth.saturating_sub(1);
            TokenKind::Operator
        }
        RawToken::Operator => TokenKind::Operator,
        // Trivia and newlines are handled by the caller
        RawToken::Whitespace
        | RawToken::Newline
        | RawToken::LineContinuation
        | RawToken::Comment => return,
    };

    line.tokens.push(Token::new(
        kind,
        text,
        span.clone(),
        location.position(span.start),
    ));
}

//! Raw token definitions
//!
//! This module defines all the tokens that can be produced by the logos lexer. They are
//! still "physical": whitespace, comments, newlines and backslash continuations are all
//! tokens here, and the lexing transformations decide what survives.
//!
//! Operators are listed longest-first only for readability; logos always prefers the
//! longest match, so `**=` wins over `**`, which wins over `*`.

use logos::Logos;

/// All possible raw tokens in Python source
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
pub enum RawToken {
    // Spaces, tabs and form feeds
    #[regex(r"[ \t\x0C]+")]
    Whitespace,

    #[regex(r"\r\n|\n|\r")]
    Newline,

    // Backslash immediately followed by a line terminator
    #[regex(r"\\(\r\n|\n|\r)")]
    LineContinuation,

    #[regex(r"#[^\r\n]*")]
    Comment,

    #[regex(r"[\p{L}_][\p{L}\p{N}_]*")]
    Name,

    #[regex(r"0[xX][0-9a-fA-F_]+[lL]?")]
    #[regex(r"0[oO][0-7_]+[lL]?")]
    #[regex(r"0[bB][01_]+[lL]?")]
    #[regex(r"[0-9][0-9_]*[lL]?")]
    #[regex(r"[0-9][0-9_]*[jJ]")]
    #[regex(r"[0-9][0-9_]*\.[0-9_]*([eE][+-]?[0-9_]+)?[jJ]?")]
    #[regex(r"[0-9][0-9_]*[eE][+-]?[0-9_]+[jJ]?")]
    #[regex(r"\.[0-9][0-9_]*([eE][+-]?[0-9_]+)?[jJ]?")]
    Number,

    #[regex(r#"([rRbBuUfF]|[rR][bBfF]|[bBfF][rR])?'([^'\\\r\n]|\\(\r\n|[^\r]|\r))*'"#)]
    #[regex(r#"([rRbBuUfF]|[rR][bBfF]|[bBfF][rR])?"([^"\\\r\n]|\\(\r\n|[^\r]|\r))*""#)]
    #[regex(r#"([rRbBuUfF]|[rR][bBfF]|[bBfF][rR])?'''"#, triple_quoted)]
    #[regex(r#"([rRbBuUfF]|[rR][bBfF]|[bBfF][rR])?""""#, triple_quoted)]
    String,

    #[token("**=")]
    #[token("//=")]
    #[token(">>=")]
    #[token("<<=")]
    #[token("...")]
    #[token("**")]
    #[token("//")]
    #[token("<<")]
    #[token(">>")]
    #[token("<=")]
    #[token(">=")]
    #[token("==")]
    #[token("!=")]
    #[token("<>")]
    #[token("->")]
    #[token(":=")]
    #[token("+=")]
    #[token("-=")]
    #[token("*=")]
    #[token("/=")]
    #[token("%=")]
    #[token("&=")]
    #[token("|=")]
    #[token("^=")]
    #[token("@=")]
    #[token("+")]
    #[token("-")]
    #[token("*")]
    #[token("/")]
    #[token("%")]
    #[token("@")]
    #[token("&")]
    #[token("|")]
    #[token("^")]
    #[token("~")]
    #[token("<")]
    #[token(">")]
    #[token("=")]
    #[token(".")]
    #[token(",")]
    #[token(":")]
    #[token(";")]
    #[token("`")]
    Operator,

    #[token("(")]
    #[token("[")]
    #[token("{")]
    OpenBracket,

    #[token(")")]
    #[token("]")]
    #[token("}")]
    CloseBracket,
}

/// Consume the body of a triple-quoted string up to and including the closing
/// delimiter. The opening delimiter is the last three characters of the current slice.
/// Returns false (a lexing error) when the string is never closed.
fn triple_quoted(lex: &mut logos::Lexer<RawToken>) -> bool {
    let slice = lex.slice();
    let delimiter = &slice[slice.len() - 3..];
    let remainder = lex.remainder();

    let mut offset = 0;
    while offset < remainder.len() {
        let rest = &remainder[offset..];
        if rest.starts_with(delimiter) {
            lex.bump(offset + delimiter.len());
            return true;
        }
        let mut chars = rest.chars();
        match chars.next() {
            Some('\\') => {
                offset += 1;
                if let Some(escaped) = chars.next() {
                    offset += escaped.len_utf8();
                }
            }
            Some(c) => offset += c.len_utf8(),
            None => break,
        }
    }

    false
}

impl RawToken {
    /// Tokens that never reach the grammar on their own.
    pub fn is_trivia(&self) -> bool {
        matches!(
            self,
            RawToken::Whitespace | RawToken::Comment | RawToken::LineContinuation
        )
    }

    pub fn is_bracket(&self) -> bool {
        matches!(self, RawToken::OpenBracket | RawToken::CloseBracket)
    }

    /// Whether an unmatched slice opens a string literal, used to tell an unterminated
    /// string apart from a stray character when logos reports an error.
    pub fn starts_string(slice: &str) -> bool {
        let body = slice.trim_start_matches(|c: char| "rRbBuUfF".contains(c));
        slice.len() - body.len() <= 2 && (body.starts_with('\'') || body.starts_with('"'))
    }
}

//! Lexer
//!
//!     This module orchestrates the complete tokenization pipeline for Python source.
//!     Lexing runs transformations over tokens: first the core logos tokens, then each
//!     transformation in turn, each receiving the previous stage's output.
//!
//! The Lexing Pipeline
//!
//!     The pipeline consists of:
//!         1. Core tokenization using logos. See [base_tokenization].
//!            Anything logos cannot match is a [LexError]; there is no recovery.
//!
//!         2. Logical line grouping. See
//!            [logical_lines](transformations::logical_lines).
//!            Whitespace and comments go away, backslash continuations and bracketed
//!            newlines are joined, blank lines vanish, and each surviving line records its
//!            indentation width.
//!
//!         3. Semantic Indentation transformation. See
//!            [semantic_indentation](transformations::semantic_indentation).
//!            Indentation widths become INDENT/DEDENT events, and the stream is closed
//!            with the remaining DEDENTs and EOF.
//!
//!     At this point, lexing is complete. The result is what the grammar matches against.
//!
//! End of Input
//!
//!     A final line without a line terminator gets no NEWLINE. Rules that need one, like
//!     `suite`, must be given input that ends in a newline; the test harness has
//!     [append_newline](crate::python::testing::append_newline) for that.

pub mod base_tokenization;
pub mod error;
pub mod transformations;

pub use error::LexError;

use crate::python::config::LexerConfig;
use crate::python::token::{SourceLocation, Token};
use transformations::{LogicalLineMapper, SemanticIndentationMapper};

/// Run the full pipeline with the given lexer settings.
pub fn lex(source: &str, config: &LexerConfig) -> Result<Vec<Token>, LexError> {
    let location = SourceLocation::new(source);
    let raw = base_tokenization::tokenize(source)?;
    let lines = LogicalLineMapper::new(config.tab_size).map(&raw, source, &location);
    let line_count = lines.len();
    let tokens = SemanticIndentationMapper::new().map(lines, source.len(), &location)?;

    tracing::debug!(
        raw = raw.len(),
        logical_lines = line_count,
        tokens = tokens.len(),
        "lexed source"
    );

    Ok(tokens)
}

/// Tokenize with the default settings. The last token is always EndOfFile.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    lex(source, &LexerConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::python::token::TokenKind;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).unwrap().iter().map(|t| t.kind).collect()
    }

    fn texts(source: &str) -> Vec<String> {
        tokenize(source)
            .unwrap()
            .iter()
            .map(|t| t.to_string())
            .collect()
    }

    #[test]
    fn test_mock_placeholder_line() {
        use TokenKind::*;
        assert_eq!(kinds("stmt_list\n"), vec![Identifier, Newline, EndOfFile]);
    }

    #[test]
    fn test_no_newline_synthesized_at_end() {
        use TokenKind::*;
        assert_eq!(kinds("except"), vec![Keyword, EndOfFile]);
        assert_eq!(kinds(""), vec![EndOfFile]);
    }

    #[test]
    fn test_indented_block() {
        assert_eq!(
            texts("if x:\n    pass\n"),
            vec![
                "KEYWORD \"if\"",
                "NAME \"x\"",
                "OPERATOR \":\"",
                "NEWLINE",
                "INDENT",
                "KEYWORD \"pass\"",
                "NEWLINE",
                "DEDENT",
                "EOF",
            ]
        );
    }

    #[test]
    fn test_dedent_back_to_outer_level() {
        use TokenKind::*;
        assert_eq!(
            kinds("if a:\n  if b:\n    c\nd\n"),
            vec![
                Keyword, Identifier, Operator, Newline, Indent, Keyword, Identifier, Operator,
                Newline, Indent, Identifier, Newline, Dedent, Dedent, Identifier, Newline,
                EndOfFile
            ]
        );
    }

    #[test]
    fn test_blank_and_comment_lines_do_not_affect_indentation() {
        use TokenKind::*;
        assert_eq!(
            kinds("if x:\n\n  # note\n    y\n"),
            vec![
                Keyword, Identifier, Operator, Newline, Indent, Identifier, Newline, Dedent,
                EndOfFile
            ]
        );
    }

    #[test]
    fn test_continuation_and_brackets() {
        use TokenKind::*;
        assert_eq!(
            kinds("x = (1,\n     2)\ny = 3 + \\\n  4\n"),
            vec![
                Identifier, Operator, Operator, Literal, Operator, Literal, Operator, Newline,
                Identifier, Operator, Literal, Operator, Literal, Newline, EndOfFile
            ]
        );
    }

    #[test]
    fn test_escaped_newline_inside_string() {
        use TokenKind::*;
        let tokens = tokenize("s = 'a\\\nb'\nt = 1\n").unwrap();
        assert_eq!(
            tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
            vec![
                Identifier, Operator, Literal, Newline, Identifier, Operator, Literal, Newline,
                EndOfFile
            ]
        );
        assert_eq!(tokens[2].text, "'a\\\nb'");
        assert_eq!(tokens[3].position.to_string(), "2:3");
        assert_eq!(tokens[4].position.to_string(), "3:1");
    }

    #[test]
    fn test_error_columns_count_characters() {
        let err = tokenize("éé = $\n").unwrap_err();
        assert_eq!(err.to_string(), "unexpected character '$' at 1:6");
    }

    #[test]
    fn test_print_is_an_identifier() {
        assert_eq!(
            texts("print(x)\n"),
            vec!["NAME \"print\"", "OPERATOR \"(\"", "NAME \"x\"", "OPERATOR \")\"", "NEWLINE", "EOF"]
        );
    }

    #[test]
    fn test_inconsistent_dedent() {
        let err = tokenize("if x:\n    a\n  b\n").unwrap_err();
        assert!(matches!(err, LexError::InconsistentDedent { width: 2, .. }));
        assert_eq!(err.position().line, 2);
    }

    #[test]
    fn test_tab_size_is_configurable() {
        // A tab and four spaces are the same level only with a tab size of 4
        let source = "if x:\n\ta\n    b\n";
        assert!(tokenize(source).is_err());
        assert!(lex(source, &LexerConfig { tab_size: 4 }).is_ok());
    }

    #[test]
    fn test_eof_sits_at_end_of_source() {
        let tokens = tokenize("pass\n").unwrap();
        let eof = tokens.last().unwrap();
        assert_eq!(eof.kind, TokenKind::EndOfFile);
        assert_eq!(eof.span, 5..5);
        assert_eq!(eof.position.line, 1);
    }

    #[test]
    fn test_lex_errors_propagate() {
        assert!(matches!(
            tokenize("x = ?\n"),
            Err(LexError::UnexpectedCharacter { character: '?', .. })
        ));
    }
}

//! Integration tests for the lexer and the whole-file rule using sample files
//!
//! The samples live under `tests/fixtures/`. Token listings are pinned with inline
//! snapshots; whole files are checked structurally.

use pygrammar::python::formats::treeviz::{to_treeviz_str, tokens_to_str};
use pygrammar::python::grammar::python_grammar;
use pygrammar::python::lexing::{tokenize, LexError};
use pygrammar::python::parsing::{parse, ParseError};
use pygrammar::python::testing::{SampleError, Samples};
use pygrammar::python::token::TokenKind;

fn count(tokens: &[pygrammar::python::token::Token], kind: TokenKind) -> usize {
    tokens.iter().filter(|token| token.kind == kind).count()
}

#[test]
fn test_block_token_listing() {
    let tokens = tokenize("if x:\n    pass\n").unwrap();
    insta::assert_snapshot!(tokens_to_str(&tokens), @r###"
    1:1 KEYWORD "if"
    1:4 NAME "x"
    1:5 OPERATOR ":"
    1:6 NEWLINE
    2:5 INDENT
    2:5 KEYWORD "pass"
    2:9 NEWLINE
    3:1 DEDENT
    3:1 EOF
    "###);
}

#[test]
fn test_suite_tree() {
    let tree = parse(&python_grammar(), "suite", "pass\n").unwrap();
    insta::assert_snapshot!(to_treeviz_str(&tree), @r###"
    suite: pass
    ├─ stmt_list > simple_stmt > pass_stmt: pass
    │ └─ KEYWORD "pass"
    └─ NEWLINE
    "###);
}

#[test]
fn test_mocked_except_clause_tree() {
    let mut grammar = python_grammar();
    grammar.mock("test").unwrap();
    let tree = parse(&grammar, "except_clause", "except test as test").unwrap();
    insta::assert_snapshot!(to_treeviz_str(&tree), @r###"
    except_clause: except test as test
    ├─ KEYWORD "except"
    ├─ test: test
    │ └─ NAME "test"
    ├─ KEYWORD "as"
    └─ test: test
      └─ NAME "test"
    "###);
}

#[test]
fn test_samples_tokenize_balanced() {
    for name in Samples::names() {
        if name.starts_with("inconsistent") {
            continue;
        }
        let tokens = Samples::tokenize(&name).unwrap();
        assert_eq!(
            count(&tokens, TokenKind::Indent),
            count(&tokens, TokenKind::Dedent),
            "unbalanced indentation in {name}"
        );
        assert_eq!(tokens.last().map(|token| token.kind), Some(TokenKind::EndOfFile));
        assert_eq!(count(&tokens, TokenKind::EndOfFile), 1);
    }
}

#[test]
fn test_compound_statements_sample() {
    let grammar = python_grammar();
    let tree = Samples::parse("compound_statements.py", &grammar, "file_input").unwrap();

    assert_eq!(tree.root.consumed(), tree.tokens.len());
    assert!(tree.root.is_consistent());
    assert_eq!(tree.root.find_all("classdef").len(), 1);
    assert_eq!(tree.root.find_all("funcdef").len(), 3);
    assert_eq!(tree.root.find_all("decorator").len(), 2);
    assert_eq!(tree.root.find_all("except_clause").len(), 2);

    let except = tree.root.find("except_clause").unwrap();
    assert_eq!(tree.text(except), "except ZeroDivisionError as err");
}

#[test]
fn test_simple_statements_sample() {
    let grammar = python_grammar();
    let tree = Samples::parse("simple_statements.py", &grammar, "file_input").unwrap();

    assert_eq!(tree.root.consumed(), tree.tokens.len());
    assert!(tree.root.is_consistent());
    assert!(tree.root.find("compound_stmt").is_none());
    assert_eq!(tree.root.find_all("import_from").len(), 2);
    assert_eq!(tree.root.find_all("lambdef").len(), 1);
}

#[test]
fn test_inconsistent_dedent_sample() {
    let err = Samples::tokenize("inconsistent_dedent.py").unwrap_err();
    match err {
        SampleError::Parse(ParseError::Lex(LexError::InconsistentDedent { width, position })) => {
            assert_eq!(width, 4);
            assert_eq!(position.line, 2);
        }
        other => panic!("expected an inconsistent dedent, got {other:?}"),
    }
}

#[test]
fn test_sample_names() {
    assert_eq!(
        Samples::names(),
        [
            "compound_statements.py",
            "inconsistent_dedent.py",
            "simple_statements.py"
        ]
    );
}

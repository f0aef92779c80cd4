//! Rule tests for the compound statement productions
//!
//! Each test isolates one production by mocking the rules beneath it, then checks the
//! same production again with the real rules in place.

use pygrammar::python::grammar::python_grammar;
use pygrammar::python::lexing::tokenize;
use pygrammar::python::parsing::{self, MatchResult};
use pygrammar::python::testing::{append_newline, MatchAssertions, RuleTester};
use rstest::rstest;

#[rstest]
#[case("except")]
#[case("except test")]
#[case("except TEST")]
#[case("except test as test")]
#[case("except test , test")]
fn test_except_clause_with_mocked_test(#[case] input: &str) {
    let mut tester = RuleTester::python("except_clause").unwrap();
    tester.mock(&["test"]).unwrap().assert_matches(input);
}

#[rstest]
#[case("except , test")]
#[case("except test as")]
#[case("except test test")]
#[case("except test as test as test")]
#[case("try")]
#[case("")]
fn test_except_clause_rejects(#[case] input: &str) {
    let mut tester = RuleTester::python("except_clause").unwrap();
    tester.mock(&["test"]).unwrap().assert_not_matches(input);
}

#[rstest]
#[case("except ValueError")]
#[case("except ValueError as err")]
#[case("except (KeyError, IndexError) as err")]
#[case("except os.error, e")]
#[case("except errors[0]")]
fn test_except_clause_with_real_expressions(#[case] input: &str) {
    RuleTester::python("except_clause")
        .unwrap()
        .assert_matches(input);
}

#[test]
fn test_suite_with_mocked_stmt_list() {
    let mut tester = RuleTester::python("suite").unwrap();
    {
        let scope = tester.mock(&["stmt_list"]).unwrap();
        scope
            .assert_matches("stmt_list\n")
            .assert_matches("STMT_LIST\n")
            .assert_consumes("stmt_list\n", 2)
            .assert_not_matches("stmt_list")
            .assert_not_matches("stmt_lists\n")
            .assert_not_matches("stmt_list stmt_list\n")
            .assert_not_matches("pass\n")
            .assert_not_matches("x = 1\n");
        assert_eq!(scope.mocked(), ["stmt_list".to_string()]);
    }

    // The scope is gone: real statements match again, and the placeholder is an
    // ordinary name expression
    assert!(!tester.grammar().is_mocked("stmt_list"));
    tester
        .assert_matches("stmt_list\n")
        .assert_matches("pass\n")
        .assert_not_matches("stmt_list");
}

#[rstest]
#[case("pass")]
#[case("x = 1")]
#[case("print(x)")]
#[case("a; b")]
#[case("a; b;")]
#[case("return x")]
#[case("x += 1")]
#[case("x: int = 5")]
#[case("del a[0], b.c")]
#[case("assert x, 'msg'")]
#[case("raise ValueError('x') from err")]
#[case("global a, b")]
#[case("import os.path as p")]
#[case("from . import (a, b,)")]
#[case("y = [i * 2 for i in range(10) if i % 2]")]
#[case("d = {'a': 1, **other}")]
#[case("s = {1, 2}")]
#[case("t = a if b else c")]
#[case("f(*args, **kwargs)")]
#[case("x = yield")]
#[case("n = (yield from gen())")]
#[case("x[1:2, ::3]")]
#[case("not a is not b")]
#[case("await foo()")]
#[case("lambda x, *a, y=1, **k: x")]
fn test_suite_single_line(#[case] input: &str) {
    RuleTester::python("suite")
        .unwrap()
        .assert_matches(&append_newline(input));
}

#[rstest]
#[case("pass")]
#[case("x = = 1\n")]
#[case("if x: pass\n")]
#[case("pass\npass\n")]
fn test_suite_rejects(#[case] input: &str) {
    RuleTester::python("suite")
        .unwrap()
        .assert_not_matches(input);
}

#[test]
fn test_suite_indented_block() {
    let grammar = python_grammar();
    let tokens = tokenize("if x:\n    pass\n    y = 2\n").unwrap();

    // NEWLINE INDENT pass NEWLINE y = 2 NEWLINE DEDENT, starting after the colon
    let result = parsing::match_rule(&grammar, "suite", &tokens, 3).unwrap();
    assert_eq!(result.consumed(), Some(9));
    let node = result.node().unwrap();
    assert_eq!(node.find_all("statement").len(), 2);
    assert!(node.is_consistent());
}

#[test]
fn test_suite_indented_block_with_mocked_statement() {
    let mut grammar = python_grammar();
    grammar.mock("statement").unwrap();
    let tokens = tokenize("if x:\n    statement").unwrap();

    let result = parsing::match_rule(&grammar, "suite", &tokens, 3).unwrap();
    assert_eq!(result.consumed(), Some(4));

    // The real statement rule wants its NEWLINE, and there is none
    grammar.unmock("statement").unwrap();
    let result = parsing::match_rule(&grammar, "suite", &tokens, 3).unwrap();
    assert!(matches!(result, MatchResult::Failure(_)));
}

#[test]
fn test_suite_block_needs_dedent() {
    let grammar = python_grammar();
    let tokens = tokenize("if x:\n    pass\n").unwrap();
    let result = parsing::match_rule(&grammar, "suite", &tokens, 3).unwrap();
    assert_eq!(result.consumed(), Some(5));

    let failure = parsing::match_rule(&grammar, "suite", &tokens, 4).unwrap();
    assert!(!failure.is_success());
}

#[rstest]
#[case("try: suite except_clause: suite")]
#[case("try: suite except_clause: suite except_clause: suite")]
#[case("try: suite except_clause: suite else: suite")]
#[case("try: suite except_clause: suite else: suite finally: suite")]
#[case("try: suite finally: suite")]
fn test_try_stmt_with_mocks(#[case] input: &str) {
    let mut tester = RuleTester::python("try_stmt").unwrap();
    tester
        .mock(&["suite", "except_clause"])
        .unwrap()
        .assert_matches(input);
}

#[rstest]
#[case("try: suite")]
#[case("try: suite else: suite")]
#[case("try: suite finally: suite except_clause: suite")]
fn test_try_stmt_rejects(#[case] input: &str) {
    let mut tester = RuleTester::python("try_stmt").unwrap();
    tester
        .mock(&["suite", "except_clause"])
        .unwrap()
        .assert_not_matches(input);
}

#[test]
fn test_try_stmt_with_real_blocks() {
    RuleTester::python("try_stmt")
        .unwrap()
        .assert_matches("try:\n    x = 1\nexcept ValueError as err:\n    pass\n")
        .assert_matches("try:\n    x = 1\nexcept:\n    pass\nfinally:\n    done()\n")
        .assert_not_matches("try:\n    x = 1\n");
}

#[rstest]
#[case("if test: suite")]
#[case("if test: suite else: suite")]
#[case("if test: suite elif test: suite elif test: suite else: suite")]
fn test_if_stmt_with_mocks(#[case] input: &str) {
    let mut tester = RuleTester::python("if_stmt").unwrap();
    tester
        .mock(&["test", "suite"])
        .unwrap()
        .assert_matches(input);
}

#[rstest]
#[case("while x:\n    x -= 1\n")]
#[case("for a, b in pairs:\n    print(a)\nelse:\n    pass\n")]
#[case("with open(p) as f, lock:\n    f.read()\n")]
#[case("def f(a, b: int = 1, *args, c, **kw) -> str:\n    return a\n")]
#[case("class A(B, metaclass=M):\n    pass\n")]
#[case("@dec\ndef f(): pass\n")]
#[case("async def f():\n    await g()\n")]
fn test_compound_stmt(#[case] input: &str) {
    RuleTester::python("compound_stmt")
        .unwrap()
        .assert_matches(input);
}

#[test]
fn test_mock_scope_keeps_existing_mocks() {
    let mut grammar = python_grammar();
    grammar.mock("test").unwrap();
    let mut tester = RuleTester::new(grammar, "except_clause").unwrap();

    {
        let scope = tester.mock(&["test"]).unwrap();
        assert!(scope.mocked().is_empty());
    }
    assert!(tester.grammar().is_mocked("test"));
    tester.assert_matches("except test");
}

#[test]
fn test_mock_of_unknown_rule_fails() {
    let mut tester = RuleTester::python("suite").unwrap();
    assert!(tester.mock(&["stmt_list", "no_such_rule"]).is_err());
    // The partial scope rolled back what it mocked
    assert!(!tester.grammar().is_mocked("stmt_list"));
}

#[test]
fn test_mocked_rule_is_an_opaque_node() {
    let mut grammar = python_grammar();
    grammar.mock("stmt_list").unwrap();
    let tree = parsing::parse(&grammar, "suite", "stmt_list\n").unwrap();

    let placeholder = tree.root.find("stmt_list").unwrap();
    assert_eq!(placeholder.consumed(), 1);
    assert!(placeholder.find("simple_stmt").is_none());

    grammar.unmock("stmt_list").unwrap();
    let tree = parsing::parse(&grammar, "suite", "stmt_list\n").unwrap();
    assert!(tree.root.find("expression_stmt").is_some());
}

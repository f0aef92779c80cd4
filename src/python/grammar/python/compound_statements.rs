//! Compound statements and the `suite` that forms their bodies.
//!
//! ```text
//! file_input     := statement* EOF
//! statement      := compound_stmt | stmt_list NEWLINE
//! suite          := stmt_list NEWLINE | NEWLINE INDENT statement+ DEDENT
//! except_clause  := 'except' [ test [ ( 'as' | ',' ) test ] ]
//! ```
//!
//! `except_clause` accepts both the `as` binding and the legacy comma form. `as` is tried
//! first; the two never compete for the same token.

use crate::python::grammar::expr::*;
use crate::python::grammar::registry::Grammar;
use crate::python::token::TokenKind;

fn name() -> Expression {
    token(TokenKind::Identifier)
}

fn newline() -> Expression {
    token(TokenKind::Newline)
}

/// `':' suite`, the tail shared by every clause header.
fn block() -> Expression {
    seq([op(":"), rule("suite")])
}

fn else_block() -> Expression {
    opt(seq([keyword("else"), block()]))
}

pub fn define(grammar: &mut Grammar) {
    grammar
        .define(
            "file_input",
            seq([
                zero_or_more(choice([newline(), rule("statement")])),
                token(TokenKind::EndOfFile),
            ]),
        )
        .define(
            "statement",
            choice([rule("compound_stmt"), seq([rule("stmt_list"), newline()])]),
        )
        .define(
            "suite",
            choice([
                seq([rule("stmt_list"), newline()]),
                seq([
                    newline(),
                    token(TokenKind::Indent),
                    one_or_more(rule("statement")),
                    token(TokenKind::Dedent),
                ]),
            ]),
        )
        .define(
            "compound_stmt",
            choice([
                rule("if_stmt"),
                rule("while_stmt"),
                rule("for_stmt"),
                rule("try_stmt"),
                rule("with_stmt"),
                rule("funcdef"),
                rule("classdef"),
                rule("decorated"),
                rule("async_stmt"),
            ]),
        )
        .define(
            "if_stmt",
            seq([
                keyword("if"),
                rule("namedexpr_test"),
                block(),
                zero_or_more(seq([keyword("elif"), rule("namedexpr_test"), block()])),
                else_block(),
            ]),
        )
        .define(
            "while_stmt",
            seq([keyword("while"), rule("namedexpr_test"), block(), else_block()]),
        )
        .define(
            "for_stmt",
            seq([
                keyword("for"),
                rule("exprlist"),
                keyword("in"),
                rule("testlist"),
                block(),
                else_block(),
            ]),
        )
        .define(
            "try_stmt",
            seq([
                keyword("try"),
                block(),
                choice([
                    seq([
                        one_or_more(seq([rule("except_clause"), block()])),
                        else_block(),
                        opt(seq([keyword("finally"), block()])),
                    ]),
                    seq([keyword("finally"), block()]),
                ]),
            ]),
        )
        .define(
            "except_clause",
            seq([
                keyword("except"),
                opt(seq([
                    rule("test"),
                    opt(seq([choice([keyword("as"), op(",")]), rule("test")])),
                ])),
            ]),
        )
        .define(
            "with_stmt",
            seq([
                keyword("with"),
                rule("with_item"),
                zero_or_more(seq([op(","), rule("with_item")])),
                block(),
            ]),
        )
        .define(
            "with_item",
            seq([rule("test"), opt(seq([keyword("as"), rule("expr")]))]),
        )
        .define(
            "funcdef",
            seq([
                keyword("def"),
                name(),
                rule("parameters"),
                opt(seq([op("->"), rule("test")])),
                block(),
            ]),
        )
        .define(
            "parameters",
            seq([op("("), opt(rule("typedargslist")), op(")")]),
        )
        .define("typedargslist", comma_list(rule("typedarg")))
        .define(
            "typedarg",
            choice([
                seq([op("**"), rule("tfpdef")]),
                seq([op("*"), opt(rule("tfpdef"))]),
                op("/"),
                seq([rule("tfpdef"), opt(seq([op("="), rule("test")]))]),
            ]),
        )
        .define(
            "tfpdef",
            seq([name(), opt(seq([op(":"), rule("test")]))]),
        )
        .define(
            "classdef",
            seq([
                keyword("class"),
                name(),
                opt(seq([op("("), opt(rule("arglist")), op(")")])),
                block(),
            ]),
        )
        .define(
            "decorated",
            seq([
                one_or_more(rule("decorator")),
                choice([rule("classdef"), rule("funcdef"), rule("async_stmt")]),
            ]),
        )
        .define(
            "decorator",
            seq([op("@"), rule("namedexpr_test"), newline()]),
        )
        .define(
            "async_stmt",
            seq([
                keyword("async"),
                choice([rule("funcdef"), rule("with_stmt"), rule("for_stmt")]),
            ]),
        );
}

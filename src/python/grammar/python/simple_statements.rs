//! Simple statements: everything that fits on one logical line.
//!
//! ```text
//! stmt_list    := simple_stmt ( ';' simple_stmt )* [ ';' ]
//! simple_stmt  := pass_stmt | break_stmt | continue_stmt | return_stmt | raise_stmt
//!               | global_stmt | nonlocal_stmt | del_stmt | assert_stmt | import_stmt
//!               | yield_stmt | expression_stmt
//! ```
//!
//! `print` and `exec` are ordinary names, so `print(x)` is an expression statement.

use crate::python::grammar::expr::*;
use crate::python::grammar::registry::Grammar;
use crate::python::token::TokenKind;

fn name() -> Expression {
    token(TokenKind::Identifier)
}

fn names() -> Expression {
    seq([name(), zero_or_more(seq([op(","), name()]))])
}

const AUGMENTED_ASSIGNMENTS: &[&str] = &[
    "+=", "-=", "*=", "@=", "/=", "%=", "&=", "|=", "^=", "<<=", ">>=", "**=", "//=",
];

pub fn define(grammar: &mut Grammar) {
    grammar
        .define(
            "stmt_list",
            seq([
                rule("simple_stmt"),
                zero_or_more(seq([op(";"), rule("simple_stmt")])),
                opt(op(";")),
            ]),
        )
        .define(
            "simple_stmt",
            choice([
                rule("pass_stmt"),
                rule("break_stmt"),
                rule("continue_stmt"),
                rule("return_stmt"),
                rule("raise_stmt"),
                rule("global_stmt"),
                rule("nonlocal_stmt"),
                rule("del_stmt"),
                rule("assert_stmt"),
                rule("import_stmt"),
                rule("yield_stmt"),
                rule("expression_stmt"),
            ]),
        )
        .define("pass_stmt", keyword("pass"))
        .define("break_stmt", keyword("break"))
        .define("continue_stmt", keyword("continue"))
        .define(
            "return_stmt",
            seq([keyword("return"), opt(rule("testlist_star_expr"))]),
        )
        .define(
            "raise_stmt",
            seq([
                keyword("raise"),
                opt(seq([rule("test"), opt(seq([keyword("from"), rule("test")]))])),
            ]),
        )
        .define("global_stmt", seq([keyword("global"), names()]))
        .define("nonlocal_stmt", seq([keyword("nonlocal"), names()]))
        .define("del_stmt", seq([keyword("del"), rule("exprlist")]))
        .define(
            "assert_stmt",
            seq([
                keyword("assert"),
                rule("test"),
                opt(seq([op(","), rule("test")])),
            ]),
        )
        .define("yield_stmt", rule("yield_expr"))
        .define(
            "import_stmt",
            choice([rule("import_name"), rule("import_from")]),
        )
        .define(
            "import_name",
            seq([keyword("import"), rule("dotted_as_names")]),
        )
        .define(
            "import_from",
            seq([
                keyword("from"),
                choice([
                    seq([zero_or_more(choice([op("."), op("...")])), rule("dotted_name")]),
                    one_or_more(choice([op("."), op("...")])),
                ]),
                keyword("import"),
                choice([
                    op("*"),
                    seq([op("("), rule("import_as_names"), op(")")]),
                    rule("import_as_names"),
                ]),
            ]),
        )
        .define(
            "import_as_name",
            seq([name(), opt(seq([keyword("as"), name()]))]),
        )
        .define(
            "dotted_as_name",
            seq([rule("dotted_name"), opt(seq([keyword("as"), name()]))]),
        )
        .define("import_as_names", comma_list(rule("import_as_name")))
        .define(
            "dotted_as_names",
            seq([
                rule("dotted_as_name"),
                zero_or_more(seq([op(","), rule("dotted_as_name")])),
            ]),
        )
        .define(
            "dotted_name",
            seq([name(), zero_or_more(seq([op("."), name()]))]),
        )
        .define(
            "expression_stmt",
            seq([
                rule("testlist_star_expr"),
                choice([
                    rule("annassign"),
                    seq([
                        rule("augassign"),
                        choice([rule("yield_expr"), rule("testlist")]),
                    ]),
                    zero_or_more(seq([
                        op("="),
                        choice([rule("yield_expr"), rule("testlist_star_expr")]),
                    ])),
                ]),
            ]),
        )
        .define(
            "annassign",
            seq([
                op(":"),
                rule("test"),
                opt(seq([
                    op("="),
                    choice([rule("yield_expr"), rule("testlist_star_expr")]),
                ])),
            ]),
        )
        .define(
            "augassign",
            choice(AUGMENTED_ASSIGNMENTS.iter().map(|text| op(text))),
        );
}

//! Expressions, from `test` down to `atom`.
//!
//! Binary operator levels are written as `operand ( operator operand )*` rather than
//! left-recursively; the match tree is flat at each level and the matcher never loops.

use crate::python::grammar::expr::*;
use crate::python::grammar::registry::Grammar;
use crate::python::token::TokenKind;

fn name() -> Expression {
    token(TokenKind::Identifier)
}

/// `operand ( op operand )*` for one precedence level.
fn binary(operand: &str, operators: &[&str]) -> Expression {
    let operator = match operators {
        [single] => op(single),
        _ => choice(operators.iter().map(|text| op(text))),
    };
    seq([rule(operand), zero_or_more(seq([operator, rule(operand)]))])
}

/// Parameter lists of lambdas: like `def` parameters, without annotations.
fn varargs() -> Expression {
    comma_list(choice([
        seq([op("**"), name()]),
        seq([op("*"), opt(name())]),
        op("/"),
        seq([name(), opt(seq([op("="), rule("test")]))]),
    ]))
}

fn test_or_star() -> Expression {
    choice([rule("test"), rule("star_expr")])
}

pub fn define(grammar: &mut Grammar) {
    grammar
        .define(
            "test",
            choice([
                seq([
                    rule("or_test"),
                    opt(seq([
                        keyword("if"),
                        rule("or_test"),
                        keyword("else"),
                        rule("test"),
                    ])),
                ]),
                rule("lambdef"),
            ]),
        )
        .define(
            "test_nocond",
            choice([rule("or_test"), rule("lambdef_nocond")]),
        )
        .define(
            "namedexpr_test",
            choice([seq([name(), op(":="), rule("test")]), rule("test")]),
        )
        .define(
            "lambdef",
            seq([keyword("lambda"), opt(varargs()), op(":"), rule("test")]),
        )
        .define(
            "lambdef_nocond",
            seq([keyword("lambda"), opt(varargs()), op(":"), rule("test_nocond")]),
        )
        .define(
            "or_test",
            seq([
                rule("and_test"),
                zero_or_more(seq([keyword("or"), rule("and_test")])),
            ]),
        )
        .define(
            "and_test",
            seq([
                rule("not_test"),
                zero_or_more(seq([keyword("and"), rule("not_test")])),
            ]),
        )
        .define(
            "not_test",
            choice([seq([keyword("not"), rule("not_test")]), rule("comparison")]),
        )
        .define(
            "comparison",
            seq([rule("expr"), zero_or_more(seq([rule("comp_op"), rule("expr")]))]),
        )
        .define(
            "comp_op",
            choice([
                op("<"),
                op(">"),
                op("=="),
                op(">="),
                op("<="),
                op("<>"),
                op("!="),
                keyword("in"),
                seq([keyword("not"), keyword("in")]),
                seq([keyword("is"), keyword("not")]),
                keyword("is"),
            ]),
        )
        .define("star_expr", seq([op("*"), rule("expr")]))
        .define("expr", binary("xor_expr", &["|"]))
        .define("xor_expr", binary("and_expr", &["^"]))
        .define("and_expr", binary("shift_expr", &["&"]))
        .define("shift_expr", binary("arith_expr", &["<<", ">>"]))
        .define("arith_expr", binary("term", &["+", "-"]))
        .define("term", binary("factor", &["*", "@", "/", "%", "//"]))
        .define(
            "factor",
            choice([
                seq([choice([op("+"), op("-"), op("~")]), rule("factor")]),
                rule("power"),
            ]),
        )
        .define(
            "power",
            seq([rule("atom_expr"), opt(seq([op("**"), rule("factor")]))]),
        )
        .define(
            "atom_expr",
            seq([
                opt(keyword("await")),
                rule("atom"),
                zero_or_more(rule("trailer")),
            ]),
        )
        .define(
            "atom",
            choice([
                seq([
                    op("("),
                    opt(choice([rule("yield_expr"), rule("testlist_comp")])),
                    op(")"),
                ]),
                seq([op("["), opt(rule("testlist_comp")), op("]")]),
                seq([op("{"), opt(rule("dictorsetmaker")), op("}")]),
                name(),
                // Adjacent string literals concatenate
                one_or_more(token(TokenKind::Literal)),
                op("..."),
                keyword("None"),
                keyword("True"),
                keyword("False"),
            ]),
        )
        .define(
            "testlist_comp",
            seq([
                choice([rule("namedexpr_test"), rule("star_expr")]),
                choice([
                    rule("comp_for"),
                    seq([
                        zero_or_more(seq([
                            op(","),
                            choice([rule("namedexpr_test"), rule("star_expr")]),
                        ])),
                        opt(op(",")),
                    ]),
                ]),
            ]),
        )
        .define(
            "trailer",
            choice([
                seq([op("("), opt(rule("arglist")), op(")")]),
                seq([op("["), rule("subscriptlist"), op("]")]),
                seq([op("."), name()]),
            ]),
        )
        .define("subscriptlist", comma_list(rule("subscript")))
        .define(
            "subscript",
            choice([
                seq([
                    opt(rule("test")),
                    op(":"),
                    opt(rule("test")),
                    opt(seq([op(":"), opt(rule("test"))])),
                ]),
                rule("test"),
            ]),
        )
        .define(
            "exprlist",
            comma_list(choice([rule("expr"), rule("star_expr")])),
        )
        .define("testlist", comma_list(rule("test")))
        .define("testlist_star_expr", comma_list(test_or_star()))
        .define(
            "dictorsetmaker",
            choice([
                seq([
                    rule("dict_item"),
                    choice([
                        rule("comp_for"),
                        seq([
                            zero_or_more(seq([op(","), rule("dict_item")])),
                            opt(op(",")),
                        ]),
                    ]),
                ]),
                seq([
                    test_or_star(),
                    choice([
                        rule("comp_for"),
                        seq([zero_or_more(seq([op(","), test_or_star()])), opt(op(","))]),
                    ]),
                ]),
            ]),
        )
        .define(
            "dict_item",
            choice([
                seq([rule("test"), op(":"), rule("test")]),
                seq([op("**"), rule("expr")]),
            ]),
        )
        .define("arglist", comma_list(rule("argument")))
        .define(
            "argument",
            choice([
                seq([rule("test"), rule("comp_for")]),
                seq([name(), op(":="), rule("test")]),
                seq([name(), op("="), rule("test")]),
                seq([op("**"), rule("test")]),
                seq([op("*"), rule("test")]),
                rule("test"),
            ]),
        )
        .define(
            "comp_for",
            seq([
                opt(keyword("async")),
                keyword("for"),
                rule("exprlist"),
                keyword("in"),
                rule("or_test"),
                opt(rule("comp_iter")),
            ]),
        )
        .define(
            "comp_iter",
            choice([rule("comp_for"), rule("comp_if")]),
        )
        .define(
            "comp_if",
            seq([keyword("if"), rule("test_nocond"), opt(rule("comp_iter"))]),
        )
        .define(
            "yield_expr",
            seq([
                keyword("yield"),
                opt(choice([
                    seq([keyword("from"), rule("test")]),
                    rule("testlist_star_expr"),
                ])),
            ]),
        );
}

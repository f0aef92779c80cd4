//! Rule expressions and the combinators that build them.
//!
//! The builder functions are meant to be glob-imported by grammar definitions, so a rule
//! reads close to its EBNF:
//!
//!     seq([keyword("except"), opt(seq([rule("test"), opt(seq([choice([keyword("as"), op(",")]), rule("test")]))]))])
//!
//! displays as `'except' [ test [ ( 'as' | ',' ) test ] ]`.

use crate::python::token::TokenKind;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Expression {
    /// One token of the given kind, with exactly this text when given.
    Literal {
        kind: TokenKind,
        text: Option<String>,
    },
    /// Another rule, resolved by name through the registry at match time.
    RuleRef(String),
    Sequence(Vec<Expression>),
    /// Ordered choice: the first alternative that matches wins.
    Choice(Vec<Expression>),
    Optional(Box<Expression>),
    ZeroOrMore(Box<Expression>),
    OneOrMore(Box<Expression>),
    /// Placeholder installed by mocking. Matches one token spelling the rule's own name.
    Mock,
}

impl Expression {
    /// Names of the rules this expression refers to directly, in order of appearance.
    pub fn referenced_rules(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_references(&mut names);
        names
    }

    fn collect_references<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            Expression::RuleRef(name) => {
                if !names.contains(&name.as_str()) {
                    names.push(name);
                }
            }
            Expression::Sequence(items) | Expression::Choice(items) => {
                for item in items {
                    item.collect_references(names);
                }
            }
            Expression::Optional(inner)
            | Expression::ZeroOrMore(inner)
            | Expression::OneOrMore(inner) => inner.collect_references(names),
            Expression::Literal { .. } | Expression::Mock => {}
        }
    }

    /// How a failed literal is reported: the quoted text, or the token kind name.
    pub fn describe(&self) -> String {
        match self {
            Expression::Literal {
                text: Some(text), ..
            } => format!("'{text}'"),
            Expression::Literal { kind, text: None } => kind.name().to_string(),
            other => other.to_string(),
        }
    }

    fn is_compound(&self) -> bool {
        matches!(self, Expression::Sequence(items) | Expression::Choice(items) if items.len() > 1)
    }

    fn fmt_grouped(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_compound() {
            write!(f, "( {self} )")
        } else {
            write!(f, "{self}")
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Literal { .. } => f.write_str(&self.describe()),
            Expression::RuleRef(name) => f.write_str(name),
            Expression::Sequence(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    if matches!(item, Expression::Choice(alts) if alts.len() > 1) {
                        item.fmt_grouped(f)?;
                    } else {
                        write!(f, "{item}")?;
                    }
                }
                Ok(())
            }
            Expression::Choice(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
            Expression::Optional(inner) => write!(f, "[ {inner} ]"),
            Expression::ZeroOrMore(inner) => {
                inner.fmt_grouped(f)?;
                f.write_str("*")
            }
            Expression::OneOrMore(inner) => {
                inner.fmt_grouped(f)?;
                f.write_str("+")
            }
            Expression::Mock => f.write_str("<mock>"),
        }
    }
}

/// A keyword token with this exact text.
pub fn keyword(text: &str) -> Expression {
    Expression::Literal {
        kind: TokenKind::Keyword,
        text: Some(text.to_string()),
    }
}

/// An operator or delimiter token with this exact text.
pub fn op(text: &str) -> Expression {
    Expression::Literal {
        kind: TokenKind::Operator,
        text: Some(text.to_string()),
    }
}

/// Any token of the given kind.
pub fn token(kind: TokenKind) -> Expression {
    Expression::Literal { kind, text: None }
}

pub fn rule(name: &str) -> Expression {
    Expression::RuleRef(name.to_string())
}

pub fn seq(items: impl IntoIterator<Item = Expression>) -> Expression {
    Expression::Sequence(items.into_iter().collect())
}

pub fn choice(items: impl IntoIterator<Item = Expression>) -> Expression {
    Expression::Choice(items.into_iter().collect())
}

pub fn opt(inner: Expression) -> Expression {
    Expression::Optional(Box::new(inner))
}

pub fn zero_or_more(inner: Expression) -> Expression {
    Expression::ZeroOrMore(Box::new(inner))
}

pub fn one_or_more(inner: Expression) -> Expression {
    Expression::OneOrMore(Box::new(inner))
}

/// `item (',' item)* [',']`, the shape of most Python lists.
pub fn comma_list(item: Expression) -> Expression {
    seq([
        item.clone(),
        zero_or_more(seq([op(","), item])),
        opt(op(",")),
    ])
}

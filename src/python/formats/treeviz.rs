//! Treeviz formatter for match trees and token streams
//!
//! Chains of rules that each wrap a single rule over the same tokens are folded onto one
//! line (`test > or_test > ... > atom`); the expression grammar would otherwise spend a
//! dozen levels on every name.

use crate::python::parsing::{MatchNode, ParseTree};
use crate::python::token::Token;

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

pub fn to_treeviz_str(tree: &ParseTree) -> String {
    let mut result = String::new();
    let (label, node) = collapse(&tree.root);
    result.push_str(&format!("{}: {}\n", label, truncate(&tree.text(node), 30)));
    append_children(&mut result, tree, node.children(), "");
    result
}

/// One token per line, prefixed with its 1-based line:column.
pub fn tokens_to_str(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|token| format!("{} {}\n", token.position, token))
        .collect()
}

/// Follow single-child rule chains that cover the same tokens, joining their names.
fn collapse(node: &MatchNode) -> (String, &MatchNode) {
    let mut names = Vec::new();
    let mut current = node;
    loop {
        if let Some(name) = current.rule_name() {
            names.push(name);
        }
        match current.children() {
            [only] if only.rule_name().is_some() && only.consumed() == current.consumed() => {
                current = only.as_ref();
            }
            _ => break,
        }
    }
    (names.join(" > "), current)
}

fn append_node(result: &mut String, tree: &ParseTree, node: &MatchNode, prefix: &str, is_last: bool) {
    let connector = if is_last { "└─" } else { "├─" };

    match node {
        MatchNode::Token { index } => {
            let label = tree
                .token(*index)
                .map(|token| truncate(&token.to_string(), 40))
                .unwrap_or_else(|| format!("<token {index}>"));
            result.push_str(&format!("{}{} {}\n", prefix, connector, label));
        }
        MatchNode::Rule { .. } => {
            let (label, node) = collapse(node);
            result.push_str(&format!(
                "{}{} {}: {}\n",
                prefix,
                connector,
                label,
                truncate(&tree.text(node), 30)
            ));
            let new_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
            append_children(result, tree, node.children(), &new_prefix);
        }
    }
}

fn append_children(
    result: &mut String,
    tree: &ParseTree,
    children: &[std::sync::Arc<MatchNode>],
    prefix: &str,
) {
    for (i, child) in children.iter().enumerate() {
        let is_last = i == children.len() - 1;
        append_node(result, tree, child, prefix, is_last);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::python::grammar::expr::*;
    use crate::python::grammar::Grammar;
    use crate::python::parsing::parse;
    use crate::python::token::TokenKind;

    fn grammar() -> Grammar {
        let mut grammar = Grammar::new();
        grammar
            .define("pair", seq([rule("item"), op(","), rule("item")]))
            .define("wrap", rule("item"))
            .define("item", token(TokenKind::Identifier));
        grammar
    }

    #[test]
    fn test_tree_rendering() {
        let tree = parse(&grammar(), "pair", "a, b").unwrap();
        assert_eq!(
            to_treeviz_str(&tree),
            "pair: a , b\n\
             ├─ item: a\n\
             │ └─ NAME \"a\"\n\
             ├─ OPERATOR \",\"\n\
             └─ item: b\n\
             \x20 └─ NAME \"b\"\n"
        );
    }

    #[test]
    fn test_single_child_chains_collapse() {
        let tree = parse(&grammar(), "wrap", "a").unwrap();
        assert_eq!(to_treeviz_str(&tree), "wrap > item: a\n└─ NAME \"a\"\n");
    }

    #[test]
    fn test_token_listing() {
        let tokens = crate::python::lexing::tokenize("pass\n").unwrap();
        assert_eq!(
            tokens_to_str(&tokens),
            "1:1 KEYWORD \"pass\"\n1:5 NEWLINE\n2:1 EOF\n"
        );
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("abcdef", 3), "abc...");
        assert_eq!(truncate("abc", 3), "abc");
    }
}

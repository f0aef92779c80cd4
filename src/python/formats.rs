//! Output formats
//!
//!     Tokens and match trees can be rendered as:
//!
//!         - tree: an indented text view for humans. See [treeviz].
//!         - json / yaml: serde serialization, for tooling and snapshots.

pub mod treeviz;

use crate::python::parsing::ParseTree;
use crate::python::token::Token;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Tree,
    Json,
    Yaml,
}

impl Format {
    pub const ALL: [Format; 3] = [Format::Tree, Format::Json, Format::Yaml];

    pub fn name(self) -> &'static str {
        match self {
            Format::Tree => "tree",
            Format::Json => "json",
            Format::Yaml => "yaml",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Format::ALL
            .into_iter()
            .find(|format| format.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| FormatError::UnknownFormat(s.to_string()))
    }
}

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("unknown format '{0}' (expected tree, json or yaml)")]
    UnknownFormat(String),

    #[error("json serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("yaml serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub fn render_tokens(tokens: &[Token], format: Format) -> Result<String, FormatError> {
    match format {
        Format::Tree => Ok(treeviz::tokens_to_str(tokens)),
        Format::Json => Ok(serde_json::to_string_pretty(tokens)?),
        Format::Yaml => Ok(serde_yaml::to_string(tokens)?),
    }
}

pub fn render_tree(tree: &ParseTree, format: Format) -> Result<String, FormatError> {
    match format {
        Format::Tree => Ok(treeviz::to_treeviz_str(tree)),
        Format::Json => Ok(serde_json::to_string_pretty(tree)?),
        Format::Yaml => Ok(serde_yaml::to_string(tree)?),
    }
}

//! Sample Python files
//!
//!     Made-up Python in test bodies drifts: a stray space or a missing newline and the
//!     test checks something other than what it claims. Whole-file tests therefore read
//!     curated samples from `tests/fixtures/` through [Samples] instead.

use crate::python::grammar::Grammar;
use crate::python::parsing::{self, ParseError, ParseTree};
use crate::python::token::Token;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SampleError {
    #[error("sample not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Loader for the files under `tests/fixtures/`.
pub struct Samples;

impl Samples {
    pub fn dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("fixtures")
    }

    pub fn path(name: &str) -> PathBuf {
        Self::dir().join(name)
    }

    /// Names of every `.py` sample, sorted.
    pub fn names() -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(Self::dir())
            .into_iter()
            .flatten()
            .flatten()
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| name.ends_with(".py"))
            .collect();
        names.sort();
        names
    }

    pub fn load(name: &str) -> Result<String, SampleError> {
        let path = Self::path(name);
        if !path.exists() {
            return Err(SampleError::NotFound(path));
        }
        fs::read_to_string(&path).map_err(|source| SampleError::Io { path, source })
    }

    pub fn tokenize(name: &str) -> Result<Vec<Token>, SampleError> {
        let source = Self::load(name)?;
        crate::python::lexing::tokenize(&source).map_err(|err| SampleError::Parse(err.into()))
    }

    pub fn parse(name: &str, grammar: &Grammar, rule: &str) -> Result<ParseTree, SampleError> {
        let source = Self::load(name)?;
        Ok(parsing::parse(grammar, rule, &source)?)
    }
}

//! Configuration loading.
//!
//! `defaults/pygrammar.default.toml` is embedded into the binary so that docs and
//! runtime behavior stay in sync. Callers layer user-specific files and single-key
//! overrides on top of those defaults via [`Loader`] before deserializing into
//! [`GrammarConfig`]. The CLI picks up a [`CONFIG_FILE_NAME`] in the working directory
//! when one exists.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/pygrammar.default.toml");

/// Project-level configuration file name.
pub const CONFIG_FILE_NAME: &str = "pygrammar.toml";

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarConfig {
    pub lexer: LexerConfig,
    pub engine: EngineConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexerConfig {
    pub tab_size: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub memoize: bool,
}

impl Default for LexerConfig {
    fn default() -> Self {
        Self { tab_size: 8 }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { memoize: true }
    }
}

impl Default for GrammarConfig {
    fn default() -> Self {
        Self {
            lexer: LexerConfig::default(),
            engine: EngineConfig::default(),
        }
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override, e.g. `engine.memoize = false` from the CLI.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<GrammarConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

//! Front-end configuration
//!
//! `defaults/frontend.default.toml` is embedded into the library so the
//! documented defaults and [`Default`] impls stay in sync. Hosts layer their
//! own files and overrides on top through [`Loader`] before deserializing
//! into [`FrontendConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/frontend.default.toml");

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FrontendConfig {
    pub lexer: LexerOptions,
    pub parser: ParserOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LexerOptions {
    /// Emit `Illegal` tokens instead of failing on unrecognised bytes
    pub recover_illegal_characters: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ParserOptions {
    /// Resynchronise after an embedded error instead of stopping
    pub recover: bool,
    pub max_errors: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            recover: true,
            max_errors: 64,
        }
    }
}

impl ParserOptions {
    /// Stop at the first syntax error
    pub fn strict() -> Self {
        Self {
            recover: false,
            ..Self::default()
        }
    }
}

/// Layers user overrides over the built-in defaults
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a TOML file. Missing files are an error at build time.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer TOML text, e.g. a settings blob sent by an editor host
    pub fn with_toml(mut self, toml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(toml, FileFormat::Toml));
        self
    }

    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<FrontendConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

pub fn load_defaults() -> Result<FrontendConfig, ConfigError> {
    Loader::new().build()
}

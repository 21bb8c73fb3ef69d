//! Configuration loading
//!
//! `defaults/tagcol.default.toml` is embedded into the binary. [Loader]
//! layers a user file and command-line overrides on top of it before
//! deserializing into [TagcolConfig].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/tagcol.default.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct TagcolConfig {
    pub generate: GenerateConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GenerateConfig {
    /// Tag key whose value becomes the column name
    pub tag: String,
    /// Suffix appended to the output file stem
    pub suffix: String,
    /// Registered renderer name
    pub format: String,
}

#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start from the embedded defaults
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a TOML file. A missing file is an error at [Loader::build].
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<TagcolConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

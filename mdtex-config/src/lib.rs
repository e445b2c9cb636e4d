//! Shared configuration loader for the mdtex toolchain.
//!
//! `defaults/mdtex.default.toml` is embedded into every binary so that docs
//! and runtime behavior stay in sync. Applications layer user-specific files
//! on top of those defaults via [`Loader`] before deserializing into
//! [`MdtexConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use mdtex::typeset::TypesetSpec;
use mdtex::ConvertOptions;
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/mdtex.default.toml");

/// Top-level configuration consumed by mdtex applications.
#[derive(Debug, Clone, Deserialize)]
pub struct MdtexConfig {
    pub convert: ConvertSection,
    pub publish: PublishSection,
    pub typeset: TypesetSection,
}

/// Conversion knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertSection {
    pub default_column_alignment: String,
}

impl From<ConvertSection> for ConvertOptions {
    fn from(section: ConvertSection) -> Self {
        ConvertOptions {
            default_column_alignment: section.default_column_alignment,
        }
    }
}

impl From<&ConvertSection> for ConvertOptions {
    fn from(section: &ConvertSection) -> Self {
        ConvertOptions {
            default_column_alignment: section.default_column_alignment.clone(),
        }
    }
}

/// The fixed documents a project is built from.
#[derive(Debug, Clone, Deserialize)]
pub struct PublishSection {
    pub sources: Vec<String>,
}

/// Mirrors the knobs of the typesetting runner.
#[derive(Debug, Clone, Deserialize)]
pub struct TypesetSection {
    pub engine: String,
    pub passes: u8,
    pub bibliography: bool,
    pub bibliography_tool: String,
}

impl From<TypesetSection> for TypesetSpec {
    fn from(section: TypesetSection) -> Self {
        TypesetSpec {
            engine_path: None,
            engine: section.engine,
            passes: section.passes,
            bibliography: section.bibliography,
            bibliography_tool: section.bibliography_tool,
        }
    }
}

impl From<&TypesetSection> for TypesetSpec {
    fn from(section: &TypesetSection) -> Self {
        TypesetSpec {
            engine_path: None,
            engine: section.engine.clone(),
            passes: section.passes,
            bibliography: section.bibliography,
            bibliography_tool: section.bibliography_tool.clone(),
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

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<MdtexConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<MdtexConfig, ConfigError> {
    Loader::new().build()
}

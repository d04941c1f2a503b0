//! Configuration loading
//!
//! `defaults/ruledoc.default.toml` is embedded into the binary so documented
//! defaults and runtime behavior stay in sync. Callers layer a user file,
//! `RULEDOC_*` environment variables and explicit overrides on top via
//! [`Loader`] before deserializing into [`RuledocConfig`].
//!
//! Environment keys use `__` between levels:
//! `RULEDOC_RENDER__FORMAT=json`, `RULEDOC_SCAN__DEFAULT_SEVERITY=hint`.

use crate::ruledoc::formats::SeverityPalette;
use crate::ruledoc::scanning::ScanOptions;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/ruledoc.default.toml");

const ENV_PREFIX: &str = "RULEDOC";

/// Picked up from the working directory when no config file is given.
pub const LOCAL_CONFIG_FILE: &str = "ruledoc.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct RuledocConfig {
    pub scan: ScanConfig,
    pub render: RenderConfig,
    pub batch: BatchConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScanConfig {
    pub default_severity: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    /// Registry name of the formatter used when none is requested.
    pub format: String,
    pub error_color: String,
    pub warn_color: String,
}

/// Directory mode: which files to pick up and how to name their output.
#[derive(Debug, Clone, Deserialize)]
pub struct BatchConfig {
    pub ruleset_suffix: String,
    pub output_suffix: String,
}

impl RuledocConfig {
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            default_severity: self.scan.default_severity.clone(),
        }
    }

    pub fn palette(&self) -> SeverityPalette {
        SeverityPalette {
            error: self.render.error_color.clone(),
            warn: self.render.warn_color.clone(),
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

    /// Layer `RULEDOC_*` environment variables.
    pub fn with_env(mut self) -> Self {
        let source = Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__");
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (`--set key=value` on the CLI).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<RuledocConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<RuledocConfig, ConfigError> {
    Loader::new().build()
}

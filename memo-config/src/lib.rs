//! Shared configuration loader for memo-clip.
//!
//! `defaults/memo-clip.default.toml` is embedded into every binary so that docs
//! and runtime behavior stay in sync. Applications layer user-specific files on
//! top of those defaults via [`Loader`] before deserializing into [`ClipConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use memo_clip::relay::ClipSettings;
use memo_clip::{ConvertOptions, ListNumbering};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

const DEFAULT_TOML: &str = include_str!("../defaults/memo-clip.default.toml");

/// Top-level configuration consumed by memo-clip applications.
#[derive(Debug, Clone, Deserialize)]
pub struct ClipConfig {
    pub capture: CaptureConfig,
    pub convert: ConvertConfig,
    pub log: LogConfig,
}

/// How the clipper talks to the page.
#[derive(Debug, Clone, Deserialize)]
pub struct CaptureConfig {
    pub preserve_formatting: bool,
    pub response_timeout_ms: u64,
    pub restricted_schemes: Vec<String>,
}

impl From<&CaptureConfig> for ClipSettings {
    fn from(config: &CaptureConfig) -> Self {
        ClipSettings {
            preserve_formatting: config.preserve_formatting,
            response_timeout: Duration::from_millis(config.response_timeout_ms),
            restricted_schemes: config.restricted_schemes.clone(),
        }
    }
}

/// Mirrors the knobs exposed by the converter.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub list_numbering: ListNumbering,
    pub escape_text: bool,
    pub extended_styles: bool,
}

impl From<&ConvertConfig> for ConvertOptions {
    fn from(config: &ConvertConfig) -> Self {
        ConvertOptions {
            list_numbering: config.list_numbering,
            escape_text: config.escape_text,
            extended_styles: config.extended_styles,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    pub level: String,
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
    pub fn build(self) -> Result<ClipConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<ClipConfig, ConfigError> {
    Loader::new().build()
}

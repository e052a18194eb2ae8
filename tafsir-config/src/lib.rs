//! Shared configuration loader for the tafsir converter.
//!
//! `defaults/tafsir.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`TafsirConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;
use tafsir_core::{
    ConvertOptions, Copyright, EmitOptions, HtmlOptions, ParseOptions, RecordTemplate,
    SourceOptions,
};

const DEFAULT_TOML: &str = include_str!("../defaults/tafsir.default.toml");

/// File picked up from the working directory when present.
pub const LOCAL_CONFIG_FILE: &str = "tafsir.toml";

/// Top-level configuration consumed by the converter.
#[derive(Debug, Clone, Deserialize)]
pub struct TafsirConfig {
    pub source: SourceConfig,
    pub output: OutputConfig,
    pub html: HtmlConfig,
    pub copyright: CopyrightConfig,
}

/// Input naming and line recognition.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    pub file_prefix: String,
    pub file_extension: String,
    pub revelation_prefixes: Vec<String>,
    pub verse_count_units: Vec<String>,
    /// Empty string disables running-header removal.
    pub running_header: String,
    pub keep_introduction: bool,
}

/// Record constants and output naming.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub key: String,
    pub name: String,
    pub version: String,
    pub chapter_file_prefix: String,
    pub complete_file: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HtmlConfig {
    pub heading_prefix: String,
    pub chapter_metadata: bool,
    pub revelation_label: String,
    pub verse_count_unit: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CopyrightConfig {
    pub author: String,
    pub publisher: String,
    pub edition: String,
    pub title: String,
}

impl From<&SourceConfig> for SourceOptions {
    fn from(config: &SourceConfig) -> Self {
        SourceOptions {
            file_prefix: config.file_prefix.clone(),
            file_extension: config.file_extension.trim_start_matches('.').to_string(),
        }
    }
}

impl From<&SourceConfig> for ParseOptions {
    fn from(config: &SourceConfig) -> Self {
        let running_header = config.running_header.trim();
        ParseOptions {
            revelation_prefixes: config.revelation_prefixes.clone(),
            verse_count_units: config.verse_count_units.clone(),
            running_header: (!running_header.is_empty()).then(|| running_header.to_string()),
            keep_introduction: config.keep_introduction,
        }
    }
}

impl From<&OutputConfig> for EmitOptions {
    fn from(config: &OutputConfig) -> Self {
        EmitOptions {
            chapter_file_prefix: config.chapter_file_prefix.clone(),
            complete_file: config.complete_file.clone(),
        }
    }
}

impl From<&HtmlConfig> for HtmlOptions {
    fn from(config: &HtmlConfig) -> Self {
        HtmlOptions {
            heading_prefix: config.heading_prefix.clone(),
            chapter_metadata: config.chapter_metadata,
            revelation_label: config.revelation_label.clone(),
            verse_count_unit: config.verse_count_unit.clone(),
        }
    }
}

impl From<CopyrightConfig> for Copyright {
    fn from(config: CopyrightConfig) -> Self {
        Copyright {
            author: config.author,
            publisher: config.publisher,
            edition: config.edition,
            title: config.title,
        }
    }
}

impl TafsirConfig {
    /// Constant fields for every record of a run.
    pub fn record_template(&self) -> RecordTemplate {
        RecordTemplate {
            key: self.output.key.clone(),
            name: self.output.name.clone(),
            version: self.output.version.clone(),
            copyright: self.copyright.clone().into(),
        }
    }

    pub fn emit_options(&self) -> EmitOptions {
        (&self.output).into()
    }

    /// Everything a conversion run needs.
    pub fn convert_options(&self) -> ConvertOptions {
        ConvertOptions {
            source: (&self.source).into(),
            parse: (&self.source).into(),
            html: (&self.html).into(),
            emit: self.emit_options(),
            template: self.record_template(),
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
    pub fn build(self) -> Result<TafsirConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<TafsirConfig, ConfigError> {
    Loader::new().build()
}

//! Shared configuration loader for the lilex tools.
//!
//! `defaults/lilex.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`LilexConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use lilex_parser::FormatRules;
use serde::Deserialize;
use std::path::Path;

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/lilex.default.toml");

/// Top-level configuration consumed by lilex applications.
#[derive(Debug, Clone, Deserialize)]
pub struct LilexConfig {
    /// Text conventions of the lexicon, handed to the parser as is.
    pub format: FormatRules,
    pub output: OutputConfig,
    pub diagnostics: DiagnosticsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Name of the default renderer
    pub format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiagnosticsConfig {
    pub log: bool,
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

    /// Apply a single key/value override, e.g. `("output.format", "js")`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<LilexConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<LilexConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.output.format, "json");
        assert!(config.diagnostics.log);
    }

    #[test]
    fn embedded_format_defaults_match_parser_defaults() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.format, FormatRules::default());
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("output.format", "js")
            .expect("override to apply")
            .set_override("format.separator_min_len", 40i64)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.output.format, "js");
        assert_eq!(config.format.separator_min_len, 40);
    }

    #[test]
    fn layers_user_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(
            file,
            "[format]\nreference_delimiters = \"[]\"\nseparator_min_len = 30\n\n[diagnostics]\nlog = false"
        )
        .expect("write config");

        let config = Loader::new()
            .with_file(file.path())
            .build()
            .expect("config to build");
        assert_eq!(config.format.reference_delimiters, "[]");
        assert_eq!(config.format.separator_min_len, 30);
        assert_eq!(config.format.separator_char, "-");
        assert!(!config.diagnostics.log);
    }

    #[test]
    fn missing_required_file_is_an_error() {
        let result = Loader::new().with_file("/nonexistent/lilex.toml").build();
        assert!(result.is_err());
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let config = Loader::new()
            .with_optional_file("/nonexistent/lilex.toml")
            .build()
            .expect("config to build");
        assert_eq!(config.output.format, "json");
    }
}

//! Parser configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// Options for the update parser.
///
/// ```toml
/// group_grid_lines = true
/// inline_image_urls = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Record which spans of a grid content event came from which line.
    pub group_grid_lines: bool,

    /// Fall back to a span's own `url` when the resolver knows no URL.
    pub inline_image_urls: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            group_grid_lines: true,
            inline_image_urls: false,
        }
    }
}

impl ParserConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from TOML text. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn with_group_grid_lines(mut self, group: bool) -> Self {
        self.group_grid_lines = group;
        self
    }

    pub fn with_inline_image_urls(mut self, inline: bool) -> Self {
        self.inline_image_urls = inline;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ParserConfig::default();
        assert!(config.group_grid_lines);
        assert!(!config.inline_image_urls);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ParserConfig::from_toml_str("inline_image_urls = true").unwrap();
        assert!(config.group_grid_lines);
        assert!(config.inline_image_urls);
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(ParserConfig::from_toml_str("").unwrap(), ParserConfig::default());
    }

    #[test]
    fn test_invalid_toml() {
        let err = ParserConfig::from_toml_str("group_grid_lines = \"sometimes\"").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = ParserConfig::load("/nonexistent/glk_events.toml").unwrap_err();
        match err {
            ConfigError::Io { path, .. } => assert!(path.ends_with("glk_events.toml")),
            other => panic!("expected io error, got {:?}", other),
        }
    }

    #[test]
    fn test_builder() {
        let config = ParserConfig::new()
            .with_group_grid_lines(false)
            .with_inline_image_urls(true);
        assert!(!config.group_grid_lines);
        assert!(config.inline_image_urls);
    }
}

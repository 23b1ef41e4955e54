//! Configuration types for road-style.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::layer::LayerTemplate;

/// Top-level configuration for road-style.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Palette to use (e.g., "classic", "muted", or a custom palette).
    #[serde(default)]
    pub palette: Option<String>,

    /// Style name written into the generated stylesheet.
    #[serde(default)]
    pub name: Option<String>,

    /// Whether fill/casing layers apply each road class's own filter.
    #[serde(default)]
    pub class_scope: ClassScope,

    /// Start each road class at its own minimum zoom instead of zoom 4.
    #[serde(default)]
    pub tiered_zoom: bool,

    /// Road classes to generate (if empty, all built-in classes).
    #[serde(default)]
    pub classes: Vec<String>,

    /// Tile source configuration.
    #[serde(default)]
    pub source: SourceConfig,
}

impl Config {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Palette name, defaulting to "classic".
    #[must_use]
    pub fn palette_name(&self) -> &str {
        self.palette.as_deref().unwrap_or(DEFAULT_PALETTE)
    }

    /// Style name, defaulting to "roads".
    #[must_use]
    pub fn style_name(&self) -> &str {
        self.name.as_deref().unwrap_or("roads")
    }

    /// The line-layer template every road layer is cloned from.
    #[must_use]
    pub fn layer_template(&self) -> LayerTemplate {
        let template = LayerTemplate::line(self.source.name.clone());
        match &self.source.layer {
            Some(layer) => template.with_source_layer(layer.clone()),
            None => template,
        }
    }
}

/// Palette used when none is configured.
pub const DEFAULT_PALETTE: &str = "classic";

/// Whether road entities narrow their layers to their own class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClassScope {
    /// Every entity's fill/casing covers all road classes (allowlist + brunnel only).
    #[default]
    Shared,
    /// Each entity's fill/casing also applies the entity's class filter.
    PerClass,
}

/// Tile source configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SourceConfig {
    /// Source id referenced by layers (default: "openmaptiles").
    #[serde(default = "default_source_name")]
    pub name: String,

    /// Vector tile layer holding road features (default: "transportation").
    #[serde(default = "default_source_layer")]
    pub layer: Option<String>,

    /// `TileJSON` URL written into the stylesheet's source definition.
    #[serde(default)]
    pub url: Option<String>,

    /// Maximum zoom for generated layers (default: 20).
    #[serde(default = "default_max_zoom")]
    pub max_zoom: u8,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            name: default_source_name(),
            layer: default_source_layer(),
            url: None,
            max_zoom: default_max_zoom(),
        }
    }
}

fn default_source_name() -> String {
    "openmaptiles".to_string()
}

#[allow(clippy::unnecessary_wraps)]
fn default_source_layer() -> Option<String> {
    Some("transportation".to_string())
}

fn default_max_zoom() -> u8 {
    LayerTemplate::DEFAULT_MAX_ZOOM
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.palette_name(), "classic");
        assert_eq!(config.style_name(), "roads");
        assert_eq!(config.class_scope, ClassScope::Shared);
        assert!(!config.tiered_zoom);
        assert_eq!(config.source.name, "openmaptiles");
        assert_eq!(config.source.layer.as_deref(), Some("transportation"));
        assert_eq!(config.source.max_zoom, 20);
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
palette = "muted"
name = "night-roads"
class-scope = "per-class"
tiered-zoom = true
classes = ["motorway", "tunnel"]

[source]
name = "tiles"
url = "https://example.com/tiles.json"
max-zoom = 18

[[palettes]]
name = "ignored-here"
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert_eq!(config.palette_name(), "muted");
        assert_eq!(config.style_name(), "night-roads");
        assert_eq!(config.class_scope, ClassScope::PerClass);
        assert!(config.tiered_zoom);
        assert_eq!(config.classes, vec!["motorway", "tunnel"]);
        assert_eq!(config.source.name, "tiles");
        assert_eq!(config.source.layer.as_deref(), Some("transportation"));
        assert_eq!(config.source.max_zoom, 18);

        let template = config.layer_template();
        assert_eq!(template.source, "tiles");
        assert_eq!(template.source_layer.as_deref(), Some("transportation"));
    }

    #[test]
    fn test_parse_error() {
        let err = Config::parse("palette = [").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}

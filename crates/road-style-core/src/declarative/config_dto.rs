//! TOML deserialization types (DTO layer).
//!
//! These types exist solely for serde deserialization.
//! They are converted to domain model types via the loader.

use serde::Deserialize;

/// Raw TOML representation of declarative palettes.
///
/// Extends the base `Config` with `[[palettes]]` sections.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeclarativeConfigDto {
    /// Custom palette definitions.
    #[serde(rename = "palettes", default)]
    pub palettes: Vec<PaletteDto>,
}

/// TOML representation of a custom palette.
///
/// Every colour is optional when `base` is set; unset colours are
/// inherited from the base palette.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PaletteDto {
    /// Palette name (e.g., "night").
    pub name: String,
    /// Palette to inherit unset colours from.
    #[serde(default)]
    pub base: Option<String>,
    /// Motorway colour.
    #[serde(default)]
    pub motorway: Option<String>,
    /// Trunk colour.
    #[serde(default)]
    pub trunk: Option<String>,
    /// Primary colour.
    #[serde(default)]
    pub primary: Option<String>,
    /// Secondary colour.
    #[serde(default)]
    pub secondary: Option<String>,
    /// Tertiary colour.
    #[serde(default)]
    pub tertiary: Option<String>,
    /// Minor road colour.
    #[serde(default)]
    pub minor: Option<String>,
    /// Busway colour.
    #[serde(default)]
    pub busway: Option<String>,
    /// Service road colour.
    #[serde(default)]
    pub service: Option<String>,
    /// Muted service road colour.
    #[serde(default)]
    pub service_muted: Option<String>,
    /// Toll road colour.
    #[serde(default)]
    pub toll: Option<String>,
    /// Fallback colour.
    #[serde(default)]
    pub fallback: Option<String>,
    /// Casing colour, or "reuse-fill".
    #[serde(default)]
    pub casing: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_empty() {
        let dto: DeclarativeConfigDto = toml::from_str("").unwrap();
        assert!(dto.palettes.is_empty());
    }

    #[test]
    fn deserialize_palettes() {
        let toml_str = r##"
palette = "night"

[[palettes]]
name = "night"
base = "muted"
motorway = "#ff8800"
service-muted = "#333"
casing = "#111111"

[[palettes]]
name = "print"
base = "classic"
casing = "reuse-fill"
"##;
        let dto: DeclarativeConfigDto = toml::from_str(toml_str).unwrap();
        assert_eq!(dto.palettes.len(), 2);
        assert_eq!(dto.palettes[0].base.as_deref(), Some("muted"));
        assert_eq!(dto.palettes[0].service_muted.as_deref(), Some("#333"));
        assert!(dto.palettes[0].trunk.is_none());
        assert_eq!(dto.palettes[1].casing.as_deref(), Some("reuse-fill"));
    }
}

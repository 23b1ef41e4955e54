//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r##"# road-style configuration

# Palette: "classic", "muted", or one defined below
palette = "classic"

# Style name written into the stylesheet
name = "roads"

# "shared": every class draws all roads (allowlist + bridge/tunnel mode only)
# "per-class": each class also applies its own filter
class-scope = "shared"

# Start each class at its own minimum zoom instead of zoom 4
tiered-zoom = false

# Road classes to generate (empty: all, see `road-style list-classes`)
classes = []

[source]
name = "openmaptiles"
layer = "transportation"
# url = "https://example.com/tiles.json"
max-zoom = 20

# Custom palettes inherit unset colours from `base`
# [[palettes]]
# name = "night"
# base = "muted"
# motorway = "#ff8800"
# casing = "#111111"   # or "reuse-fill"
"##;

const CONFIG_FILE: &str = "road-style.toml";

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    write_config(Path::new(CONFIG_FILE), force)?;

    println!("Created {CONFIG_FILE}");
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE} to pick a palette and classes");
    println!("  2. Run: road-style generate > style.json");

    Ok(())
}

fn write_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }
    std::fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use road_style_core::declarative::load_palettes_from_toml;
    use road_style_core::{ClassScope, Config};
    use road_style_roads::builtin_palettes;
    use tempfile::TempDir;

    #[test]
    fn starter_config_is_valid() {
        let config = Config::parse(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.palette_name(), "classic");
        assert_eq!(config.class_scope, ClassScope::Shared);
        assert!(config.classes.is_empty());

        let palettes = load_palettes_from_toml(DEFAULT_CONFIG, &builtin_palettes()).unwrap();
        assert_eq!(palettes.len(), 2);
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE);
        std::fs::write(&path, "palette = \"muted\"\n").unwrap();

        assert!(write_config(&path, false).is_err());
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "palette = \"muted\"\n"
        );

        write_config(&path, true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);
    }
}

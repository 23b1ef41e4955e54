//! Eval command implementation.

use anyhow::{Context, Result};
use road_style_core::{Feature, Palette};
use road_style_roads::{build_from_config, Stylesheet};

use crate::config_resolver::ConfigSource;

/// How a feature is drawn at one zoom level.
#[derive(Debug, PartialEq)]
struct Evaluation {
    fill: String,
    casing: String,
    layers: Vec<String>,
}

fn evaluate(style: &Stylesheet, palette: &Palette, feature: &Feature, zoom: f64) -> Evaluation {
    Evaluation {
        fill: palette.color_for(feature),
        casing: palette.casing_color_for(feature),
        layers: style
            .matching_layers(feature, zoom)
            .into_iter()
            .map(|l| l.id.clone())
            .collect(),
    }
}

/// Runs the eval command.
pub fn run(
    source: &ConfigSource,
    feature: &str,
    zoom: f64,
    palette: Option<String>,
) -> Result<()> {
    let mut settings = source.load()?;
    if palette.is_some() {
        settings.config.palette = palette;
    }

    let feature = Feature::from_json_str(feature).context("Invalid feature")?;
    let style = build_from_config(&settings.config, &settings.palettes)
        .context("Failed to build stylesheet")?;
    let palette = settings
        .palettes
        .get(settings.config.palette_name())
        .with_context(|| format!("Unknown palette: {}", settings.config.palette_name()))?;

    let result = evaluate(&style, palette, &feature, zoom);

    println!("Feature class: {}", feature.class);
    println!("Palette:       {}", palette.name());
    println!("Fill colour:   {}", result.fill);
    println!("Casing colour: {}", result.casing);
    if result.layers.is_empty() {
        println!("\nNo layer draws this feature at zoom {zoom}");
    } else {
        println!("\nLayers at zoom {zoom}:");
        for id in &result.layers {
            println!("  {id}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use road_style_core::{ClassScope, Config};
    use road_style_roads::{builtin_palettes, Preset};

    fn per_class_style() -> Stylesheet {
        let config = Config {
            class_scope: ClassScope::PerClass,
            ..Config::default()
        };
        build_from_config(&config, &builtin_palettes()).unwrap()
    }

    #[test]
    fn at_grade_motorway() {
        let palette = Preset::Classic.palette();
        let feature = Feature::from_json_str(r#"{"class":"motorway"}"#).unwrap();
        let result = evaluate(&per_class_style(), &palette, &feature, 12.0);

        assert_eq!(result.fill, palette.colors().motorway.as_str());
        assert_eq!(result.casing, result.fill);
        assert!(result.layers.contains(&"road_motorway_fill".to_string()));
        assert!(result.layers.contains(&"road_motorway_casing".to_string()));
        assert!(!result.layers.iter().any(|id| id.starts_with("road_tunnel")));
    }

    #[test]
    fn tunnelled_motorway() {
        let palette = Preset::Classic.palette();
        let feature =
            Feature::from_json_str(r#"{"class":"motorway","brunnel":"tunnel"}"#).unwrap();
        let result = evaluate(&per_class_style(), &palette, &feature, 12.0);

        assert_eq!(result.layers, vec!["road_tunnel_casing", "road_tunnel_fill"]);
    }

    #[test]
    fn float_attributes_are_accepted() {
        let palette = Preset::Classic.palette();
        let feature =
            Feature::from_json_str(r#"{"class":"motorway","toll":1.0,"layer":-1.0,"ramp":0.0}"#)
                .unwrap();
        let result = evaluate(&per_class_style(), &palette, &feature, 12.0);
        assert_eq!(result.fill, palette.colors().motorway.as_str());
        assert!(result.layers.contains(&"road_motorway_fill".to_string()));
    }

    #[test]
    fn outside_zoom_range() {
        let palette = Preset::Muted.palette();
        let feature = Feature::new("primary");
        let result = evaluate(&per_class_style(), &palette, &feature, 2.0);
        assert!(result.layers.is_empty());
        assert_eq!(result.casing, "hsl(0, 0%, 70%)");
    }
}

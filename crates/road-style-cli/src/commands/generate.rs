//! Generate command implementation.

use anyhow::{bail, Context, Result};
use road_style_roads::{build_from_config, RoadClass};

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Runs the generate command.
pub fn run(
    source: &ConfigSource,
    palette: Option<String>,
    classes: &[String],
    format: OutputFormat,
) -> Result<()> {
    let mut settings = source.load()?;

    if palette.is_some() {
        settings.config.palette = palette;
    }
    if !classes.is_empty() {
        let known = filter_classes(classes);
        if known.is_empty() {
            bail!("None of the requested classes exist. Run `road-style list-classes`.");
        }
        settings.config.classes = known;
    }

    let style = build_from_config(&settings.config, &settings.palettes)
        .context("Failed to build stylesheet")?;

    tracing::info!(
        "Generated {} layers with palette {}",
        style.layers.len(),
        settings.config.palette_name()
    );

    super::output::print(&style, format)
}

/// Keeps known class names, warning about the rest.
fn filter_classes(names: &[String]) -> Vec<String> {
    names
        .iter()
        .map(|n| n.trim())
        .filter(|n| {
            let known = RoadClass::from_name(n).is_some();
            if !known {
                tracing::warn!("Unknown road class: {}", n);
            }
            known
        })
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_classes_are_dropped() {
        let names = vec![
            "motorway".to_string(),
            "footway".to_string(),
            " tunnel ".to_string(),
        ];
        assert_eq!(filter_classes(&names), vec!["motorway", "tunnel"]);
    }
}

//! Stylesheet output formatting.

use anyhow::Result;
use road_style_roads::Stylesheet;

use crate::OutputFormat;

/// Renders a stylesheet in the requested format.
pub fn render(style: &Stylesheet, format: OutputFormat) -> Result<String> {
    let text = match format {
        OutputFormat::Json => serde_json::to_string_pretty(style)?,
        OutputFormat::Compact => serde_json::to_string(style)?,
    };
    Ok(text)
}

/// Prints a stylesheet to stdout.
pub fn print(style: &Stylesheet, format: OutputFormat) -> Result<()> {
    println!("{}", render(style, format)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use road_style_core::Config;
    use road_style_roads::{build_from_config, builtin_palettes};

    #[test]
    fn compact_is_single_line() {
        let config = Config {
            classes: vec!["motorway".to_string()],
            ..Config::default()
        };
        let style = build_from_config(&config, &builtin_palettes()).unwrap();

        let compact = render(&style, OutputFormat::Compact).unwrap();
        assert!(!compact.contains('\n'));
        let pretty = render(&style, OutputFormat::Json).unwrap();
        assert!(pretty.lines().count() > 1);

        let a: serde_json::Value = serde_json::from_str(&compact).unwrap();
        let b: serde_json::Value = serde_json::from_str(&pretty).unwrap();
        assert_eq!(a, b);
    }
}

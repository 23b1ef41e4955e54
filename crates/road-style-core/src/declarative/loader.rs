//! DTO → Domain model conversion with validation.

use miette::Diagnostic;

use super::config_dto::{DeclarativeConfigDto, PaletteDto};
use super::model::{CasingColor, Color, ModelError, PaletteName, PaletteRegistry};
use crate::palette::{Palette, RoadColors};

/// Casing value selecting [`CasingColor::ReuseFill`].
pub const REUSE_FILL: &str = "reuse-fill";

/// Errors during DTO → Domain conversion.
#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum LoadError {
    /// A field-level validation error.
    #[error("{context}: {source}")]
    #[diagnostic(code(road_style::palette::invalid))]
    Validation {
        /// Where the error occurred (e.g., "palettes[0].motorway").
        context: String,
        /// The underlying model error.
        source: ModelError,
    },

    /// `base` names a palette that is not defined (yet).
    #[error("palette `{palette}`: unknown base palette `{base}`")]
    #[diagnostic(
        code(road_style::palette::unknown_base),
        help("a base must be a built-in palette or one defined earlier in the file")
    )]
    UnknownBase {
        /// The palette being defined.
        palette: String,
        /// The missing base.
        base: String,
    },

    /// A colour is unset and there is no base to inherit it from.
    #[error("palette `{palette}`: missing colour `{field}`")]
    #[diagnostic(
        code(road_style::palette::missing_color),
        help("set `base` to inherit unset colours, or define every colour")
    )]
    MissingColor {
        /// The palette being defined.
        palette: String,
        /// The unset field.
        field: &'static str,
    },

    /// Registration failed (duplicate name).
    #[error("{0}")]
    #[diagnostic(code(road_style::palette::duplicate))]
    Registry(ModelError),
}

/// Converts a `DeclarativeConfigDto` into a registry extending `base`.
///
/// Palettes are loaded in file order, so a palette may inherit from one
/// defined above it.
///
/// # Errors
///
/// Returns the first error encountered during conversion.
pub fn load(
    dto: DeclarativeConfigDto,
    base: &PaletteRegistry,
) -> Result<PaletteRegistry, LoadError> {
    let mut registry = base.clone();
    for (index, palette) in dto.palettes.into_iter().enumerate() {
        let palette = convert_palette(palette, index, &registry)?;
        tracing::debug!(palette = %palette.name(), "loaded custom palette");
        registry.insert(palette).map_err(LoadError::Registry)?;
    }
    Ok(registry)
}

fn convert_palette(
    dto: PaletteDto,
    index: usize,
    registry: &PaletteRegistry,
) -> Result<Palette, LoadError> {
    let ctx = format!("palettes[{index}]");
    let name = PaletteName::new(&dto.name).map_err(|e| LoadError::Validation {
        context: format!("{ctx}.name"),
        source: e,
    })?;

    let parent = match &dto.base {
        Some(base) => Some(registry.get(base).ok_or_else(|| LoadError::UnknownBase {
            palette: dto.name.clone(),
            base: base.clone(),
        })?),
        None => None,
    };

    let pick = |field: &'static str,
                value: Option<&String>,
                inherited: Option<&Color>|
     -> Result<Color, LoadError> {
        match (value, inherited) {
            (Some(v), _) => Color::new(v).map_err(|e| LoadError::Validation {
                context: format!("{ctx}.{field}"),
                source: e,
            }),
            (None, Some(c)) => Ok(c.clone()),
            (None, None) => Err(LoadError::MissingColor {
                palette: dto.name.clone(),
                field,
            }),
        }
    };
    let from_parent = |f: fn(&RoadColors) -> &Color| parent.map(|p| f(p.colors()));

    let colors = RoadColors {
        motorway: pick("motorway", dto.motorway.as_ref(), from_parent(|c| &c.motorway))?,
        trunk: pick("trunk", dto.trunk.as_ref(), from_parent(|c| &c.trunk))?,
        primary: pick("primary", dto.primary.as_ref(), from_parent(|c| &c.primary))?,
        secondary: pick(
            "secondary",
            dto.secondary.as_ref(),
            from_parent(|c| &c.secondary),
        )?,
        tertiary: pick("tertiary", dto.tertiary.as_ref(), from_parent(|c| &c.tertiary))?,
        minor: pick("minor", dto.minor.as_ref(), from_parent(|c| &c.minor))?,
        busway: pick("busway", dto.busway.as_ref(), from_parent(|c| &c.busway))?,
        service: pick("service", dto.service.as_ref(), from_parent(|c| &c.service))?,
        service_muted: pick(
            "service-muted",
            dto.service_muted.as_ref(),
            from_parent(|c| &c.service_muted),
        )?,
        toll: pick("toll", dto.toll.as_ref(), from_parent(|c| &c.toll))?,
        fallback: pick("fallback", dto.fallback.as_ref(), from_parent(|c| &c.fallback))?,
    };

    let casing = match dto.casing.as_deref() {
        Some(REUSE_FILL) => CasingColor::ReuseFill,
        Some(value) => CasingColor::Fixed(Color::new(value).map_err(|e| {
            LoadError::Validation {
                context: format!("{ctx}.casing"),
                source: e,
            }
        })?),
        None => parent.map_or(CasingColor::ReuseFill, |p| p.casing().clone()),
    };

    Ok(Palette::new(name, colors, casing))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_registry() -> PaletteRegistry {
        let dto: DeclarativeConfigDto = toml::from_str(FULL).unwrap();
        load(dto, &PaletteRegistry::new()).unwrap()
    }

    const FULL: &str = r##"
[[palettes]]
name = "base"
motorway = "#e892a2"
trunk = "#f9b29c"
primary = "#fcd6a4"
secondary = "#f7fabf"
tertiary = "#ffffff"
minor = "#ffffff"
busway = "#ff70d2"
service = "#ffffff"
service-muted = "#cccccc"
toll = "#ffe082"
fallback = "#888888"
casing = "#999999"
"##;

    #[test]
    fn full_palette_loads() {
        let registry = base_registry();
        let p = registry.get("base").unwrap();
        assert_eq!(p.colors().busway.as_str(), "#ff70d2");
        assert_eq!(p.casing(), &CasingColor::Fixed(Color::new("#999999").unwrap()));
    }

    #[test]
    fn inherits_unset_colours_from_base() {
        let dto: DeclarativeConfigDto = toml::from_str(
            r##"
[[palettes]]
name = "night"
base = "base"
motorway = "#ff8800"

[[palettes]]
name = "night-print"
base = "night"
casing = "reuse-fill"
"##,
        )
        .unwrap();
        let registry = load(dto, &base_registry()).unwrap();
        assert_eq!(registry.len(), 3);

        let night = registry.get("night").unwrap();
        assert_eq!(night.colors().motorway.as_str(), "#ff8800");
        assert_eq!(night.colors().trunk.as_str(), "#f9b29c");
        assert!(matches!(night.casing(), CasingColor::Fixed(_)));

        let print = registry.get("night-print").unwrap();
        assert_eq!(print.colors().motorway.as_str(), "#ff8800");
        assert_eq!(print.casing(), &CasingColor::ReuseFill);
    }

    #[test]
    fn missing_colour_without_base() {
        let dto: DeclarativeConfigDto = toml::from_str(
            r##"
[[palettes]]
name = "partial"
motorway = "#ff8800"
"##,
        )
        .unwrap();
        let err = load(dto, &PaletteRegistry::new()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::MissingColor { field: "trunk", .. }
        ));
    }

    #[test]
    fn unknown_base() {
        let dto: DeclarativeConfigDto =
            toml::from_str("[[palettes]]\nname = \"x\"\nbase = \"nope\"\n").unwrap();
        let err = load(dto, &base_registry()).unwrap_err();
        assert!(matches!(err, LoadError::UnknownBase { .. }));
    }

    #[test]
    fn invalid_colour_reports_context() {
        let dto: DeclarativeConfigDto = toml::from_str(
            "[[palettes]]\nname = \"x\"\nbase = \"base\"\ntoll = \"#zz\"\n",
        )
        .unwrap();
        let err = load(dto, &base_registry()).unwrap_err();
        assert_eq!(err.to_string(), "palettes[0].toll: invalid colour `#zz`");
    }

    #[test]
    fn duplicate_name_rejected() {
        let dto: DeclarativeConfigDto =
            toml::from_str("[[palettes]]\nname = \"base\"\nbase = \"base\"\n").unwrap();
        let err = load(dto, &base_registry()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Registry(ModelError::DuplicatePalette { .. })
        ));
    }
}

//! Built-in palette presets.

use road_style_core::{CasingColor, Color, Palette, PaletteName, PaletteRegistry, RoadColors};

/// Built-in palette variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Hue-based palette; casings reuse the fill colour.
    Classic,
    /// Desaturated palette with plain grey casings.
    Muted,
}

impl Preset {
    /// All presets.
    pub const ALL: [Preset; 2] = [Self::Classic, Self::Muted];

    /// Preset name used in configuration.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Muted => "muted",
        }
    }

    /// Looks up a preset by name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    /// Returns the palette for this preset.
    #[must_use]
    pub fn palette(self) -> Palette {
        match self {
            Self::Classic => classic(),
            Self::Muted => muted(),
        }
    }
}

/// Returns a registry holding every preset palette.
#[must_use]
pub fn builtin_palettes() -> PaletteRegistry {
    let mut registry = PaletteRegistry::new();
    for preset in Preset::ALL {
        // Preset names are distinct, so registration cannot collide.
        if let Err(e) = registry.insert(preset.palette()) {
            tracing::warn!("skipping preset palette: {e}");
        }
    }
    registry
}

/// Hue-based palette.
///
/// Non-special roads share hue 0, toll roads use hue 48, busways hue 322.
/// Tertiary roads keep a pale yellow-green exception colour.
fn classic() -> Palette {
    Palette::new(
        PaletteName::from_static(Preset::Classic.name()),
        RoadColors {
            motorway: Color::from_static("hsl(0, 50%, 80%)"),
            trunk: Color::from_static("hsl(0, 50%, 70%)"),
            primary: Color::from_static("hsl(0, 40%, 85%)"),
            secondary: Color::from_static("hsl(0, 30%, 90%)"),
            tertiary: Color::from_static("hsl(72, 71%, 92%)"),
            minor: Color::from_static("hsl(0, 0%, 100%)"),
            busway: Color::from_static("hsl(322, 60%, 70%)"),
            service: Color::from_static("#DECDAB"),
            service_muted: Color::from_static("#ccc"),
            toll: Color::from_static("hsl(48, 60%, 70%)"),
            fallback: Color::from_static("hsl(0, 0%, 0%)"),
        },
        CasingColor::ReuseFill,
    )
}

fn muted() -> Palette {
    Palette::new(
        PaletteName::from_static(Preset::Muted.name()),
        RoadColors {
            motorway: Color::from_static("#e892a2"),
            trunk: Color::from_static("#f9b29c"),
            primary: Color::from_static("#fcd6a4"),
            secondary: Color::from_static("#f7fabf"),
            tertiary: Color::from_static("#fefee5"),
            minor: Color::from_static("#ffffff"),
            busway: Color::from_static("#f4a6d7"),
            service: Color::from_static("#f6f3ee"),
            service_muted: Color::from_static("#e4e0da"),
            toll: Color::from_static("#ffe08a"),
            fallback: Color::from_static("#888888"),
        },
        CasingColor::Fixed(Color::from_static("hsl(0, 0%, 70%)")),
    )
}

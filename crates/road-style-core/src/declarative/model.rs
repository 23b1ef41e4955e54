//! Pure domain model for declarative palettes.
//!
//! This module contains no serde and no I/O dependencies.
//! All invariants are enforced at construction time via validated newtypes.

use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;

use crate::palette::Palette;

// ────────────────────────────────────────────
// Newtypes with validation
// ────────────────────────────────────────────

/// A validated palette name (non-empty, `[a-z0-9-]` only).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PaletteName(String);

impl PaletteName {
    /// Creates a new palette name.
    ///
    /// # Errors
    ///
    /// Returns error if the name is empty or contains invalid characters.
    pub fn new(name: &str) -> Result<Self, ModelError> {
        if name.is_empty() {
            return Err(ModelError::EmptyPaletteName);
        }
        if !name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(ModelError::InvalidPaletteName {
                name: name.to_string(),
            });
        }
        Ok(Self(name.to_string()))
    }

    /// Creates a name known at compile time, for built-in palettes.
    #[must_use]
    pub fn from_static(name: &'static str) -> Self {
        debug_assert!(
            Self::new(name).is_ok(),
            "invalid built-in palette name `{name}`"
        );
        Self(name.to_string())
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for PaletteName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PaletteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated CSS colour string.
///
/// Accepts `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, the functional
/// `rgb()` / `rgba()` / `hsl()` / `hsla()` forms, and bare colour keywords.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Color(String);

impl Color {
    /// Creates a new colour.
    ///
    /// # Errors
    ///
    /// Returns error if the string is empty or not a recognizable CSS colour.
    pub fn new(value: &str) -> Result<Self, ModelError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(ModelError::EmptyColor);
        }
        if !is_css_color(value) {
            return Err(ModelError::InvalidColor {
                value: value.to_string(),
            });
        }
        Ok(Self(value.to_string()))
    }

    /// Creates a colour from a string known at compile time.
    ///
    /// Intended for built-in palettes; validity is only checked in debug
    /// builds.
    #[must_use]
    pub fn from_static(value: &'static str) -> Self {
        debug_assert!(is_css_color(value), "invalid built-in colour `{value}`");
        Self(value.to_string())
    }

    /// Returns the colour as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn is_css_color(value: &str) -> bool {
    if let Some(hex) = value.strip_prefix('#') {
        return matches!(hex.len(), 3 | 4 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit());
    }
    if let Some((func, rest)) = value.split_once('(') {
        return matches!(func, "rgb" | "rgba" | "hsl" | "hsla")
            && rest.ends_with(')')
            && rest.len() > 1;
    }
    value.chars().all(|c| c.is_ascii_alphabetic())
}

/// How a palette colours road casings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CasingColor {
    /// Casings reuse the per-feature fill colour.
    ReuseFill,
    /// Casings use one fixed colour.
    Fixed(Color),
}

// ────────────────────────────────────────────
// Aggregate root
// ────────────────────────────────────────────

/// Named palettes available for style generation.
#[derive(Debug, Clone, Default)]
pub struct PaletteRegistry {
    palettes: BTreeMap<PaletteName, Palette>,
}

impl PaletteRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a palette.
    ///
    /// # Errors
    ///
    /// Returns error if a palette with the same name is already registered.
    pub fn insert(&mut self, palette: Palette) -> Result<(), ModelError> {
        let name = palette.name().clone();
        if self.palettes.contains_key(&name) {
            return Err(ModelError::DuplicatePalette { name });
        }
        self.palettes.insert(name, palette);
        Ok(())
    }

    /// Looks up a palette by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Palette> {
        self.palettes.get(name)
    }

    /// Returns registered palette names in sorted order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.palettes.keys().map(PaletteName::as_str).collect()
    }

    /// Iterates over registered palettes in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Palette> {
        self.palettes.values()
    }

    /// Number of registered palettes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.palettes.len()
    }

    /// Returns `true` if no palettes are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.palettes.is_empty()
    }
}

// ────────────────────────────────────────────
// Errors
// ────────────────────────────────────────────

/// Domain validation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// Palette name is empty.
    #[error("palette name must not be empty")]
    EmptyPaletteName,

    /// Palette name contains invalid characters.
    #[error("invalid palette name `{name}`: must be [a-z0-9-]")]
    InvalidPaletteName {
        /// The invalid name.
        name: String,
    },

    /// Colour is empty.
    #[error("colour must not be empty")]
    EmptyColor,

    /// Colour is not a CSS colour.
    #[error("invalid colour `{value}`")]
    InvalidColor {
        /// The invalid value.
        value: String,
    },

    /// A palette name is registered twice.
    #[error("palette `{name}` is already defined")]
    DuplicatePalette {
        /// The duplicated name.
        name: PaletteName,
    },
}

// ────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────

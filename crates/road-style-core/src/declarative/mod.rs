//! Declarative palettes driven by TOML configuration.
//!
//! This module lets users define colour palettes without writing Rust
//! code, optionally inheriting from the built-in ones.
//!
//! # Architecture
//!
//! ```text
//! TOML text
//!   ↓ serde (DTO layer)
//! config_dto types
//!   ↓ validate + convert
//! Palette (pure domain model)
//!   ↓ load_palettes_from_toml()
//! PaletteRegistry
//! ```

use miette::Diagnostic;

pub mod config_dto;
pub mod loader;
pub mod model;

/// Errors from parsing TOML and loading declarative palettes.
#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum LoadPalettesError {
    /// TOML deserialization failed.
    #[error("TOML parse error: {0}")]
    #[diagnostic(code(road_style::config::toml))]
    Toml(#[from] toml::de::Error),

    /// Domain model validation failed.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Load(#[from] loader::LoadError),
}

/// Parses TOML content and registers its `[[palettes]]` on top of `base`.
///
/// Returns a copy of `base` if no palettes are defined.
///
/// # Errors
///
/// Returns an error if TOML parsing or model validation fails.
pub fn load_palettes_from_toml(
    content: &str,
    base: &model::PaletteRegistry,
) -> Result<model::PaletteRegistry, LoadPalettesError> {
    let dto: config_dto::DeclarativeConfigDto = toml::from_str(content)?;
    Ok(loader::load(dto, base)?)
}

//! Configuration file resolution and loading.
//!
//! The configuration file is picked in this order:
//!
//! 1. `--config` flag (explicit path)
//! 2. `{project}/road-style.toml` or `.road-style.toml`
//! 3. `$ROAD_STYLE_CONFIG_DIR/config.toml`, else `~/.road-style/config.toml`
//! 4. No file: built-in defaults
//!
//! The same file carries both [`Config`] settings and `[[palettes]]`
//! definitions, which are registered on top of the built-in presets.

use anyhow::{bail, Context, Result};
use road_style_core::declarative::load_palettes_from_toml;
use road_style_core::{Config, PaletteRegistry};
use road_style_roads::builtin_palettes;
use std::path::{Path, PathBuf};

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given with `--config`.
    Explicit(PathBuf),
    /// Found in the project directory.
    Project(PathBuf),
    /// Found in the global config directory.
    Global(PathBuf),
    /// Nothing found.
    Default,
}

impl ConfigSource {
    /// Resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Reads the configuration and custom palettes.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read, is not valid TOML, or defines an
    /// invalid palette.
    pub fn load(&self) -> Result<Settings> {
        let Some(path) = self.path() else {
            tracing::debug!("No config file found, using defaults");
            return Ok(Settings {
                config: Config::default(),
                palettes: builtin_palettes(),
            });
        };
        if let Self::Global(p) = self {
            tracing::info!("Using global config: {}", p.display());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config = Config::parse(&content)
            .with_context(|| format!("Failed to load config: {}", path.display()))?;
        let palettes = match load_palettes_from_toml(&content, &builtin_palettes()) {
            Ok(palettes) => palettes,
            Err(e) => {
                let report = miette::Report::new(e);
                bail!("Invalid palettes in {}:\n{report:?}", path.display());
            }
        };
        tracing::debug!(
            path = %path.display(),
            palettes = palettes.len(),
            "Loaded config"
        );
        Ok(Settings { config, palettes })
    }
}

/// Loaded configuration plus every available palette.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Parsed settings.
    pub config: Config,
    /// Built-in and configured palettes.
    pub palettes: PaletteRegistry,
}

const PROJECT_CONFIG_NAMES: &[&str] = &["road-style.toml", ".road-style.toml"];

const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Resolves the configuration file path.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_inner(project_dir, explicit, global_config_dir())
}

/// Takes `global_dir` as a parameter so tests avoid env var races.
fn resolve_inner(
    project_dir: &Path,
    explicit: Option<&Path>,
    global_dir: Option<PathBuf>,
) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    let project = PROJECT_CONFIG_NAMES
        .iter()
        .map(|name| project_dir.join(name))
        .find(|candidate| candidate.exists());
    if let Some(candidate) = project {
        tracing::debug!("Found project config: {}", candidate.display());
        return ConfigSource::Project(candidate);
    }

    match global_dir.map(|dir| dir.join(GLOBAL_CONFIG_NAME)) {
        Some(candidate) if candidate.exists() => {
            tracing::debug!("Found global config: {}", candidate.display());
            ConfigSource::Global(candidate)
        }
        _ => ConfigSource::Default,
    }
}

/// Global config directory: `$ROAD_STYLE_CONFIG_DIR`, else `~/.road-style/`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("ROAD_STYLE_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".road-style"))
}

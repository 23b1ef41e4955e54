//! Stylesheet assembly.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use road_style_core::{Config, Feature, LayerDescriptor, PaletteRegistry};

use crate::classes::RoadClass;
use crate::road::StyleContext;

/// MapLibre style specification version.
pub const STYLE_VERSION: u8 = 8;

/// A source entry in a stylesheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDefinition {
    /// Source type, always "vector" for road tiles.
    #[serde(rename = "type")]
    pub source_type: String,
    /// `TileJSON` URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A generated style document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stylesheet {
    /// Style specification version.
    pub version: u8,
    /// Style name.
    pub name: String,
    /// Sources referenced by the layers.
    pub sources: BTreeMap<String, SourceDefinition>,
    /// Layers in draw order (first is drawn lowest).
    pub layers: Vec<LayerDescriptor>,
}

impl Stylesheet {
    /// Looks up a layer by id.
    #[must_use]
    pub fn layer(&self, id: &str) -> Option<&LayerDescriptor> {
        self.layers.iter().find(|l| l.id == id)
    }

    /// Layers that draw `feature` at `zoom`, in draw order.
    #[must_use]
    pub fn matching_layers(&self, feature: &Feature, zoom: f64) -> Vec<&LayerDescriptor> {
        self.layers
            .iter()
            .filter(|l| l.selects(feature, zoom))
            .collect()
    }
}

/// Builds a stylesheet from road classes.
#[derive(Debug, Clone)]
pub struct StyleBuilder<'a> {
    ctx: StyleContext<'a>,
    classes: Vec<RoadClass>,
    tiered_zoom: bool,
    name: String,
    source_url: Option<String>,
}

impl<'a> StyleBuilder<'a> {
    /// Creates a builder for every built-in class.
    #[must_use]
    pub fn new(ctx: StyleContext<'a>) -> Self {
        Self {
            ctx,
            classes: RoadClass::ALL.to_vec(),
            tiered_zoom: false,
            name: "roads".to_string(),
            source_url: None,
        }
    }

    /// Restricts the stylesheet to `classes`, kept in the given order.
    #[must_use]
    pub fn classes(mut self, classes: impl IntoIterator<Item = RoadClass>) -> Self {
        self.classes = classes.into_iter().collect();
        self
    }

    /// Starts each class at [`RoadClass::min_zoom`] instead of zoom 4.
    #[must_use]
    pub fn tiered_zoom(mut self, tiered: bool) -> Self {
        self.tiered_zoom = tiered;
        self
    }

    /// Sets the style name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the `TileJSON` URL of the road source.
    #[must_use]
    pub fn source_url(mut self, url: Option<String>) -> Self {
        self.source_url = url;
        self
    }

    /// Assembles the stylesheet.
    ///
    /// All casings come before all fills so every fill is drawn above every
    /// casing. Layer ids are `road_<class>_<fill|casing>`.
    #[must_use]
    pub fn build(&self) -> Stylesheet {
        let entities: Vec<_> = self
            .classes
            .iter()
            .map(|c| {
                if self.tiered_zoom {
                    c.tiered_style()
                } else {
                    c.style()
                }
            })
            .collect();

        let casings = entities.iter().map(|e| {
            let layer = e.casing(&self.ctx);
            let id = format!("road_{}_{}", e.name(), layer.id);
            layer.with_id(id)
        });
        let fills = entities.iter().map(|e| {
            let layer = e.fill(&self.ctx);
            let id = format!("road_{}_{}", e.name(), layer.id);
            layer.with_id(id)
        });
        let layers: Vec<_> = casings.chain(fills).collect();

        tracing::debug!(
            palette = %self.ctx.palette.name(),
            classes = self.classes.len(),
            layers = layers.len(),
            "assembled stylesheet"
        );

        let mut sources = BTreeMap::new();
        sources.insert(
            self.ctx.template.source.clone(),
            SourceDefinition {
                source_type: "vector".to_string(),
                url: self.source_url.clone(),
            },
        );

        Stylesheet {
            version: STYLE_VERSION,
            name: self.name.clone(),
            sources,
            layers,
        }
    }
}

/// Errors from building a stylesheet out of configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StyleError {
    /// The configured palette is not registered.
    #[error("unknown palette `{name}` (available: {})", available.join(", "))]
    UnknownPalette {
        /// Requested palette.
        name: String,
        /// Registered palette names.
        available: Vec<String>,
    },

    /// A configured class is not a built-in road class.
    #[error("unknown road class `{0}`")]
    UnknownClass(String),
}

/// Resolves configured class names, keeping configuration order.
///
/// An empty list selects every built-in class.
///
/// # Errors
///
/// Returns an error for names that are not built-in classes.
pub fn resolve_classes(names: &[String]) -> Result<Vec<RoadClass>, StyleError> {
    if names.is_empty() {
        return Ok(RoadClass::ALL.to_vec());
    }
    names
        .iter()
        .map(|n| RoadClass::from_name(n).ok_or_else(|| StyleError::UnknownClass(n.clone())))
        .collect()
}

/// Builds the stylesheet described by `config` using `palettes`.
///
/// # Errors
///
/// Returns an error if the palette or a class name is unknown.
pub fn build_from_config(
    config: &Config,
    palettes: &PaletteRegistry,
) -> Result<Stylesheet, StyleError> {
    let palette_name = config.palette_name();
    let palette = palettes
        .get(palette_name)
        .ok_or_else(|| StyleError::UnknownPalette {
            name: palette_name.to_string(),
            available: palettes.names().into_iter().map(String::from).collect(),
        })?;
    let classes = resolve_classes(&config.classes)?;

    let ctx = StyleContext::new(palette, config.layer_template())
        .class_scope(config.class_scope)
        .max_zoom(config.source.max_zoom);

    Ok(StyleBuilder::new(ctx)
        .classes(classes)
        .tiered_zoom(config.tiered_zoom)
        .name(config.style_name())
        .source_url(config.source.url.clone())
        .build())
}

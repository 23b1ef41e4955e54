//! Style layer descriptors and the layer factory.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::expression::Expression;
use crate::filter::{build_filter, BrunnelMode};
use crate::Feature;

/// Renderer layer type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerType {
    /// Stroked line geometry.
    #[default]
    Line,
}

/// Layout or paint properties keyed by style property name.
pub type Properties = BTreeMap<String, Expression>;

/// A style layer as consumed by the rendering engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerDescriptor {
    /// Layer id, unique within a style.
    pub id: String,
    /// Layer type.
    #[serde(rename = "type")]
    pub layer_type: LayerType,
    /// Source id.
    pub source: String,
    /// Layer within a vector tile source.
    #[serde(
        rename = "source-layer",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub source_layer: Option<String>,
    /// Feature selection predicate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Expression>,
    /// Lowest zoom at which the layer is drawn.
    pub minzoom: u8,
    /// Zoom at which the layer stops being drawn.
    pub maxzoom: u8,
    /// Layout properties.
    #[serde(default)]
    pub layout: Properties,
    /// Paint properties.
    #[serde(default)]
    pub paint: Properties,
}

impl LayerDescriptor {
    /// Returns the descriptor with a different id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Sets a layout property.
    pub fn set_layout(&mut self, key: &str, value: impl Into<Expression>) {
        self.layout.insert(key.to_string(), value.into());
    }

    /// Sets a paint property.
    pub fn set_paint(&mut self, key: &str, value: impl Into<Expression>) {
        self.paint.insert(key.to_string(), value.into());
    }

    /// Looks up a paint property.
    #[must_use]
    pub fn paint_value(&self, key: &str) -> Option<&Expression> {
        self.paint.get(key)
    }

    /// Looks up a layout property.
    #[must_use]
    pub fn layout_value(&self, key: &str) -> Option<&Expression> {
        self.layout.get(key)
    }

    /// Whether the layer draws `feature` at `zoom`.
    ///
    /// The zoom range is `[minzoom, maxzoom)`, as renderers apply it.
    #[must_use]
    pub fn selects(&self, feature: &Feature, zoom: f64) -> bool {
        let in_range = zoom >= f64::from(self.minzoom) && zoom < f64::from(self.maxzoom);
        in_range
            && self
                .filter
                .as_ref()
                .map_or(true, |f| f.matches_at(feature, zoom))
    }

    /// Resolves a paint property for a feature at a zoom level.
    #[must_use]
    pub fn resolve_paint(
        &self,
        key: &str,
        feature: &Feature,
        zoom: f64,
    ) -> Option<serde_json::Value> {
        self.paint.get(key).map(|e| e.evaluate(feature, Some(zoom)))
    }

    /// Checks descriptor invariants the factory does not enforce.
    ///
    /// # Errors
    ///
    /// Returns an error if `minzoom > maxzoom` or the id is empty.
    pub fn validate(&self) -> Result<(), LayerError> {
        if self.id.is_empty() {
            return Err(LayerError::EmptyId);
        }
        if self.minzoom > self.maxzoom {
            return Err(LayerError::ZoomRange {
                id: self.id.clone(),
                minzoom: self.minzoom,
                maxzoom: self.maxzoom,
            });
        }
        Ok(())
    }
}

/// Layer invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayerError {
    /// Zoom range is inverted.
    #[error("layer `{id}`: minzoom {minzoom} exceeds maxzoom {maxzoom}")]
    ZoomRange {
        /// Layer id.
        id: String,
        /// Offending minzoom.
        minzoom: u8,
        /// Offending maxzoom.
        maxzoom: u8,
    },

    /// Layer id is empty.
    #[error("layer id must not be empty")]
    EmptyId,
}

/// Base template cloned into every descriptor the factory produces.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerTemplate {
    /// Layer type.
    pub layer_type: LayerType,
    /// Source id.
    pub source: String,
    /// Layer within the vector tile source.
    pub source_layer: Option<String>,
    /// Layout properties copied into each layer.
    pub layout: Properties,
    /// Paint properties copied into each layer.
    pub paint: Properties,
}

impl LayerTemplate {
    /// Default minimum zoom for road layers.
    pub const DEFAULT_MIN_ZOOM: u8 = 4;
    /// Default maximum zoom for road layers.
    pub const DEFAULT_MAX_ZOOM: u8 = 20;

    /// A line-layer template for `source`.
    #[must_use]
    pub fn line(source: impl Into<String>) -> Self {
        Self {
            layer_type: LayerType::Line,
            source: source.into(),
            source_layer: None,
            layout: Properties::new(),
            paint: Properties::new(),
        }
    }

    /// Sets the source layer.
    #[must_use]
    pub fn with_source_layer(mut self, layer: impl Into<String>) -> Self {
        self.source_layer = Some(layer.into());
        self
    }

    /// Adds a layout property shared by all layers.
    #[must_use]
    pub fn with_layout(mut self, key: &str, value: impl Into<Expression>) -> Self {
        self.layout.insert(key.to_string(), value.into());
        self
    }

    /// Adds a paint property shared by all layers.
    #[must_use]
    pub fn with_paint(mut self, key: &str, value: impl Into<Expression>) -> Self {
        self.paint.insert(key.to_string(), value.into());
        self
    }

    /// Clones the template into an unfiltered descriptor tagged `id`.
    #[must_use]
    pub fn instantiate(&self, id: impl Into<String>) -> LayerDescriptor {
        LayerDescriptor {
            id: id.into(),
            layer_type: self.layer_type,
            source: self.source.clone(),
            source_layer: self.source_layer.clone(),
            filter: None,
            minzoom: Self::DEFAULT_MIN_ZOOM,
            maxzoom: Self::DEFAULT_MAX_ZOOM,
            layout: self.layout.clone(),
            paint: self.paint.clone(),
        }
    }
}

/// Builds a road layer from a template.
///
/// The filter is the road class allowlist combined with `constraint` and
/// the brunnel predicate. Zoom bounds are taken as given; callers keep
/// `minzoom <= maxzoom` (see [`LayerDescriptor::validate`]).
#[must_use]
pub fn make_layer(
    template: &LayerTemplate,
    id: &str,
    constraint: Option<Expression>,
    brunnel: Option<&BrunnelMode>,
    minzoom: u8,
    maxzoom: u8,
) -> LayerDescriptor {
    let mut layer = template.instantiate(id);
    layer.filter = Some(build_filter(constraint, brunnel));
    layer.minzoom = minzoom;
    layer.maxzoom = maxzoom;
    tracing::debug!(
        id,
        minzoom,
        maxzoom,
        brunnel = brunnel.map(ToString::to_string),
        "built road layer"
    );
    layer
}

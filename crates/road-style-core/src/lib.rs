//! # road-style-core
//!
//! Core framework for generating road style layers for MapLibre-compatible
//! vector tile renderers.
//!
//! This crate provides the building blocks the built-in road classes are
//! assembled from. It includes:
//!
//! - [`Expression`] for declarative filters and feature-dependent paint values
//! - [`combine`] and [`build_filter`] for composing road feature filters
//! - [`make_layer`] and [`LayerTemplate`] for producing [`LayerDescriptor`]s
//! - [`Palette`] for the road colour rule table
//!
//! ## Example
//!
//! ```ignore
//! use road_style_core::{make_layer, BrunnelMode, Expression, LayerTemplate};
//!
//! let template = LayerTemplate::line("openmaptiles").with_source_layer("transportation");
//! let layer = make_layer(
//!     &template,
//!     "fill",
//!     Some(Expression::always()),
//!     Some(&BrunnelMode::Surface),
//!     LayerTemplate::DEFAULT_MIN_ZOOM,
//!     LayerTemplate::DEFAULT_MAX_ZOOM,
//! );
//! println!("{}", serde_json::to_string_pretty(&layer)?);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod feature;
mod filter;
mod layer;
mod palette;

/// Declarative style expressions.
pub mod expression;

/// Declarative palettes loaded from TOML.
pub mod declarative;

pub use config::{ClassScope, Config, ConfigError, SourceConfig, DEFAULT_PALETTE};
pub use declarative::model::{CasingColor, Color, ModelError, PaletteName, PaletteRegistry};
pub use expression::{combine, Expression, ExpressionError};
pub use feature::{Feature, FeatureError};
pub use filter::{build_filter, road_class_filter, BrunnelMode, ROAD_CLASSES};
pub use layer::{make_layer, LayerDescriptor, LayerError, LayerTemplate, LayerType, Properties};
pub use palette::{Palette, RoadColors, MUTED_SERVICE_TYPES};

//! # road-style-roads
//!
//! Built-in road classes and palettes for road-style.
//!
//! Every class is a [`RoadStyle`] that produces a fill layer and a wider
//! casing layer drawn beneath it.
//!
//! ## Road Classes
//!
//! | Name | Min zoom | Selects |
//! |------|----------|---------|
//! | `road` | 4 | Every at-grade road |
//! | `motorway` | 5 | Motorways, excluding ramps |
//! | `trunk` | 5 | Trunk roads |
//! | `primary` | 7 | Primary roads |
//! | `secondary` | 9 | Secondary roads |
//! | `tertiary` | 11 | Tertiary roads |
//! | `minor` | 12 | Minor roads |
//! | `busway` | 12 | Busways and bus guideways |
//! | `service` | 13 | Service roads |
//! | `small_service` | 15 | Driveways, parking aisles, emergency access |
//! | `bridge` | 4 | Roads on bridges |
//! | `tunnel` | 4 | Roads in tunnels, dashed casing from z11 |
//!
//! ## Usage
//!
//! ```ignore
//! use road_style_core::LayerTemplate;
//! use road_style_roads::{Preset, RoadClass, StyleBuilder, StyleContext};
//!
//! let palette = Preset::Classic.palette();
//! let ctx = StyleContext::new(&palette, LayerTemplate::line("openmaptiles"));
//! let style = StyleBuilder::new(ctx)
//!     .classes([RoadClass::Motorway, RoadClass::Primary])
//!     .build();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod classes;
mod presets;
mod road;
mod style;

pub use classes::{zoom, RoadClass};
pub use presets::{builtin_palettes, Preset};
pub use road::{
    tunnel_dasharray, RoadStyle, StyleContext, CASING_WIDTH, FILL_WIDTH, LINE_BLUR,
    TUNNEL_DASH_ZOOM,
};
pub use style::{
    build_from_config, resolve_classes, SourceDefinition, StyleBuilder, StyleError, Stylesheet,
    STYLE_VERSION,
};

//! Built-in road classes.

use std::fmt;

use road_style_core::{BrunnelMode, Expression, MUTED_SERVICE_TYPES};

use crate::road::RoadStyle;

/// Minimum zoom levels per road class.
pub mod zoom {
    /// Base layer covering every road class.
    pub const ALL_ROADS: u8 = 4;
    /// Motorways and trunks.
    pub const MOTORWAY_TRUNK: u8 = 5;
    /// Primary roads.
    pub const PRIMARY: u8 = 7;
    /// Secondary roads.
    pub const SECONDARY: u8 = 9;
    /// Tertiary roads.
    pub const TERTIARY: u8 = 11;
    /// Minor roads and busways.
    pub const MINOR: u8 = 12;
    /// Service roads.
    pub const SERVICE: u8 = 13;
    /// Driveways, parking aisles and similar.
    pub const SMALL_SERVICE: u8 = 15;
}

/// A built-in road style entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoadClass {
    /// Every at-grade road.
    Road,
    /// Motorways, excluding ramps.
    Motorway,
    /// Trunk roads.
    Trunk,
    /// Primary roads.
    Primary,
    /// Secondary roads.
    Secondary,
    /// Tertiary roads.
    Tertiary,
    /// Minor roads.
    Minor,
    /// Service roads.
    Service,
    /// Muted service subtypes.
    SmallService,
    /// Busways and bus guideways.
    Busway,
    /// Roads on bridges.
    Bridge,
    /// Roads in tunnels.
    Tunnel,
}

impl RoadClass {
    /// All built-in classes in draw order (lowest first).
    pub const ALL: [RoadClass; 12] = [
        Self::Road,
        Self::SmallService,
        Self::Service,
        Self::Minor,
        Self::Busway,
        Self::Tertiary,
        Self::Secondary,
        Self::Primary,
        Self::Trunk,
        Self::Motorway,
        Self::Tunnel,
        Self::Bridge,
    ];

    /// Entity name used in layer ids and configuration.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Road => "road",
            Self::Motorway => "motorway",
            Self::Trunk => "trunk",
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Tertiary => "tertiary",
            Self::Minor => "minor",
            Self::Service => "service",
            Self::SmallService => "small_service",
            Self::Busway => "busway",
            Self::Bridge => "bridge",
            Self::Tunnel => "tunnel",
        }
    }

    /// Looks up a class by entity name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    /// One-line description for listings.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Road => "All road classes at grade",
            Self::Motorway => "Motorways, excluding ramps",
            Self::Trunk => "Trunk roads",
            Self::Primary => "Primary roads",
            Self::Secondary => "Secondary roads",
            Self::Tertiary => "Tertiary roads",
            Self::Minor => "Minor roads",
            Self::Service => "Service roads",
            Self::SmallService => "Driveways, parking aisles, emergency access",
            Self::Busway => "Busways and bus guideways",
            Self::Bridge => "Roads on bridges",
            Self::Tunnel => "Roads in tunnels (dashed casing from z11)",
        }
    }

    /// Zoom from which this class is worth drawing.
    ///
    /// Only applied by [`tiered_style`](Self::tiered_style).
    #[must_use]
    pub fn min_zoom(self) -> u8 {
        match self {
            Self::Road | Self::Bridge | Self::Tunnel => zoom::ALL_ROADS,
            Self::Motorway | Self::Trunk => zoom::MOTORWAY_TRUNK,
            Self::Primary => zoom::PRIMARY,
            Self::Secondary => zoom::SECONDARY,
            Self::Tertiary => zoom::TERTIARY,
            Self::Minor | Self::Busway => zoom::MINOR,
            Self::Service => zoom::SERVICE,
            Self::SmallService => zoom::SMALL_SERVICE,
        }
    }

    /// Builds the style entity for this class.
    ///
    /// Classes only differ in filter, brunnel mode and sort key; every
    /// entity starts at [`zoom::ALL_ROADS`].
    #[must_use]
    pub fn style(self) -> RoadStyle {
        let class = || Expression::get("class");
        let road = RoadStyle::new(self.name());
        match self {
            Self::Road => road,
            Self::Motorway => road.sort_key(7).filter(
                class()
                    .equals("motorway")
                    .and(Expression::get_or("ramp", 0).equals(0_i64)),
            ),
            Self::Trunk => road.sort_key(6).filter(class().equals("trunk")),
            Self::Primary => road.sort_key(5).filter(class().equals("primary")),
            Self::Secondary => road.sort_key(4).filter(class().equals("secondary")),
            Self::Tertiary => road.sort_key(3).filter(class().equals("tertiary")),
            Self::Minor => road.sort_key(2).filter(class().equals("minor")),
            Self::Busway => road
                .sort_key(2)
                .filter(class().is_in(["busway", "bus_guideway"])),
            Self::Service => road.sort_key(1).filter(class().equals("service")),
            Self::SmallService => road.filter(
                class()
                    .equals("service")
                    .and(Expression::get("service").is_in(MUTED_SERVICE_TYPES.iter().copied())),
            ),
            Self::Bridge => road.brunnel(BrunnelMode::bridge()),
            Self::Tunnel => road.brunnel(BrunnelMode::tunnel()),
        }
    }

    /// Like [`style`](Self::style), with both minimum zooms raised to
    /// [`min_zoom`](Self::min_zoom).
    #[must_use]
    pub fn tiered_style(self) -> RoadStyle {
        self.style().min_zoom(self.min_zoom())
    }
}

impl fmt::Display for RoadClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use road_style_core::Feature;

    #[test]
    fn names_round_trip() {
        for class in RoadClass::ALL {
            assert_eq!(RoadClass::from_name(class.name()), Some(class));
        }
        assert_eq!(RoadClass::from_name("footway"), None);
    }

    #[test]
    fn every_class_starts_at_all_roads_zoom() {
        for class in RoadClass::ALL {
            let style = class.style();
            assert_eq!(style.fill_min_zoom(), zoom::ALL_ROADS, "{class}");
            assert_eq!(style.casing_min_zoom(), zoom::ALL_ROADS, "{class}");
        }
    }

    #[test]
    fn tiered_zoom_thresholds() {
        let cases = [
            (RoadClass::Road, 4),
            (RoadClass::Motorway, 5),
            (RoadClass::Trunk, 5),
            (RoadClass::Primary, 7),
            (RoadClass::Secondary, 9),
            (RoadClass::Tertiary, 11),
            (RoadClass::Minor, 12),
            (RoadClass::Busway, 12),
            (RoadClass::Service, 13),
            (RoadClass::SmallService, 15),
            (RoadClass::Tunnel, 4),
        ];
        for (class, z) in cases {
            let style = class.tiered_style();
            assert_eq!(style.fill_min_zoom(), z, "{class}");
            assert_eq!(style.casing_min_zoom(), z, "{class}");
            assert_eq!(style.class_filter(), class.style().class_filter());
        }
    }

    #[test]
    fn motorway_filter_excludes_ramps() {
        let style = RoadClass::Motorway.style();
        let filter = style.class_filter().unwrap();
        assert!(filter.matches(&Feature::new("motorway")));
        assert!(filter.matches(&Feature::new("motorway").with_ramp(0)));
        assert!(!filter.matches(&Feature::new("motorway").with_ramp(1)));
        assert!(!filter.matches(&Feature::new("trunk")));
    }

    #[test]
    fn small_service_filter() {
        let style = RoadClass::SmallService.style();
        let filter = style.class_filter().unwrap();
        assert!(filter.matches(&Feature::new("service").with_service("driveway")));
        assert!(!filter.matches(&Feature::new("service").with_service("alley")));
        assert!(!filter.matches(&Feature::new("service")));
    }

    #[test]
    fn only_brunnel_classes_change_mode() {
        for class in RoadClass::ALL {
            let mode = class.style().brunnel_mode().clone();
            match class {
                RoadClass::Tunnel => assert!(mode.is_tunnel()),
                RoadClass::Bridge => assert_eq!(mode, BrunnelMode::bridge()),
                _ => assert_eq!(mode, BrunnelMode::Surface),
            }
        }
    }
}

//! Road feature filters.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::expression::{combine, Expression};

/// Road classes drawn by any road layer. Everything else is excluded.
pub const ROAD_CLASSES: &[&str] = &[
    "motorway",
    "trunk",
    "primary",
    "secondary",
    "tertiary",
    "busway",
    "bus_guideway",
    "minor",
    "service",
];

/// Brunnel values excluded from at-grade layers.
const ELEVATED_OR_SUNKEN: &[&str] = &["bridge", "tunnel"];

/// Bridge/tunnel discriminator for a layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum BrunnelMode {
    /// At-grade roads: brunnel is neither `bridge` nor `tunnel`.
    #[default]
    Surface,
    /// Only features whose brunnel equals this value.
    Exactly(String),
    /// No brunnel restriction. Parsed from `"any"` or an empty string.
    Any,
}

impl BrunnelMode {
    /// Tunnel-only mode.
    #[must_use]
    pub fn tunnel() -> Self {
        Self::Exactly("tunnel".to_string())
    }

    /// Bridge-only mode.
    #[must_use]
    pub fn bridge() -> Self {
        Self::Exactly("bridge".to_string())
    }

    /// Whether this mode selects tunnels.
    #[must_use]
    pub fn is_tunnel(&self) -> bool {
        matches!(self, Self::Exactly(v) if v == "tunnel")
    }

    /// The predicate this mode adds to a filter, `None` for [`Self::Any`].
    #[must_use]
    pub fn predicate(&self) -> Option<Expression> {
        match self {
            Self::Surface => Some(
                !Expression::get_or("brunnel", "").is_in(ELEVATED_OR_SUNKEN.iter().copied()),
            ),
            Self::Exactly(value) => Some(Expression::get("brunnel").equals(value.as_str())),
            Self::Any => None,
        }
    }
}

impl fmt::Display for BrunnelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Surface => write!(f, "surface"),
            Self::Exactly(v) => write!(f, "{v}"),
            Self::Any => write!(f, "any"),
        }
    }
}

impl From<String> for BrunnelMode {
    fn from(value: String) -> Self {
        let keyword = match value.trim() {
            "surface" => Some(Self::Surface),
            "" | "any" => Some(Self::Any),
            _ => None,
        };
        keyword.unwrap_or_else(|| Self::Exactly(value))
    }
}

impl From<BrunnelMode> for String {
    fn from(value: BrunnelMode) -> Self {
        value.to_string()
    }
}

impl FromStr for BrunnelMode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_string()))
    }
}

/// The base road predicate: class is one of [`ROAD_CLASSES`].
#[must_use]
pub fn road_class_filter() -> Expression {
    Expression::get("class").is_in(ROAD_CLASSES.iter().copied())
}

/// Builds the filter for a road layer.
///
/// The base class allowlist is combined with `extra` and then with the
/// brunnel predicate for `brunnel`, if any. Missing feature attributes
/// coalesce before comparison, so the result is boolean for every feature.
#[must_use]
pub fn build_filter(extra: Option<Expression>, brunnel: Option<&BrunnelMode>) -> Expression {
    let filter = combine(Some(road_class_filter()), extra);
    let filter = match brunnel {
        Some(mode) => combine(filter, mode.predicate()),
        None => filter,
    };
    filter.unwrap_or_else(Expression::always)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Feature;

    const BRUNNELS: &[Option<&str>] = &[None, Some("bridge"), Some("tunnel"), Some("ford")];

    fn with_brunnel(class: &str, brunnel: Option<&str>) -> Feature {
        let f = Feature::new(class);
        match brunnel {
            Some(b) => f.with_brunnel(b),
            None => f,
        }
    }

    #[test]
    fn excludes_classes_outside_allowlist() {
        let modes = [
            None,
            Some(BrunnelMode::Surface),
            Some(BrunnelMode::tunnel()),
            Some(BrunnelMode::bridge()),
        ];
        for class in ["path", "track", "rail", "tertiary_link", ""] {
            for mode in &modes {
                let filter = build_filter(Some(Expression::always()), mode.as_ref());
                for brunnel in BRUNNELS {
                    let f = with_brunnel(class, *brunnel).with_toll(1).with_ramp(1);
                    assert!(!filter.matches(&f), "{class} {mode:?} {brunnel:?}");
                }
            }
        }
    }

    #[test]
    fn surface_excludes_bridges_and_tunnels() {
        let filter = build_filter(None, Some(&BrunnelMode::Surface));
        for class in ROAD_CLASSES {
            assert!(filter.matches(&with_brunnel(class, None)));
            assert!(filter.matches(&with_brunnel(class, Some("ford"))));
            assert!(!filter.matches(&with_brunnel(class, Some("bridge"))));
            assert!(!filter.matches(&with_brunnel(class, Some("tunnel"))));
        }
    }

    #[test]
    fn exact_mode_requires_equality() {
        let filter = build_filter(None, Some(&BrunnelMode::tunnel()));
        for brunnel in BRUNNELS {
            let f = with_brunnel("primary", *brunnel);
            assert_eq!(filter.matches(&f), *brunnel == Some("tunnel"));
        }
    }

    #[test]
    fn extra_constraint_narrows() {
        let motorway = Expression::get("class").equals("motorway");
        let filter = build_filter(Some(motorway), None);
        assert!(filter.matches(&Feature::new("motorway").with_brunnel("bridge")));
        assert!(!filter.matches(&Feature::new("trunk")));
    }

    #[test]
    fn filter_is_always_boolean() {
        let filter = build_filter(Some(Expression::always()), Some(&BrunnelMode::Surface));
        for class in ["motorway", "unknown"] {
            for brunnel in BRUNNELS {
                let value = filter.evaluate(&with_brunnel(class, *brunnel), None);
                assert!(value.is_boolean());
            }
        }
    }

    #[test]
    fn brunnel_mode_parses() {
        assert_eq!("surface".parse::<BrunnelMode>().unwrap(), BrunnelMode::Surface);
        assert_eq!("tunnel".parse::<BrunnelMode>().unwrap(), BrunnelMode::tunnel());
        assert!(BrunnelMode::tunnel().is_tunnel());
        assert!(!BrunnelMode::bridge().is_tunnel());
        assert_eq!(BrunnelMode::bridge().to_string(), "bridge");
    }

    #[test]
    fn empty_mode_adds_no_brunnel_predicate() {
        let mode: BrunnelMode = "".parse().unwrap();
        assert_eq!(mode, BrunnelMode::Any);
        assert_eq!("any".parse::<BrunnelMode>().unwrap(), BrunnelMode::Any);
        assert!(mode.predicate().is_none());
        assert_eq!(mode.to_string(), "any");

        let filter = build_filter(None, Some(&mode));
        assert_eq!(filter, build_filter(None, None));
        for brunnel in BRUNNELS {
            assert!(filter.matches(&with_brunnel("motorway", *brunnel)), "{brunnel:?}");
        }
        assert!(!filter.matches(&Feature::new("path")));
    }
}

//! The road colour rule table.
//!
//! A [`Palette`] holds one colour per rule and compiles the rules into a
//! single `case` expression. Both the style output and in-process colour
//! lookups go through that expression, so the two cannot drift apart.

use serde_json::Value;

use crate::declarative::model::{CasingColor, Color, PaletteName};
use crate::expression::Expression;
use crate::Feature;

/// Service subtypes drawn with the muted service colour.
///
/// Untagged service roads are muted as well.
pub const MUTED_SERVICE_TYPES: &[&str] = &["parking_aisle", "driveway", "emergency_access"];

/// One colour per rule of the road colour table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoadColors {
    /// `motorway`.
    pub motorway: Color,
    /// `trunk`.
    pub trunk: Color,
    /// `primary`.
    pub primary: Color,
    /// `secondary`.
    pub secondary: Color,
    /// `tertiary` and `tertiary_link`.
    pub tertiary: Color,
    /// `minor`.
    pub minor: Color,
    /// `busway` and `bus_guideway`.
    pub busway: Color,
    /// `service` with any other subtype.
    pub service: Color,
    /// `service` with no subtype or one of [`MUTED_SERVICE_TYPES`].
    pub service_muted: Color,
    /// Toll roads not matched by a class rule.
    pub toll: Color,
    /// Everything else.
    pub fallback: Color,
}

/// A named colour table variant.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    name: PaletteName,
    colors: RoadColors,
    casing: CasingColor,
    fill_expression: Expression,
}

impl Palette {
    /// Creates a palette and compiles its colour expression.
    #[must_use]
    pub fn new(name: PaletteName, colors: RoadColors, casing: CasingColor) -> Self {
        let fill_expression = compile(&colors);
        Self {
            name,
            colors,
            casing,
            fill_expression,
        }
    }

    /// Returns the palette name.
    #[must_use]
    pub fn name(&self) -> &PaletteName {
        &self.name
    }

    /// Returns the colour table.
    #[must_use]
    pub fn colors(&self) -> &RoadColors {
        &self.colors
    }

    /// Returns the casing colour policy.
    #[must_use]
    pub fn casing(&self) -> &CasingColor {
        &self.casing
    }

    /// The per-feature fill colour as a `case` expression.
    #[must_use]
    pub fn color_expression(&self) -> &Expression {
        &self.fill_expression
    }

    /// The casing colour: the fill expression or a fixed literal.
    #[must_use]
    pub fn casing_expression(&self) -> Expression {
        match &self.casing {
            CasingColor::ReuseFill => self.fill_expression.clone(),
            CasingColor::Fixed(color) => Expression::literal(color.as_str()),
        }
    }

    /// Resolves the fill colour for a feature.
    ///
    /// Total over all features: unmatched classes get the fallback colour.
    #[must_use]
    pub fn color_for(&self, feature: &Feature) -> String {
        self.resolve(&self.fill_expression, feature)
    }

    /// Resolves the casing colour for a feature.
    #[must_use]
    pub fn casing_color_for(&self, feature: &Feature) -> String {
        match &self.casing {
            CasingColor::ReuseFill => self.color_for(feature),
            CasingColor::Fixed(color) => color.as_str().to_string(),
        }
    }

    fn resolve(&self, expression: &Expression, feature: &Feature) -> String {
        match expression.evaluate(feature, None) {
            Value::String(color) => color,
            _ => self.colors.fallback.as_str().to_string(),
        }
    }
}

fn compile(colors: &RoadColors) -> Expression {
    let class = || Expression::get("class");
    let is = |name: &str| class().equals(name);
    let color = |c: &Color| Expression::literal(c.as_str());

    let mut muted_services: Vec<&str> = MUTED_SERVICE_TYPES.to_vec();
    muted_services.push("");

    Expression::case(
        vec![
            (
                class().is_in(["tertiary", "tertiary_link"]),
                color(&colors.tertiary),
            ),
            (
                is("service").and(Expression::get_or("service", "").is_in(muted_services)),
                color(&colors.service_muted),
            ),
            (is("service"), color(&colors.service)),
            (is("motorway"), color(&colors.motorway)),
            (is("trunk"), color(&colors.trunk)),
            (is("primary"), color(&colors.primary)),
            (is("secondary"), color(&colors.secondary)),
            (is("minor"), color(&colors.minor)),
            (
                class().is_in(["busway", "bus_guideway"]),
                color(&colors.busway),
            ),
            (
                Expression::get_or("toll", 0).not_equals(0_i64),
                color(&colors.toll),
            ),
        ],
        color(&colors.fallback),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::ROAD_CLASSES;

    fn c(s: &str) -> Color {
        Color::new(s).unwrap()
    }

    fn palette(casing: CasingColor) -> Palette {
        Palette::new(
            PaletteName::new("test").unwrap(),
            RoadColors {
                motorway: c("#000001"),
                trunk: c("#000002"),
                primary: c("#000003"),
                secondary: c("#000004"),
                tertiary: c("#000005"),
                minor: c("#000006"),
                busway: c("#000007"),
                service: c("#000008"),
                service_muted: c("#000009"),
                toll: c("#00000a"),
                fallback: c("#00000b"),
            },
            casing,
        )
    }

    #[test]
    fn class_dispatch() {
        let p = palette(CasingColor::ReuseFill);
        let cases = [
            ("motorway", "#000001"),
            ("trunk", "#000002"),
            ("primary", "#000003"),
            ("secondary", "#000004"),
            ("tertiary", "#000005"),
            ("tertiary_link", "#000005"),
            ("minor", "#000006"),
            ("busway", "#000007"),
            ("bus_guideway", "#000007"),
            ("path", "#00000b"),
        ];
        for (class, expected) in cases {
            assert_eq!(p.color_for(&Feature::new(class)), expected, "{class}");
        }
    }

    #[test]
    fn total_over_allowlist() {
        let p = palette(CasingColor::ReuseFill);
        for class in ROAD_CLASSES {
            let color = p.color_for(&Feature::new(*class));
            assert!(!color.is_empty());
            assert_ne!(color, "#00000b", "{class} fell through to fallback");
        }
    }

    #[test]
    fn service_subtypes() {
        let p = palette(CasingColor::ReuseFill);
        let service = |s: Option<&str>| {
            let f = Feature::new("service");
            p.color_for(&match s {
                Some(s) => f.with_service(s),
                None => f,
            })
        };
        assert_eq!(service(None), "#000009");
        assert_eq!(service(Some("")), "#000009");
        assert_eq!(service(Some("driveway")), "#000009");
        assert_eq!(service(Some("parking_aisle")), "#000009");
        assert_eq!(service(Some("emergency_access")), "#000009");
        assert_eq!(service(Some("alley")), "#000008");
        assert_eq!(service(Some("drive-through")), "#000008");
    }

    #[test]
    fn toll_applies_only_after_class_rules() {
        let p = palette(CasingColor::ReuseFill);
        assert_eq!(p.color_for(&Feature::new("motorway").with_toll(1)), "#000001");
        assert_eq!(p.color_for(&Feature::new("track").with_toll(1)), "#00000a");
        assert_eq!(p.color_for(&Feature::new("track").with_toll(0)), "#00000b");
    }

    #[test]
    fn casing_policies() {
        let reuse = palette(CasingColor::ReuseFill);
        assert_eq!(reuse.casing_expression(), *reuse.color_expression());
        assert_eq!(reuse.casing_color_for(&Feature::new("trunk")), "#000002");

        let fixed = palette(CasingColor::Fixed(c("#999")));
        assert_eq!(fixed.casing_expression(), Expression::literal("#999"));
        assert_eq!(fixed.casing_color_for(&Feature::new("trunk")), "#999");
    }
}

//! In-process evaluation of expressions against a feature.

use serde_json::Value;

use super::Expression;
use crate::Feature;

impl Expression {
    /// Evaluates the expression for `feature` at an optional zoom level.
    ///
    /// Evaluation is total: missing properties are `null`, `zoom` without a
    /// zoom level is `null`, and a `step` with a non-numeric input yields
    /// its base output.
    #[must_use]
    pub fn evaluate(&self, feature: &Feature, zoom: Option<f64>) -> Value {
        match self {
            Self::Literal(v) => v.clone(),
            Self::Get(key) => feature.property(key),
            Self::Has(key) => Value::Bool(feature.has(key)),
            Self::Zoom => zoom
                .and_then(serde_json::Number::from_f64)
                .map_or(Value::Null, Value::Number),
            Self::Coalesce(operands) => operands
                .iter()
                .map(|e| e.evaluate(feature, zoom))
                .find(|v| !v.is_null())
                .unwrap_or(Value::Null),
            Self::Not(e) => Value::Bool(!is_true(&e.evaluate(feature, zoom))),
            Self::All(operands) => Value::Bool(
                operands
                    .iter()
                    .all(|e| is_true(&e.evaluate(feature, zoom))),
            ),
            Self::Any(operands) => Value::Bool(
                operands
                    .iter()
                    .any(|e| is_true(&e.evaluate(feature, zoom))),
            ),
            Self::Eq(a, b) => Value::Bool(loose_eq(
                &a.evaluate(feature, zoom),
                &b.evaluate(feature, zoom),
            )),
            Self::Ne(a, b) => Value::Bool(!loose_eq(
                &a.evaluate(feature, zoom),
                &b.evaluate(feature, zoom),
            )),
            Self::In(needle, haystack) => {
                let needle = needle.evaluate(feature, zoom);
                Value::Bool(haystack.iter().any(|v| loose_eq(v, &needle)))
            }
            Self::Case { branches, fallback } => branches
                .iter()
                .find(|(cond, _)| is_true(&cond.evaluate(feature, zoom)))
                .map_or_else(
                    || fallback.evaluate(feature, zoom),
                    |(_, out)| out.evaluate(feature, zoom),
                ),
            Self::Match {
                input,
                arms,
                fallback,
            } => {
                let input = input.evaluate(feature, zoom);
                arms.iter()
                    .find(|(labels, _)| labels.iter().any(|l| loose_eq(l, &input)))
                    .map_or_else(
                        || fallback.evaluate(feature, zoom),
                        |(_, out)| out.evaluate(feature, zoom),
                    )
            }
            Self::Step { input, base, stops } => {
                let Some(x) = input.evaluate(feature, zoom).as_f64() else {
                    return base.evaluate(feature, zoom);
                };
                let mut output: &Expression = base;
                for (stop, out) in stops {
                    if x >= *stop {
                        output = out;
                    } else {
                        break;
                    }
                }
                output.evaluate(feature, zoom)
            }
        }
    }

    /// Evaluates the expression as a filter.
    ///
    /// Only a boolean `true` selects the feature.
    #[must_use]
    pub fn matches(&self, feature: &Feature) -> bool {
        is_true(&self.evaluate(feature, None))
    }

    /// Evaluates the expression as a filter at a given zoom level.
    #[must_use]
    pub fn matches_at(&self, feature: &Feature, zoom: f64) -> bool {
        is_true(&self.evaluate(feature, Some(zoom)))
    }
}

fn is_true(value: &Value) -> bool {
    matches!(value, Value::Bool(true))
}

/// Equality where numbers compare by exact value regardless of integer/float encoding.
#[allow(clippy::float_cmp)]
fn loose_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => x == y,
        },
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers_compare_exactly() {
        assert!(loose_eq(&json!(0), &json!(0.0)));
        assert!(loose_eq(&json!(-1), &json!(-1.0)));
        assert!(!loose_eq(&json!(1e-17), &json!(0)));
        assert!(!loose_eq(&json!(1.0 + 1e-15), &json!(1)));
    }

    #[test]
    fn get_missing_is_null() {
        let f = Feature::new("minor");
        assert_eq!(Expression::get("service").evaluate(&f, None), Value::Null);
        assert_eq!(
            Expression::get_or("service", "").evaluate(&f, None),
            json!("")
        );
    }

    #[test]
    fn numbers_compare_by_value() {
        let f = Feature::new("motorway").with_toll(1);
        assert!(Expression::get("toll").equals(1.0).matches(&f));
        assert!(Expression::get("toll").is_in([1]).matches(&f));
    }

    #[test]
    fn non_boolean_filter_does_not_match() {
        let f = Feature::new("motorway");
        assert!(!Expression::get("class").matches(&f));
        assert!(!Expression::literal(1).matches(&f));
    }

    #[test]
    fn all_and_any_truth_table() {
        let f = Feature::new("trunk");
        let e = Expression::All(vec![
            Expression::get("class").equals("motorway"),
            Expression::always(),
        ]);
        assert!(!e.matches(&f));
        assert!(Expression::All(vec![]).matches(&f));
        assert!(!Expression::Any(vec![]).matches(&f));
    }

    #[test]
    fn step_breakpoints() {
        let e = Expression::zoom_step(
            json!([1]),
            vec![(11.0, Expression::literal(json!([0.5, 0.25])))],
        );
        let f = Feature::new("minor");
        assert_eq!(e.evaluate(&f, Some(10.0)), json!([1]));
        assert_eq!(e.evaluate(&f, Some(10.99)), json!([1]));
        assert_eq!(e.evaluate(&f, Some(11.0)), json!([0.5, 0.25]));
        assert_eq!(e.evaluate(&f, Some(18.0)), json!([0.5, 0.25]));
        assert_eq!(e.evaluate(&f, None), json!([1]));
    }

    #[test]
    fn match_and_case_fall_back() {
        let f = Feature::new("track");
        let m = Expression::Match {
            input: Box::new(Expression::get("class")),
            arms: vec![(vec![json!("motorway"), json!("trunk")], "big".into())],
            fallback: Box::new("small".into()),
        };
        assert_eq!(m.evaluate(&f, None), json!("small"));
        assert_eq!(m.evaluate(&Feature::new("trunk"), None), json!("big"));

        let c = Expression::case(
            vec![(Expression::has("service"), "svc".into())],
            "other",
        );
        assert_eq!(c.evaluate(&f, None), json!("other"));
    }
}

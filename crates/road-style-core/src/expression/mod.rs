//! Declarative style expressions.
//!
//! Filters and feature-dependent paint values are expressed as a small
//! subset of the MapLibre expression language. Expressions are plain data:
//! they serialize to the renderer's JSON array syntax and can be evaluated
//! in-process against a [`Feature`](crate::Feature).
//!
//! ```text
//! Expression ──to_json()──▶ ["all", ["in", ["get", "class"], ...], ...]
//!     │
//!     └──evaluate(feature, zoom)──▶ serde_json::Value
//! ```

mod eval;
mod json;

use serde_json::Value;

pub use json::ExpressionError;

/// A declarative style expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// A constant value.
    Literal(Value),
    /// `["get", key]`: a feature property, `null` when absent.
    Get(String),
    /// `["has", key]`: whether a feature property is present.
    Has(String),
    /// `["zoom"]`: the current zoom level.
    Zoom,
    /// `["coalesce", ...]`: the first non-null operand.
    Coalesce(Vec<Expression>),
    /// `["!", e]`: logical negation.
    Not(Box<Expression>),
    /// `["all", ...]`: conjunction, short-circuiting left to right.
    All(Vec<Expression>),
    /// `["any", ...]`: disjunction, short-circuiting left to right.
    Any(Vec<Expression>),
    /// `["==", a, b]`.
    Eq(Box<Expression>, Box<Expression>),
    /// `["!=", a, b]`.
    Ne(Box<Expression>, Box<Expression>),
    /// `["in", needle, ["literal", [...]]]`: membership in a constant list.
    In(Box<Expression>, Vec<Value>),
    /// `["case", cond, out, ..., fallback]`.
    Case {
        /// Condition/output pairs tested in order.
        branches: Vec<(Expression, Expression)>,
        /// Output when no condition holds.
        fallback: Box<Expression>,
    },
    /// `["match", input, labels, out, ..., fallback]`.
    Match {
        /// Value to match.
        input: Box<Expression>,
        /// Label sets and their outputs.
        arms: Vec<(Vec<Value>, Expression)>,
        /// Output when no label matches.
        fallback: Box<Expression>,
    },
    /// `["step", input, base, stop, out, ...]`: piecewise-constant function.
    Step {
        /// Numeric input, usually [`Expression::Zoom`].
        input: Box<Expression>,
        /// Output below the first stop.
        base: Box<Expression>,
        /// Ascending stops and the output at or above each.
        stops: Vec<(f64, Expression)>,
    },
}

impl Expression {
    /// A constant value.
    #[must_use]
    pub fn literal(value: impl Into<Value>) -> Self {
        Self::Literal(value.into())
    }

    /// The always-true constraint.
    #[must_use]
    pub fn always() -> Self {
        Self::Literal(Value::Bool(true))
    }

    /// A feature property lookup.
    #[must_use]
    pub fn get(key: impl Into<String>) -> Self {
        Self::Get(key.into())
    }

    /// A property presence check.
    #[must_use]
    pub fn has(key: impl Into<String>) -> Self {
        Self::Has(key.into())
    }

    /// A property lookup defaulting to `default` when absent.
    #[must_use]
    pub fn get_or(key: impl Into<String>, default: impl Into<Value>) -> Self {
        Self::Coalesce(vec![Self::get(key), Self::literal(default)])
    }

    /// `self == rhs`.
    #[must_use]
    pub fn equals(self, rhs: impl Into<Expression>) -> Self {
        Self::Eq(Box::new(self), Box::new(rhs.into()))
    }

    /// `self != rhs`.
    #[must_use]
    pub fn not_equals(self, rhs: impl Into<Expression>) -> Self {
        Self::Ne(Box::new(self), Box::new(rhs.into()))
    }

    /// `self` is one of `values`.
    #[must_use]
    pub fn is_in<I, V>(self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::In(Box::new(self), values.into_iter().map(Into::into).collect())
    }

    /// Conjunction of `self` and `rhs`, flattening nested `all`s.
    #[must_use]
    pub fn and(self, rhs: Expression) -> Self {
        let mut operands = Vec::new();
        for operand in [self, rhs] {
            match operand {
                Self::All(inner) => operands.extend(inner),
                other => operands.push(other),
            }
        }
        Self::All(operands)
    }

    /// A `case` expression.
    #[must_use]
    pub fn case(branches: Vec<(Expression, Expression)>, fallback: impl Into<Expression>) -> Self {
        Self::Case {
            branches,
            fallback: Box::new(fallback.into()),
        }
    }

    /// A `step` over the current zoom level.
    #[must_use]
    pub fn zoom_step(base: impl Into<Expression>, stops: Vec<(f64, Expression)>) -> Self {
        Self::Step {
            input: Box::new(Self::Zoom),
            base: Box::new(base.into()),
            stops,
        }
    }

    /// Returns the constant value if this is a literal.
    #[must_use]
    pub fn as_literal(&self) -> Option<&Value> {
        match self {
            Self::Literal(v) => Some(v),
            _ => None,
        }
    }

    /// Whether the expression reads the zoom level anywhere.
    #[must_use]
    pub fn is_zoom_dependent(&self) -> bool {
        match self {
            Self::Zoom => true,
            Self::Literal(_) | Self::Get(_) | Self::Has(_) => false,
            Self::Coalesce(es) | Self::All(es) | Self::Any(es) => {
                es.iter().any(Self::is_zoom_dependent)
            }
            Self::Not(e) | Self::In(e, _) => e.is_zoom_dependent(),
            Self::Eq(a, b) | Self::Ne(a, b) => a.is_zoom_dependent() || b.is_zoom_dependent(),
            Self::Case { branches, fallback } => {
                fallback.is_zoom_dependent()
                    || branches
                        .iter()
                        .any(|(c, o)| c.is_zoom_dependent() || o.is_zoom_dependent())
            }
            Self::Match {
                input,
                arms,
                fallback,
            } => {
                input.is_zoom_dependent()
                    || fallback.is_zoom_dependent()
                    || arms.iter().any(|(_, o)| o.is_zoom_dependent())
            }
            Self::Step { .. } => true,
        }
    }
}

impl std::ops::Not for Expression {
    type Output = Expression;

    fn not(self) -> Self::Output {
        Self::Not(Box::new(self))
    }
}

impl From<Value> for Expression {
    fn from(value: Value) -> Self {
        Self::Literal(value)
    }
}

impl From<&str> for Expression {
    fn from(value: &str) -> Self {
        Self::Literal(Value::String(value.to_string()))
    }
}

impl From<String> for Expression {
    fn from(value: String) -> Self {
        Self::Literal(Value::String(value))
    }
}

impl From<bool> for Expression {
    fn from(value: bool) -> Self {
        Self::Literal(Value::Bool(value))
    }
}

impl From<i64> for Expression {
    fn from(value: i64) -> Self {
        Self::Literal(Value::from(value))
    }
}

impl From<f64> for Expression {
    fn from(value: f64) -> Self {
        Self::Literal(Value::from(value))
    }
}

/// Combines two optional constraints into one.
///
/// Absent constraints mean "no constraint": if both are absent the result
/// is `None`, if one is absent the other is returned unchanged, otherwise
/// the result is their conjunction (left operand evaluated first).
#[must_use]
pub fn combine(c1: Option<Expression>, c2: Option<Expression>) -> Option<Expression> {
    match (c1, c2) {
        (None, None) => None,
        (Some(c), None) | (None, Some(c)) => Some(c),
        (Some(a), Some(b)) => Some(a.and(b)),
    }
}

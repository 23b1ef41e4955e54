//! MapLibre JSON syntax for expressions.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Value};

use super::Expression;

/// Errors from parsing an expression out of style JSON.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExpressionError {
    /// `[]` is not an expression.
    #[error("empty expression array")]
    Empty,

    /// Operator not supported by this expression subset.
    #[error("unknown expression operator `{0}`")]
    UnknownOperator(String),

    /// Wrong number of operands.
    #[error("`{operator}` expects {expected}, got {actual} argument(s)")]
    Arity {
        /// Operator name.
        operator: String,
        /// Human-readable expected count.
        expected: &'static str,
        /// Actual operand count.
        actual: usize,
    },

    /// An operand has the wrong shape.
    #[error("`{operator}`: {message}")]
    InvalidArgument {
        /// Operator name.
        operator: String,
        /// What was wrong.
        message: String,
    },

    /// Objects must be wrapped in `["literal", ...]`.
    #[error("object values must be wrapped in [\"literal\", ...]")]
    BareObject,
}

impl Expression {
    /// Converts to MapLibre JSON syntax.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Literal(v @ (Value::Array(_) | Value::Object(_))) => json!(["literal", v]),
            Self::Literal(v) => v.clone(),
            Self::Get(key) => json!(["get", key]),
            Self::Has(key) => json!(["has", key]),
            Self::Zoom => json!(["zoom"]),
            Self::Coalesce(es) => op_with("coalesce", es),
            Self::Not(e) => json!(["!", e.to_json()]),
            Self::All(es) => op_with("all", es),
            Self::Any(es) => op_with("any", es),
            Self::Eq(a, b) => json!(["==", a.to_json(), b.to_json()]),
            Self::Ne(a, b) => json!(["!=", a.to_json(), b.to_json()]),
            Self::In(needle, haystack) => {
                json!(["in", needle.to_json(), ["literal", haystack]])
            }
            Self::Case { branches, fallback } => {
                let mut out = vec![json!("case")];
                for (cond, value) in branches {
                    out.push(cond.to_json());
                    out.push(value.to_json());
                }
                out.push(fallback.to_json());
                Value::Array(out)
            }
            Self::Match {
                input,
                arms,
                fallback,
            } => {
                let mut out = vec![json!("match"), input.to_json()];
                for (labels, value) in arms {
                    match labels.as_slice() {
                        [single] => out.push(single.clone()),
                        many => out.push(Value::Array(many.to_vec())),
                    }
                    out.push(value.to_json());
                }
                out.push(fallback.to_json());
                Value::Array(out)
            }
            Self::Step { input, base, stops } => {
                let mut out = vec![json!("step"), input.to_json(), base.to_json()];
                for (stop, value) in stops {
                    out.push(json!(stop));
                    out.push(value.to_json());
                }
                Value::Array(out)
            }
        }
    }

    /// Parses MapLibre JSON syntax.
    ///
    /// Arrays whose first element is not a string are treated as literal
    /// arrays, matching the legacy constant form renderers still accept.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown operators, wrong arities, or bare objects.
    pub fn from_json(value: &Value) -> Result<Self, ExpressionError> {
        let items = match value {
            Value::Array(items) => items,
            Value::Object(_) => return Err(ExpressionError::BareObject),
            scalar => return Ok(Self::Literal(scalar.clone())),
        };
        let Some(head) = items.first() else {
            return Err(ExpressionError::Empty);
        };
        let Some(op) = head.as_str() else {
            return Ok(Self::Literal(value.clone()));
        };
        let args = &items[1..];

        match op {
            "literal" => {
                expect_arity(op, args, 1, "1")?;
                Ok(Self::Literal(args[0].clone()))
            }
            "get" => Ok(Self::Get(string_arg(op, args)?)),
            "has" => Ok(Self::Has(string_arg(op, args)?)),
            "zoom" => {
                expect_arity(op, args, 0, "0")?;
                Ok(Self::Zoom)
            }
            "coalesce" => {
                if args.is_empty() {
                    return Err(arity(op, "at least 1", 0));
                }
                Ok(Self::Coalesce(parse_all(args)?))
            }
            "!" => {
                expect_arity(op, args, 1, "1")?;
                Ok(!Self::from_json(&args[0])?)
            }
            "all" => Ok(Self::All(parse_all(args)?)),
            "any" => Ok(Self::Any(parse_all(args)?)),
            "==" | "!=" => {
                expect_arity(op, args, 2, "2")?;
                let a = Box::new(Self::from_json(&args[0])?);
                let b = Box::new(Self::from_json(&args[1])?);
                Ok(if op == "==" {
                    Self::Eq(a, b)
                } else {
                    Self::Ne(a, b)
                })
            }
            "in" => {
                expect_arity(op, args, 2, "2")?;
                let needle = Self::from_json(&args[0])?;
                match Self::from_json(&args[1])? {
                    Self::Literal(Value::Array(haystack)) => {
                        Ok(Self::In(Box::new(needle), haystack))
                    }
                    _ => Err(invalid(op, "haystack must be a literal array")),
                }
            }
            "case" => {
                if args.len() < 3 || args.len() % 2 == 0 {
                    return Err(arity(op, "an odd number (at least 3)", args.len()));
                }
                let (pairs, fallback) = args.split_at(args.len() - 1);
                let branches = pairs
                    .chunks(2)
                    .map(|pair| Ok((Self::from_json(&pair[0])?, Self::from_json(&pair[1])?)))
                    .collect::<Result<Vec<_>, ExpressionError>>()?;
                Ok(Self::Case {
                    branches,
                    fallback: Box::new(Self::from_json(&fallback[0])?),
                })
            }
            "match" => {
                if args.len() < 4 || args.len() % 2 == 1 {
                    return Err(arity(op, "an even number (at least 4)", args.len()));
                }
                let input = Box::new(Self::from_json(&args[0])?);
                let (pairs, fallback) = args[1..].split_at(args.len() - 2);
                let arms = pairs
                    .chunks(2)
                    .map(|pair| {
                        let labels = match &pair[0] {
                            Value::Array(many) => many.clone(),
                            single => vec![single.clone()],
                        };
                        Ok((labels, Self::from_json(&pair[1])?))
                    })
                    .collect::<Result<Vec<_>, ExpressionError>>()?;
                Ok(Self::Match {
                    input,
                    arms,
                    fallback: Box::new(Self::from_json(&fallback[0])?),
                })
            }
            "step" => {
                if args.len() < 2 || args.len() % 2 == 1 {
                    return Err(arity(op, "an even number (at least 2)", args.len()));
                }
                let input = Box::new(Self::from_json(&args[0])?);
                let base = Box::new(Self::from_json(&args[1])?);
                let mut stops = Vec::with_capacity((args.len() - 2) / 2);
                for pair in args[2..].chunks(2) {
                    let stop = pair[0]
                        .as_f64()
                        .ok_or_else(|| invalid(op, "stop inputs must be numbers"))?;
                    if stops.last().is_some_and(|(prev, _)| *prev >= stop) {
                        return Err(invalid(op, "stop inputs must be strictly ascending"));
                    }
                    stops.push((stop, Self::from_json(&pair[1])?));
                }
                Ok(Self::Step { input, base, stops })
            }
            other => Err(ExpressionError::UnknownOperator(other.to_string())),
        }
    }
}

fn op_with(op: &str, operands: &[Expression]) -> Value {
    let mut out = Vec::with_capacity(operands.len() + 1);
    out.push(Value::String(op.to_string()));
    out.extend(operands.iter().map(Expression::to_json));
    Value::Array(out)
}

fn parse_all(args: &[Value]) -> Result<Vec<Expression>, ExpressionError> {
    args.iter().map(Expression::from_json).collect()
}

fn string_arg(op: &str, args: &[Value]) -> Result<String, ExpressionError> {
    expect_arity(op, args, 1, "1")?;
    args[0]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| invalid(op, "property name must be a string"))
}

fn expect_arity(
    op: &str,
    args: &[Value],
    n: usize,
    expected: &'static str,
) -> Result<(), ExpressionError> {
    if args.len() == n {
        Ok(())
    } else {
        Err(arity(op, expected, args.len()))
    }
}

fn arity(op: &str, expected: &'static str, actual: usize) -> ExpressionError {
    ExpressionError::Arity {
        operator: op.to_string(),
        expected,
        actual,
    }
}

fn invalid(op: &str, message: &str) -> ExpressionError {
    ExpressionError::InvalidArgument {
        operator: op.to_string(),
        message: message.to_string(),
    }
}

impl Serialize for Expression {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Expression {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_json(&value).map_err(serde::de::Error::custom)
    }
}

//! Road feature records as delivered by the tile source.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::collections::BTreeMap;

/// A single road segment with OpenMapTiles `transportation` attributes.
///
/// Optional attributes stay `None` when the tile omits them; the accessor
/// methods coalesce them to `0` / `""` the way style expressions do.
/// Numeric attributes accept any JSON number, integer or float.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// Road class (e.g. "motorway", "service").
    pub class: String,
    /// Bridge/tunnel classification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brunnel: Option<String>,
    /// Non-zero for ramps and links.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ramp: Option<Number>,
    /// Non-zero for toll roads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toll: Option<Number>,
    /// OSM layer tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer: Option<Number>,
    /// Surface ("paved", "unpaved").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface: Option<String>,
    /// Service subtype (e.g. "driveway", "alley").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    /// Raw OSM `highway` value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highway: Option<String>,
    /// Non-zero for expressways.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expressway: Option<Number>,
    /// Any other properties carried by the tile.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Feature {
    /// Creates a feature with only a class set.
    #[must_use]
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            ..Self::default()
        }
    }

    /// Parses a feature from a JSON object.
    ///
    /// # Errors
    ///
    /// Returns an error if `class` is missing or not a string, or if a
    /// known attribute has the wrong type.
    pub fn from_json(value: &Value) -> Result<Self, FeatureError> {
        if !value.is_object() {
            return Err(FeatureError::NotAnObject);
        }
        match value.get("class") {
            Some(Value::String(_)) => {}
            Some(other) => {
                return Err(FeatureError::InvalidClass {
                    found: json_type_name(other),
                })
            }
            None => return Err(FeatureError::MissingClass),
        }
        Ok(Self::deserialize(value)?)
    }

    /// Parses a feature from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid JSON or not a valid feature.
    pub fn from_json_str(text: &str) -> Result<Self, FeatureError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_json(&value)
    }

    /// Sets the brunnel attribute.
    #[must_use]
    pub fn with_brunnel(mut self, brunnel: impl Into<String>) -> Self {
        self.brunnel = Some(brunnel.into());
        self
    }

    /// Sets the service subtype.
    #[must_use]
    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service = Some(service.into());
        self
    }

    /// Sets the toll flag.
    #[must_use]
    pub fn with_toll(mut self, toll: impl Into<Number>) -> Self {
        self.toll = Some(toll.into());
        self
    }

    /// Sets the ramp flag.
    #[must_use]
    pub fn with_ramp(mut self, ramp: impl Into<Number>) -> Self {
        self.ramp = Some(ramp.into());
        self
    }

    /// Sets the surface.
    #[must_use]
    pub fn with_surface(mut self, surface: impl Into<String>) -> Self {
        self.surface = Some(surface.into());
        self
    }

    /// Ramp flag, `0` when absent.
    #[must_use]
    pub fn ramp(&self) -> f64 {
        number_or_zero(self.ramp.as_ref())
    }

    /// Toll flag, `0` when absent.
    #[must_use]
    pub fn toll(&self) -> f64 {
        number_or_zero(self.toll.as_ref())
    }

    /// Layer, `0` when absent.
    #[must_use]
    pub fn layer(&self) -> f64 {
        number_or_zero(self.layer.as_ref())
    }

    /// Expressway flag, `0` when absent.
    #[must_use]
    pub fn expressway(&self) -> f64 {
        number_or_zero(self.expressway.as_ref())
    }

    /// Whether the surface is tagged unpaved.
    #[must_use]
    pub fn is_unpaved(&self) -> bool {
        self.surface.as_deref() == Some("unpaved")
    }

    /// Looks up a property by name as an expression would see it.
    ///
    /// Missing properties are `Value::Null`.
    #[must_use]
    pub fn property(&self, key: &str) -> Value {
        fn opt_str(v: Option<&String>) -> Value {
            v.map_or(Value::Null, |s| Value::String(s.clone()))
        }
        fn opt_num(v: Option<&Number>) -> Value {
            v.map_or(Value::Null, |n| Value::Number(n.clone()))
        }

        match key {
            "class" => Value::String(self.class.clone()),
            "brunnel" => opt_str(self.brunnel.as_ref()),
            "ramp" => opt_num(self.ramp.as_ref()),
            "toll" => opt_num(self.toll.as_ref()),
            "layer" => opt_num(self.layer.as_ref()),
            "surface" => opt_str(self.surface.as_ref()),
            "service" => opt_str(self.service.as_ref()),
            "highway" => opt_str(self.highway.as_ref()),
            "expressway" => opt_num(self.expressway.as_ref()),
            other => self.extra.get(other).cloned().unwrap_or(Value::Null),
        }
    }

    /// Whether a property is present.
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        !self.property(key).is_null()
    }
}

fn number_or_zero(n: Option<&Number>) -> f64 {
    n.and_then(Number::as_f64).unwrap_or(0.0)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Errors raised when a feature record is rejected at the input boundary.
#[derive(Debug, thiserror::Error)]
pub enum FeatureError {
    /// The input is not a JSON object.
    #[error("feature must be a JSON object")]
    NotAnObject,

    /// The `class` attribute is absent.
    #[error("feature has no `class` attribute")]
    MissingClass,

    /// The `class` attribute is not a string.
    #[error("feature `class` must be a string, found {found}")]
    InvalidClass {
        /// JSON type that was found instead.
        found: &'static str,
    },

    /// JSON syntax or attribute type error.
    #[error("invalid feature: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Expression;
    use serde_json::json;

    #[test]
    fn parses_tile_attributes() {
        let f = Feature::from_json(&json!({
            "class": "service",
            "service": "driveway",
            "brunnel": "bridge",
            "toll": 1,
            "name": "Main St"
        }))
        .unwrap();
        assert_eq!(f.class, "service");
        assert_eq!(f.service.as_deref(), Some("driveway"));
        assert_eq!(f.toll(), 1.0);
        assert_eq!(f.property("name"), json!("Main St"));
    }

    #[test]
    fn accepts_float_attributes() {
        let f = Feature::from_json(&json!({
            "class": "motorway",
            "toll": 1.0,
            "layer": -1.0,
            "ramp": 0.0,
            "expressway": 1
        }))
        .unwrap();
        assert_eq!(f.toll(), 1.0);
        assert_eq!(f.layer(), -1.0);
        assert_eq!(f.ramp(), 0.0);
        assert_eq!(f.expressway(), 1.0);
        assert_eq!(f.property("toll"), json!(1.0));
        assert_eq!(f.property("expressway"), json!(1));
    }

    #[test]
    fn float_flags_drive_expressions() {
        let toll = Feature::from_json(&json!({ "class": "track", "toll": 1.0 })).unwrap();
        let free = Feature::from_json(&json!({ "class": "track", "toll": 0.0 })).unwrap();
        let is_toll = Expression::get_or("toll", 0).not_equals(0_i64);
        assert!(is_toll.matches(&toll));
        assert!(!is_toll.matches(&free));
    }

    #[test]
    fn missing_attributes_coalesce() {
        let f = Feature::new("minor");
        assert_eq!(f.ramp(), 0.0);
        assert_eq!(f.toll(), 0.0);
        assert_eq!(f.layer(), 0.0);
        assert_eq!(f.expressway(), 0.0);
        assert!(!f.is_unpaved());
        assert_eq!(f.property("brunnel"), Value::Null);
        assert!(!f.has("brunnel"));
        assert!(f.has("class"));
    }

    #[test]
    fn rejects_non_string_class() {
        let err = Feature::from_json(&json!({ "class": 3 })).unwrap_err();
        assert!(matches!(err, FeatureError::InvalidClass { found: "number" }));
    }

    #[test]
    fn rejects_missing_class() {
        let err = Feature::from_json(&json!({ "brunnel": "tunnel" })).unwrap_err();
        assert!(matches!(err, FeatureError::MissingClass));
    }

    #[test]
    fn rejects_non_object() {
        assert!(matches!(
            Feature::from_json(&json!(["motorway"])),
            Err(FeatureError::NotAnObject)
        ));
        assert!(matches!(
            Feature::from_json_str("{not json"),
            Err(FeatureError::Json(_))
        ));
    }
}

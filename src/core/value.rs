//! Attribute values carried by entities and `set` transitions.
//!
//! Attributes are game-specific ("face_up", "tapped", "name", ...). The
//! engine stores them but never interprets them beyond the reactions an
//! entity installs for itself.
//!
//! ## Value Types
//!
//! - `Null`: absent / JSON null
//! - `Bool`: flags (face_up, tapped)
//! - `Int`: whole numbers (score, counters)
//! - `Float`: any other JSON number
//! - `Text`: strings (names, image file names)
//! - `List`: lists of values

use std::borrow::Borrow;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Key for accessing entity attributes.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeKey(pub String);

impl AttributeKey {
    /// Create a new attribute key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for AttributeKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AttributeKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for AttributeKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for AttributeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Value of an entity attribute.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// No value.
    #[default]
    Null,
    /// Boolean flag.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Non-integer number.
    Float(f64),
    /// Text value.
    Text(String),
    /// List of values.
    List(Vec<Value>),
}

impl Value {
    /// Get as bool if this is a Bool value.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as integer if this is an Int value.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as float. Integers are widened.
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Get as string reference if this is a Text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get as list if this is a List value.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(v) => Some(v),
            _ => None,
        }
    }

    /// Check if this is `Null`.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Truthiness as the server and the browser client understand it.
    ///
    /// `Null`, `false`, zero, `""` and `[]` are false; everything else is true.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(v) => *v != 0,
            Value::Float(v) => *v != 0.0 && !v.is_nan(),
            Value::Text(s) => !s.is_empty(),
            Value::List(v) => !v.is_empty(),
        }
    }

    /// Convert back to a JSON value.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(v) => serde_json::Value::from(*v),
            Value::Float(v) => serde_json::Number::from_f64(*v)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            Value::Text(s) => serde_json::Value::String(s.clone()),
            Value::List(v) => serde_json::Value::Array(v.iter().map(Value::to_json).collect()),
        }
    }
}

impl From<serde_json::Value> for Value {
    /// JSON objects have no attribute representation and become their
    /// serialized text.
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(v) => Value::Int(v),
                None => n.as_f64().map_or(Value::Null, Value::Float),
            },
            serde_json::Value::String(s) => Value::Text(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            obj @ serde_json::Value::Object(_) => Value::Text(obj.to_string()),
        }
    }
}

impl From<&serde_json::Value> for Value {
    fn from(json: &serde_json::Value) -> Self {
        Value::from(json.clone())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::List(v)
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Text(s) => f.write_str(s),
            Value::List(_) => write!(f, "{}", self.to_json()),
        }
    }
}

/// Collection of attributes.
pub type Attributes = FxHashMap<AttributeKey, Value>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_attribute_key() {
        let key1 = AttributeKey::new("face_up");
        let key2: AttributeKey = "face_up".into();
        assert_eq!(key1, key2);
        assert_eq!(key1.as_str(), "face_up");
    }

    #[test]
    fn test_lookup_by_str() {
        let mut attrs = Attributes::default();
        attrs.insert("tapped".into(), true.into());
        assert_eq!(attrs.get("tapped").and_then(Value::as_bool), Some(true));
        assert!(attrs.get("missing").is_none());
    }

    #[test]
    fn test_from_json() {
        assert_eq!(Value::from(json!(null)), Value::Null);
        assert_eq!(Value::from(json!(true)), Value::Bool(true));
        assert_eq!(Value::from(json!(3)), Value::Int(3));
        assert_eq!(Value::from(json!(2.5)), Value::Float(2.5));
        assert_eq!(Value::from(json!("AS.png")), Value::Text("AS.png".into()));
        assert_eq!(
            Value::from(json!([1, "x"])),
            Value::List(vec![Value::Int(1), Value::Text("x".into())])
        );
    }

    #[test]
    fn test_json_object_becomes_text() {
        let value = Value::from(json!({"a": 1}));
        assert_eq!(value.as_text(), Some("{\"a\":1}"));
    }

    #[test]
    fn test_truthiness() {
        assert!(!Value::Null.is_truthy());
        assert!(!Value::Bool(false).is_truthy());
        assert!(!Value::Int(0).is_truthy());
        assert!(!Value::Text(String::new()).is_truthy());
        assert!(!Value::List(Vec::new()).is_truthy());

        assert!(Value::Bool(true).is_truthy());
        assert!(Value::Int(-1).is_truthy());
        assert!(Value::Text("0".into()).is_truthy());
    }

    #[test]
    fn test_to_json() {
        let value = Value::List(vec![Value::Bool(true), Value::Int(4)]);
        assert_eq!(value.to_json(), json!([true, 4]));
    }

    #[test]
    fn test_deserialize_untagged() {
        let value: Value = serde_json::from_str("[1, 2.5, \"a\", null, false]").unwrap();
        assert_eq!(
            value,
            Value::List(vec![
                Value::Int(1),
                Value::Float(2.5),
                Value::Text("a".into()),
                Value::Null,
                Value::Bool(false),
            ])
        );
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Value::Int(5).as_int(), Some(5));
        assert_eq!(Value::Int(5).as_float(), Some(5.0));
        assert_eq!(Value::Int(5).as_bool(), None);
        assert_eq!(Value::Text("x".into()).as_text(), Some("x"));
        assert!(Value::Null.is_null());
    }
}

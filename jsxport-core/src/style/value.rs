//! Style values and insertion-ordered style objects

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::fmt;

/// A single React Native style value
///
/// Numbers are pixel-equivalents (or unitless factors such as `flex`),
/// strings carry colors, percentages and enum keywords.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    Number(f64),
    Text(String),
}

impl StyleValue {
    /// Convert a JSON value, rejecting anything that is not a number or string
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_f64().map(StyleValue::Number),
            Value::String(s) => Some(StyleValue::Text(s.clone())),
            _ => None,
        }
    }

    fn to_json(&self) -> Value {
        match self {
            StyleValue::Number(n) if n.fract() == 0.0 && n.abs() < i64::MAX as f64 => {
                Value::Number(Number::from(*n as i64))
            }
            StyleValue::Number(n) => Number::from_f64(*n).map(Value::Number).unwrap_or(Value::Null),
            StyleValue::Text(s) => Value::String(s.clone()),
        }
    }
}

impl From<i32> for StyleValue {
    fn from(n: i32) -> Self {
        StyleValue::Number(n as f64)
    }
}

impl From<i64> for StyleValue {
    fn from(n: i64) -> Self {
        StyleValue::Number(n as f64)
    }
}

impl From<&str> for StyleValue {
    fn from(s: &str) -> Self {
        StyleValue::Text(s.to_string())
    }
}

impl fmt::Display for StyleValue {
    /// Renders as a JavaScript literal: integral numbers without a
    /// fraction, strings double-quoted and escaped.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

/// Insertion-ordered map of style property to value
///
/// Backed by `serde_json::Map` with `preserve_order`, so re-inserting an
/// existing key keeps its first position and replaces the value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StyleObject {
    props: Map<String, Value>,
}

impl StyleObject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(property, value)` pairs in order
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<StyleValue>,
    {
        let mut object = StyleObject::new();
        for (key, value) in pairs {
            object.insert(key, value.into());
        }
        object
    }

    pub fn insert(&mut self, property: impl Into<String>, value: StyleValue) {
        self.props.insert(property.into(), value.to_json());
    }

    /// Merge every property of `other` into `self`; colliding keys take
    /// the value from `other`.
    pub fn merge(&mut self, other: &StyleObject) {
        for (key, value) in &other.props {
            self.props.insert(key.clone(), value.clone());
        }
    }

    pub fn get(&self, property: &str) -> Option<StyleValue> {
        self.props.get(property).and_then(StyleValue::from_json)
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    pub fn len(&self) -> usize {
        self.props.len()
    }

    /// Property names in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.props.keys().map(String::as_str)
    }

    /// Render as the body of a JSX style expression:
    ///
    /// ```text
    /// {
    ///     backgroundColor: "#3b82f6",
    ///     padding: 16
    ///   }
    /// ```
    ///
    /// Identifier keys are unquoted, anything else (`background-color`) is
    /// emitted as a string key. The indentation matches an attribute that
    /// sits one level inside its element.
    pub fn to_literal(&self) -> String {
        if self.props.is_empty() {
            return "{}".to_string();
        }
        let body: Vec<String> = self
            .props
            .iter()
            .map(|(key, value)| format!("    {}: {}", property_key(key), value))
            .collect();
        format!("{{\n{}\n  }}", body.join(",\n"))
    }
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    }
}

fn property_key(key: &str) -> String {
    if is_identifier(key) {
        key.to_string()
    } else {
        Value::String(key.to_string()).to_string()
    }
}

impl TryFrom<Map<String, Value>> for StyleObject {
    /// Name of the first property whose value is neither a number nor a string
    type Error = String;

    fn try_from(map: Map<String, Value>) -> Result<Self, Self::Error> {
        let mut object = StyleObject::new();
        for (key, value) in map {
            match StyleValue::from_json(&value) {
                Some(v) => object.insert(key, v),
                None => return Err(key),
            }
        }
        Ok(object)
    }
}

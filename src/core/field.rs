//! Typed structured fields
//!
//! This module provides:
//! - `FieldValue`: the tagged union of values a field can carry
//! - `Field`: a single key/value pair attached to a record or a logger

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// Value type for structured logging fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    String(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    Duration(Duration),
    /// Rendered error message
    Error(String),
    Map(BTreeMap<String, FieldValue>),
    Null,
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Uint(u) => write!(f, "{}", u),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Duration(d) => write!(f, "{:?}", d),
            FieldValue::Error(e) => write!(f, "{}", e),
            FieldValue::Map(_) => write!(f, "{}", self.to_json_value()),
            FieldValue::Null => write!(f, "null"),
        }
    }
}

impl FieldValue {
    /// Convert to serde_json::Value for encoding
    ///
    /// Durations encode as fractional milliseconds.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            FieldValue::String(s) | FieldValue::Error(s) => serde_json::Value::String(s.clone()),
            FieldValue::Int(i) => serde_json::Value::Number((*i).into()),
            FieldValue::Uint(u) => serde_json::Value::Number((*u).into()),
            FieldValue::Float(f) => float_to_json(*f),
            FieldValue::Duration(d) => float_to_json(d.as_secs_f64() * 1000.0),
            FieldValue::Bool(b) => serde_json::Value::Bool(*b),
            FieldValue::Map(map) => serde_json::Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json_value()))
                    .collect(),
            ),
            FieldValue::Null => serde_json::Value::Null,
        }
    }

    /// Capture any serializable value, falling back to its serialization error text.
    pub fn any<T: Serialize + ?Sized>(value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(json) => json.into(),
            Err(e) => FieldValue::Error(e.to_string()),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }
}

fn float_to_json(f: f64) -> serde_json::Value {
    serde_json::Number::from_f64(f)
        .map(serde_json::Value::Number)
        .unwrap_or(serde_json::Value::Null)
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<&String> for FieldValue {
    fn from(s: &String) -> Self {
        FieldValue::String(s.clone())
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<u64> for FieldValue {
    fn from(u: u64) -> Self {
        FieldValue::Uint(u)
    }
}

impl From<u32> for FieldValue {
    fn from(u: u32) -> Self {
        FieldValue::Uint(u as u64)
    }
}

impl From<usize> for FieldValue {
    fn from(u: usize) -> Self {
        FieldValue::Uint(u as u64)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<Duration> for FieldValue {
    fn from(d: Duration) -> Self {
        FieldValue::Duration(d)
    }
}

impl<V: Into<FieldValue>> From<Option<V>> for FieldValue {
    fn from(value: Option<V>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

impl From<BTreeMap<String, FieldValue>> for FieldValue {
    fn from(map: BTreeMap<String, FieldValue>) -> Self {
        FieldValue::Map(map)
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => FieldValue::Null,
            serde_json::Value::Bool(b) => FieldValue::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    FieldValue::Int(i)
                } else if let Some(u) = n.as_u64() {
                    FieldValue::Uint(u)
                } else {
                    FieldValue::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => FieldValue::String(s),
            serde_json::Value::Array(items) => FieldValue::Map(
                items
                    .into_iter()
                    .enumerate()
                    .map(|(i, v)| (i.to_string(), v.into()))
                    .collect(),
            ),
            serde_json::Value::Object(obj) => {
                FieldValue::Map(obj.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

/// A key/value pair carried by a record or bound to a logger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub key: String,
    pub value: FieldValue,
}

impl Field {
    pub fn new<K, V>(key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Field holding any serializable value
    pub fn any<K: Into<String>, T: Serialize + ?Sized>(key: K, value: &T) -> Self {
        Self {
            key: key.into(),
            value: FieldValue::any(value),
        }
    }

    /// Field under the conventional `error` key
    pub fn error(err: &dyn std::error::Error) -> Self {
        Self::named_error("error", err)
    }

    pub fn named_error<K: Into<String>>(key: K, err: &dyn std::error::Error) -> Self {
        Self {
            key: key.into(),
            value: FieldValue::Error(err.to_string()),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_creation() {
        let field = Field::new("user_id", 123);
        assert_eq!(field.key, "user_id");
        assert_eq!(field.value, FieldValue::Int(123));
        assert_eq!(field.to_string(), "user_id=123");
    }

    #[test]
    fn test_duration_encodes_as_millis() {
        let value = FieldValue::from(Duration::from_micros(1500));
        assert_eq!(value.to_json_value(), serde_json::json!(1.5));
    }

    #[test]
    fn test_any_captures_structure() {
        #[derive(Serialize)]
        struct Request<'a> {
            method: &'a str,
            status: u16,
        }

        let field = Field::any(
            "request",
            &Request {
                method: "GET",
                status: 200,
            },
        );

        match &field.value {
            FieldValue::Map(map) => {
                assert_eq!(map.get("method"), Some(&FieldValue::String("GET".into())));
                assert_eq!(map.get("status"), Some(&FieldValue::Int(200)));
            }
            other => panic!("expected map, got {:?}", other),
        }
    }

    #[test]
    fn test_error_field() {
        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let field = Field::error(&io_err);
        assert_eq!(field.key, "error");
        assert_eq!(field.value, FieldValue::Error("disk full".into()));
    }

    #[test]
    fn test_option_maps_none_to_null() {
        assert_eq!(FieldValue::from(None::<i64>), FieldValue::Null);
        assert_eq!(FieldValue::from(Some("x")), FieldValue::String("x".into()));
    }
}

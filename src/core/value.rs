//! Value module for firestore-perf
//!
//! This module defines the Value enum, representing the field values
//! stored in documents, and its mapping to the Firestore REST encoding.

use std::cmp::Ordering;
use std::fmt;
use serde_json::{json, Map};
use super::errors::{PerfError, Result};

/// The different types of values that can be stored in a document field
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Null value
    Null,
    /// Boolean value
    Boolean(bool),
    /// Integer value
    Integer(i64),
    /// Floating point value
    Float(f64),
    /// String value
    String(String),
}

impl Value {
    /// Check if the value is a string
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Get the integer content, if any
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get the string content, if any
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Rank used to order values of different types
    fn type_rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Boolean(_) => 1,
            Value::Integer(_) | Value::Float(_) => 2,
            Value::String(_) => 3,
        }
    }

    /// Total order used when sorting query results.
    ///
    /// Values of different types sort by type (null, boolean, number, string).
    /// Integers and floats compare numerically with each other.
    pub fn sort_cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Boolean(a), Value::Boolean(b)) => a.cmp(b),
            (Value::Integer(a), Value::Integer(b)) => a.cmp(b),
            (Value::Integer(a), Value::Float(b)) => (*a as f64).total_cmp(b),
            (Value::Float(a), Value::Integer(b)) => a.total_cmp(&(*b as f64)),
            (Value::Float(a), Value::Float(b)) => a.total_cmp(b),
            (Value::String(a), Value::String(b)) => a.cmp(b),
            _ => self.type_rank().cmp(&other.type_rank()),
        }
    }

    /// Encode the value in the Firestore REST `Value` representation
    pub fn to_rest(&self) -> serde_json::Value {
        match self {
            Value::Null => json!({ "nullValue": "NULL_VALUE" }),
            Value::Boolean(b) => json!({ "booleanValue": b }),
            // 64-bit integers travel as decimal strings
            Value::Integer(i) => json!({ "integerValue": i.to_string() }),
            Value::Float(f) => json!({ "doubleValue": f }),
            Value::String(s) => json!({ "stringValue": s }),
        }
    }

    /// Decode a Firestore REST `Value` representation
    pub fn from_rest(json: &serde_json::Value) -> Result<Value> {
        let obj = json.as_object()
            .ok_or_else(|| PerfError::Data(format!("Expected a value object, got {}", json)))?;

        let (kind, inner) = obj.iter().next()
            .ok_or_else(|| PerfError::Data("Empty value object".to_string()))?;

        match kind.as_str() {
            "nullValue" => Ok(Value::Null),
            "booleanValue" => inner.as_bool()
                .map(Value::Boolean)
                .ok_or_else(|| PerfError::Data(format!("Invalid booleanValue: {}", inner))),
            "integerValue" => {
                // The emulator sends strings, but accept plain numbers too
                let parsed = match inner {
                    serde_json::Value::String(s) => s.parse::<i64>().ok(),
                    other => other.as_i64(),
                };
                parsed
                    .map(Value::Integer)
                    .ok_or_else(|| PerfError::Data(format!("Invalid integerValue: {}", inner)))
            },
            "doubleValue" => inner.as_f64()
                .map(Value::Float)
                .ok_or_else(|| PerfError::Data(format!("Invalid doubleValue: {}", inner))),
            "stringValue" | "timestampValue" | "referenceValue" => inner.as_str()
                .map(|s| Value::String(s.to_string()))
                .ok_or_else(|| PerfError::Data(format!("Invalid {}: {}", kind, inner))),
            "bytesValue" => inner.as_str()
                .map(|s| Value::String(s.to_string()))
                .ok_or_else(|| PerfError::Data(format!("Invalid bytesValue: {}", inner))),
            // Composite and unknown kinds are kept as their JSON text
            _ => Ok(Value::String(serde_json::to_string(inner)?)),
        }
    }
}

/// Encode a field map in the Firestore REST `fields` representation
pub fn fields_to_rest<'a, I>(fields: I) -> serde_json::Value
where
    I: IntoIterator<Item = (&'a String, &'a Value)>,
{
    let map: Map<String, serde_json::Value> = fields.into_iter()
        .map(|(name, value)| (name.clone(), value.to_rest()))
        .collect();
    serde_json::Value::Object(map)
}

/// Format a Value as a string
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(fl) => write!(f, "{}", fl),
            Value::String(s) => write!(f, "\"{}\"", s),
        }
    }
}

/// Convert from common types to Value
impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Integer(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_conversion() {
        let int_value: Value = 42.into();
        let bool_value: Value = true.into();
        let string_value: Value = "Hello".into();

        assert_eq!(int_value, Value::Integer(42));
        assert_eq!(bool_value, Value::Boolean(true));
        assert_eq!(string_value, Value::String("Hello".to_string()));
        assert_eq!(int_value.as_integer(), Some(42));
        assert_eq!(string_value.as_str(), Some("Hello"));
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::Boolean(true).to_string(), "true");
        assert_eq!(Value::Integer(42).to_string(), "42");
        assert_eq!(Value::Float(2.5).to_string(), "2.5");
        assert_eq!(Value::String("Hello".to_string()).to_string(), "\"Hello\"");
    }

    #[test]
    fn test_rest_encoding() {
        assert_eq!(Value::Integer(1_700_000_000_000).to_rest(), json!({ "integerValue": "1700000000000" }));
        assert_eq!(Value::from("abc").to_rest(), json!({ "stringValue": "abc" }));
        assert_eq!(Value::Null.to_rest(), json!({ "nullValue": "NULL_VALUE" }));
        assert_eq!(Value::Boolean(false).to_rest(), json!({ "booleanValue": false }));
    }

    #[test]
    fn test_rest_decoding() {
        assert_eq!(Value::from_rest(&json!({ "integerValue": "17" })).unwrap(), Value::Integer(17));
        assert_eq!(Value::from_rest(&json!({ "integerValue": 17 })).unwrap(), Value::Integer(17));
        assert_eq!(Value::from_rest(&json!({ "doubleValue": 0.5 })).unwrap(), Value::Float(0.5));
        assert_eq!(
            Value::from_rest(&json!({ "timestampValue": "2024-01-01T00:00:00Z" })).unwrap(),
            Value::String("2024-01-01T00:00:00Z".to_string())
        );
        assert!(Value::from_rest(&json!({ "mapValue": { "fields": {} } })).unwrap().is_string());

        assert_eq!(
            Value::from_rest(&json!({ "bytesValue": "AAEC" })).unwrap(),
            Value::String("AAEC".to_string())
        );

        let point = json!({ "geoPointValue": { "latitude": 48.85, "longitude": 2.35 } });
        let decoded = Value::from_rest(&point).unwrap();
        let text = decoded.as_str().unwrap();
        assert!(text.contains("latitude") && text.contains("2.35"));
        assert!(Value::from_rest(&json!({ "vectorValue": [1, 2] })).unwrap().is_string());

        assert!(matches!(Value::from_rest(&json!({ "integerValue": "x" })), Err(PerfError::Data(_))));
        assert!(matches!(Value::from_rest(&json!("bare")), Err(PerfError::Data(_))));
    }

    #[test]
    fn test_sort_order() {
        assert_eq!(Value::Integer(1).sort_cmp(&Value::Integer(2)), Ordering::Less);
        assert_eq!(Value::Integer(2).sort_cmp(&Value::Float(1.5)), Ordering::Greater);
        assert_eq!(Value::Null.sort_cmp(&Value::Boolean(false)), Ordering::Less);
        assert_eq!(Value::String("a".into()).sort_cmp(&Value::Integer(9)), Ordering::Greater);
    }
}

//! Attribute values carried by blocks
//!
//! Attributes are loosely typed: a block type's schema names which keys a
//! block may carry, but the values themselves are JSON-like and are never
//! coerced by the engine.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Attribute map of a block, keyed by attribute name
pub type Attributes = HashMap<String, AttributeValue>;

/// Attribute value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// String value
    String(String),
    /// Integer number
    Integer(i64),
    /// Floating point number
    Number(f64),
    /// Boolean value
    Boolean(bool),
    /// Array of values
    Array(Vec<AttributeValue>),
    /// Object with key-value pairs
    Object(HashMap<String, AttributeValue>),
    /// Null value
    Null,
}

impl AttributeValue {
    /// Whether the value counts as set when used as a schema default.
    ///
    /// Null, `false`, zero, NaN and the empty string are "empty"; empty
    /// arrays and objects are not.
    pub fn is_truthy(&self) -> bool {
        match self {
            AttributeValue::Null => false,
            AttributeValue::Boolean(b) => *b,
            AttributeValue::Integer(i) => *i != 0,
            AttributeValue::Number(n) => *n != 0.0 && !n.is_nan(),
            AttributeValue::String(s) => !s.is_empty(),
            AttributeValue::Array(_) | AttributeValue::Object(_) => true,
        }
    }

    /// Try to convert to string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to convert to number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AttributeValue::Number(n) => Some(*n),
            AttributeValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Try to convert to integer.
    ///
    /// Floats convert only when they are whole and within `i64` range.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            AttributeValue::Integer(i) => Some(*i),
            AttributeValue::Number(n)
                if n.is_finite() && n.fract() == 0.0 && *n >= i64::MIN as f64 && *n < i64::MAX as f64 =>
            {
                Some(*n as i64)
            }
            _ => None,
        }
    }

    /// Try to convert to array
    pub fn as_array(&self) -> Option<&Vec<AttributeValue>> {
        match self {
            AttributeValue::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Try to convert to object
    pub fn as_object(&self) -> Option<&HashMap<String, AttributeValue>> {
        match self {
            AttributeValue::Object(obj) => Some(obj),
            _ => None,
        }
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        AttributeValue::String(s)
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue::String(s.to_string())
    }
}

impl From<f64> for AttributeValue {
    fn from(n: f64) -> Self {
        AttributeValue::Number(n)
    }
}

impl From<i64> for AttributeValue {
    fn from(i: i64) -> Self {
        AttributeValue::Integer(i)
    }
}

impl From<bool> for AttributeValue {
    fn from(b: bool) -> Self {
        AttributeValue::Boolean(b)
    }
}

impl From<Vec<AttributeValue>> for AttributeValue {
    fn from(values: Vec<AttributeValue>) -> Self {
        AttributeValue::Array(values)
    }
}

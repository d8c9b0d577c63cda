//! Key/value diagnostic attributes and their value variants.

use std::fmt;

use serde::Serialize;

/// A single diagnostic attribute attached to an error at construction time.
#[derive(Debug, Clone, PartialEq)]
pub struct Attr {
    key: Box<str>,
    value: AttrValue,
}

impl Attr {
    pub fn new(key: impl Into<Box<str>>, value: impl Into<AttrValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &AttrValue {
        &self.value
    }
}

/// Flat `key=value` form used by the single-line error rendering.
impl fmt::Display for Attr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// An attribute value. Variants keep their native type all the way through
/// the structured record; only the flat rendering stringifies them.
///
/// `Any` carries an arbitrary structured value; its flat textual form is the
/// compact JSON literal.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttrValue {
    Str(Box<str>),
    Int(i64),
    Float(f64),
    Bool(bool),
    Any(serde_json::Value),
}

impl AttrValue {
    /// Convert into a `serde_json` value, preserving the variant's type.
    pub fn to_value(&self) -> serde_json::Value {
        match self {
            AttrValue::Str(s) => serde_json::Value::String(s.to_string()),
            AttrValue::Int(i) => serde_json::Value::from(*i),
            AttrValue::Float(x) => serde_json::Value::from(*x),
            AttrValue::Bool(b) => serde_json::Value::Bool(*b),
            AttrValue::Any(v) => v.clone(),
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Verbatim, unescaped. Spaces, brackets and non-ASCII pass
            // through untouched.
            AttrValue::Str(s) => f.write_str(s),
            AttrValue::Int(i) => write!(f, "{i}"),
            AttrValue::Float(x) => write!(f, "{x}"),
            AttrValue::Bool(b) => write!(f, "{b}"),
            AttrValue::Any(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Str(s.into())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::Str(s.into())
    }
}

impl From<Box<str>> for AttrValue {
    fn from(s: Box<str>) -> Self {
        AttrValue::Str(s)
    }
}

impl From<i32> for AttrValue {
    fn from(i: i32) -> Self {
        AttrValue::Int(i64::from(i))
    }
}

impl From<i64> for AttrValue {
    fn from(i: i64) -> Self {
        AttrValue::Int(i)
    }
}

impl From<u32> for AttrValue {
    fn from(i: u32) -> Self {
        AttrValue::Int(i64::from(i))
    }
}

impl From<f64> for AttrValue {
    fn from(x: f64) -> Self {
        AttrValue::Float(x)
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        AttrValue::Bool(b)
    }
}

impl From<serde_json::Value> for AttrValue {
    fn from(v: serde_json::Value) -> Self {
        AttrValue::Any(v)
    }
}

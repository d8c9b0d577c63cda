//! Nested, order-preserving log records.
//!
//! A [`Record`] is what a structured-logging sink receives: an ordered list
//! of keyed entries rather than a map, so insertion order is significant and
//! duplicate keys survive. Whether duplicates are merged, dropped, or
//! emitted twice is the transport's decision; the `Serialize` impl emits
//! every entry as-is.

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

use crate::attr::AttrValue;

/// Capability for producing a structured record. Implemented by
/// [`crate::StructuredError`]; a sink that finds this capability on a value
/// logs the record instead of the flat string.
pub trait Structured {
    fn to_record(&self) -> Record;
}

/// An ordered sequence of keyed entries, possibly nested.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    entries: Vec<(Box<str>, RecordValue)>,
}

/// A record entry value: either a plain attribute value or a nested group
/// (a wrapped structured cause renders as a group).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RecordValue {
    Value(AttrValue),
    Group(Record),
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Append an entry. Keys are taken verbatim; nothing rejects a
    /// duplicate or a reserved name.
    pub fn push(&mut self, key: impl Into<Box<str>>, value: impl Into<RecordValue>) {
        self.entries.push((key.into(), value.into()));
    }

    /// First entry with the given key, if any.
    pub fn get(&self, key: &str) -> Option<&RecordValue> {
        self.entries
            .iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RecordValue)> {
        self.entries.iter().map(|(k, v)| (k.as_ref(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Object form of the record. Entry order is kept; duplicate keys
    /// collapse last-wins, since a JSON object cannot hold both.
    pub fn to_value(&self) -> serde_json::Value {
        let mut map = serde_json::Map::with_capacity(self.entries.len());
        for (key, value) in &self.entries {
            map.insert(key.to_string(), value.to_value());
        }
        serde_json::Value::Object(map)
    }

    /// Pretty JSON string for logs or UI.
    pub fn to_json_pretty(&self) -> Option<String> {
        serde_json::to_string_pretty(self).ok()
    }
}

impl RecordValue {
    pub fn to_value(&self) -> serde_json::Value {
        match self {
            RecordValue::Value(v) => v.to_value(),
            RecordValue::Group(r) => r.to_value(),
        }
    }
}

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key.as_ref(), value)?;
        }
        map.end()
    }
}

impl<T: Into<AttrValue>> From<T> for RecordValue {
    fn from(value: T) -> Self {
        RecordValue::Value(value.into())
    }
}

impl From<Record> for RecordValue {
    fn from(record: Record) -> Self {
        RecordValue::Group(record)
    }
}

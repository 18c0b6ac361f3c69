//! Normalization of raw `_links` and `_embedded` relation values.
//!
//! A relation value on the wire may be missing, a bare scalar, a single
//! object, or a list mixing both. It is classified once into a
//! [`RawRelation`] and collapsed into a flat list of JSON objects before any
//! lookup happens:
//!
//! | Raw value | Normalized |
//! |-----------|------------|
//! | `null`, `false`, `[]`, `{}` | `[]` |
//! | `"/a"` | `[wrap("/a")]` |
//! | `{"href": "/a"}` | `[{"href": "/a"}]` |
//! | `["/a", null, {"href": "/b"}]` | `[wrap("/a"), {"href": "/b"}]` |
//!
//! Normalizing an already normalized list yields the same list.

use crate::protocol::keys;
use serde_json::{Map, Value};

/// A JSON object as found in a relation list.
pub type Entry = Map<String, Value>;

/// Shape of a relation value before normalization.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum RawRelation {
    Empty,
    Scalar(Value),
    Structured(Entry),
    List(Vec<RawRelation>),
}

impl RawRelation {
    pub(crate) fn from_value(value: Value) -> Self {
        match value {
            Value::Null | Value::Bool(false) => RawRelation::Empty,
            Value::Array(items) if items.is_empty() => RawRelation::Empty,
            Value::Object(map) if map.is_empty() => RawRelation::Empty,
            Value::Array(items) => {
                RawRelation::List(items.into_iter().map(RawRelation::from_value).collect())
            }
            Value::Object(map) => RawRelation::Structured(map),
            scalar => RawRelation::Scalar(scalar),
        }
    }

    fn into_value(self) -> Value {
        match self {
            RawRelation::Empty => Value::Null,
            RawRelation::Scalar(value) => value,
            RawRelation::Structured(map) => Value::Object(map),
            RawRelation::List(items) => {
                Value::Array(items.into_iter().map(RawRelation::into_value).collect())
            }
        }
    }

    /// Collapse into a list of objects. `wrap` turns anything that is not an
    /// object into one; empty list members are dropped.
    pub(crate) fn normalize(self, wrap: fn(Value) -> Entry) -> Vec<Entry> {
        match self {
            RawRelation::Empty => Vec::new(),
            RawRelation::Scalar(value) => vec![wrap(value)],
            RawRelation::Structured(map) => vec![map],
            RawRelation::List(items) => items
                .into_iter()
                .filter_map(|item| match item {
                    RawRelation::Empty => None,
                    RawRelation::Structured(map) => Some(map),
                    other => Some(wrap(other.into_value())),
                })
                .collect(),
        }
    }
}

/// Wrap a bare link value as `{"href": value}`.
pub(crate) fn link_entry(value: Value) -> Entry {
    let mut entry = Entry::new();
    entry.insert(keys::HREF.to_string(), value);
    entry
}

/// Wrap a bare embedded value as an index-keyed object: `"a"` becomes
/// `{"0": "a"}` and `["a", "b"]` becomes `{"0": "a", "1": "b"}`.
pub(crate) fn embedded_entry(value: Value) -> Entry {
    match value {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| (index.to_string(), item))
            .collect(),
        Value::Object(map) => map,
        other => {
            let mut entry = Entry::new();
            entry.insert("0".to_string(), other);
            entry
        }
    }
}

pub(crate) fn normalize_links(value: Value) -> Vec<Entry> {
    RawRelation::from_value(value).normalize(link_entry)
}

pub(crate) fn normalize_embedded(value: Value) -> Vec<Entry> {
    RawRelation::from_value(value).normalize(embedded_entry)
}

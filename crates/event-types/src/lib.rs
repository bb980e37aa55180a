//! Shared event type definitions
//!
//! This crate contains the wire types exchanged between the page-load beacon and
//! the sinks that deliver its events: the scalar [`FieldValue`], the flat
//! [`EventRecord`] and the [`EventType`] discriminator carried in every record.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

/// Name of the field holding the event type discriminator.
pub const TYPE_FIELD: &str = "type";

/// Name of the field correlating a load event with its unload event.
pub const PAGE_LOAD_ID_FIELD: &str = "page_load_id";

/// Kind of event emitted by the beacon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventType {
    PageLoad,
    PageUnload,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::PageLoad => "page-load",
            EventType::PageUnload => "page-unload",
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents a scalar value stored in an event record
///
/// Serialization is one-way: JSON does not keep the signed/unsigned split, so
/// records are only ever encoded, never read back.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    UnsignedInteger(u64),
    Float(f64),
    Boolean(bool),
}

impl FieldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view of the value, regardless of which numeric variant holds it.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(i) => Some(*i as f64),
            FieldValue::UnsignedInteger(u) => Some(*u as f64),
            FieldValue::Float(f) => Some(*f),
            FieldValue::String(_) | FieldValue::Boolean(_) => None,
        }
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        FieldValue::UnsignedInteger(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::UnsignedInteger(u64::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

/// A flat wide event: field name to scalar value.
///
/// Absent values are never stored; a field is either present with a value or
/// missing from the map. Keys are kept sorted so encodings are stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EventRecord {
    fields: BTreeMap<String, FieldValue>,
}

impl EventRecord {
    /// Create a record carrying its type discriminator and correlation id.
    pub fn new(event_type: EventType, page_load_id: u32) -> Self {
        let mut record = Self::default();
        record.insert(TYPE_FIELD, event_type.as_str());
        record.insert(PAGE_LOAD_ID_FIELD, page_load_id);
        record
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Insert `value` only when it is present.
    pub fn insert_opt<V: Into<FieldValue>>(&mut self, key: impl Into<String>, value: Option<V>) {
        if let Some(value) = value {
            self.insert(key, value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The event type, when the discriminator holds a known value.
    pub fn event_type(&self) -> Option<EventType> {
        match self.get(TYPE_FIELD).and_then(FieldValue::as_str)? {
            "page-load" => Some(EventType::PageLoad),
            "page-unload" => Some(EventType::PageUnload),
            _ => None,
        }
    }

    pub fn page_load_id(&self) -> Option<u64> {
        match self.get(PAGE_LOAD_ID_FIELD)? {
            FieldValue::UnsignedInteger(u) => Some(*u),
            FieldValue::Integer(i) => u64::try_from(*i).ok(),
            _ => None,
        }
    }
}

//! Event payloads: flat maps from dotted keys to scalar values.

use std::collections::btree_map::{self, BTreeMap};

use serde::{Deserialize, Serialize};
use viewtrack_canonical::Token;

/// Wire names of payload keys.
///
/// Keys follow a `namespace.field` convention. They are part of the wire
/// contract and must never change within a schema version.
pub mod keys {
    /// Paged publication (collection) identifier.
    pub const PUBLICATION_ID: &str = "pp.id";
    /// Page number within a paged publication.
    pub const PAGE_NUMBER: &str = "ppp.n";
    /// Offer (item) identifier.
    pub const OFFER_ID: &str = "of.id";
    /// Search query.
    pub const SEARCH_QUERY: &str = "sea.q";
    /// Search language code.
    pub const SEARCH_LANGUAGE: &str = "sea.l";
    /// Local business (store) identifier.
    pub const STORE_ID: &str = "lb.id";
    /// Identifier of the dealer owning the store.
    pub const DEALER_ID: &str = "lb.bid";
    /// Horizontal accuracy of the location fix, in meters.
    pub const HORIZONTAL_ACCURACY: &str = "l.hac";
    /// Distance to the store, in meters.
    pub const DISTANCE_TO_STORE: &str = "lb.dis";
    /// Whether the user interacted recently.
    pub const RECENT_INTERACTION: &str = "b.cin";
    /// [`RECENT_INTERACTION`] encoded as `1` or `0`.
    pub const RECENT_INTERACTION_INT: &str = "b.cint";
    /// Salted view token.
    pub const VIEW_TOKEN: &str = "vt";
    /// Application identifier stamped by the tracker.
    pub const APP_ID: &str = "_a";
}

/// Scalar payload value.
///
/// Serializes untagged, so a payload is a plain JSON object of strings,
/// integers and booleans. Nested values are rejected on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventValue {
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// String value.
    String(String),
}

impl EventValue {
    /// Returns the string, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            EventValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer, if this is an integer value.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            EventValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the boolean, if this is a boolean value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            EventValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<&str> for EventValue {
    fn from(value: &str) -> Self {
        EventValue::String(value.to_owned())
    }
}

impl From<String> for EventValue {
    fn from(value: String) -> Self {
        EventValue::String(value)
    }
}

impl From<Token> for EventValue {
    fn from(value: Token) -> Self {
        EventValue::String(value.into_string())
    }
}

impl From<i64> for EventValue {
    fn from(value: i64) -> Self {
        EventValue::Int(value)
    }
}

impl From<i32> for EventValue {
    fn from(value: i32) -> Self {
        EventValue::Int(i64::from(value))
    }
}

impl From<bool> for EventValue {
    fn from(value: bool) -> Self {
        EventValue::Bool(value)
    }
}

/// Attribute map carried by an event. Keys are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload(BTreeMap<String, EventValue>);

impl Payload {
    /// Creates an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<EventValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Sets `key` only when `value` is present. Absent values leave the key out.
    pub fn insert_opt<V: Into<EventValue>>(&mut self, key: impl Into<String>, value: Option<V>) {
        if let Some(value) = value {
            self.insert(key, value);
        }
    }

    /// Returns the value for `key`.
    pub fn get(&self, key: &str) -> Option<&EventValue> {
        self.0.get(key)
    }

    /// Returns the string value for `key`, if present and a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(EventValue::as_str)
    }

    /// Returns the integer value for `key`, if present and an integer.
    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(EventValue::as_int)
    }

    /// Whether `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the payload has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates entries in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, EventValue> {
        self.0.iter()
    }
}

impl<K: Into<String>, V: Into<EventValue>> FromIterator<(K, V)> for Payload {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<EventValue>, const N: usize> From<[(K, V); N]> for Payload {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a Payload {
    type Item = (&'a String, &'a EventValue);
    type IntoIter = btree_map::Iter<'a, String, EventValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

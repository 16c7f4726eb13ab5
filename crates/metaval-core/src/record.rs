//! # Record Accessors
//!
//! The validation engine reads and writes named fields through
//! [`MetadataRecord`] rather than inspecting records dynamically. Implement
//! it once per record type; implementations are provided for the common
//! string-keyed maps of `serde_json::Value`.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use serde_json::{Map, Value};

use crate::value::value_len;

/// Named-field access to one metadata record.
///
/// The engine only ever tests membership, reads a field, measures its
/// length, and overwrites it with a converted value.
pub trait MetadataRecord {
    /// Current value of the named field, if present.
    fn field_value(&self, name: &str) -> Option<&Value>;

    /// Replace the named field's value.
    fn set_field(&mut self, name: &str, value: Value);

    /// Whether the record exposes the named field.
    fn has_field(&self, name: &str) -> bool {
        self.field_value(name).is_some()
    }

    /// Length of the named field's value; see [`value_len`].
    ///
    /// `None` if the field is absent or its value has no length.
    fn field_len(&self, name: &str) -> Option<usize> {
        self.field_value(name).and_then(value_len)
    }
}

impl MetadataRecord for Map<String, Value> {
    fn field_value(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }

    fn set_field(&mut self, name: &str, value: Value) {
        self.insert(name.to_string(), value);
    }

    fn has_field(&self, name: &str) -> bool {
        self.contains_key(name)
    }
}

impl MetadataRecord for BTreeMap<String, Value> {
    fn field_value(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }

    fn set_field(&mut self, name: &str, value: Value) {
        self.insert(name.to_string(), value);
    }

    fn has_field(&self, name: &str) -> bool {
        self.contains_key(name)
    }
}

impl<S: BuildHasher> MetadataRecord for HashMap<String, Value, S> {
    fn field_value(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }

    fn set_field(&mut self, name: &str, value: Value) {
        self.insert(name.to_string(), value);
    }

    fn has_field(&self, name: &str) -> bool {
        self.contains_key(name)
    }
}

//! A codepoint interval together with its property values.

use std::collections::BTreeMap;

use crate::ucd::types::codepoint::to_u;
use crate::ucd::types::property::{PropertyKey, Registry};
use crate::ucd::types::value::PropertyValue;

/// A write that was refused because the group already held another value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub key: PropertyKey,
    pub first: u32,
    pub last: u32,
    pub kept: PropertyValue,
    pub rejected: PropertyValue,
}

impl Conflict {
    /// One-line description with the property spelled by its registered name.
    pub fn describe(&self, registry: &Registry) -> String {
        format!(
            "Attempt to reset {} on {}..{} from '{}' to '{}' (ignored)",
            registry.short_name(self.key),
            to_u(self.first),
            to_u(self.last),
            self.kept,
            self.rejected
        )
    }
}

/// An inclusive interval `[first, last]` sharing one set of property values.
///
/// Inside a [`Repertoire`](super::Repertoire) the bounds are maintained by the
/// store; callers can read them but only the store moves them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    first: u32,
    last: u32,
    properties: BTreeMap<PropertyKey, PropertyValue>,
}

impl Group {
    pub fn new(first: u32, last: u32) -> Self {
        Group {
            first,
            last,
            properties: BTreeMap::new(),
        }
    }

    pub(crate) fn with_properties(
        first: u32,
        last: u32,
        properties: BTreeMap<PropertyKey, PropertyValue>,
    ) -> Self {
        Group {
            first,
            last,
            properties,
        }
    }

    pub fn first(&self) -> u32 {
        self.first
    }

    pub fn last(&self) -> u32 {
        self.last
    }

    /// Number of codepoints covered.
    pub fn len(&self) -> u32 {
        self.last - self.first + 1
    }

    pub fn contains(&self, cp: u32) -> bool {
        self.first <= cp && cp <= self.last
    }

    pub(crate) fn set_bounds(&mut self, first: u32, last: u32) {
        self.first = first;
        self.last = last;
    }

    /// Text value of `key`, if any.
    pub fn get(&self, key: PropertyKey) -> Option<&str> {
        self.properties.get(&key).and_then(PropertyValue::as_text)
    }

    pub fn get_object(&self, key: PropertyKey) -> Option<&PropertyValue> {
        self.properties.get(&key)
    }

    /// Stores a text value unless a different one is already present.
    ///
    /// Returns `false` when the write is rejected.
    pub fn put(&mut self, key: PropertyKey, value: impl Into<String>) -> bool {
        self.put_object(key, PropertyValue::Text(value.into()))
    }

    /// Stores a value unless a different one is already present.
    pub fn put_object(&mut self, key: PropertyKey, value: PropertyValue) -> bool {
        self.put_checked(key, value).is_none()
    }

    /// Like [`Group::put_object`], but hands back the refused write.
    pub fn put_checked(&mut self, key: PropertyKey, value: PropertyValue) -> Option<Conflict> {
        match self.properties.get(&key) {
            Some(existing) if *existing != value => Some(Conflict {
                key,
                first: self.first,
                last: self.last,
                kept: existing.clone(),
                rejected: value,
            }),
            Some(_) => None,
            None => {
                self.properties.insert(key, value);
                None
            }
        }
    }

    /// Overwrites unconditionally.
    pub fn put_forced(&mut self, key: PropertyKey, value: impl Into<PropertyValue>) {
        self.properties.insert(key, value.into());
    }

    /// Stores `value` only if `key` has no value yet. Returns whether it was stored.
    pub fn put_default(&mut self, key: PropertyKey, value: impl Into<PropertyValue>) -> bool {
        if self.properties.contains_key(&key) {
            return false;
        }
        self.properties.insert(key, value.into());
        true
    }

    pub fn remove(&mut self, key: PropertyKey) -> Option<PropertyValue> {
        self.properties.remove(&key)
    }

    /// True iff both groups hold exactly the same key/value pairs.
    pub fn same_properties(&self, other: &Group) -> bool {
        self.properties == other.properties
    }

    /// Key/value pairs in registration order.
    pub fn properties(&self) -> impl Iterator<Item = (PropertyKey, &PropertyValue)> + '_ {
        self.properties.iter().map(|(key, value)| (*key, value))
    }

    pub fn keys(&self) -> impl Iterator<Item = PropertyKey> + '_ {
        self.properties.keys().copied()
    }

    pub fn property_count(&self) -> usize {
        self.properties.len()
    }

    pub(crate) fn property_map(&self) -> &BTreeMap<PropertyKey, PropertyValue> {
        &self.properties
    }

    pub(crate) fn property_map_mut(&mut self) -> &mut BTreeMap<PropertyKey, PropertyValue> {
        &mut self.properties
    }
}

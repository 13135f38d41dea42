//! Small keyed tables that travel with the repertoire.
//!
//! Each table holds one kind of [`CatalogEntry`]. An entry type knows its
//! key, its XML element names and the order of its fields, which is both the
//! column order of its UCD text file and the attribute order in XML. The
//! table itself only stores, iterates and diffs.

use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;

use crate::ucd::diff::{diff_keyed, Detail, DifferenceCounter};
use crate::ucd::types::error::Result;

pub trait CatalogEntry: Clone + fmt::Debug + fmt::Display + PartialEq {
    type Key: Ord + Clone + fmt::Debug;

    /// Banner of the diff section.
    const TITLE: &'static str;
    /// XML element wrapping the whole table.
    const LIST_ELEMENT: &'static str;
    /// XML element of one entry.
    const ELEMENT: &'static str;
    /// Attribute names, in data-file column order.
    const FIELDS: &'static [&'static str];

    fn key(&self) -> Self::Key;

    /// Field values in [`CatalogEntry::FIELDS`] order.
    fn values(&self) -> Vec<String>;

    /// Builds an entry from values in [`CatalogEntry::FIELDS`] order.
    /// Absent trailing values are passed as empty strings.
    fn from_values(values: &[&str]) -> Result<Self>;
}

/// `values[index]`, or `""` past the end.
pub(crate) fn value_at<'a>(values: &[&'a str], index: usize) -> &'a str {
    values.get(index).copied().unwrap_or_default().trim()
}

/// Entries keyed by [`CatalogEntry::key`]; a later entry with the same key
/// replaces the earlier one.
#[derive(Debug, Clone)]
pub struct Catalog<E: CatalogEntry> {
    entries: BTreeMap<E::Key, E>,
}

impl<E: CatalogEntry> Default for Catalog<E> {
    fn default() -> Self {
        Catalog {
            entries: BTreeMap::new(),
        }
    }
}

impl<E: CatalogEntry> Catalog<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entry: E) {
        self.entries.insert(entry.key(), entry);
    }

    pub fn get(&self, key: &E::Key) -> Option<&E> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.entries.values()
    }

    /// Reports entries added, removed or changed in any field since `older`.
    pub fn diff<W: Write>(&self, older: &Catalog<E>, detail: Detail, out: &mut W) -> Result<DifferenceCounter> {
        diff_keyed(E::TITLE, &older.entries, &self.entries, |a, b| a == b, detail, out)
    }
}

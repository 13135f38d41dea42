//! Comparison of two keyed collections.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::io::Write;

use super::counter::{Change, DifferenceCounter};
use crate::ucd::types::error::{Result, UcdError};

/// How much a diff report prints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Detail {
    /// Counter lines only.
    #[default]
    Summary,
    /// One line per difference.
    Changes,
    /// Differences, and codepoints whose classification changed are compared too.
    Full,
}

impl TryFrom<u8> for Detail {
    type Error = UcdError;

    fn try_from(level: u8) -> Result<Self> {
        match level {
            0 => Ok(Detail::Summary),
            1 => Ok(Detail::Changes),
            2 => Ok(Detail::Full),
            _ => Err(UcdError::InvalidFormat(format!(
                "detail level {} (expected 0, 1 or 2)",
                level
            ))),
        }
    }
}

/// One key that differs between the two sides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyedChange<'a, K, V> {
    pub key: &'a K,
    pub change: Change,
    pub older: Option<&'a V>,
    pub newer: Option<&'a V>,
}

/// Result of comparing two maps.
#[derive(Debug, Clone)]
pub struct KeyedDiff<'a, K, V> {
    pub counter: DifferenceCounter,
    /// Additions and changes in key order, followed by removals in key order.
    pub changes: Vec<KeyedChange<'a, K, V>>,
}

impl<'a, K: Ord, V> KeyedDiff<'a, K, V> {
    /// Classifies every key of either map; `same` decides whether two values
    /// under the same key count as unchanged.
    pub fn compare<F>(older: &'a BTreeMap<K, V>, newer: &'a BTreeMap<K, V>, same: F) -> Self
    where
        F: Fn(&V, &V) -> bool,
    {
        let mut counter = DifferenceCounter::new();
        let mut changes = Vec::new();

        for (key, new_value) in newer {
            let change = match older.get(key) {
                None => Change::Added,
                Some(old_value) if same(old_value, new_value) => Change::Unchanged,
                Some(_) => Change::Changed,
            };
            counter.record(change, 1);
            if change != Change::Unchanged {
                changes.push(KeyedChange {
                    key,
                    change,
                    older: older.get(key),
                    newer: Some(new_value),
                });
            }
        }
        for (key, old_value) in older {
            if !newer.contains_key(key) {
                counter.record(Change::Removed, 1);
                changes.push(KeyedChange {
                    key,
                    change: Change::Removed,
                    older: Some(old_value),
                    newer: None,
                });
            }
        }

        KeyedDiff { counter, changes }
    }

    /// Writes the banner, the change lines if requested, and the counter line.
    pub fn report<W: Write>(&self, title: &str, detail: Detail, out: &mut W) -> Result<()>
    where
        V: Display,
    {
        write_banner(out, title)?;
        if detail >= Detail::Changes {
            writeln!(out)?;
            for change in &self.changes {
                match (change.older, change.newer) {
                    (None, Some(newer)) => writeln!(out, "new: {}", newer)?,
                    (Some(older), None) => writeln!(out, "removed: {}", older)?,
                    (Some(older), Some(newer)) => {
                        writeln!(out, "changed: from {} to {}", older, newer)?
                    }
                    (None, None) => {}
                }
            }
            writeln!(out)?;
        }
        writeln!(out, "{}", self.counter)?;
        Ok(())
    }
}

/// Compares two maps and writes the report in one go.
pub fn diff_keyed<K, V, F, W>(
    title: &str,
    older: &BTreeMap<K, V>,
    newer: &BTreeMap<K, V>,
    same: F,
    detail: Detail,
    out: &mut W,
) -> Result<DifferenceCounter>
where
    K: Ord,
    V: Display,
    F: Fn(&V, &V) -> bool,
    W: Write,
{
    let diff = KeyedDiff::compare(older, newer, same);
    diff.report(title, detail, out)?;
    Ok(diff.counter)
}

pub(crate) fn write_banner<W: Write>(out: &mut W, title: &str) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{} {}", "=".repeat(52), title)?;
    Ok(())
}

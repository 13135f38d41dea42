//! Whole-codespace comparison of two repertoires.
//!
//! The comparison walks maximal runs over which both stores are constant,
//! so its cost follows the number of groups rather than the size of the
//! codespace. Codepoints are only enumerated to print detail lines.

use std::collections::BTreeSet;
use std::io::Write;

use super::counter::{Change, DifferenceCounter};
use super::keyed::{write_banner, Detail};
use crate::ucd::store::{Group, Repertoire};
use crate::ucd::types::codepoint::{to_u, MAX_CODEPOINT};
use crate::ucd::types::error::Result;
use crate::ucd::types::property::{keys, PropertyKey, Registry};
use crate::ucd::types::value::PropertyValue;

/// Outcome of [`diff_repertoires`].
#[derive(Debug, Clone, Default)]
pub struct RepertoireDiff {
    /// Comparison of the `type` classification.
    pub types: DifferenceCounter,
    pub added_properties: Vec<PropertyKey>,
    pub removed_properties: Vec<PropertyKey>,
    /// Per-property counters, for properties present on both sides.
    pub properties: Vec<(PropertyKey, DifferenceCounter)>,
}

impl RepertoireDiff {
    pub fn property(&self, key: PropertyKey) -> Option<&DifferenceCounter> {
        self.properties
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, counter)| counter)
    }

    /// True when the two repertoires carry the same data.
    pub fn is_identical(&self) -> bool {
        self.types.is_unchanged()
            && self.added_properties.is_empty()
            && self.removed_properties.is_empty()
            && self.properties.iter().all(|(_, counter)| counter.is_unchanged())
    }
}

/// A run `[first, last]` over which both sides are a single group each.
struct Run<'a> {
    first: u32,
    last: u32,
    older: &'a Group,
    newer: &'a Group,
}

impl Run<'_> {
    fn len(&self) -> usize {
        (self.last - self.first + 1) as usize
    }

    /// Codepoints whose classification differs are left out of value comparisons.
    fn classification_differs(&self) -> bool {
        self.older.get(keys::TYPE) != self.newer.get(keys::TYPE)
    }
}

fn runs<'a>(older: &'a Repertoire, newer: &'a Repertoire) -> impl Iterator<Item = Run<'a>> {
    let mut cp = 0u32;
    std::iter::from_fn(move || {
        if cp > MAX_CODEPOINT {
            return None;
        }
        let older = older.group_at(cp);
        let newer = newer.group_at(cp);
        let run = Run {
            first: cp,
            last: older.last().min(newer.last()),
            older,
            newer,
        };
        cp = run.last + 1;
        Some(run)
    })
}

fn classify<T: PartialEq + ?Sized>(older: Option<&T>, newer: Option<&T>) -> Option<Change> {
    match (older, newer) {
        (None, None) => None,
        (None, Some(_)) => Some(Change::Added),
        (Some(_), None) => Some(Change::Removed),
        (Some(a), Some(b)) if a == b => Some(Change::Unchanged),
        (Some(_), Some(_)) => Some(Change::Changed),
    }
}

/// Compares `newer` against `older`, writing a report to `out`.
///
/// The report has three sections: classification (`type`) changes,
/// properties present on only one side, and per-property value changes.
pub fn diff_repertoires<W: Write>(
    older: &Repertoire,
    newer: &Repertoire,
    registry: &Registry,
    detail: Detail,
    out: &mut W,
) -> Result<RepertoireDiff> {
    let mut diff = RepertoireDiff::default();

    write_banner(out, "changed type")?;
    for run in runs(older, newer) {
        let old_type = run.older.get(keys::TYPE);
        let new_type = run.newer.get(keys::TYPE);
        match classify(old_type, new_type) {
            None => diff.types.undefined(run.len()),
            Some(change) => {
                diff.types.record(change, run.len());
                if change != Change::Unchanged && detail >= Detail::Changes {
                    for cp in run.first..=run.last {
                        writeln!(
                            out,
                            "{}\t{}\t->\t{}\t{}",
                            to_u(cp),
                            old_type.unwrap_or("<undefined>"),
                            new_type.unwrap_or("<undefined>"),
                            newer.useful_character_name(cp)
                        )?;
                    }
                }
            }
        }
    }
    if detail >= Detail::Changes {
        writeln!(out)?;
    }
    writeln!(out, "{}", diff.types)?;

    write_banner(out, "properties added or removed")?;
    let mut newer_keys = newer.collect_properties();
    let mut older_keys = older.collect_properties();
    newer_keys.remove(&keys::TYPE);
    older_keys.remove(&keys::TYPE);
    let all_keys: BTreeSet<PropertyKey> = newer_keys.union(&older_keys).copied().collect();
    let mut common = Vec::new();
    for key in all_keys {
        match (older_keys.contains(&key), newer_keys.contains(&key)) {
            (true, true) => common.push(key),
            (true, false) => {
                writeln!(out, "removed property: {}", registry.both_names(key))?;
                diff.removed_properties.push(key);
            }
            (false, true) => {
                writeln!(out, "added property: {}", registry.both_names(key))?;
                diff.added_properties.push(key);
            }
            (false, false) => {}
        }
    }

    write_banner(out, "changed properties values")?;
    for key in common {
        writeln!(out)?;
        writeln!(out, "{} {}", "-".repeat(47), registry.both_names(key))?;
        let counter = diff_property(older, newer, registry, key, detail, out)?;
        writeln!(out, "{}", counter)?;
        diff.properties.push((key, counter));
    }

    Ok(diff)
}

fn diff_property<W: Write>(
    older: &Repertoire,
    newer: &Repertoire,
    registry: &Registry,
    key: PropertyKey,
    detail: Detail,
    out: &mut W,
) -> Result<DifferenceCounter> {
    let mut counter = DifferenceCounter::new();
    let mut printed = false;
    for run in runs(older, newer) {
        if detail < Detail::Full && run.classification_differs() {
            counter.ignore(run.len());
            continue;
        }
        let old_value = run.older.get_object(key);
        let new_value = run.newer.get_object(key);
        match classify(old_value, new_value) {
            None => counter.undefined(run.len()),
            Some(change) => {
                counter.record(change, run.len());
                if change != Change::Unchanged && detail >= Detail::Changes {
                    printed = true;
                    for cp in run.first..=run.last {
                        writeln!(
                            out,
                            "{}\t{}\t{}\t->\t{}\t{}",
                            registry.short_name(key),
                            to_u(cp),
                            quoted(old_value),
                            quoted(new_value),
                            newer.useful_character_name(cp)
                        )?;
                    }
                }
            }
        }
    }
    if printed {
        writeln!(out)?;
    }
    Ok(counter)
}

fn quoted(value: Option<&PropertyValue>) -> String {
    match value {
        Some(value) => format!("'{}'", value),
        None => "<undefined>".to_string(),
    }
}

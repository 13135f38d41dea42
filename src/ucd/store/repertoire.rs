//! The interval-compressed property database.
//!
//! Every codepoint slot points at the arena index of the [`Group`] that
//! covers it. The slots are always partitioned into contiguous runs, one per
//! live group, and a group's bounds always match the run that points at it.
//! Two adjacent slots share a group exactly when they hold the same index.
//!
//! Splits and merges only repoint the slots of the smaller side, so loading a
//! full UCD stays close to linear in the number of groups touched.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use log::{debug, trace, warn};

use super::group::{Conflict, Group};
use super::iter::GroupIter;
use crate::ucd::types::codepoint::{to_u, CODESPACE_SIZE, MAX_CODEPOINT};
use crate::ucd::types::property::{keys, PropertyKey, SelfReference};
use crate::ucd::types::value::PropertyValue;

/// Arena index of a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct GroupId(u32);

impl GroupId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// A partition of the whole codespace into property groups.
#[derive(Debug, Clone)]
pub struct Repertoire {
    arena: Vec<Group>,
    free: Vec<GroupId>,
    slots: Vec<GroupId>,
    /// Refused writes, kept until the owner drains them with a registry at hand.
    conflicts: Vec<Conflict>,
}

impl Default for Repertoire {
    fn default() -> Self {
        Self::new()
    }
}

impl Repertoire {
    /// Creates a store holding a single empty group spanning `0000..10FFFF`.
    pub fn new() -> Self {
        Repertoire {
            arena: vec![Group::new(0, MAX_CODEPOINT)],
            free: Vec::new(),
            slots: vec![GroupId(0); CODESPACE_SIZE],
            conflicts: Vec::new(),
        }
    }

    fn allocate(&mut self, group: Group) -> GroupId {
        match self.free.pop() {
            Some(id) => {
                self.arena[id.index()] = group;
                id
            }
            None => {
                self.arena.push(group);
                GroupId((self.arena.len() - 1) as u32)
            }
        }
    }

    fn release(&mut self, id: GroupId) {
        self.arena[id.index()].property_map_mut().clear();
        self.free.push(id);
    }

    fn repoint(&mut self, first: u32, last: u32, id: GroupId) {
        for slot in &mut self.slots[first as usize..=last as usize] {
            *slot = id;
        }
    }

    /// The group covering `cp`.
    ///
    /// # Panics
    /// Panics if `cp` is beyond `10FFFF`.
    pub fn group_at(&self, cp: u32) -> &Group {
        &self.arena[self.slots[cp as usize].index()]
    }

    /// Number of live groups.
    pub fn group_count(&self) -> usize {
        self.arena.len() - self.free.len()
    }

    /// Makes `cp` the first codepoint of its group.
    ///
    /// No-op when `cp` is 0, beyond the codespace, or already starts a group.
    /// Otherwise the owning group is split and both halves keep its values.
    /// The longer half stays in the existing arena record; only the slots of
    /// the other half are repointed.
    pub fn create_boundary_before(&mut self, cp: u32) {
        if cp == 0 || cp > MAX_CODEPOINT {
            return;
        }
        let id = self.slots[cp as usize];
        if self.slots[cp as usize - 1] != id {
            return;
        }

        let group = &mut self.arena[id.index()];
        let (first, last) = (group.first(), group.last());
        let properties = group.property_map().clone();
        let (new_first, new_last) = if cp - first > last - cp {
            group.set_bounds(first, cp - 1);
            (cp, last)
        } else {
            group.set_bounds(cp, last);
            (first, cp - 1)
        };
        trace!(
            "Split {}..{} before {}, new group {}..{}",
            to_u(first),
            to_u(last),
            to_u(cp),
            to_u(new_first),
            to_u(new_last)
        );

        let new_id = self.allocate(Group::with_properties(new_first, new_last, properties));
        self.repoint(new_first, new_last, new_id);
    }

    /// Runs `op` on every group inside `[first, last]`, splitting at both ends first.
    fn apply_range<F>(&mut self, first: u32, last: u32, mut op: F)
    where
        F: FnMut(&mut Group),
    {
        if first > last || last > MAX_CODEPOINT {
            warn!("Invalid range {}..{} (ignored)", to_u(first), to_u(last));
            return;
        }
        let mut cp = first;
        while cp <= last {
            self.create_boundary_before(cp);
            if self.group_at(cp).last() > last {
                self.create_boundary_before(last + 1);
            }
            let group = &mut self.arena[self.slots[cp as usize].index()];
            op(group);
            cp = group.last() + 1;
        }
    }

    /// Runs `op` once on every group, in increasing order.
    fn for_each_group_mut<F>(&mut self, mut op: F)
    where
        F: FnMut(&mut Group),
    {
        let mut cp = 0;
        while cp <= MAX_CODEPOINT {
            let group = &mut self.arena[self.slots[cp as usize].index()];
            op(group);
            cp = group.last() + 1;
        }
    }

    /// Sets a text value on `[first, last]`; groups that already hold a
    /// different value keep it and the refusal is recorded as a [`Conflict`].
    pub fn put(&mut self, first: u32, last: u32, key: PropertyKey, value: impl Into<String>) {
        self.put_object(first, last, key, PropertyValue::Text(value.into()));
    }

    pub fn put_object(&mut self, first: u32, last: u32, key: PropertyKey, value: PropertyValue) {
        let mut refused = Vec::new();
        self.apply_range(first, last, |group| {
            if let Some(conflict) = group.put_checked(key, value.clone()) {
                refused.push(conflict);
            }
        });
        self.conflicts.append(&mut refused);
    }

    /// Drains the writes refused since the last call.
    pub fn take_conflicts(&mut self) -> Vec<Conflict> {
        std::mem::take(&mut self.conflicts)
    }

    /// Overwrites `key` on `[first, last]` regardless of existing values.
    pub fn put_forced(
        &mut self,
        first: u32,
        last: u32,
        key: PropertyKey,
        value: impl Into<PropertyValue>,
    ) {
        let value = value.into();
        self.apply_range(first, last, |group| group.put_forced(key, value.clone()));
    }

    /// Fills `key` on `[first, last]` wherever it is still absent.
    pub fn put_default_range(
        &mut self,
        first: u32,
        last: u32,
        key: PropertyKey,
        value: impl Into<PropertyValue>,
    ) {
        let value = value.into();
        self.apply_range(first, last, |group| {
            group.put_default(key, value.clone());
        });
    }

    /// Fills `key` in every group where it is still absent.
    pub fn put_default(&mut self, key: PropertyKey, value: impl Into<PropertyValue>) {
        let value = value.into();
        self.for_each_group_mut(|group| {
            group.put_default(key, value.clone());
        });
    }

    /// Hands every group to `visitor`, which typically fills in values computed
    /// from the group's other properties.
    pub fn put_default_with<F>(&mut self, visitor: F)
    where
        F: FnMut(&mut Group),
    {
        self.for_each_group_mut(visitor);
    }

    /// Drops `key` from every group.
    pub fn remove(&mut self, key: PropertyKey) {
        self.for_each_group_mut(|group| {
            group.remove(key);
        });
    }

    /// Replaces whatever covers `group`'s interval by `group` itself.
    pub(crate) fn replace_range(&mut self, group: Group) {
        let (first, last) = (group.first(), group.last());
        if first > last || last > MAX_CODEPOINT {
            warn!("Invalid range {}..{} (ignored)", to_u(first), to_u(last));
            return;
        }
        self.create_boundary_before(first);
        self.create_boundary_before(last + 1);

        let mut cp = first;
        while cp <= last {
            let id = self.slots[cp as usize];
            cp = self.arena[id.index()].last() + 1;
            self.release(id);
        }
        let id = self.allocate(group);
        self.repoint(first, last, id);
    }

    /// Coalesces adjacent groups with identical values.
    ///
    /// Before comparing, values of single-codepoint groups that spell out the
    /// codepoint itself are rewritten to `#`, so runs such as
    /// `CJK COMPATIBILITY IDEOGRAPH-F900`, `…-F901` become one group.
    pub fn normalize(&mut self) {
        let before = self.group_count();
        let mut previous: Option<GroupId> = None;
        let mut cp = 0;
        while cp <= MAX_CODEPOINT {
            let id = self.slots[cp as usize];
            let group = &mut self.arena[id.index()];
            cp = group.last() + 1;
            if group.len() == 1 {
                clean_self_references(group);
            }

            let current = match previous {
                Some(prev)
                    if self.arena[prev.index()].same_properties(&self.arena[id.index()]) =>
                {
                    self.merge(prev, id)
                }
                _ => id,
            };
            previous = Some(current);
        }
        debug!("Normalized {} groups into {}", before, self.group_count());
    }

    /// Merges two adjacent groups; the longer one absorbs the shorter one.
    fn merge(&mut self, left: GroupId, right: GroupId) -> GroupId {
        let (left_first, left_last) = {
            let group = &self.arena[left.index()];
            (group.first(), group.last())
        };
        let (right_first, right_last) = {
            let group = &self.arena[right.index()];
            (group.first(), group.last())
        };
        let (keep, absorbed, first, last) = if left_last - left_first >= right_last - right_first {
            (left, right, right_first, right_last)
        } else {
            (right, left, left_first, left_last)
        };
        self.repoint(first, last, keep);
        self.arena[keep.index()].set_bounds(left_first, right_last);
        self.release(absorbed);
        keep
    }

    /// Fills the groups of `buckets` with the dominant values of this store.
    ///
    /// For each bucket and each text property, every group of this store that
    /// overlaps the bucket casts one vote. If any of them lacks the property,
    /// the bucket gets nothing. Otherwise the most frequent value is assigned
    /// when it got more than one vote and more than 20% of all votes; ties go
    /// to the smallest value.
    pub fn group(&self, buckets: &mut Repertoire) {
        let properties = self.collect_properties();
        let bounds: Vec<(u32, u32)> = buckets.iter().map(|b| (b.first(), b.last())).collect();

        for (first, last) in bounds {
            for &key in &properties {
                if key == keys::NAME_ALIAS {
                    continue;
                }
                if let Some(value) = self.dominant_value(first, last, key) {
                    buckets.put(first, last, key, value);
                }
            }
        }
        debug!(
            "Grouped {} groups into {} buckets",
            self.group_count(),
            buckets.group_count()
        );
    }

    fn dominant_value(&self, first: u32, last: u32, key: PropertyKey) -> Option<&str> {
        let mut votes: BTreeMap<&str, usize> = BTreeMap::new();
        let mut total = 0usize;
        for group in self.on_subset(first, last) {
            let value = group.get(key)?;
            *votes.entry(value).or_default() += 1;
            total += 1;
        }

        let mut best: Option<(&str, usize)> = None;
        for (value, count) in votes {
            match best {
                Some((_, best_count)) if best_count >= count => {}
                _ => best = Some((value, count)),
            }
        }
        let (value, count) = best?;
        if count > 1 && count as f64 > 0.2 * total as f64 {
            Some(value)
        } else {
            None
        }
    }

    /// Text value of `key` at `cp`.
    pub fn get(&self, cp: u32, key: PropertyKey) -> Option<&str> {
        if cp > MAX_CODEPOINT {
            return None;
        }
        self.group_at(cp).get(key)
    }

    pub fn get_object(&self, cp: u32, key: PropertyKey) -> Option<&PropertyValue> {
        if cp > MAX_CODEPOINT {
            return None;
        }
        self.group_at(cp).get_object(key)
    }

    /// The name to show next to `cp` in reports: the Unicode 1.0 name for
    /// C0 and C1 controls, the character name otherwise, or `""`.
    pub fn useful_character_name(&self, cp: u32) -> &str {
        let key = if cp <= 0x1F || (0x80..=0x9F).contains(&cp) {
            keys::NA1
        } else {
            keys::NA
        };
        self.get(cp, key).unwrap_or("")
    }

    /// Every property present on at least one group.
    pub fn collect_properties(&self) -> BTreeSet<PropertyKey> {
        self.iter().flat_map(|group| group.keys()).collect()
    }

    /// Distinct text values of `key`, sorted.
    pub fn get_property_values(&self, key: PropertyKey) -> BTreeSet<String> {
        self.iter()
            .filter_map(|group| group.get(key))
            .map(str::to_string)
            .collect()
    }

    /// All groups in increasing order.
    pub fn iter(&self) -> GroupIter<'_> {
        GroupIter::new(self, 0, MAX_CODEPOINT)
    }

    /// Groups overlapping `[first, last]`, unclipped.
    pub fn on_subset(&self, first: u32, last: u32) -> GroupIter<'_> {
        GroupIter::new(self, first, last)
    }

    pub fn stats(&self) -> RepertoireStats {
        let mut stats = RepertoireStats {
            groups: 0,
            properties: self.collect_properties().len(),
            assignments: 0,
            min_per_group: usize::MAX,
            max_per_group: 0,
        };
        for group in self.iter() {
            let count = group.property_count();
            stats.groups += 1;
            stats.assignments += count;
            stats.min_per_group = stats.min_per_group.min(count);
            stats.max_per_group = stats.max_per_group.max(count);
        }
        stats
    }
}

fn clean_self_references(group: &mut Group) {
    let hex = to_u(group.first());
    for (key, value) in group.property_map_mut().iter_mut() {
        if let PropertyValue::Text(text) = value {
            match key.self_reference() {
                SelfReference::Substring if text.contains(hex.as_str()) => {
                    *text = text.replace(hex.as_str(), "#");
                }
                SelfReference::Whole if *text == hex => {
                    *text = "#".to_string();
                }
                _ => {}
            }
        }
    }
}

/// Summary figures for a [`Repertoire`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepertoireStats {
    pub groups: usize,
    pub properties: usize,
    pub assignments: usize,
    pub min_per_group: usize,
    pub max_per_group: usize,
}

impl fmt::Display for RepertoireStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} groups", self.groups)?;
        writeln!(f, "{} distinct properties", self.properties)?;
        write!(
            f,
            "{} property assignments ({} to {} per group)",
            self.assignments, self.min_per_group, self.max_per_group
        )
    }
}

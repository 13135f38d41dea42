use std::collections::BTreeSet;

use ucdxml::{keys, Group, Registry, Repertoire};

fn bounds(repertoire: &Repertoire) -> Vec<(u32, u32)> {
    repertoire.iter().map(|g| (g.first(), g.last())).collect()
}

#[test]
fn a_new_repertoire_is_one_empty_group() {
    let rep = Repertoire::new();

    assert_eq!(rep.group_count(), 1);
    assert_eq!(bounds(&rep), vec![(0, 0x10FFFF)]);
    assert_eq!(rep.group_at(0x41).property_count(), 0);
    assert_eq!(rep.get(0x41, keys::GC), None);
    assert_eq!(rep.get(0x110000, keys::GC), None, "beyond the codespace");
}

#[test]
fn boundaries_are_idempotent() {
    let mut rep = Repertoire::new();
    rep.create_boundary_before(0x41);
    rep.create_boundary_before(0x41);
    rep.create_boundary_before(0);
    rep.create_boundary_before(0x110000);

    assert_eq!(bounds(&rep), vec![(0, 0x40), (0x41, 0x10FFFF)]);
    assert_eq!(rep.group_count(), 2);
}

#[test]
fn split_halves_keep_the_values() {
    let mut rep = Repertoire::new();
    rep.put(0x100, 0x1FF, keys::GC, "Lo");
    rep.create_boundary_before(0x180);

    assert_eq!(bounds(&rep).len(), 4);
    assert_eq!(rep.get(0x17F, keys::GC), Some("Lo"));
    assert_eq!(rep.get(0x180, keys::GC), Some("Lo"));
    assert!(rep.group_at(0x17F).same_properties(rep.group_at(0x180)));
}

#[test]
fn put_with_default_and_normalize_gives_three_groups() {
    let mut rep = Repertoire::new();
    rep.put(0x41, 0x5A, keys::GC, "Lu");
    rep.put_default(keys::GC, "Cn");
    rep.normalize();

    assert_eq!(bounds(&rep), vec![(0, 0x40), (0x41, 0x5A), (0x5B, 0x10FFFF)]);
    assert_eq!(rep.get(0x20, keys::GC), Some("Cn"));
    assert_eq!(rep.get(0x41, keys::GC), Some("Lu"));
    assert_eq!(rep.get(0x5B, keys::GC), Some("Cn"));
}

#[test]
fn normalize_merges_neighbours_with_equal_values() {
    let mut rep = Repertoire::new();
    rep.put(0x41, 0x4F, keys::GC, "Lu");
    rep.put(0x50, 0x5A, keys::GC, "Lu");
    assert_eq!(rep.group_count(), 4);

    rep.normalize();
    assert_eq!(bounds(&rep), vec![(0, 0x40), (0x41, 0x5A), (0x5B, 0x10FFFF)]);
}

#[test]
fn conflicting_puts_keep_the_first_value() {
    let mut rep = Repertoire::new();
    rep.put(0x41, 0x41, keys::GC, "Lu");
    rep.put(0x41, 0x41, keys::GC, "Ll");
    assert_eq!(rep.get(0x41, keys::GC), Some("Lu"), "conflicting put is ignored");

    rep.put(0x41, 0x41, keys::GC, "Lu");
    assert_eq!(rep.get(0x41, keys::GC), Some("Lu"), "equal put is accepted");

    rep.put_forced(0x41, 0x41, keys::GC, "Ll");
    assert_eq!(rep.get(0x41, keys::GC), Some("Ll"), "forced put overwrites");
}

#[test]
fn refused_writes_are_reported_with_registered_names() {
    let mut registry = Registry::new();
    let key = registry.from_string("kPhonetic");
    let mut rep = Repertoire::new();
    rep.put(0x41, 0x42, key, "Y");
    rep.put(0x41, 0x41, key, "N");
    rep.put(0x42, 0x42, key, "Y");

    let conflicts = rep.take_conflicts();
    assert_eq!(conflicts.len(), 1, "equal writes are not conflicts");
    assert_eq!((conflicts[0].first, conflicts[0].last), (0x41, 0x41));
    assert_eq!(
        conflicts[0].describe(&registry),
        "Attempt to reset kPhonetic on 0041..0041 from 'Y' to 'N' (ignored)"
    );
    assert!(rep.take_conflicts().is_empty(), "draining empties the log");
}

#[test]
fn partially_conflicting_ranges_are_applied_per_group() {
    let mut rep = Repertoire::new();
    rep.put(0x41, 0x41, keys::GC, "Lu");
    rep.put(0x40, 0x42, keys::GC, "Po");

    assert_eq!(rep.get(0x40, keys::GC), Some("Po"));
    assert_eq!(rep.get(0x41, keys::GC), Some("Lu"));
    assert_eq!(rep.get(0x42, keys::GC), Some("Po"));
}

#[test]
fn defaults_only_fill_absent_values() {
    let mut rep = Repertoire::new();
    rep.put(0x41, 0x5A, keys::SC, "Latn");
    rep.put_default_range(0x30, 0x7F, keys::SC, "Zyyy");
    rep.put_default(keys::SC, "Zzzz");

    assert_eq!(rep.get(0x41, keys::SC), Some("Latn"));
    assert_eq!(rep.get(0x30, keys::SC), Some("Zyyy"));
    assert_eq!(rep.get(0x7F, keys::SC), Some("Zyyy"));
    assert_eq!(rep.get(0x80, keys::SC), Some("Zzzz"));
    assert_eq!(rep.get(0x10FFFF, keys::SC), Some("Zzzz"));
}

#[test]
fn computed_defaults_see_the_other_properties() {
    let mut rep = Repertoire::new();
    rep.put(0x41, 0x41, keys::SLC, "0061");
    rep.put_default(keys::SLC, "#");
    rep.put_default_with(|group| {
        if let Some(simple) = group.get(keys::SLC).map(str::to_string) {
            group.put_default(keys::LC, simple);
        }
    });

    assert_eq!(rep.get(0x41, keys::LC), Some("0061"));
    assert_eq!(rep.get(0x42, keys::LC), Some("#"));
}

#[test]
fn invalid_ranges_are_ignored() {
    let mut rep = Repertoire::new();
    rep.put(0x5A, 0x41, keys::GC, "Lu");
    rep.put(0x10FFFF, 0x110000, keys::GC, "Lu");

    assert_eq!(rep.group_count(), 1);
    assert_eq!(rep.get(0x41, keys::GC), None);
}

#[test]
fn removing_a_property_clears_it_everywhere() {
    let mut rep = Repertoire::new();
    rep.put(0x41, 0x5A, keys::GC, "Lu");
    rep.put(0x41, 0x5A, keys::SC, "Latn");
    rep.remove(keys::GC);

    assert_eq!(rep.get(0x41, keys::GC), None);
    assert_eq!(rep.get(0x41, keys::SC), Some("Latn"));
    assert_eq!(rep.collect_properties(), BTreeSet::from([keys::SC]));
}

#[test]
fn normalize_rewrites_self_references_on_single_codepoints() {
    let mut rep = Repertoire::new();
    rep.put(0xF900, 0xF900, keys::NA, "CJK COMPATIBILITY IDEOGRAPH-F900");
    rep.put(0xF901, 0xF901, keys::NA, "CJK COMPATIBILITY IDEOGRAPH-F901");
    rep.put(0x61, 0x61, keys::SLC, "0061");
    rep.put(0x61, 0x61, keys::DM, "0061 0300");
    rep.put_default(keys::NA, "");
    rep.normalize();

    assert_eq!(rep.get(0xF900, keys::NA), Some("CJK COMPATIBILITY IDEOGRAPH-#"));
    let group = rep.group_at(0xF901);
    assert_eq!((group.first(), group.last()), (0xF900, 0xF901), "names coalesce");
    assert_eq!(rep.get(0x61, keys::SLC), Some("#"), "whole-value mapping");
    assert_eq!(rep.get(0x61, keys::DM), Some("0061 0300"), "only whole values are rewritten");
}

#[test]
fn self_references_in_ranges_are_kept() {
    let mut rep = Repertoire::new();
    rep.put(0x4E00, 0x4E01, keys::NA, "CJK UNIFIED IDEOGRAPH-4E00");
    rep.normalize();

    assert_eq!(rep.get(0x4E00, keys::NA), Some("CJK UNIFIED IDEOGRAPH-4E00"));
}

#[test]
fn subsets_yield_whole_overlapping_groups() {
    let mut rep = Repertoire::new();
    rep.put(0x41, 0x5A, keys::GC, "Lu");
    rep.put(0x61, 0x7A, keys::GC, "Ll");

    let subset: Vec<(u32, u32)> = rep
        .on_subset(0x50, 0x65)
        .map(|g| (g.first(), g.last()))
        .collect();
    assert_eq!(subset, vec![(0x41, 0x5A), (0x5B, 0x60), (0x61, 0x7A)]);

    let covered: u32 = rep.iter().map(|g| g.len()).sum();
    assert_eq!(covered, 0x110000, "groups partition the codespace");
}

#[test]
fn property_values_are_collected_sorted() {
    let mut rep = Repertoire::new();
    rep.put(0x61, 0x7A, keys::GC, "Ll");
    rep.put(0x41, 0x5A, keys::GC, "Lu");
    rep.put_default(keys::GC, "Cn");

    let values: Vec<String> = rep.get_property_values(keys::GC).into_iter().collect();
    assert_eq!(values, vec!["Cn", "Ll", "Lu"]);
}

#[test]
fn grouping_assigns_dominant_values_to_buckets() {
    let mut rep = Repertoire::new();
    for cp in 0x41..=0x45 {
        rep.put(cp, cp, keys::NA, format!("LETTER {:04X}", cp));
    }
    rep.put(0x41, 0x45, keys::GC, "Lu");
    rep.put(0x46, 0x7F, keys::GC, "Ll");
    rep.put(0x41, 0x41, keys::AGE, "1.1");
    rep.put_default(keys::NA, "");
    rep.put_default(keys::GC, "Cn");

    let mut buckets = Repertoire::new();
    buckets.create_boundary_before(0x41);
    buckets.create_boundary_before(0x80);
    rep.group(&mut buckets);

    assert_eq!(buckets.group_count(), 3, "grouping keeps the bucket bounds");
    assert_eq!(buckets.get(0x41, keys::GC), Some("Lu"), "5 of 6 groups agree");
    assert_eq!(buckets.get(0x41, keys::NA), None, "no value with more than one vote");
    assert_eq!(buckets.get(0x41, keys::AGE), None, "absent in some groups");
    assert_eq!(buckets.get(0x00, keys::GC), None, "a single group is not enough");
}

#[test]
fn groups_reject_conflicting_writes() {
    let mut group = Group::new(0x41, 0x5A);
    assert!(group.put(keys::GC, "Lu"));
    assert!(group.put(keys::GC, "Lu"));
    assert!(!group.put(keys::GC, "Ll"));
    assert_eq!(group.get(keys::GC), Some("Lu"));

    assert!(!group.put_default(keys::GC, "Cn"));
    assert!(group.put_default(keys::SC, "Latn"));
    assert_eq!(group.property_count(), 2);
    assert_eq!(group.len(), 26);

    let mut other = Group::new(0x61, 0x7A);
    other.put(keys::SC, "Latn");
    other.put(keys::GC, "Lu");
    assert!(group.same_properties(&other), "bounds do not matter");
}

#[test]
fn stats_count_groups_and_assignments() {
    let mut rep = Repertoire::new();
    rep.put(0x41, 0x5A, keys::GC, "Lu");
    rep.put(0x41, 0x5A, keys::SC, "Latn");
    rep.put_default(keys::GC, "Cn");
    rep.normalize();

    let stats = rep.stats();
    assert_eq!(stats.groups, 3);
    assert_eq!(stats.properties, 2);
    assert_eq!(stats.assignments, 4);
    assert_eq!((stats.min_per_group, stats.max_per_group), (1, 2));
}

/// Small deterministic generator for scattered ranges.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self, bound: u32) -> u32 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        ((self.0 >> 33) % bound as u64) as u32
    }
}

#[test]
fn overlapping_writes_keep_the_codespace_partitioned() {
    let mut rng = Lcg(0x5EED);
    let mut rep = Repertoire::new();
    let properties = [keys::GC, keys::SC, keys::NA];
    let values = ["A", "B", "C"];

    for round in 0..400 {
        let first = rng.next(0x110000);
        let span = rng.next(if round % 3 == 0 { 0x20000 } else { 0x400 });
        let last = (first + span).min(0x10FFFF);
        let key = properties[rng.next(3) as usize];
        let value = values[rng.next(3) as usize];
        if round % 2 == 0 {
            rep.put(first, last, key, value);
        } else {
            rep.put_forced(first, last, key, value);
        }
    }
    rep.normalize();

    for cp in 0..=0x10FFFFu32 {
        let group = rep.group_at(cp);
        assert!(group.first() <= cp && cp <= group.last(), "{:04X} outside its group", cp);
    }

    let groups: Vec<&Group> = rep.iter().collect();
    assert_eq!(groups.len(), rep.group_count());
    assert_eq!(groups.first().map(|g| g.first()), Some(0));
    assert_eq!(groups.last().map(|g| g.last()), Some(0x10FFFF));
    for pair in groups.windows(2) {
        assert_eq!(pair[0].last() + 1, pair[1].first(), "groups are contiguous");
        assert!(
            !pair[0].same_properties(pair[1]),
            "equal neighbours at {:04X} after normalize",
            pair[1].first()
        );
    }
}

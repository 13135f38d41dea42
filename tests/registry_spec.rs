use ucdxml::{keys, Registry};

#[test]
fn builtin_keys_resolve_by_short_and_long_name() {
    let registry = Registry::new();

    assert_eq!(registry.lookup("gc"), Some(keys::GC));
    assert_eq!(registry.lookup("General_Category"), Some(keys::GC));
    assert_eq!(registry.lookup("general_category"), Some(keys::GC), "case-insensitive fallback");
    assert_eq!(registry.lookup("space"), Some(keys::WSPACE), "alias");
    assert_eq!(registry.lookup("FNC"), Some(keys::FC_NFKC), "alias");
    assert_eq!(registry.lookup("kRSUnicode"), None);
}

#[test]
fn builtin_keys_are_the_same_in_every_registry() {
    let first = Registry::new();
    let second = Registry::new();

    assert_eq!(first.len(), second.len());
    assert_eq!(first.lookup("sc"), second.lookup("sc"));
    assert_eq!(first.short_name(keys::NA1), "na1");
    assert_eq!(keys::GC.to_string(), "gc");
    assert!(keys::BLK.is_builtin());
}

#[test]
fn unknown_names_are_registered_once() {
    let mut registry = Registry::new();
    let before = registry.len();

    let key = registry.from_string("kTotalStrokes");
    assert_eq!(registry.len(), before + 1);
    assert!(!key.is_builtin());
    assert_eq!(registry.short_name(key), "kTotalStrokes");
    assert!(!registry.is_enumerated(key));

    assert_eq!(registry.from_string("kTotalStrokes"), key);
    assert_eq!(registry.lookup("ktotalstrokes"), Some(key));
    assert_eq!(registry.len(), before + 1);
}

#[test]
fn interning_returns_existing_keys() {
    let mut registry = Registry::new();
    assert_eq!(registry.intern("gc", None, &[], true), keys::GC);

    let key = registry.intern("kIICore", Some("IICore"), &["iicore_set"], true);
    assert_eq!(registry.long_name(key), "IICore");
    assert_eq!(registry.lookup("iicore_set"), Some(key));
    assert!(registry.is_enumerated(key));
}

#[test]
fn names_are_printed_with_both_forms() {
    let registry = Registry::new();

    assert_eq!(registry.both_names(keys::GC), "gc (General_Category)");
    assert_eq!(registry.both_names(keys::DASH), "Dash");
    assert_eq!(registry.long_name(keys::BIDI_M), "Bidi_Mirrored");
    assert!(registry.is_enumerated(keys::GC));
    assert!(!registry.is_enumerated(keys::NA));
}

#[test]
fn keys_iterate_in_registration_order() {
    let mut registry = Registry::new();
    let added = registry.from_string("kPhonetic");
    let all: Vec<_> = registry.all_keys().collect();

    assert_eq!(all.first(), Some(&keys::TYPE));
    assert_eq!(all.last(), Some(&added));
    assert!(keys::TYPE < keys::GC && keys::GC < keys::NAME_ALIAS);
}

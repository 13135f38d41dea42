use std::collections::BTreeSet;
use std::path::PathBuf;

use ucdxml::{keys, NameAlias, Registry, Ucd, UcdError, UcdFile, UnicodeVersion};

fn fixture_path(parts: &[&str]) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    for part in parts {
        path.push(part);
    }
    path
}

fn ucd_dir() -> PathBuf {
    fixture_path(&["tests", "fixtures", "ucd"])
}

fn version() -> UnicodeVersion {
    "15.0.0".parse().expect("valid version")
}

fn load(registry: &mut Registry, files: &[UcdFile]) -> Ucd {
    let files: BTreeSet<UcdFile> = files.iter().copied().collect();
    Ucd::from_ucd(registry, ucd_dir(), version(), &files).expect("fixture UCD should load")
}

#[test]
fn unicode_data_assigns_the_per_line_properties() {
    let mut registry = Registry::new();
    let ucd = load(&mut registry, &[UcdFile::UnicodeData]);
    let rep = &ucd.repertoire;

    assert_eq!(ucd.description, "Unicode 15.0.0");
    assert_eq!(rep.get(0x41, keys::TYPE), Some("char"));
    assert_eq!(rep.get(0x41, keys::NA), Some("LATIN CAPITAL LETTER A"));
    assert_eq!(rep.get(0x41, keys::GC), Some("Lu"));
    assert_eq!(rep.get(0x41, keys::SLC), Some("0061"), "simple lowercase of A");
    assert_eq!(rep.get(0x41, keys::SUC), Some("#"), "empty mapping is stored as #");
    assert_eq!(rep.get(0x61, keys::SUC), Some("0041"));
    assert_eq!(rep.get(0x61, keys::STC), Some("0041"));

    assert_eq!(rep.get(0x30, keys::NT), Some("De"));
    assert_eq!(rep.get(0x30, keys::NV), Some("0"));
    assert_eq!(rep.get(0xBD, keys::NT), Some("Nu"));
    assert_eq!(rep.get(0xBD, keys::NV), Some("1/2"));
    assert_eq!(rep.get(0xBD, keys::DT), Some("fra"));
    assert_eq!(rep.get(0xBD, keys::DM), Some("0031 2044 0032"));
    assert_eq!(rep.get(0xBD, keys::NA1), Some("FRACTION ONE HALF"));
    assert_eq!(rep.get(0xC5, keys::DT), Some("can"));
    assert_eq!(rep.get(0xC5, keys::DM), Some("0041 030A"));
    assert_eq!(rep.get(0x41, keys::DT), Some("none"));
    assert_eq!(rep.get(0x41, keys::DM), Some("#"));
}

#[test]
fn control_characters_have_no_name_but_keep_their_unicode_1_name() {
    let mut registry = Registry::new();
    let ucd = load(&mut registry, &[UcdFile::UnicodeData]);
    let rep = &ucd.repertoire;

    assert_eq!(rep.get(0x0000, keys::NA), Some(""), "na is not taken from '<control>'");
    assert_eq!(rep.get(0x0000, keys::NA1), Some("NULL"));
    assert_eq!(rep.get(0x0001, keys::NA1), Some("START OF HEADING"));
    assert_eq!(rep.useful_character_name(0x0000), "NULL");
    assert_eq!(rep.useful_character_name(0x0041), "LATIN CAPITAL LETTER A");
}

#[test]
fn unassigned_codepoints_get_the_version_defaults() {
    let mut registry = Registry::new();
    let ucd = load(&mut registry, &[UcdFile::UnicodeData]);
    let rep = &ucd.repertoire;

    assert_eq!(rep.get(0x0378, keys::TYPE), Some("reserved"));
    assert_eq!(rep.get(0x0378, keys::GC), Some("Cn"));
    assert_eq!(rep.get(0x0378, keys::NV), Some("NaN"), "NaN default from 5.1.0 on");
    assert_eq!(rep.get(0x0378, keys::CCC), Some("0"));
    assert_eq!(rep.get(0x0378, keys::BIDI_M), Some("N"));

    assert_eq!(rep.get(0xFFFE, keys::TYPE), Some("noncharacter"));
    assert_eq!(rep.get(0x10FFFF, keys::TYPE), Some("noncharacter"));
    assert_eq!(rep.get(0xFDD0, keys::TYPE), Some("noncharacter"));
    assert_eq!(rep.get(0xFDEF, keys::TYPE), Some("noncharacter"));
    assert_eq!(rep.get(0xFDF0, keys::TYPE), Some("reserved"));
}

#[test]
fn ranges_and_hangul_syllables_are_expanded() {
    let mut registry = Registry::new();
    let ucd = load(&mut registry, &[UcdFile::UnicodeData]);
    let rep = &ucd.repertoire;

    assert_eq!(rep.get(0x3500, keys::NA), Some("CJK UNIFIED IDEOGRAPH-#"));
    let cjk = rep.group_at(0x3500);
    assert_eq!((cjk.first(), cjk.last()), (0x3400, 0x4DBF), "CJK range is one group");

    assert_eq!(rep.get(0xD800, keys::TYPE), Some("surrogate"));
    assert_eq!(rep.get(0xDB7F, keys::TYPE), Some("surrogate"));
    assert_eq!(rep.get(0xD800, keys::NA), Some(""));

    assert_eq!(rep.get(0xAC00, keys::NA), Some("HANGUL SYLLABLE GA"));
    assert_eq!(rep.get(0xAC00, keys::DM), Some("1100 1161"));
    assert_eq!(rep.get(0xAC01, keys::NA), Some("HANGUL SYLLABLE GAG"));
    assert_eq!(rep.get(0xAC01, keys::DM), Some("AC00 11A8"));
    assert_eq!(rep.get(0xD7A3, keys::NA), Some("HANGUL SYLLABLE HIH"));
    assert_eq!(rep.get(0xD7A3, keys::GC), Some("Lo"));
    assert_eq!(rep.get(0xD7A4, keys::TYPE), Some("reserved"));
}

#[test]
fn compatibility_ideograph_names_are_normalized() {
    let mut registry = Registry::new();
    let ucd = load(&mut registry, &[UcdFile::UnicodeData]);
    let rep = &ucd.repertoire;

    assert_eq!(rep.get(0xF900, keys::NA), Some("CJK COMPATIBILITY IDEOGRAPH-#"));
    assert_eq!(rep.get(0xF900, keys::DM), Some("8C48"));
    assert_eq!(rep.get(0xF901, keys::DM), Some("66F4"));
    assert_eq!(rep.group_at(0xF900).last(), 0xF900, "different dm keeps them apart");
}

#[test]
fn scripts_are_mapped_to_short_codes_with_unknown_default() {
    let mut registry = Registry::new();
    let ucd = load(&mut registry, &[UcdFile::Scripts]);
    let rep = &ucd.repertoire;

    assert_eq!(rep.get(0x0041, keys::SC), Some("Latn"));
    assert_eq!(rep.get(0x0000, keys::SC), Some("Zyyy"));
    assert_eq!(rep.get(0x3400, keys::SC), Some("Hani"));
    assert_eq!(rep.get(0xAC00, keys::SC), Some("Hang"));
    assert_eq!(rep.get(0x0378, keys::SC), Some("Zzzz"));
}

#[test]
fn partial_missing_directives_become_ranged_defaults() {
    let mut registry = Registry::new();
    let ucd = load(
        &mut registry,
        &[UcdFile::DerivedBidiClass, UcdFile::PropertyValueAliases],
    );
    let rep = &ucd.repertoire;

    assert_eq!(rep.get(0x0600, keys::BC), Some("AN"), "data line wins");
    assert_eq!(rep.get(0x0700, keys::BC), Some("AL"), "narrower directive");
    assert_eq!(rep.get(0x0800, keys::BC), Some("R"), "broader directive");
    assert_eq!(rep.get(0x0590, keys::BC), Some("R"));
    assert_eq!(rep.get(0x0378, keys::BC), Some("L"), "version default");
    assert_eq!(rep.get(0x0000, keys::BC), Some("BN"));
    assert_eq!(rep.get(0x0020, keys::BC), Some("WS"));
}

#[test]
fn binary_properties_get_yes_and_no() {
    let mut registry = Registry::new();
    let ucd = load(&mut registry, &[UcdFile::PropList]);
    let rep = &ucd.repertoire;

    assert_eq!(rep.get(0x0020, keys::WSPACE), Some("Y"));
    assert_eq!(rep.get(0x0041, keys::WSPACE), Some("N"));
    assert_eq!(rep.get(0x0041, keys::AHEX), Some("Y"));
    assert_eq!(rep.get(0x0044, keys::AHEX), Some("N"));
    assert_eq!(rep.get(0x0031, keys::HEX), Some("Y"));
    assert_eq!(rep.get(0x0041, keys::DASH), None, "properties not in the file stay absent");
}

#[test]
fn blocks_use_short_aliases() {
    let mut registry = Registry::new();
    let ucd = load(&mut registry, &[UcdFile::Blocks, UcdFile::PropertyValueAliases]);
    let rep = &ucd.repertoire;

    assert_eq!(ucd.blocks.len(), 3);
    let latin1 = ucd.blocks.get("Latin-1 Supplement").expect("block should be loaded");
    assert_eq!((latin1.first, latin1.last), (0x80, 0xFF));

    assert_eq!(rep.get(0x0041, keys::BLK), Some("ASCII"));
    assert_eq!(rep.get(0x00E9, keys::BLK), Some("Latin_1_Sup"));
    assert_eq!(rep.get(0xAC00, keys::BLK), Some("Hangul"));
    assert_eq!(rep.get(0x0378, keys::BLK), Some("NB"), "outside any block");
}

#[test]
fn name_aliases_accumulate_per_codepoint() {
    let mut registry = Registry::new();
    let ucd = load(&mut registry, &[UcdFile::NameAliases]);

    let aliases = ucd
        .repertoire
        .get_object(0x0000, keys::NAME_ALIAS)
        .and_then(|value| value.as_aliases())
        .expect("aliases at U+0000");
    assert_eq!(aliases.len(), 2);
    assert!(aliases.contains(&NameAlias::new("NULL", Some("control"))));
    assert!(aliases.contains(&NameAlias::new("NUL", Some("abbreviation"))));
    assert_eq!(ucd.repertoire.get_object(0x0041, keys::NAME_ALIAS), None);
}

#[test]
fn named_sequences_are_loaded_into_their_lists() {
    let mut registry = Registry::new();
    let ucd = load(
        &mut registry,
        &[UcdFile::NamedSequences, UcdFile::NamedSequencesProv],
    );

    assert_eq!(ucd.named_sequences.len(), 2);
    assert!(ucd.provisional_named_sequences.is_empty());
    let kss = ucd
        .named_sequences
        .get("TAMIL CONSONANT KSS")
        .expect("sequence should be loaded");
    assert_eq!(kss.sequence, vec![0x0B95, 0x0BCD, 0x0BB7]);
    assert_eq!(kss.cps(), "0B95 0BCD 0BB7");
}

#[test]
fn special_casing_fills_full_mappings() {
    let mut registry = Registry::new();
    let ucd = load(&mut registry, &[UcdFile::UnicodeData, UcdFile::SpecialCasing]);
    let rep = &ucd.repertoire;

    assert_eq!(rep.get(0x00DF, keys::UC), Some("0053 0053"));
    assert_eq!(rep.get(0x00DF, keys::TC), Some("0053 0073"));
    assert_eq!(rep.get(0x00DF, keys::LC), Some("#"), "self mapping is normalized");
    assert_eq!(rep.get(0x0041, keys::LC), Some("0061"), "falls back to slc");
    assert_eq!(rep.get(0x03A3, keys::LC), Some("#"), "conditional mapping is skipped");
}

#[test]
fn files_are_skipped_in_versions_that_lack_them() {
    let mut registry = Registry::new();
    let files: BTreeSet<UcdFile> = [UcdFile::Scripts].into_iter().collect();
    let ucd = Ucd::from_ucd(&mut registry, ucd_dir(), UnicodeVersion::V3_0_0, &files)
        .expect("skipped file is not an error");

    assert_eq!(ucd.repertoire.get(0x0041, keys::SC), None);
}

#[test]
fn side_tables_are_read_from_their_files() {
    let mut registry = Registry::new();
    let ucd = load(
        &mut registry,
        &[
            UcdFile::NormalizationCorrections,
            UcdFile::StandardizedVariants,
            UcdFile::EmojiVariationSequences,
            UcdFile::CJKRadicals,
            UcdFile::EmojiSources,
        ],
    );

    assert_eq!(ucd.normalization_corrections.len(), 3);
    let f951 = ucd.normalization_corrections.get(&0xF951).expect("F951 is corrected");
    assert_eq!(f951.old_decomposition, "96FB");
    assert_eq!(f951.new_decomposition, "964B");
    assert_eq!(f951.version, "3.2.0");

    assert_eq!(ucd.standardized_variants.len(), 6, "four standardized plus two emoji sequences");
    let zero = ucd
        .standardized_variants
        .get(&(vec![0x30, 0xFE00], String::new()))
        .expect("unconditional variant");
    assert_eq!(zero.description, "short diagonal stroke form");
    let final_a = ucd
        .standardized_variants
        .get(&(vec![0x1820, 0x180B], "final".to_string()))
        .expect("one entry per shaping condition");
    assert_eq!(final_a.description, "second form");
    let emoji = ucd
        .standardized_variants
        .get(&(vec![0x23, 0xFE0F], String::new()))
        .expect("emoji variation sequence");
    assert_eq!(emoji.description, "emoji style");

    let numbers: Vec<String> = ucd.cjk_radicals.iter().map(|r| r.number.to_string()).collect();
    assert_eq!(numbers, vec!["1", "2", "90", "90'", "91"], "simplified forms follow their radical");

    assert_eq!(ucd.emoji_sources.len(), 3);
    let keycap = ucd.emoji_sources.get(&vec![0x23, 0x20E3]).expect("keycap source");
    assert_eq!((keycap.docomo.as_str(), keycap.kddi.as_str(), keycap.softbank.as_str()), ("F985", "F489", "F7B0"));
}

#[test]
fn side_tables_newer_than_the_version_are_skipped() {
    let mut registry = Registry::new();
    let files: BTreeSet<UcdFile> = [
        UcdFile::NormalizationCorrections,
        UcdFile::StandardizedVariants,
        UcdFile::EmojiVariationSequences,
        UcdFile::CJKRadicals,
        UcdFile::EmojiSources,
    ]
    .into_iter()
    .collect();
    let older: UnicodeVersion = "5.0.0".parse().expect("valid version");
    let ucd = Ucd::from_ucd(&mut registry, ucd_dir(), older, &files).expect("fixture UCD should load");

    assert_eq!(ucd.normalization_corrections.len(), 3);
    assert_eq!(ucd.standardized_variants.len(), 4, "no emoji sequences before 13.0.0");
    assert!(ucd.cjk_radicals.is_empty(), "radical numbers start with 5.2.0");
    assert!(ucd.emoji_sources.is_empty(), "emoji sources start with 6.0.0");
}

#[test]
fn a_selected_missing_file_is_an_error() {
    let mut registry = Registry::new();
    let files: BTreeSet<UcdFile> = [UcdFile::LineBreak].into_iter().collect();
    let result = Ucd::from_ucd(&mut registry, ucd_dir(), version(), &files);

    assert!(
        matches!(result, Err(UcdError::Resource { .. })),
        "expected a resource error, got {:?}",
        result.map(|ucd| ucd.description)
    );
}

#[test]
fn file_names_parse_case_insensitively() {
    assert_eq!(UcdFile::try_from("LineBreak").ok(), Some(UcdFile::LineBreak));
    assert_eq!(UcdFile::try_from("scripts.txt").ok(), Some(UcdFile::Scripts));
    assert_eq!(UcdFile::try_from("emoji-data.txt").ok(), Some(UcdFile::EmojiData));
    assert!(UcdFile::try_from("Unihan").is_err());
    assert_eq!(UcdFile::DerivedBidiClass.path(), "extracted/DerivedBidiClass.txt");
    assert_eq!(UcdFile::try_from("CJKRadicals.txt").ok(), Some(UcdFile::CJKRadicals));
    assert_eq!(
        UcdFile::try_from("emoji-variation-sequences.txt").ok(),
        Some(UcdFile::EmojiVariationSequences)
    );
    assert_eq!(UcdFile::all().len(), UcdFile::ALL.len());
}

use std::collections::BTreeSet;
use std::path::PathBuf;

use ucdxml::ucd::format::NAMESPACE;
use ucdxml::{keys, Detail, NameAlias, Registry, Ucd, UcdFile, UnicodeVersion, XmlOptions};

fn fixture_path(parts: &[&str]) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    for part in parts {
        path.push(part);
    }
    path
}

fn load_fixture(registry: &mut Registry) -> Ucd {
    let files: BTreeSet<UcdFile> = [
        UcdFile::UnicodeData,
        UcdFile::PropertyValueAliases,
        UcdFile::Blocks,
        UcdFile::NameAliases,
        UcdFile::NamedSequences,
        UcdFile::Scripts,
        UcdFile::PropList,
        UcdFile::NormalizationCorrections,
        UcdFile::StandardizedVariants,
        UcdFile::EmojiVariationSequences,
        UcdFile::CJKRadicals,
        UcdFile::EmojiSources,
    ]
    .into_iter()
    .collect();
    let version: UnicodeVersion = "15.0.0".parse().expect("valid version");
    Ucd::from_ucd(registry, fixture_path(&["tests", "fixtures", "ucd"]), version, &files)
        .expect("fixture UCD should load")
}

fn to_xml(ucd: &Ucd, registry: &Registry, options: XmlOptions) -> String {
    let mut out = Vec::new();
    ucd.write_xml(registry, &mut out, &options).expect("write should succeed");
    String::from_utf8(out).expect("XML is UTF-8")
}

fn assert_same(loaded: &Ucd, reread: &Ucd, registry: &Registry) {
    let mut report = Vec::new();
    let diff = reread
        .diff(loaded, registry, Detail::Changes, &mut report)
        .expect("diff should succeed");
    assert!(
        diff.is_identical(),
        "round trip changed data:\n{}",
        String::from_utf8_lossy(&report)
    );
}

#[test]
fn plain_documents_round_trip() {
    let mut registry = Registry::new();
    let ucd = load_fixture(&mut registry);
    let xml = to_xml(&ucd, &registry, XmlOptions::default());

    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>"));
    assert!(xml.contains(NAMESPACE));
    assert!(!xml.contains("<group"), "plain form has no groups");

    let reread = Ucd::from_xml(&mut registry, xml.as_bytes()).expect("read should succeed");
    assert_eq!(reread.description, "Unicode 15.0.0");
    assert_eq!(reread.blocks.len(), 3);
    assert_eq!(reread.named_sequences.len(), 2);
    assert_same(&ucd, &reread, &registry);
}

#[test]
fn grouped_documents_round_trip() {
    let mut registry = Registry::new();
    let ucd = load_fixture(&mut registry);
    let options = XmlOptions {
        grouped: true,
        ..XmlOptions::default()
    };
    let xml = to_xml(&ucd, &registry, options);

    assert!(xml.contains("<group"), "grouped form wraps entries");
    let reread = Ucd::from_xml(&mut registry, xml.as_bytes()).expect("read should succeed");
    assert_same(&ucd, &reread, &registry);
}

#[test]
fn entries_are_named_by_type_and_carry_short_names() {
    let mut registry = Registry::new();
    let ucd = load_fixture(&mut registry);
    let xml = to_xml(&ucd, &registry, XmlOptions::default());

    assert!(xml.contains("<char cp=\"0041\""), "single codepoint entry");
    assert!(xml.contains("na=\"LATIN CAPITAL LETTER A\""));
    assert!(xml.contains("<char first-cp=\"3400\" last-cp=\"4DBF\""), "range entry");
    assert!(xml.contains("<surrogate first-cp=\"D800\" last-cp=\"DB7F\""));
    assert!(xml.contains("<name-alias alias=\"NULL\" type=\"control\"/>"));
    assert!(xml.contains("<block first-cp=\"0080\" last-cp=\"00FF\" name=\"Latin-1 Supplement\"/>"));
    assert!(xml.contains("cps=\"0B95 0BCD 0BB7\""));
    assert!(!xml.contains("provisional-named-sequences"), "empty lists are left out");
}

#[test]
fn side_tables_are_written_as_attribute_lists() {
    let mut registry = Registry::new();
    let ucd = load_fixture(&mut registry);
    let xml = to_xml(&ucd, &registry, XmlOptions::default());

    assert!(xml.contains("<normalization-correction cp=\"F951\" old=\"96FB\" new=\"964B\" version=\"3.2.0\"/>"));
    assert!(xml.contains("<standardized-variant cps=\"0030 FE00\" desc=\"short diagonal stroke form\" when=\"\"/>"));
    assert!(xml.contains("<cjk-radical number=\"1\" radical=\"2F00\" ideograph=\"4E00\"/>"));
    assert!(xml.contains("<emoji-source unicode=\"0023 20E3\" docomo=\"F985\" kddi=\"F489\" softbank=\"F7B0\"/>"));

    let reread = Ucd::from_xml(&mut registry, xml.as_bytes()).expect("read should succeed");
    assert_eq!(reread.normalization_corrections.len(), 3);
    assert_eq!(reread.standardized_variants.len(), 6);
    assert_eq!(reread.emoji_sources.len(), 3);
    let simplified = "90'".parse().expect("radical number");
    let radical = reread.cjk_radicals.get(&simplified).expect("primed number survives escaping");
    assert_eq!(radical.ideograph, "4E2C");
}

#[test]
fn short_ranges_are_exploded() {
    let mut registry = Registry::new();
    let mut ucd = Ucd::new();
    ucd.repertoire.put(0x61, 0x63, keys::TYPE, "char");
    ucd.repertoire.put(0x61, 0x63, keys::GC, "Ll");
    ucd.normalize();

    let compact = to_xml(&ucd, &registry, XmlOptions::default());
    assert!(compact.contains("<char first-cp=\"0061\" last-cp=\"0063\" gc=\"Ll\"/>"), "got:\n{}", compact);

    let options = XmlOptions {
        explode_limit: 2,
        ..XmlOptions::default()
    };
    let exploded = to_xml(&ucd, &registry, options);
    for cp in ["0061", "0062", "0063"] {
        assert!(exploded.contains(&format!("<char cp=\"{}\" gc=\"Ll\"/>", cp)), "got:\n{}", exploded);
    }

    let reread = Ucd::from_xml(&mut registry, exploded.as_bytes()).expect("read should succeed");
    let group = reread.repertoire.group_at(0x62);
    assert_eq!((group.first(), group.last()), (0x61, 0x63), "normalized after reading");
}

#[test]
fn group_values_are_inherited_unless_overridden() {
    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<ucd xmlns="{}">
  <description>test data</description>
  <repertoire>
    <group gc="Lu" sc="Latn">
      <char cp="0041" na="LATIN CAPITAL LETTER A"/>
      <char cp="0042" na="LATIN CAPITAL LETTER B" gc="Ll"/>
    </group>
    <reserved first-cp="0043" last-cp="10FFFF" gc="Cn" kFoo="bar"/>
  </repertoire>
</ucd>"#,
        NAMESPACE
    );
    let mut registry = Registry::new();
    let ucd = Ucd::from_xml(&mut registry, xml.as_bytes()).expect("read should succeed");
    let rep = &ucd.repertoire;

    assert_eq!(ucd.description, "test data");
    assert_eq!(rep.get(0x41, keys::GC), Some("Lu"));
    assert_eq!(rep.get(0x41, keys::SC), Some("Latn"));
    assert_eq!(rep.get(0x41, keys::TYPE), Some("char"));
    assert_eq!(rep.get(0x42, keys::GC), Some("Ll"), "element attribute wins");
    assert_eq!(rep.get(0x43, keys::TYPE), Some("reserved"));
    assert_eq!(rep.get(0x43, keys::SC), None, "inherited values end with the group");
    assert_eq!(rep.get(0x40, keys::GC), None, "not covered by the document");

    let foo = registry.lookup("kFoo").expect("unknown attribute is registered");
    assert_eq!(rep.get(0x10FFFF, foo), Some("bar"));
}

#[test]
fn name_alias_children_are_read_into_sets() {
    let xml = r#"<ucd>
  <repertoire>
    <char cp="0000" na1="NULL">
      <name-alias alias="NUL" type="abbreviation"/>
      <name-alias alias="NULL" type="control"/>
    </char>
  </repertoire>
</ucd>"#;
    let mut registry = Registry::new();
    let ucd = Ucd::from_xml(&mut registry, xml.as_bytes()).expect("read should succeed");

    let aliases = ucd
        .repertoire
        .get_object(0, keys::NAME_ALIAS)
        .and_then(|value| value.as_aliases())
        .expect("aliases at U+0000");
    assert_eq!(aliases.len(), 2);
    assert!(aliases.contains(&NameAlias::new("NUL", Some("abbreviation"))));
    assert_eq!(ucd.repertoire.get(0, keys::NA1), Some("NULL"));
}

#[test]
fn malformed_documents_are_errors() {
    let mut registry = Registry::new();
    let missing_cp = r#"<ucd><repertoire><char na="X"/></repertoire></ucd>"#;
    assert!(Ucd::from_xml(&mut registry, missing_cp.as_bytes()).is_err());

    let bad_cp = r#"<ucd><repertoire><char cp="ZZZZ"/></repertoire></ucd>"#;
    assert!(Ucd::from_xml(&mut registry, bad_cp.as_bytes()).is_err());

    let bad_radical = r#"<ucd><cjk-radicals><cjk-radical number="x" radical="2F00" ideograph="4E00"/></cjk-radicals></ucd>"#;
    assert!(Ucd::from_xml(&mut registry, bad_radical.as_bytes()).is_err());
}

#[test]
fn files_round_trip_through_disk() {
    let mut registry = Registry::new();
    let ucd = load_fixture(&mut registry);
    let path = std::env::temp_dir().join(format!("ucdxml-roundtrip-{}.xml", std::process::id()));

    ucd.to_xml_file(&registry, &path, &XmlOptions::default())
        .expect("write should succeed");
    let reread = Ucd::from_xml_file(&mut registry, &path).expect("read should succeed");
    let _ = std::fs::remove_file(&path);

    assert_same(&ucd, &reread, &registry);
}

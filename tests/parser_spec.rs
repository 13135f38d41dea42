use std::path::PathBuf;

use ucdxml::ucd::format::parser::{parse_range, parse_u_range, RecordKind, RecordParser};
use ucdxml::UcdError;

fn fixture_path(parts: &[&str]) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    for part in parts {
        path.push(part);
    }
    path
}

#[test]
fn splits_trims_and_parses_ranges() {
    let records = RecordParser::semicolon().records("0041..005A;Latin\n");

    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.fields, vec!["0041..005A", "Latin"]);
    assert_eq!(record.kind, RecordKind::Data);
    assert_eq!(record.line, 1);
    let range = record.range(0).expect("valid range");
    assert_eq!((range.first, range.last), (0x41, 0x5A));
}

#[test]
fn strips_comments_and_keeps_empty_fields() {
    let text = "# header comment\n\
                0020          ; Common # Zs       SPACE\n\
                0000;<control>;Cc;0;BN;;;;;N;NULL;;;;\n";
    let records = RecordParser::semicolon().records(text);

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].fields, vec!["0020", "Common"]);
    assert_eq!(records[0].line, 2);
    assert_eq!(records[1].fields.len(), 15, "empty fields are preserved");
    assert_eq!(records[1].field(5), Some(""));
    assert_eq!(records[1].field(10), Some("NULL"));
    assert_eq!(records[1].field(15), None);
}

#[test]
fn whole_codespace_missing_directives_are_dropped() {
    let records = RecordParser::semicolon().records("# @missing: 0000..10FFFF; XX\n");
    assert!(records.is_empty(), "got {:?}", records);
}

#[test]
fn partial_missing_directives_are_records() {
    let records = RecordParser::semicolon().records("# @missing: 0041..005A; XX\n");

    assert_eq!(records.len(), 1);
    assert!(records[0].is_missing());
    assert_eq!(records[0].fields, vec!["0041..005A", "XX"]);
}

#[test]
fn bare_missing_directives_are_recognized() {
    let parser = RecordParser::semicolon();
    assert!(parser.records("@missing: 0000..10FFFF; XX").is_empty());

    let records = parser.records("@missing: 0041..005A; XX");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].kind, RecordKind::Missing);
    assert_eq!(records[0].fields, vec!["0041..005A", "XX"]);

    let plain = parser.without_missing_directives().records("@missing: 0041..005A; XX\n");
    assert!(plain.is_empty(), "got {:?}", plain);
}

#[test]
fn missing_directives_can_be_treated_as_comments() {
    let parser = RecordParser::semicolon().without_missing_directives();
    let records = parser.records("# @missing: 0041..005A; XX\n0041;A\n");

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].kind, RecordKind::Data);
}

#[test]
fn very_short_lines_are_skipped() {
    let count = RecordParser::semicolon().parse_str("A\n\n   \nAB;C\n", |_| {});
    assert_eq!(count, 1);
}

#[test]
fn header_is_skipped_up_to_the_first_blank_line() {
    let parser = RecordParser::semicolon().skip_header();
    let records = parser.records("Title line\nmore header\n\n0041;A\n");

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].line, 4);
    assert_eq!(records[0].fields, vec!["0041", "A"]);
}

#[test]
fn tab_delimited_records() {
    let records = RecordParser::tab().records("U+3400\tkRSUnicode\t1.2\n");
    assert_eq!(records[0].fields, vec!["U+3400", "kRSUnicode", "1.2"]);
}

#[test]
fn fixed_columns_are_cut_at_offsets() {
    let parser = RecordParser::fixed_columns(vec![1, 6, 11]);
    let records = parser.records("Header\n\n0041 Latin\n0391 Greek\n");

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].fields, vec!["0041", "Latin"]);
    assert_eq!(records[1].fields, vec!["0391", "Greek"]);
    assert_eq!(records[1].line, 4);
}

#[test]
fn ranges_accept_the_u_plus_notation() {
    let range = parse_range("U+0041..U+005A").expect("valid range");
    assert_eq!((range.first, range.last), (0x41, 0x5A));

    let single = parse_u_range("U+1F600", 1).expect("valid codepoint");
    assert_eq!((single.first, single.last), (0x1F600, 0x1F600));
    assert_eq!(single.to_string(), "1F600");
}

#[test]
fn invalid_ranges_are_rejected() {
    assert!(matches!(parse_range("005A..0041"), Err(UcdError::InvalidRange(_))));
    assert!(matches!(parse_range("110000"), Err(UcdError::InvalidRange(_))));
    assert!(matches!(parse_range("XYZ"), Err(UcdError::InvalidRange(_))));
    assert!(parse_range("0000..10FFFF").expect("whole codespace").is_whole_codespace());
}

#[test]
fn files_are_parsed_with_line_numbers() {
    let path = fixture_path(&["tests", "fixtures", "ucd", "Scripts.txt"]);
    let mut lines = Vec::new();
    let count = RecordParser::semicolon()
        .parse_file(&path, |record| lines.push(record.line))
        .expect("fixture should parse");

    assert_eq!(count, 10, "whole-codespace @missing is not a record");
    assert_eq!(lines.first(), Some(&6));
}

#[test]
fn a_missing_file_is_a_resource_error() {
    let path = fixture_path(&["tests", "fixtures", "ucd", "NoSuchFile.txt"]);
    let result = RecordParser::semicolon().parse_file(&path, |_| {});

    match result {
        Err(UcdError::Resource { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected a resource error, got {:?}", other),
    }
}

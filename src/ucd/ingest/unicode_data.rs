//! `UnicodeData.txt` and `SpecialCasing.txt`.
//!
//! UnicodeData is the one file whose lines assign many properties at once,
//! and whose large ranges are written as a pair of `<..., First>` /
//! `<..., Last>` lines. Hangul syllables are the exception: their names and
//! decompositions are generated here, one codepoint at a time.

use log::{debug, warn};

use super::vocab::DECOMPOSITION_TYPE;
use super::{Loader, UcdFile};
use crate::ucd::format::parser::RecordParser;
use crate::ucd::store::Repertoire;
use crate::ucd::types::codepoint::{parse_codepoint, to_u};
use crate::ucd::types::error::Result;
use crate::ucd::types::property::keys;
use crate::ucd::types::version::UnicodeVersion;

const FIELD_COUNT: usize = 15;

const HANGUL_BASE: u32 = 0xAC00;
const JAMO_L_BASE: u32 = 0x1100;
const JAMO_V_BASE: u32 = 0x1161;
const JAMO_T_BASE: u32 = 0x11A7;

const JAMO_L: [&str; 19] = [
    "G", "GG", "N", "D", "DD", "R", "M", "B", "BB", "S", "SS", "", "J", "JJ", "C", "K", "T", "P", "H",
];
const JAMO_V: [&str; 21] = [
    "A", "AE", "YA", "YAE", "EO", "E", "YEO", "YE", "O", "WA", "WAE", "OE", "YO", "U", "WEO", "WE", "WI",
    "YU", "EU", "YI", "I",
];
const JAMO_T: [&str; 28] = [
    "", "G", "GG", "GS", "N", "NJ", "NH", "D", "L", "LG", "LM", "LB", "LS", "LT", "LP", "LH", "M", "B",
    "BS", "S", "SS", "NG", "J", "C", "K", "T", "P", "H",
];

/// How the `<..., Last>` line of a range is turned into a name and a type.
fn range_name(label: &str) -> Option<(&'static str, &'static str)> {
    if label.starts_with("<CJK Ideograph") {
        Some(("CJK UNIFIED IDEOGRAPH-#", "char"))
    } else if label.starts_with("<CJK Compatibility Ideograph") {
        Some(("CJK COMPATIBILITY IDEOGRAPH-#", "char"))
    } else if label.contains("Surrogate") {
        Some(("", "surrogate"))
    } else if label.contains("Private Use") {
        Some(("", "char"))
    } else if label.starts_with("<Tangut Ideograph") {
        Some(("TANGUT IDEOGRAPH-#", "char"))
    } else {
        None
    }
}

/// Splits field 5 into `(dt, dm)`.
fn decomposition(field: &str, line: usize) -> (String, String) {
    if field.is_empty() {
        return ("none".to_string(), "#".to_string());
    }
    match field.strip_prefix('<').and_then(|rest| rest.split_once('>')) {
        Some((tag, mapping)) => {
            let dt = DECOMPOSITION_TYPE
                .map(tag, UcdFile::UnicodeData.path(), line)
                .unwrap_or("?");
            (dt.to_string(), mapping.trim_start().to_string())
        }
        None => ("can".to_string(), field.to_string()),
    }
}

fn case_mapping(field: &str) -> &str {
    if field.is_empty() {
        "#"
    } else {
        field
    }
}

/// Stores the properties of one UnicodeData line on `first..=last`.
fn put_fields(
    repertoire: &mut Repertoire,
    first: u32,
    last: u32,
    kind: &str,
    fields: &[String],
    line: usize,
) {
    repertoire.put(first, last, keys::TYPE, kind);
    if fields[2] != "Cc" {
        repertoire.put(first, last, keys::NA, fields[1].as_str());
    }
    repertoire.put(first, last, keys::GC, fields[2].as_str());
    repertoire.put(first, last, keys::CCC, fields[3].as_str());

    let (dt, dm) = decomposition(&fields[5], line);
    repertoire.put(first, last, keys::DT, dt);
    repertoire.put(first, last, keys::DM, dm);

    let (nt, nv) = if !fields[6].is_empty() {
        ("De", Some(&fields[6]))
    } else if !fields[7].is_empty() {
        ("Di", Some(&fields[7]))
    } else if !fields[8].is_empty() {
        ("Nu", Some(&fields[8]))
    } else {
        ("None", None)
    };
    repertoire.put(first, last, keys::NT, nt);
    if let Some(nv) = nv {
        repertoire.put(first, last, keys::NV, nv.as_str());
    }

    repertoire.put(first, last, keys::BIDI_M, fields[9].as_str());
    repertoire.put(first, last, keys::NA1, fields[10].as_str());
    repertoire.put(first, last, keys::ISC, fields[11].as_str());
    repertoire.put(first, last, keys::SUC, case_mapping(&fields[12]));
    repertoire.put(first, last, keys::SLC, case_mapping(&fields[13]));
    repertoire.put(first, last, keys::STC, case_mapping(&fields[14]));
}

/// Generates the 11172 precomposed Hangul syllables from one template line.
fn put_hangul(repertoire: &mut Repertoire, template: &[String], line: usize) {
    let mut fields = template.to_vec();
    for (l, lead) in JAMO_L.iter().enumerate() {
        for (v, vowel) in JAMO_V.iter().enumerate() {
            let lv = HANGUL_BASE + ((l * JAMO_V.len() + v) * JAMO_T.len()) as u32;
            for (t, trail) in JAMO_T.iter().enumerate() {
                let cp = lv + t as u32;
                fields[1] = format!("HANGUL SYLLABLE {}{}{}", lead, vowel, trail);
                fields[5] = if t == 0 {
                    format!("{} {}", to_u(JAMO_L_BASE + l as u32), to_u(JAMO_V_BASE + v as u32))
                } else {
                    format!("{} {}", to_u(lv), to_u(JAMO_T_BASE + t as u32))
                };
                put_fields(repertoire, cp, cp, "char", &fields, line);
            }
        }
    }
}

pub(super) fn load_unicode_data(loader: &mut Loader<'_>) -> Result<()> {
    let path = loader.path(UcdFile::UnicodeData);
    let name = UcdFile::UnicodeData.path();
    let version = loader.version;
    let repertoire = &mut loader.ucd.repertoire;
    let mut range_start: Option<u32> = None;

    let records = RecordParser::semicolon()
        .without_missing_directives()
        .parse_file(&path, |record| {
            if record.fields.len() < FIELD_COUNT {
                warn!(
                    "{}:{}: expected {} fields, found {} (line skipped)",
                    name,
                    record.line,
                    FIELD_COUNT,
                    record.fields.len()
                );
                return;
            }
            let cp = match parse_codepoint(&record.fields[0]) {
                Ok(cp) => cp,
                Err(e) => {
                    warn!("{}:{}: {} (line skipped)", name, record.line, e);
                    return;
                }
            };
            let mut fields = record.fields.clone();

            // Bidi_M of the CJK compatibility ideographs sits one column early in 2.1.5.
            if version == UnicodeVersion::new(2, 1, 5) && fields[8] == "N" {
                fields[8].clear();
                fields[9] = "N".to_string();
            }

            let label = fields[1].clone();
            if label.ends_with(", First>") {
                range_start = Some(cp);
                return;
            }
            if label.ends_with(", Last>") {
                let Some(first) = range_start.take() else {
                    warn!("{}:{}: {} without a First line (line skipped)", name, record.line, label);
                    return;
                };
                if label == "<Hangul Syllable, Last>" {
                    put_hangul(repertoire, &fields, record.line);
                    return;
                }
                let kind = match range_name(&label) {
                    Some((range_na, kind)) => {
                        fields[1] = range_na.to_string();
                        kind
                    }
                    None => {
                        warn!("{}:{}: unrecognized range {} (name kept)", name, record.line, label);
                        "char"
                    }
                };
                put_fields(repertoire, first, cp, kind, &fields, record.line);
                return;
            }
            put_fields(repertoire, cp, cp, "char", &fields, record.line);
        })?;
    debug!("{}: {} records", name, records);

    if version.is_at_least(UnicodeVersion::V2_0_0) {
        for plane in 0..=0x10 {
            let cp = plane * 0x10000 + 0xFFFE;
            repertoire.put(cp, cp + 1, keys::TYPE, "noncharacter");
        }
    } else {
        repertoire.put(0xFFFE, 0xFFFF, keys::TYPE, "noncharacter");
    }
    if version.is_at_least(UnicodeVersion::V3_1_0) {
        repertoire.put(0xFDD0, 0xFDEF, keys::TYPE, "noncharacter");
    }

    repertoire.put_default(keys::TYPE, "reserved");
    repertoire.put_default(keys::NA, "");
    repertoire.put_default(keys::GC, "Cn");
    repertoire.put_default(keys::CCC, "0");
    repertoire.put_default(keys::DT, "none");
    repertoire.put_default(keys::DM, "#");
    repertoire.put_default(keys::NT, "None");
    repertoire.put_default(
        keys::NV,
        if version.is_at_least(UnicodeVersion::V5_1_0) { "NaN" } else { "" },
    );
    repertoire.put_default(keys::BIDI_M, "N");
    repertoire.put_default(keys::NA1, "");
    repertoire.put_default(keys::ISC, "");
    repertoire.put_default(keys::SUC, "#");
    repertoire.put_default(keys::SLC, "#");
    repertoire.put_default(keys::STC, "#");
    Ok(())
}

/// Unconditional full case mappings. Conditional lines (field 4 not empty)
/// are context-dependent and left out; everywhere else the full mapping is
/// the simple one.
pub(super) fn load_special_casing(loader: &mut Loader<'_>) -> Result<()> {
    let path = loader.path(UcdFile::SpecialCasing);
    let name = UcdFile::SpecialCasing.path();
    let repertoire = &mut loader.ucd.repertoire;

    RecordParser::semicolon()
        .without_missing_directives()
        .parse_file(&path, |record| {
            let Some(range) = record.range_or_warn(0, name) else {
                return;
            };
            if record.field(4).is_some_and(|condition| !condition.is_empty()) {
                return;
            }
            let mappings = [(keys::LC, 1), (keys::TC, 2), (keys::UC, 3)];
            for (key, column) in mappings {
                if let Some(value) = record.field(column) {
                    repertoire.put(range.first, range.last, key, value);
                }
            }
        })?;

    repertoire.put_default_with(|group| {
        for (full, simple) in [(keys::LC, keys::SLC), (keys::TC, keys::STC), (keys::UC, keys::SUC)] {
            if let Some(value) = group.get(simple).map(str::to_string) {
                group.put_default(full, value);
            }
        }
    });
    Ok(())
}

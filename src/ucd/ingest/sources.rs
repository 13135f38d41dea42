//! Declarative description of the single-property and binary-property files.
//!
//! Each [`PropertySource`] row says which file feeds which property, from
//! which column, through which value transform, since which version, and
//! what the version-dependent default is. The generic loaders at the bottom
//! of this module interpret the rows, so supporting another file of the same
//! shape is one more table entry.

use std::collections::BTreeSet;

use log::{debug, warn};

use super::vocab::{Vocabulary, GRAPHEME_CLUSTER_BREAK, SCRIPT, SENTENCE_BREAK, WORD_BREAK};
use super::{Loader, UcdFile};
use crate::ucd::format::parser::RecordParser;
use crate::ucd::types::codepoint::{parse_codepoint, to_u, CodepointRange};
use crate::ucd::types::error::Result;
use crate::ucd::types::property::{keys, PropertyKey};
use crate::ucd::types::version::UnicodeVersion;

/// How a raw field becomes a stored value.
#[derive(Debug, Clone, Copy)]
pub enum Transform {
    Verbatim,
    Vocabulary(&'static Vocabulary),
    /// A hex codepoint, re-spelled in canonical upper-case form.
    Codepoint,
}

impl Transform {
    fn apply(&self, raw: &str, source: &str, line: usize) -> Option<String> {
        match self {
            Transform::Verbatim => Some(raw.to_string()),
            Transform::Vocabulary(vocabulary) => vocabulary.map(raw, source, line).map(str::to_string),
            Transform::Codepoint => match parse_codepoint(raw) {
                Ok(cp) => Some(to_u(cp)),
                Err(e) => {
                    warn!("{}:{}: {} (ignored)", source, line, e);
                    None
                }
            },
        }
    }
}

/// One file that assigns a single property.
#[derive(Debug)]
pub struct PropertySource {
    pub file: UcdFile,
    pub since: UnicodeVersion,
    /// Last version in which the file exists, if it was withdrawn.
    pub until: Option<UnicodeVersion>,
    pub key: PropertyKey,
    pub column: usize,
    pub transform: Transform,
    /// `(minimum version, default)` pairs in increasing version order.
    pub defaults: &'static [(UnicodeVersion, &'static str)],
    /// Property whose value is copied where this one is still absent.
    pub fallback: Option<PropertyKey>,
}

impl PropertySource {
    pub fn applies_to(&self, version: UnicodeVersion) -> bool {
        version.is_at_least(self.since) && self.until.map_or(true, |until| version <= until)
    }

    /// The last default whose minimum version is satisfied.
    pub fn default_for(&self, version: UnicodeVersion) -> Option<&'static str> {
        self.defaults
            .iter()
            .rev()
            .find(|(since, _)| version.is_at_least(*since))
            .map(|(_, value)| *value)
    }
}

const fn single(
    file: UcdFile,
    since: UnicodeVersion,
    key: PropertyKey,
    defaults: &'static [(UnicodeVersion, &'static str)],
) -> PropertySource {
    PropertySource {
        file,
        since,
        until: None,
        key,
        column: 1,
        transform: Transform::Verbatim,
        defaults,
        fallback: None,
    }
}

pub static PROPERTY_SOURCES: &[PropertySource] = &[
    single(UcdFile::DerivedAge, UnicodeVersion::V3_2_0, keys::AGE, &[(UnicodeVersion::V3_2_0, "unassigned")]),
    single(UcdFile::DerivedBidiClass, UnicodeVersion::V3_2_0, keys::BC, &[(UnicodeVersion::V3_2_0, "L")]),
    PropertySource {
        transform: Transform::Codepoint,
        ..single(UcdFile::BidiMirroring, UnicodeVersion::V3_0_1, keys::BMG, &[(UnicodeVersion::V3_0_1, "")])
    },
    single(UcdFile::EastAsianWidth, UnicodeVersion::V3_0_0, keys::EA, &[(UnicodeVersion::V3_0_0, "N")]),
    single(UcdFile::HangulSyllableType, UnicodeVersion::V4_0_0, keys::HST, &[(UnicodeVersion::V4_0_0, "NA")]),
    single(UcdFile::IndicSyllabicCategory, UnicodeVersion::V6_0_0, keys::INSC, &[(UnicodeVersion::V6_0_0, "Other")]),
    PropertySource {
        until: Some(UnicodeVersion::new(7, 0, 0)),
        ..single(UcdFile::IndicMatraCategory, UnicodeVersion::V6_0_0, keys::INMC, &[(UnicodeVersion::V6_0_0, "NA")])
    },
    single(UcdFile::IndicPositionalCategory, UnicodeVersion::V8_0_0, keys::INPC, &[(UnicodeVersion::V8_0_0, "NA")]),
    single(UcdFile::Jamo, UnicodeVersion::V3_0_1, keys::JSN, &[(UnicodeVersion::V3_0_1, "")]),
    single(
        UcdFile::LineBreak,
        UnicodeVersion::V3_0_0,
        keys::LB,
        &[(UnicodeVersion::V3_0_0, "AL"), (UnicodeVersion::V4_0_0, "XX")],
    ),
    PropertySource {
        transform: Transform::Vocabulary(&SCRIPT),
        ..single(
            UcdFile::Scripts,
            UnicodeVersion::V3_1_0,
            keys::SC,
            &[(UnicodeVersion::V3_1_0, "Zyyy"), (UnicodeVersion::V5_0_0, "Zzzz")],
        )
    },
    PropertySource {
        fallback: Some(keys::SC),
        ..single(UcdFile::ScriptExtensions, UnicodeVersion::V6_1_0, keys::SCX, &[])
    },
    PropertySource {
        transform: Transform::Vocabulary(&GRAPHEME_CLUSTER_BREAK),
        ..single(UcdFile::GraphemeBreakProperty, UnicodeVersion::V4_1_0, keys::GCB, &[(UnicodeVersion::V4_1_0, "XX")])
    },
    PropertySource {
        transform: Transform::Vocabulary(&WORD_BREAK),
        ..single(UcdFile::WordBreakProperty, UnicodeVersion::V4_1_0, keys::WB, &[(UnicodeVersion::V4_1_0, "XX")])
    },
    PropertySource {
        transform: Transform::Vocabulary(&SENTENCE_BREAK),
        ..single(UcdFile::SentenceBreakProperty, UnicodeVersion::V4_1_0, keys::SB, &[(UnicodeVersion::V4_1_0, "XX")])
    },
    single(UcdFile::VerticalOrientation, UnicodeVersion::V10_0_0, keys::VO, &[(UnicodeVersion::V10_0_0, "R")]),
];

/// One file listing ranges for many binary properties (`range ; Property_Name`).
#[derive(Debug)]
pub struct BinarySource {
    pub file: UcdFile,
    pub since: UnicodeVersion,
}

pub static BINARY_SOURCES: &[BinarySource] = &[
    BinarySource { file: UcdFile::PropList, since: UnicodeVersion::V3_1_0 },
    BinarySource { file: UcdFile::DerivedCoreProperties, since: UnicodeVersion::V3_1_0 },
    BinarySource { file: UcdFile::EmojiData, since: UnicodeVersion::V13_0_0 },
];

/// Loads one single-property file.
///
/// Data lines are `put`. `@missing` directives become ranged defaults,
/// applied last-first so that a later, narrower directive wins over an
/// earlier, broader one. Then the fallback property and the versioned
/// default fill whatever is left.
pub(super) fn load_property(loader: &mut Loader<'_>, source: &PropertySource) -> Result<()> {
    let path = loader.path(source.file);
    let name = source.file.path();
    let property_name = loader.registry.short_name(source.key);
    let mut missing: Vec<(CodepointRange, String)> = Vec::new();

    let repertoire = &mut loader.ucd.repertoire;
    let value_aliases = &loader.value_aliases;
    let records = RecordParser::semicolon().parse_file(&path, |record| {
        let Some(range) = record.range_or_warn(0, name) else {
            return;
        };
        let Some(raw) = record.field(source.column) else {
            warn!("{}:{}: missing field {} (line skipped)", name, record.line, source.column);
            return;
        };
        if record.is_missing() {
            let value = match source.transform {
                Transform::Verbatim => value_aliases
                    .short_value(&property_name, raw)
                    .unwrap_or(raw)
                    .to_string(),
                transform => match transform.apply(raw, name, record.line) {
                    Some(value) => value,
                    None => return,
                },
            };
            missing.push((range, value));
            return;
        }
        if let Some(value) = source.transform.apply(raw, name, record.line) {
            repertoire.put(range.first, range.last, source.key, value);
        }
    })?;
    debug!("{}: {} records, {} @missing ranges", name, records, missing.len());

    for (range, value) in missing.into_iter().rev() {
        repertoire.put_default_range(range.first, range.last, source.key, value);
    }
    if let Some(fallback) = source.fallback {
        let key = source.key;
        repertoire.put_default_with(|group| {
            if group.get(key).is_none() {
                if let Some(value) = group.get(fallback).map(str::to_string) {
                    group.put_default(key, value);
                }
            }
        });
    }
    if let Some(default) = source.default_for(loader.version) {
        repertoire.put_default(source.key, default);
    }
    Ok(())
}

/// Loads a binary-property file: `Y` on listed ranges, `N` everywhere else
/// for each property the file mentions.
pub(super) fn load_binary(loader: &mut Loader<'_>, source: &BinarySource) -> Result<()> {
    let path = loader.path(source.file);
    let name = source.file.path();
    let mut seen: BTreeSet<PropertyKey> = BTreeSet::new();

    let registry = &mut *loader.registry;
    let repertoire = &mut loader.ucd.repertoire;
    RecordParser::semicolon().parse_file(&path, |record| {
        if record.is_missing() {
            return;
        }
        let Some(range) = record.range_or_warn(0, name) else {
            return;
        };
        let Some(property) = record.field(1).filter(|p| !p.is_empty()) else {
            warn!("{}:{}: no property name (line skipped)", name, record.line);
            return;
        };
        let key = registry.from_string(property);
        seen.insert(key);
        repertoire.put(range.first, range.last, key, "Y");
    })?;

    for key in seen {
        repertoire.put_default(key, "N");
    }
    Ok(())
}


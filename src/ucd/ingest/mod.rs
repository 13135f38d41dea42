//! Loading a repertoire from the UCD text files of one Unicode version.
//!
//! [`load`] walks the selected [`UcdFile`]s in a fixed order. Each file goes
//! through [`RecordParser`](crate::ucd::format::parser::RecordParser) and ends
//! up as `put`s on the repertoire, followed by the defaults that the file
//! implies for the version being loaded.

pub mod catalogs;
pub mod sources;
pub mod unicode_data;
pub mod vocab;

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::ucd::database::Ucd;
use crate::ucd::types::error::{Result, UcdError};
use crate::ucd::types::property::Registry;
use crate::ucd::types::version::UnicodeVersion;

pub use sources::{BinarySource, PropertySource, Transform, BINARY_SOURCES, PROPERTY_SOURCES};
pub use vocab::{ValueAliases, Vocabulary};

/// The UCD files this crate knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UcdFile {
    UnicodeData,
    PropertyValueAliases,
    Blocks,
    NameAliases,
    NamedSequences,
    NamedSequencesProv,
    SpecialCasing,
    DerivedAge,
    DerivedBidiClass,
    BidiMirroring,
    EastAsianWidth,
    HangulSyllableType,
    IndicSyllabicCategory,
    IndicMatraCategory,
    IndicPositionalCategory,
    Jamo,
    LineBreak,
    Scripts,
    ScriptExtensions,
    GraphemeBreakProperty,
    WordBreakProperty,
    SentenceBreakProperty,
    VerticalOrientation,
    PropList,
    DerivedCoreProperties,
    EmojiData,
    NormalizationCorrections,
    StandardizedVariants,
    EmojiVariationSequences,
    CJKRadicals,
    EmojiSources,
}

impl UcdFile {
    pub const ALL: [UcdFile; 31] = [
        UcdFile::UnicodeData,
        UcdFile::PropertyValueAliases,
        UcdFile::Blocks,
        UcdFile::NameAliases,
        UcdFile::NamedSequences,
        UcdFile::NamedSequencesProv,
        UcdFile::SpecialCasing,
        UcdFile::DerivedAge,
        UcdFile::DerivedBidiClass,
        UcdFile::BidiMirroring,
        UcdFile::EastAsianWidth,
        UcdFile::HangulSyllableType,
        UcdFile::IndicSyllabicCategory,
        UcdFile::IndicMatraCategory,
        UcdFile::IndicPositionalCategory,
        UcdFile::Jamo,
        UcdFile::LineBreak,
        UcdFile::Scripts,
        UcdFile::ScriptExtensions,
        UcdFile::GraphemeBreakProperty,
        UcdFile::WordBreakProperty,
        UcdFile::SentenceBreakProperty,
        UcdFile::VerticalOrientation,
        UcdFile::PropList,
        UcdFile::DerivedCoreProperties,
        UcdFile::EmojiData,
        UcdFile::NormalizationCorrections,
        UcdFile::StandardizedVariants,
        UcdFile::EmojiVariationSequences,
        UcdFile::CJKRadicals,
        UcdFile::EmojiSources,
    ];

    /// Location of the file relative to the root of a UCD directory.
    pub fn path(self) -> &'static str {
        match self {
            UcdFile::UnicodeData => "UnicodeData.txt",
            UcdFile::PropertyValueAliases => "PropertyValueAliases.txt",
            UcdFile::Blocks => "Blocks.txt",
            UcdFile::NameAliases => "NameAliases.txt",
            UcdFile::NamedSequences => "NamedSequences.txt",
            UcdFile::NamedSequencesProv => "NamedSequencesProv.txt",
            UcdFile::SpecialCasing => "SpecialCasing.txt",
            UcdFile::DerivedAge => "DerivedAge.txt",
            UcdFile::DerivedBidiClass => "extracted/DerivedBidiClass.txt",
            UcdFile::BidiMirroring => "BidiMirroring.txt",
            UcdFile::EastAsianWidth => "EastAsianWidth.txt",
            UcdFile::HangulSyllableType => "HangulSyllableType.txt",
            UcdFile::IndicSyllabicCategory => "IndicSyllabicCategory.txt",
            UcdFile::IndicMatraCategory => "IndicMatraCategory.txt",
            UcdFile::IndicPositionalCategory => "IndicPositionalCategory.txt",
            UcdFile::Jamo => "Jamo.txt",
            UcdFile::LineBreak => "LineBreak.txt",
            UcdFile::Scripts => "Scripts.txt",
            UcdFile::ScriptExtensions => "ScriptExtensions.txt",
            UcdFile::GraphemeBreakProperty => "auxiliary/GraphemeBreakProperty.txt",
            UcdFile::WordBreakProperty => "auxiliary/WordBreakProperty.txt",
            UcdFile::SentenceBreakProperty => "auxiliary/SentenceBreakProperty.txt",
            UcdFile::VerticalOrientation => "VerticalOrientation.txt",
            UcdFile::PropList => "PropList.txt",
            UcdFile::DerivedCoreProperties => "DerivedCoreProperties.txt",
            UcdFile::EmojiData => "emoji/emoji-data.txt",
            UcdFile::NormalizationCorrections => "NormalizationCorrections.txt",
            UcdFile::StandardizedVariants => "StandardizedVariants.txt",
            UcdFile::EmojiVariationSequences => "emoji/emoji-variation-sequences.txt",
            UcdFile::CJKRadicals => "CJKRadicals.txt",
            UcdFile::EmojiSources => "EmojiSources.txt",
        }
    }

    /// Every known file.
    pub fn all() -> BTreeSet<UcdFile> {
        Self::ALL.into_iter().collect()
    }
}

impl fmt::Display for UcdFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl TryFrom<&str> for UcdFile {
    type Error = UcdError;

    /// Accepts the variant name (`LineBreak`) or the file name (`LineBreak.txt`).
    fn try_from(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|file| {
                let path = file.path();
                let file_name = path.rsplit('/').next().unwrap_or(path);
                format!("{:?}", file).eq_ignore_ascii_case(name) || file_name.eq_ignore_ascii_case(name)
            })
            .ok_or_else(|| UcdError::InvalidFormat(format!("unknown UCD file '{}'", name)))
    }
}

/// State shared by the per-file loaders during one ingestion.
pub(crate) struct Loader<'a> {
    pub registry: &'a mut Registry,
    pub ucd: &'a mut Ucd,
    pub dir: &'a Path,
    pub version: UnicodeVersion,
    pub value_aliases: ValueAliases,
}

impl Loader<'_> {
    pub fn path(&self, file: UcdFile) -> PathBuf {
        self.dir.join(file.path())
    }
}

/// Loads the selected files of the UCD in `dir` into `ucd`.
///
/// The caller normalizes afterwards. Files that do not exist in `version`
/// are skipped even when selected; a selected file that should exist but
/// cannot be opened is an error.
pub fn load(
    ucd: &mut Ucd,
    registry: &mut Registry,
    dir: &Path,
    version: UnicodeVersion,
    files: &BTreeSet<UcdFile>,
) -> Result<()> {
    info!("Loading UCD {} from {}", version, dir.display());

    let value_aliases = if files.contains(&UcdFile::PropertyValueAliases) {
        ValueAliases::load(&dir.join(UcdFile::PropertyValueAliases.path()))?
    } else {
        ValueAliases::new()
    };

    let mut loader = Loader {
        registry,
        ucd,
        dir,
        version,
        value_aliases,
    };

    if files.contains(&UcdFile::UnicodeData) {
        info!("Reading {}", UcdFile::UnicodeData.path());
        unicode_data::load_unicode_data(&mut loader)?;
    }

    for source in PROPERTY_SOURCES {
        if !files.contains(&source.file) {
            continue;
        }
        if !source.applies_to(version) {
            debug!("{} does not exist in {} (skipped)", source.file.path(), version);
            continue;
        }
        info!("Reading {}", source.file.path());
        sources::load_property(&mut loader, source)?;
    }

    for source in BINARY_SOURCES {
        if files.contains(&source.file) && version.is_at_least(source.since) {
            info!("Reading {}", source.file.path());
            sources::load_binary(&mut loader, source)?;
        }
    }

    if files.contains(&UcdFile::SpecialCasing) && version.is_at_least(UnicodeVersion::new(2, 1, 8)) {
        info!("Reading {}", UcdFile::SpecialCasing.path());
        unicode_data::load_special_casing(&mut loader)?;
    }

    if files.contains(&UcdFile::Blocks) && version.is_at_least(UnicodeVersion::V2_0_0) {
        info!("Reading {}", UcdFile::Blocks.path());
        catalogs::load_blocks(&mut loader)?;
    }
    if files.contains(&UcdFile::NameAliases) && version.is_at_least(UnicodeVersion::V5_0_0) {
        info!("Reading {}", UcdFile::NameAliases.path());
        catalogs::load_name_aliases(&mut loader)?;
    }
    if files.contains(&UcdFile::NamedSequences) && version.is_at_least(UnicodeVersion::V4_1_0) {
        info!("Reading {}", UcdFile::NamedSequences.path());
        catalogs::load_named_sequences(&mut loader, false)?;
    }
    if files.contains(&UcdFile::NamedSequencesProv) && version.is_at_least(UnicodeVersion::V5_0_0) {
        info!("Reading {}", UcdFile::NamedSequencesProv.path());
        catalogs::load_named_sequences(&mut loader, true)?;
    }

    if files.contains(&UcdFile::NormalizationCorrections) && version.is_at_least(UnicodeVersion::V3_2_0) {
        catalogs::load_catalog(&mut loader, UcdFile::NormalizationCorrections, |ucd| {
            &mut ucd.normalization_corrections
        })?;
    }
    if files.contains(&UcdFile::StandardizedVariants) && version.is_at_least(UnicodeVersion::V4_0_0) {
        catalogs::load_catalog(&mut loader, UcdFile::StandardizedVariants, |ucd| {
            &mut ucd.standardized_variants
        })?;
    }
    if files.contains(&UcdFile::EmojiVariationSequences) && version.is_at_least(UnicodeVersion::V13_0_0) {
        catalogs::load_catalog(&mut loader, UcdFile::EmojiVariationSequences, |ucd| {
            &mut ucd.standardized_variants
        })?;
    }
    if files.contains(&UcdFile::CJKRadicals) && version.is_at_least(UnicodeVersion::V5_2_0) {
        catalogs::load_catalog(&mut loader, UcdFile::CJKRadicals, |ucd| &mut ucd.cjk_radicals)?;
    }
    if files.contains(&UcdFile::EmojiSources) && version.is_at_least(UnicodeVersion::V6_0_0) {
        catalogs::load_catalog(&mut loader, UcdFile::EmojiSources, |ucd| &mut ucd.emoji_sources)?;
    }

    for conflict in loader.ucd.repertoire.take_conflicts() {
        warn!("{}", conflict.describe(&*loader.registry));
    }
    Ok(())
}

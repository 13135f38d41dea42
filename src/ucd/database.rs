//! A loaded Unicode Character Database: repertoire plus side tables.

use std::collections::BTreeSet;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use log::info;

use crate::ucd::diff::{diff_repertoires, Detail, DifferenceCounter, RepertoireDiff};
use crate::ucd::format::xml::{self, XmlOptions};
use crate::ucd::ingest::{self, UcdFile};
use crate::ucd::store::{Repertoire, RepertoireStats};
use crate::ucd::tables::{
    Blocks, CjkRadicals, EmojiSources, NamedSequences, NormalizationCorrections, StandardizedVariants,
};
use crate::ucd::types::error::{Result, UcdError};
use crate::ucd::types::property::{PropertyKey, Registry};
use crate::ucd::types::version::UnicodeVersion;

/// Cut points added to the block boundaries when grouping: C0 controls,
/// C1 controls, the three Hangul jamo classes, regional indicators.
const GROUP_CUTS: [u32; 5] = [0x20, 0xA0, 0x1160, 0x11A8, 0x1F1E6];

/// One version of the database.
///
/// Property names are resolved through a [`Registry`] that the caller owns
/// and passes to every operation that needs it. Two databases that are
/// diffed against each other must have been built with the same registry.
#[derive(Debug, Clone)]
pub struct Ucd {
    pub description: String,
    pub repertoire: Repertoire,
    pub blocks: Blocks,
    pub named_sequences: NamedSequences,
    pub provisional_named_sequences: NamedSequences,
    pub normalization_corrections: NormalizationCorrections,
    pub standardized_variants: StandardizedVariants,
    pub cjk_radicals: CjkRadicals,
    pub emoji_sources: EmojiSources,
}

impl Default for Ucd {
    fn default() -> Self {
        Self::new()
    }
}

impl Ucd {
    pub fn new() -> Self {
        Ucd {
            description: String::new(),
            repertoire: Repertoire::new(),
            blocks: Blocks::new(),
            named_sequences: NamedSequences::new(false),
            provisional_named_sequences: NamedSequences::new(true),
            normalization_corrections: NormalizationCorrections::new(),
            standardized_variants: StandardizedVariants::new(),
            cjk_radicals: CjkRadicals::new(),
            emoji_sources: EmojiSources::new(),
        }
    }

    /// Builds the database from the UCD text files in `dir`.
    pub fn from_ucd(
        registry: &mut Registry,
        dir: impl AsRef<Path>,
        version: UnicodeVersion,
        files: &BTreeSet<UcdFile>,
    ) -> Result<Self> {
        let mut ucd = Ucd::new();
        ucd.description = format!("Unicode {}", version);
        ingest::load(&mut ucd, registry, dir.as_ref(), version, files)?;
        ucd.normalize();
        info!("Loaded {}: {} groups", ucd.description, ucd.repertoire.group_count());
        Ok(ucd)
    }

    pub fn from_xml<R: BufRead>(registry: &mut Registry, input: R) -> Result<Self> {
        let mut ucd = xml::read_ucd(registry, input)?;
        ucd.normalize();
        Ok(ucd)
    }

    pub fn from_xml_file(registry: &mut Registry, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| UcdError::resource(path, e))?;
        Self::from_xml(registry, BufReader::new(file))
    }

    pub fn write_xml<W: Write>(&self, registry: &Registry, out: W, options: &XmlOptions) -> Result<()> {
        xml::write_ucd(self, registry, out, options)
    }

    pub fn to_xml_file(&self, registry: &Registry, path: impl AsRef<Path>, options: &XmlOptions) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| UcdError::resource(path, e))?;
        self.write_xml(registry, BufWriter::new(file), options)?;
        info!("Wrote {}", path.display());
        Ok(())
    }

    pub fn normalize(&mut self) {
        self.repertoire.normalize();
    }

    /// Coarse partition of the codespace carrying dominant values.
    ///
    /// Boundaries are the block edges plus [`GROUP_CUTS`]; each part gets
    /// the values that most of the repertoire's groups inside it agree on.
    pub fn group(&self) -> Repertoire {
        let mut groups = Repertoire::new();
        for block in self.blocks.iter() {
            groups.create_boundary_before(block.first);
            groups.create_boundary_before(block.last + 1);
        }
        for cut in GROUP_CUTS {
            groups.create_boundary_before(cut);
        }
        self.repertoire.group(&mut groups);
        groups
    }

    /// Drops `key` everywhere and records the removal in the description.
    pub fn remove(&mut self, registry: &Registry, key: PropertyKey) {
        self.repertoire.remove(key);
        self.description
            .push_str(&format!("; removed {}", registry.short_name(key)));
    }

    pub fn property_values(&self, key: PropertyKey) -> BTreeSet<String> {
        self.repertoire.get_property_values(key)
    }

    /// Writes the full comparison report of `older` → `self` to `out`.
    pub fn diff<W: Write>(
        &self,
        older: &Ucd,
        registry: &Registry,
        detail: Detail,
        out: &mut W,
    ) -> Result<UcdDiff> {
        writeln!(out, "comparing:")?;
        writeln!(out, "  {}", older.description)?;
        writeln!(out)?;
        writeln!(out, "with:")?;
        writeln!(out, "  {}", self.description)?;
        writeln!(out)?;

        let repertoire = diff_repertoires(&older.repertoire, &self.repertoire, registry, detail, out)?;
        let blocks = self.blocks.diff(&older.blocks, detail, out)?;
        let named_sequences = self.named_sequences.diff(&older.named_sequences, detail, out)?;
        let provisional_named_sequences = self
            .provisional_named_sequences
            .diff(&older.provisional_named_sequences, detail, out)?;
        let normalization_corrections = self
            .normalization_corrections
            .diff(&older.normalization_corrections, detail, out)?;
        let standardized_variants = self
            .standardized_variants
            .diff(&older.standardized_variants, detail, out)?;
        let cjk_radicals = self.cjk_radicals.diff(&older.cjk_radicals, detail, out)?;
        let emoji_sources = self.emoji_sources.diff(&older.emoji_sources, detail, out)?;

        writeln!(out)?;
        writeln!(out, "{} end of report", "=".repeat(45))?;

        Ok(UcdDiff {
            repertoire,
            blocks,
            named_sequences,
            provisional_named_sequences,
            normalization_corrections,
            standardized_variants,
            cjk_radicals,
            emoji_sources,
        })
    }

    pub fn stats(&self) -> UcdStats {
        UcdStats {
            description: self.description.clone(),
            repertoire: self.repertoire.stats(),
            blocks: self.blocks.len(),
            named_sequences: self.named_sequences.len(),
            provisional_named_sequences: self.provisional_named_sequences.len(),
            normalization_corrections: self.normalization_corrections.len(),
            standardized_variants: self.standardized_variants.len(),
            cjk_radicals: self.cjk_radicals.len(),
            emoji_sources: self.emoji_sources.len(),
        }
    }
}

/// Counters produced by [`Ucd::diff`].
#[derive(Debug, Clone)]
pub struct UcdDiff {
    pub repertoire: RepertoireDiff,
    pub blocks: DifferenceCounter,
    pub named_sequences: DifferenceCounter,
    pub provisional_named_sequences: DifferenceCounter,
    pub normalization_corrections: DifferenceCounter,
    pub standardized_variants: DifferenceCounter,
    pub cjk_radicals: DifferenceCounter,
    pub emoji_sources: DifferenceCounter,
}

impl UcdDiff {
    pub fn is_identical(&self) -> bool {
        self.repertoire.is_identical()
            && self.blocks.is_unchanged()
            && self.named_sequences.is_unchanged()
            && self.provisional_named_sequences.is_unchanged()
            && self.normalization_corrections.is_unchanged()
            && self.standardized_variants.is_unchanged()
            && self.cjk_radicals.is_unchanged()
            && self.emoji_sources.is_unchanged()
    }
}

#[derive(Debug, Clone)]
pub struct UcdStats {
    pub description: String,
    pub repertoire: RepertoireStats,
    pub blocks: usize,
    pub named_sequences: usize,
    pub provisional_named_sequences: usize,
    pub normalization_corrections: usize,
    pub standardized_variants: usize,
    pub cjk_radicals: usize,
    pub emoji_sources: usize,
}

impl fmt::Display for UcdStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Statistics for {}", self.description)?;
        writeln!(f, "{}", self.repertoire)?;
        writeln!(f, "{} blocks", self.blocks)?;
        writeln!(
            f,
            "{} named sequences, {} provisional",
            self.named_sequences, self.provisional_named_sequences
        )?;
        writeln!(f, "{} normalization corrections", self.normalization_corrections)?;
        writeln!(f, "{} standardized variants", self.standardized_variants)?;
        writeln!(f, "{} radical numbers", self.cjk_radicals)?;
        write!(f, "{} emoji sources", self.emoji_sources)
    }
}

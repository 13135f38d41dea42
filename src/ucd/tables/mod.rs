//! Catalogs kept alongside the repertoire.

pub mod blocks;
pub mod catalog;
pub mod cjk_radicals;
pub mod emoji_sources;
pub mod named_sequences;
pub mod normalization_corrections;
pub mod standardized_variants;

pub use blocks::{Block, Blocks};
pub use catalog::{Catalog, CatalogEntry};
pub use cjk_radicals::{CjkRadical, CjkRadicals, RadicalNumber};
pub use emoji_sources::{EmojiSource, EmojiSources};
pub use named_sequences::{NamedSequence, NamedSequences};
pub use normalization_corrections::{NormalizationCorrection, NormalizationCorrections};
pub use standardized_variants::{StandardizedVariant, StandardizedVariants};

//! Corrigenda to the decomposition mappings.

use std::fmt;

use super::catalog::{value_at, Catalog, CatalogEntry};
use crate::ucd::types::codepoint::{parse_codepoint, to_u};
use crate::ucd::types::error::Result;

/// A decomposition that changed after it was published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizationCorrection {
    pub cp: u32,
    pub old_decomposition: String,
    pub new_decomposition: String,
    /// Version in which the correction was made.
    pub version: String,
}

impl NormalizationCorrection {
    pub fn new(
        cp: u32,
        old_decomposition: impl Into<String>,
        new_decomposition: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        NormalizationCorrection {
            cp,
            old_decomposition: old_decomposition.into(),
            new_decomposition: new_decomposition.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for NormalizationCorrection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{nc {} o={} n={} v={}}}",
            to_u(self.cp),
            self.old_decomposition,
            self.new_decomposition,
            self.version
        )
    }
}

impl CatalogEntry for NormalizationCorrection {
    type Key = u32;

    const TITLE: &'static str = "normalization corrections";
    const LIST_ELEMENT: &'static str = "normalization-corrections";
    const ELEMENT: &'static str = "normalization-correction";
    const FIELDS: &'static [&'static str] = &["cp", "old", "new", "version"];

    fn key(&self) -> u32 {
        self.cp
    }

    fn values(&self) -> Vec<String> {
        vec![
            to_u(self.cp),
            self.old_decomposition.clone(),
            self.new_decomposition.clone(),
            self.version.clone(),
        ]
    }

    fn from_values(values: &[&str]) -> Result<Self> {
        Ok(NormalizationCorrection::new(
            parse_codepoint(value_at(values, 0))?,
            value_at(values, 1),
            value_at(values, 2),
            value_at(values, 3),
        ))
    }
}

pub type NormalizationCorrections = Catalog<NormalizationCorrection>;

//! Standardized and emoji variation sequences.

use std::fmt;

use super::catalog::{value_at, Catalog, CatalogEntry};
use crate::ucd::types::codepoint::{format_codepoints, parse_codepoints};
use crate::ucd::types::error::{Result, UcdError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardizedVariant {
    /// Base character followed by the variation selector.
    pub sequence: Vec<u32>,
    pub description: String,
    /// Shaping environments the variant applies to; empty when unconditional.
    pub condition: String,
}

impl StandardizedVariant {
    pub fn new(sequence: Vec<u32>, description: impl Into<String>, condition: impl Into<String>) -> Self {
        StandardizedVariant {
            sequence,
            description: description.into(),
            condition: condition.into(),
        }
    }

    pub fn cps(&self) -> String {
        format_codepoints(&self.sequence)
    }
}

impl fmt::Display for StandardizedVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{sv: {}, {}, {}}}", self.cps(), self.description, self.condition)
    }
}

impl CatalogEntry for StandardizedVariant {
    /// The same sequence may appear once per shaping condition.
    type Key = (Vec<u32>, String);

    const TITLE: &'static str = "standardized variants";
    const LIST_ELEMENT: &'static str = "standardized-variants";
    const ELEMENT: &'static str = "standardized-variant";
    const FIELDS: &'static [&'static str] = &["cps", "desc", "when"];

    fn key(&self) -> Self::Key {
        (self.sequence.clone(), self.condition.clone())
    }

    fn values(&self) -> Vec<String> {
        vec![self.cps(), self.description.clone(), self.condition.clone()]
    }

    fn from_values(values: &[&str]) -> Result<Self> {
        let sequence = parse_codepoints(value_at(values, 0))?;
        if sequence.is_empty() {
            return Err(UcdError::InvalidFormat("variation sequence without codepoints".to_string()));
        }
        Ok(StandardizedVariant::new(sequence, value_at(values, 1), value_at(values, 2)))
    }
}

pub type StandardizedVariants = Catalog<StandardizedVariant>;

//! Mapping of emoji to the Japanese carrier code points they came from.

use std::fmt;

use super::catalog::{value_at, Catalog, CatalogEntry};
use crate::ucd::types::codepoint::{format_codepoints, parse_codepoints};
use crate::ucd::types::error::{Result, UcdError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmojiSource {
    pub unicode: Vec<u32>,
    pub docomo: String,
    pub kddi: String,
    pub softbank: String,
}

impl EmojiSource {
    pub fn new(
        unicode: Vec<u32>,
        docomo: impl Into<String>,
        kddi: impl Into<String>,
        softbank: impl Into<String>,
    ) -> Self {
        EmojiSource {
            unicode,
            docomo: docomo.into(),
            kddi: kddi.into(),
            softbank: softbank.into(),
        }
    }

    pub fn cps(&self) -> String {
        format_codepoints(&self.unicode)
    }
}

impl fmt::Display for EmojiSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{es: {}, {}, {}, {}}}", self.cps(), self.docomo, self.kddi, self.softbank)
    }
}

impl CatalogEntry for EmojiSource {
    type Key = Vec<u32>;

    const TITLE: &'static str = "emoji sources";
    const LIST_ELEMENT: &'static str = "emoji-sources";
    const ELEMENT: &'static str = "emoji-source";
    const FIELDS: &'static [&'static str] = &["unicode", "docomo", "kddi", "softbank"];

    fn key(&self) -> Vec<u32> {
        self.unicode.clone()
    }

    fn values(&self) -> Vec<String> {
        vec![self.cps(), self.docomo.clone(), self.kddi.clone(), self.softbank.clone()]
    }

    fn from_values(values: &[&str]) -> Result<Self> {
        let unicode = parse_codepoints(value_at(values, 0))?;
        if unicode.is_empty() {
            return Err(UcdError::InvalidFormat("emoji source without codepoints".to_string()));
        }
        Ok(EmojiSource::new(
            unicode,
            value_at(values, 1),
            value_at(values, 2),
            value_at(values, 3),
        ))
    }
}

pub type EmojiSources = Catalog<EmojiSource>;

//! The CJK radical numbering.

use std::fmt;
use std::str::FromStr;

use super::catalog::{value_at, Catalog, CatalogEntry};
use crate::ucd::types::error::{Result, UcdError};

/// A Kangxi radical number; a trailing `'` marks the simplified form,
/// which sorts right after the traditional one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RadicalNumber {
    pub number: u32,
    pub simplified: bool,
}

impl FromStr for RadicalNumber {
    type Err = UcdError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (digits, simplified) = match s.strip_suffix('\'') {
            Some(digits) => (digits, true),
            None => (s, false),
        };
        let number = digits
            .parse()
            .map_err(|_| UcdError::InvalidFormat(format!("invalid radical number '{}'", s)))?;
        Ok(RadicalNumber { number, simplified })
    }
}

impl fmt::Display for RadicalNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number)?;
        if self.simplified {
            f.write_str("'")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CjkRadical {
    pub number: RadicalNumber,
    /// The radical character (a CJK Radicals Supplement or Kangxi codepoint).
    pub radical: String,
    /// The unified ideograph for the radical.
    pub ideograph: String,
}

impl CjkRadical {
    pub fn new(number: RadicalNumber, radical: impl Into<String>, ideograph: impl Into<String>) -> Self {
        CjkRadical {
            number,
            radical: radical.into(),
            ideograph: ideograph.into(),
        }
    }
}

impl fmt::Display for CjkRadical {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{rad: {}, {}, {}}}", self.number, self.radical, self.ideograph)
    }
}

impl CatalogEntry for CjkRadical {
    type Key = RadicalNumber;

    const TITLE: &'static str = "radical numbers";
    const LIST_ELEMENT: &'static str = "cjk-radicals";
    const ELEMENT: &'static str = "cjk-radical";
    const FIELDS: &'static [&'static str] = &["number", "radical", "ideograph"];

    fn key(&self) -> RadicalNumber {
        self.number
    }

    fn values(&self) -> Vec<String> {
        vec![self.number.to_string(), self.radical.clone(), self.ideograph.clone()]
    }

    fn from_values(values: &[&str]) -> Result<Self> {
        Ok(CjkRadical::new(
            value_at(values, 0).parse()?,
            value_at(values, 1),
            value_at(values, 2),
        ))
    }
}

pub type CjkRadicals = Catalog<CjkRadical>;

//! Codepoint constants, ranges and their textual forms.

use std::fmt;

use super::error::{Result, UcdError};

/// The largest Unicode scalar position.
pub const MAX_CODEPOINT: u32 = 0x10FFFF;

/// Number of slots in the codespace.
pub const CODESPACE_SIZE: usize = 0x110000;

/// Formats a codepoint as upper-case hex with at least four digits (`0041`, `1F600`).
pub fn to_u(cp: u32) -> String {
    format!("{:04X}", cp)
}

/// An inclusive codepoint interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CodepointRange {
    pub first: u32,
    pub last: u32,
}

impl CodepointRange {
    pub fn new(first: u32, last: u32) -> Result<Self> {
        if first > last || last > MAX_CODEPOINT {
            return Err(UcdError::InvalidRange(format!(
                "{}..{}",
                to_u(first),
                to_u(last)
            )));
        }
        Ok(CodepointRange { first, last })
    }

    pub fn single(cp: u32) -> Result<Self> {
        Self::new(cp, cp)
    }

    /// True for `0000..10FFFF`.
    pub fn is_whole_codespace(&self) -> bool {
        self.first == 0 && self.last == MAX_CODEPOINT
    }

    pub fn len(&self) -> u32 {
        self.last - self.first + 1
    }

    pub fn contains(&self, cp: u32) -> bool {
        self.first <= cp && cp <= self.last
    }
}

impl fmt::Display for CodepointRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.first == self.last {
            write!(f, "{}", to_u(self.first))
        } else {
            write!(f, "{}..{}", to_u(self.first), to_u(self.last))
        }
    }
}

/// Parses a single hex codepoint, tolerating surrounding whitespace.
pub fn parse_codepoint(text: &str) -> Result<u32> {
    let text = text.trim();
    let cp = u32::from_str_radix(text, 16)
        .map_err(|_| UcdError::InvalidRange(text.to_string()))?;
    if text.is_empty() || cp > MAX_CODEPOINT {
        return Err(UcdError::InvalidRange(text.to_string()));
    }
    Ok(cp)
}

/// Parses a space-separated list of hex codepoints (`"0041 030A"`).
pub fn parse_codepoints(text: &str) -> Result<Vec<u32>> {
    text.split_whitespace().map(parse_codepoint).collect()
}

/// Formats a codepoint sequence as space-separated hex.
pub fn format_codepoints(cps: &[u32]) -> String {
    cps.iter().map(|&cp| to_u(cp)).collect::<Vec<_>>().join(" ")
}

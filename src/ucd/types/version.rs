//! Unicode version numbers.

use std::fmt;
use std::str::FromStr;

use super::error::{Result, UcdError};

/// A `major.minor.dot` Unicode version.
///
/// Ordering is lexicographic over the three components, so `a >= b` reads as
/// "a is at least b".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnicodeVersion {
    pub major: u8,
    pub minor: u8,
    pub dot: u8,
}

impl UnicodeVersion {
    pub const V2_0_0: UnicodeVersion = UnicodeVersion::new(2, 0, 0);
    pub const V3_0_0: UnicodeVersion = UnicodeVersion::new(3, 0, 0);
    pub const V3_0_1: UnicodeVersion = UnicodeVersion::new(3, 0, 1);
    pub const V3_1_0: UnicodeVersion = UnicodeVersion::new(3, 1, 0);
    pub const V3_2_0: UnicodeVersion = UnicodeVersion::new(3, 2, 0);
    pub const V4_0_0: UnicodeVersion = UnicodeVersion::new(4, 0, 0);
    pub const V4_1_0: UnicodeVersion = UnicodeVersion::new(4, 1, 0);
    pub const V5_0_0: UnicodeVersion = UnicodeVersion::new(5, 0, 0);
    pub const V5_1_0: UnicodeVersion = UnicodeVersion::new(5, 1, 0);
    pub const V5_2_0: UnicodeVersion = UnicodeVersion::new(5, 2, 0);
    pub const V6_0_0: UnicodeVersion = UnicodeVersion::new(6, 0, 0);
    pub const V6_1_0: UnicodeVersion = UnicodeVersion::new(6, 1, 0);
    pub const V8_0_0: UnicodeVersion = UnicodeVersion::new(8, 0, 0);
    pub const V10_0_0: UnicodeVersion = UnicodeVersion::new(10, 0, 0);
    pub const V13_0_0: UnicodeVersion = UnicodeVersion::new(13, 0, 0);

    pub const fn new(major: u8, minor: u8, dot: u8) -> Self {
        UnicodeVersion { major, minor, dot }
    }

    pub fn is_at_least(&self, other: UnicodeVersion) -> bool {
        *self >= other
    }
}

impl FromStr for UnicodeVersion {
    type Err = UcdError;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.trim().split('.').collect();
        if parts.is_empty() || parts.len() > 3 {
            return Err(UcdError::InvalidVersion(s.to_string()));
        }
        let mut numbers = [0u8; 3];
        for (slot, part) in numbers.iter_mut().zip(parts.iter()) {
            *slot = part
                .parse::<u8>()
                .map_err(|_| UcdError::InvalidVersion(s.to_string()))?;
        }
        Ok(UnicodeVersion::new(numbers[0], numbers[1], numbers[2]))
    }
}

impl fmt::Display for UnicodeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.dot)
    }
}

//! Named character sequences.

use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;

use crate::ucd::diff::{diff_keyed, Detail, DifferenceCounter};
use crate::ucd::types::codepoint::format_codepoints;
use crate::ucd::types::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedSequence {
    pub name: String,
    pub sequence: Vec<u32>,
}

impl NamedSequence {
    pub fn new(name: impl Into<String>, sequence: Vec<u32>) -> Self {
        NamedSequence {
            name: name.into(),
            sequence,
        }
    }

    /// The sequence as space-separated hex, as written in data files.
    pub fn cps(&self) -> String {
        format_codepoints(&self.sequence)
    }
}

impl fmt::Display for NamedSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ns: {}, {}}}", self.name, self.cps())
    }
}

/// Named sequences keyed by name; either the approved or the provisional list.
#[derive(Debug, Clone, Default)]
pub struct NamedSequences {
    provisional: bool,
    sequences: BTreeMap<String, NamedSequence>,
}

impl NamedSequences {
    pub fn new(provisional: bool) -> Self {
        NamedSequences {
            provisional,
            sequences: BTreeMap::new(),
        }
    }

    pub fn is_provisional(&self) -> bool {
        self.provisional
    }

    pub fn add(&mut self, sequence: NamedSequence) {
        self.sequences.insert(sequence.name.clone(), sequence);
    }

    pub fn get(&self, name: &str) -> Option<&NamedSequence> {
        self.sequences.get(name)
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NamedSequence> {
        self.sequences.values()
    }

    pub fn diff<W: Write>(
        &self,
        older: &NamedSequences,
        detail: Detail,
        out: &mut W,
    ) -> Result<DifferenceCounter> {
        let title = if self.provisional {
            "provisional named sequences"
        } else {
            "named sequences"
        };
        diff_keyed(
            title,
            &older.sequences,
            &self.sequences,
            |a, b| a.sequence == b.sequence,
            detail,
            out,
        )
    }
}

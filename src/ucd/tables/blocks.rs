//! The block catalog.

use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;

use crate::ucd::diff::{diff_keyed, Detail, DifferenceCounter};
use crate::ucd::types::codepoint::to_u;
use crate::ucd::types::error::Result;

/// A named, contiguous codepoint range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub first: u32,
    pub last: u32,
    pub name: String,
}

impl Block {
    pub fn new(first: u32, last: u32, name: impl Into<String>) -> Self {
        Block {
            first,
            last,
            name: name.into(),
        }
    }

    pub fn same_bounds(&self, other: &Block) -> bool {
        self.first == other.first && self.last == other.last
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{block: {}, {}..{}}}", self.name, to_u(self.first), to_u(self.last))
    }
}

/// Blocks keyed by name.
#[derive(Debug, Clone, Default)]
pub struct Blocks {
    by_name: BTreeMap<String, Block>,
}

impl Blocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a block, replacing any block with the same name.
    pub fn add(&mut self, block: Block) {
        self.by_name.insert(block.name.clone(), block);
    }

    pub fn get(&self, name: &str) -> Option<&Block> {
        self.by_name.get(name)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Blocks in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Block> {
        self.by_name.values()
    }

    /// Blocks in codepoint order.
    pub fn by_range(&self) -> Vec<&Block> {
        let mut blocks: Vec<&Block> = self.by_name.values().collect();
        blocks.sort_by_key(|block| (block.first, block.last));
        blocks
    }

    /// Reports blocks added, removed, or whose bounds moved since `older`.
    pub fn diff<W: Write>(&self, older: &Blocks, detail: Detail, out: &mut W) -> Result<DifferenceCounter> {
        diff_keyed(
            "blocks",
            &older.by_name,
            &self.by_name,
            Block::same_bounds,
            detail,
            out,
        )
    }
}

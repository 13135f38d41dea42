//! Tallies for one comparison run.

use std::fmt;

/// Classification of one compared item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Added,
    Removed,
    Changed,
    Unchanged,
}

/// Running counts of a comparison.
///
/// `old_count` and `new_count` are the sizes of the two sides restricted to
/// compared items, so `old_count + added - removed == new_count` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DifferenceCounter {
    pub old_count: usize,
    pub new_count: usize,
    pub added: usize,
    pub removed: usize,
    pub changed: usize,
    pub unchanged: usize,
    pub ignored: usize,
    pub undefined: usize,
}

impl DifferenceCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `count` items with the same classification.
    pub fn record(&mut self, change: Change, count: usize) {
        match change {
            Change::Added => {
                self.new_count += count;
                self.added += count;
            }
            Change::Removed => {
                self.old_count += count;
                self.removed += count;
            }
            Change::Changed => {
                self.old_count += count;
                self.new_count += count;
                self.changed += count;
            }
            Change::Unchanged => {
                self.old_count += count;
                self.new_count += count;
                self.unchanged += count;
            }
        }
    }

    /// Items excluded from the comparison.
    pub fn ignore(&mut self, count: usize) {
        self.ignored += count;
    }

    /// Items absent on both sides.
    pub fn undefined(&mut self, count: usize) {
        self.undefined += count;
    }

    /// True when nothing was added, removed or changed.
    pub fn is_unchanged(&self) -> bool {
        self.added == 0 && self.removed == 0 && self.changed == 0
    }
}

impl fmt::Display for DifferenceCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} + {} - {} # {} = {} ({} ignored, {} undefined)",
            self.old_count,
            self.added,
            self.removed,
            self.changed,
            self.new_count,
            self.ignored,
            self.undefined
        )
    }
}

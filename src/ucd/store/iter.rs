//! Ordered traversal of the groups of a [`Repertoire`].

use super::group::Group;
use super::repertoire::Repertoire;
use crate::ucd::types::codepoint::MAX_CODEPOINT;

/// Iterator over the groups overlapping `[cp, last]`, in increasing order.
///
/// Groups are yielded whole: the first and last ones may extend beyond the
/// requested range. Created by [`Repertoire::iter`] and
/// [`Repertoire::on_subset`].
pub struct GroupIter<'a> {
    repertoire: &'a Repertoire,
    cp: u32,
    last: u32,
}

impl<'a> GroupIter<'a> {
    pub(super) fn new(repertoire: &'a Repertoire, first: u32, last: u32) -> Self {
        GroupIter {
            repertoire,
            cp: first,
            last: last.min(MAX_CODEPOINT),
        }
    }
}

impl<'a> Iterator for GroupIter<'a> {
    type Item = &'a Group;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cp > self.last {
            return None;
        }
        let group = self.repertoire.group_at(self.cp);
        self.cp = group.last() + 1;
        Some(group)
    }
}

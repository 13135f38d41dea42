//! Version-to-version comparison of catalogs and repertoires.

pub mod counter;
pub mod keyed;
pub mod repertoire;

pub use counter::{Change, DifferenceCounter};
pub use keyed::{diff_keyed, Detail, KeyedChange, KeyedDiff};
pub use repertoire::{diff_repertoires, RepertoireDiff};

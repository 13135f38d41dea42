//! Interval-compressed storage of per-codepoint properties.

pub mod group;
pub mod iter;
pub mod repertoire;

pub use group::{Conflict, Group};
pub use iter::GroupIter;
pub use repertoire::{Repertoire, RepertoireStats};

//! Foundational data structures, error types, and property identifiers.

pub mod codepoint;
pub mod error;
pub mod property;
pub mod value;
pub mod version;

//! # ucdxml
//!
//! An interval-compressed store for the properties of the Unicode Character
//! Database. Loads the UCD text files of one Unicode version, writes and
//! reads the UCD XML form, and reports the differences between versions.
//!
//! **Note:** property names are resolved through a [`Registry`] owned by the
//! caller; databases that are compared must share one.
pub mod ucd;

// Re-export the main types for convenience
pub use ucd::{
    Ucd,
    UcdDiff,
    UcdStats,
    diff::{Detail, DifferenceCounter},
    format::XmlOptions,
    ingest::UcdFile,
    store::{Group, Repertoire},
    types::{
        error::{Result, UcdError},
        property::{keys, PropertyKey, Registry},
        value::{NameAlias, PropertyValue},
        version::UnicodeVersion,
    },
};

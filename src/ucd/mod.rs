//! Core UCD module

pub mod database;
pub mod diff;
pub mod format;
pub mod ingest;
pub mod store;
pub mod tables;
pub mod types;

pub use database::{Ucd, UcdDiff, UcdStats};

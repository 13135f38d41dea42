//! Custom error types for the ucdxml crate.

use std::path::PathBuf;
use thiserror::Error;

/// The primary error type for all operations in this crate.
///
/// Only structural failures surface here. Data-quality problems in the
/// source files (conflicting values, unknown tokens, malformed lines) are
/// logged and skipped instead.
#[derive(Debug, Error)]
pub enum UcdError {
    /// An error originating from I/O operations.
    #[error("I/O error: {0:?}")]
    Io(#[from] std::io::Error),

    /// A named resource (a UCD source file, an XML snapshot) could not be opened.
    #[error("Cannot access {}: {source}", .path.display())]
    Resource {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A codepoint or codepoint range could not be parsed or lies outside the codespace.
    #[error("Invalid code point range: {0}")]
    InvalidRange(String),

    /// A Unicode version string is not of the form `major.minor.dot`.
    #[error("Invalid Unicode version: {0}")]
    InvalidVersion(String),

    /// The input does not conform to the expected structure.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// The XML reader or writer failed.
    #[error("XML error: {0}")]
    Xml(String),
}

impl UcdError {
    /// Wraps an I/O error with the path of the resource being accessed.
    pub fn resource(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        UcdError::Resource {
            path: path.into(),
            source,
        }
    }
}

/// A convenience `Result` type alias using the crate's `UcdError` type.
pub type Result<T> = std::result::Result<T, UcdError>;

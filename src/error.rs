//! Error types for unocr library.

use std::io;
use thiserror::Error;

/// Result type alias for unocr operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur around structure analysis.
///
/// The detectors themselves are total and never fail; errors come from
/// configuration, serialization and the recognition collaborator.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing serialized documents.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization or deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A configured marker or link pattern failed to compile.
    #[error("Invalid pattern '{name}': {source}")]
    InvalidPattern {
        /// Name of the pattern as configured
        name: String,
        /// Underlying regex error
        #[source]
        source: regex::Error,
    },

    /// A numeric or structural configuration value is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The text-recognition collaborator failed on a page.
    #[error("Recognition error: {0}")]
    Recognition(String),

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),
}

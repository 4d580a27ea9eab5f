//! Error types for pagemd.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pagemd operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while extracting or rendering a document.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error while reading a source.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The source path does not resolve to a readable file.
    #[error("Source not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// The source is neither a PDF nor a page-primitives JSON document.
    #[error("Unknown file format: not a PDF or page-primitives document")]
    UnknownFormat,

    /// The PDF header names a version we cannot read.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// The PDF document is encrypted.
    #[error("Document is encrypted")]
    Encrypted,

    /// The page-primitive extractor could not decode the document.
    #[error("Extraction failed: {0}")]
    Extraction(String),

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// Invalid page range specification.
    #[error("Invalid page range: {0}")]
    InvalidPageRange(String),

    /// Error while serializing output.
    #[error("Rendering error: {0}")]
    Render(String),

    /// The destination could not be written.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        /// Destination path
        path: PathBuf,
        /// Underlying cause
        #[source]
        source: io::Error,
    },
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::Extraction(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Extraction(format!("invalid page primitives: {}", err))
    }
}

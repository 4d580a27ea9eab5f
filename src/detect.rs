//! Source format detection and validation.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// PDF format information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfFormat {
    /// PDF version (e.g., "1.7", "2.0")
    pub version: String,
}

impl std::fmt::Display for PdfFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PDF {}", self.version)
    }
}

/// Kind of page-primitive source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceFormat {
    /// A PDF document
    Pdf(PdfFormat),
    /// A JSON array of page primitives
    Json,
}

impl std::fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceFormat::Pdf(pdf) => pdf.fmt(f),
            SourceFormat::Json => f.write_str("page primitives (JSON)"),
        }
    }
}

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
const PDF_MAGIC_LEN: usize = 5;
const VERSION_LEN: usize = 3; // e.g., "1.7"
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Bytes read from the start of a file for sniffing.
const HEADER_LEN: u64 = 64;

/// Detect the source format from a file path.
///
/// A missing path is reported as [`Error::SourceNotFound`].
///
/// # Example
/// ```no_run
/// use pagemd::detect::{detect_format_from_path, SourceFormat};
///
/// match detect_format_from_path("document.pdf").unwrap() {
///     SourceFormat::Pdf(pdf) => println!("PDF version: {}", pdf.version),
///     SourceFormat::Json => println!("page primitives"),
/// }
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<SourceFormat> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(Error::SourceNotFound(path.to_path_buf()));
    }

    let file = File::open(path)?;
    let mut header = Vec::new();
    BufReader::new(file).take(HEADER_LEN).read_to_end(&mut header)?;
    detect_format_from_bytes(&header)
}

/// Detect the source format from the first bytes of a source.
///
/// `%PDF-x.y` is a PDF; a document whose first non-blank character opens a
/// JSON array is page primitives. Anything else is [`Error::UnknownFormat`].
pub fn detect_format_from_bytes(data: &[u8]) -> Result<SourceFormat> {
    if data.starts_with(PDF_MAGIC) {
        return detect_pdf_header(data).map(SourceFormat::Pdf);
    }

    let body = data.strip_prefix(UTF8_BOM).unwrap_or(data);
    match body.iter().copied().find(|b| !b.is_ascii_whitespace()) {
        Some(b'[') => Ok(SourceFormat::Json),
        _ => Err(Error::UnknownFormat),
    }
}

/// Validate a PDF header and read its version.
fn detect_pdf_header(data: &[u8]) -> Result<PdfFormat> {
    if data.len() < PDF_MAGIC_LEN + VERSION_LEN {
        return Err(Error::UnknownFormat);
    }

    // Extract version string (e.g., "1.7" from "%PDF-1.7")
    let version_bytes = &data[PDF_MAGIC_LEN..PDF_MAGIC_LEN + VERSION_LEN];
    let version = String::from_utf8_lossy(version_bytes).to_string();

    if !is_valid_version(&version) {
        return Err(Error::UnsupportedVersion(version));
    }

    Ok(PdfFormat { version })
}

/// Check if a version string is valid.
fn is_valid_version(version: &str) -> bool {
    matches!(
        version.as_bytes(),
        [major, b'.', minor] if major.is_ascii_digit() && minor.is_ascii_digit()
    )
}

/// Check if a file is a valid PDF.
pub fn is_pdf<P: AsRef<Path>>(path: P) -> bool {
    matches!(detect_format_from_path(path), Ok(SourceFormat::Pdf(_)))
}

/// Check if bytes represent a valid PDF.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    matches!(detect_format_from_bytes(data), Ok(SourceFormat::Pdf(_)))
}

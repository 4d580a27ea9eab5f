//! JSON export of extracted page primitives.

use crate::error::{Error, Result};
use crate::model::Document;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize a document's page primitives as a JSON array of pages.
///
/// The output can be read back as a primitives source.
pub fn to_json(doc: &Document, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(&doc.pages),
        JsonFormat::Compact => serde_json::to_string(&doc.pages),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

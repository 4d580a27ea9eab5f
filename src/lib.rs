//! # pagemd
//!
//! Markdown reconstruction from PDF page primitives.
//!
//! Each page is reduced to positioned words and table regions. Words inside
//! a table are dropped from the free text, the rest are grouped into lines
//! by vertical position, and lines and tables are merged into one
//! top-to-bottom reading order. Consecutive lines become paragraphs joined
//! with soft line breaks; tables render as Markdown pipe tables; pages are
//! separated by a horizontal rule.
//!
//! ## Quick Start
//!
//! ```no_run
//! fn main() -> pagemd::Result<()> {
//!     let markdown = pagemd::to_markdown("document.pdf")?;
//!     println!("{}", markdown);
//!     Ok(())
//! }
//! ```
//!
//! Primitives from another extractor can be rendered directly:
//!
//! ```
//! use pagemd::{Document, PagePrimitives, Word};
//!
//! let doc = Document::from_pages(vec![
//!     PagePrimitives::letter(1).with_word(Word::new("Hello", 0.0, 0.0)),
//! ]);
//! assert_eq!(pagemd::render_document(&doc).unwrap(), "Hello  \n");
//! ```

pub mod detect;
pub mod error;
pub mod extract;
pub mod layout;
pub mod model;
pub mod render;

// Re-export commonly used types
pub use detect::{detect_format_from_bytes, detect_format_from_path, PdfFormat, SourceFormat};
pub use error::{Error, Result};
pub use extract::{
    extract_document, open_source, source_from_bytes, ErrorMode, ExtractOptions, JsonSource,
    PageSource, PdfSource, TableDetectorConfig,
};
pub use layout::{Element, LayoutOptions, LineGrouping};
pub use model::{BBox, Cell, Document, Grid, PagePrimitives, TableRegion, Word};
pub use render::{JsonFormat, PageSelection, RenderOptions, RenderResult, RenderStats};

use std::fs;
use std::path::Path;

/// Extract the page primitives of a PDF or JSON source.
///
/// # Example
///
/// ```no_run
/// let doc = pagemd::parse_file("document.pdf").unwrap();
/// println!("Pages: {}", doc.page_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    parse_file_with_options(path, &ExtractOptions::default())
}

/// Extract page primitives with custom options.
///
/// # Example
///
/// ```no_run
/// use pagemd::{parse_file_with_options, ExtractOptions};
///
/// let options = ExtractOptions::new().lenient().text_only();
/// let doc = parse_file_with_options("document.pdf", &options).unwrap();
/// ```
pub fn parse_file_with_options<P: AsRef<Path>>(
    path: P,
    options: &ExtractOptions,
) -> Result<Document> {
    let source = open_source(path, options)?;
    extract_document(&source, options)
}

/// Extract page primitives from an in-memory PDF or JSON source.
pub fn parse_bytes(data: &[u8]) -> Result<Document> {
    let options = ExtractOptions::default();
    let source = source_from_bytes(data, &options)?;
    extract_document(&source, &options)
}

/// Render already-extracted primitives to Markdown with default options.
pub fn render_document(doc: &Document) -> Result<String> {
    render::to_markdown(doc, &LayoutOptions::default(), &RenderOptions::default())
}

/// Convert a source file to Markdown.
///
/// # Example
///
/// ```no_run
/// let markdown = pagemd::to_markdown("document.pdf").unwrap();
/// std::fs::write("output.md", markdown).unwrap();
/// ```
pub fn to_markdown<P: AsRef<Path>>(path: P) -> Result<String> {
    let doc = parse_file(path)?;
    render_document(&doc)
}

/// Convert a source file to a JSON dump of its page primitives.
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let doc = parse_file(path)?;
    render::to_json(&doc, format)
}

/// Write Markdown to a destination as UTF-8 without a byte-order mark.
pub fn write_markdown<P: AsRef<Path>>(dest: P, markdown: &str) -> Result<()> {
    let dest = dest.as_ref();
    fs::write(dest, markdown.as_bytes()).map_err(|source| Error::Write {
        path: dest.to_path_buf(),
        source,
    })
}

/// Builder for extracting and converting documents.
///
/// # Example
///
/// ```no_run
/// use pagemd::{PageMd, PageSelection};
///
/// let markdown = PageMd::new()
///     .with_pages(PageSelection::Range(1..=3))
///     .with_line_precision(0)
///     .lenient()
///     .parse("document.pdf")?
///     .to_markdown()?;
/// # Ok::<(), pagemd::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct PageMd {
    extract_options: ExtractOptions,
    layout_options: LayoutOptions,
    render_options: RenderOptions,
}

impl PageMd {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep failing pages as empty pages instead of aborting.
    pub fn lenient(mut self) -> Self {
        self.extract_options = self.extract_options.lenient();
        self
    }

    /// Skip table detection; every word becomes free text.
    pub fn text_only(mut self) -> Self {
        self.extract_options = self.extract_options.text_only();
        self
    }

    /// Set the table detector configuration.
    pub fn with_table_detector(mut self, config: TableDetectorConfig) -> Self {
        self.extract_options = self.extract_options.with_table_detector(config);
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.extract_options = self.extract_options.with_pages(pages);
        self
    }

    /// Decimal places used when grouping words into lines.
    pub fn with_line_precision(mut self, precision: u32) -> Self {
        self.layout_options = self.layout_options.with_line_precision(precision);
        self
    }

    /// Render pages on the calling thread.
    pub fn sequential(mut self) -> Self {
        self.render_options = self.render_options.sequential();
        self
    }

    /// Enable or disable the horizontal rule between pages.
    pub fn with_page_separator(mut self, separate: bool) -> Self {
        self.render_options = self.render_options.with_page_separator(separate);
        self
    }

    /// Extract a source file and return a result wrapper.
    pub fn parse<P: AsRef<Path>>(self, path: P) -> Result<PageMdResult> {
        let document = parse_file_with_options(path, &self.extract_options)?;
        Ok(self.into_result(document))
    }

    /// Extract an in-memory source.
    pub fn parse_bytes(self, data: &[u8]) -> Result<PageMdResult> {
        let source = source_from_bytes(data, &self.extract_options)?;
        let document = extract_document(&source, &self.extract_options)?;
        Ok(self.into_result(document))
    }

    /// Wrap primitives that are already in memory.
    pub fn from_document(self, document: Document) -> PageMdResult {
        self.into_result(document)
    }

    fn into_result(self, document: Document) -> PageMdResult {
        PageMdResult {
            document,
            layout_options: self.layout_options,
            render_options: self.render_options,
        }
    }
}

/// Extracted document plus the options to render it with.
#[derive(Debug, Clone)]
pub struct PageMdResult {
    /// The extracted page primitives
    pub document: Document,
    layout_options: LayoutOptions,
    render_options: RenderOptions,
}

impl PageMdResult {
    /// Convert to Markdown.
    pub fn to_markdown(&self) -> Result<String> {
        render::to_markdown(&self.document, &self.layout_options, &self.render_options)
    }

    /// Convert to Markdown with statistics.
    pub fn to_markdown_with_stats(&self) -> Result<RenderResult> {
        render::to_markdown_with_stats(&self.document, &self.layout_options, &self.render_options)
    }

    /// Dump the page primitives as JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }
}

//! Page-primitive extraction.
//!
//! A [`PageSource`] yields, per page, the words and table regions that
//! layout reconstruction works from. [`PdfSource`] decodes PDF documents;
//! [`JsonSource`] reads primitives produced elsewhere.

mod content;
mod json;
mod options;
mod pdf;
mod table_detector;

pub use json::JsonSource;
pub use options::{ErrorMode, ExtractOptions};
pub use pdf::PdfSource;
pub use table_detector::{TableDetector, TableDetectorConfig};

use std::path::Path;

use crate::detect::{detect_format_from_bytes, detect_format_from_path, SourceFormat};
use crate::error::Result;
use crate::model::{Document, PagePrimitives};

/// A provider of per-page primitives.
pub trait PageSource {
    /// Number of pages in the source.
    fn page_count(&self) -> u32;

    /// Extract the primitives of one page (1-indexed).
    fn extract_page(&self, number: u32) -> Result<PagePrimitives>;
}

impl<S: PageSource + ?Sized> PageSource for Box<S> {
    fn page_count(&self) -> u32 {
        (**self).page_count()
    }

    fn extract_page(&self, number: u32) -> Result<PagePrimitives> {
        (**self).extract_page(number)
    }
}

/// Open a source file, choosing the extractor from its header.
pub fn open_source<P: AsRef<Path>>(
    path: P,
    options: &ExtractOptions,
) -> Result<Box<dyn PageSource>> {
    let path = path.as_ref();
    match detect_format_from_path(path)? {
        SourceFormat::Pdf(_) => Ok(Box::new(PdfSource::open(path, options)?)),
        SourceFormat::Json => Ok(Box::new(JsonSource::open(path)?)),
    }
}

/// Open an in-memory source, choosing the extractor from its header.
pub fn source_from_bytes(data: &[u8], options: &ExtractOptions) -> Result<Box<dyn PageSource>> {
    match detect_format_from_bytes(data)? {
        SourceFormat::Pdf(_) => Ok(Box::new(PdfSource::from_bytes(data, options)?)),
        SourceFormat::Json => Ok(Box::new(JsonSource::from_bytes(data)?)),
    }
}

/// Extract the selected pages of a source, in page order.
///
/// In [`ErrorMode::Strict`] the first failing page aborts extraction. In
/// [`ErrorMode::Lenient`] a failing page is logged and kept as an empty page
/// so page numbering and separators stay intact.
pub fn extract_document<S: PageSource + ?Sized>(
    source: &S,
    options: &ExtractOptions,
) -> Result<Document> {
    let total = source.page_count();
    let mut document = Document::new();
    let mut skipped = 0;

    for number in (1..=total).filter(|n| options.pages.includes(*n)) {
        match source.extract_page(number) {
            Ok(page) => document.add_page(page),
            Err(e) if options.error_mode == ErrorMode::Lenient => {
                log::warn!("skipping page {}: {}", number, e);
                skipped += 1;
                document.add_page(PagePrimitives::new(number, 0.0, 0.0));
            }
            Err(e) => return Err(e),
        }
    }

    log::info!(
        "extracted {} of {} pages ({} skipped)",
        document.page_count(),
        total,
        skipped
    );
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::model::Word;
    use crate::render::PageSelection;

    /// Source whose even pages fail.
    struct FlakySource(u32);

    impl PageSource for FlakySource {
        fn page_count(&self) -> u32 {
            self.0
        }

        fn extract_page(&self, number: u32) -> Result<PagePrimitives> {
            if number % 2 == 0 {
                return Err(Error::Extraction(format!("page {} is broken", number)));
            }
            Ok(PagePrimitives::letter(number).with_word(Word::new("ok", 0.0, 0.0)))
        }
    }

    #[test]
    fn test_strict_mode_aborts() {
        let result = extract_document(&FlakySource(3), &ExtractOptions::default());
        assert!(matches!(result, Err(Error::Extraction(_))));
    }

    #[test]
    fn test_lenient_mode_keeps_empty_page() {
        let doc = extract_document(&FlakySource(3), &ExtractOptions::new().lenient()).unwrap();
        assert_eq!(doc.page_count(), 3);
        assert!(doc.pages[1].is_empty());
        assert_eq!(doc.pages[1].number, 2);
        assert!(!doc.pages[2].is_empty());
    }

    #[test]
    fn test_page_selection() {
        let options = ExtractOptions::new().with_pages(PageSelection::Pages(vec![1, 3, 9]));
        let doc = extract_document(&FlakySource(5), &options).unwrap();
        let numbers: Vec<u32> = doc.pages.iter().map(|p| p.number).collect();
        assert_eq!(numbers, vec![1, 3]);
    }

    #[test]
    fn test_boxed_source() {
        let source: Box<dyn PageSource> = Box::new(JsonSource::from_pages(vec![
            PagePrimitives::letter(1),
            PagePrimitives::letter(2),
        ]));
        let doc = extract_document(&source, &ExtractOptions::default()).unwrap();
        assert_eq!(doc.page_count(), 2);
    }

    #[test]
    fn test_source_from_bytes_rejects_unknown() {
        let result = source_from_bytes(b"plain text", &ExtractOptions::default());
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }
}

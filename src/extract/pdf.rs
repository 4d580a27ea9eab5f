//! PDF page-primitive source using lopdf.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use lopdf::{Document as LopdfDocument, Object, ObjectId};

use crate::detect::{detect_format_from_bytes, detect_format_from_path, SourceFormat};
use crate::error::{Error, Result};
use crate::model::PagePrimitives;

use super::content::{decode_text_simple, ContentInterpreter, PlacedRun};
use super::{ExtractOptions, PageSource, TableDetector};

/// US Letter, used when a page has no usable MediaBox.
const LETTER_MEDIA_BOX: [f64; 4] = [0.0, 0.0, 612.0, 792.0];

/// Bound on `Parent` hops when resolving inherited page attributes.
const MAX_INHERITANCE_DEPTH: usize = 32;

/// Page primitives decoded from a PDF document.
pub struct PdfSource {
    doc: LopdfDocument,
    pages: BTreeMap<u32, ObjectId>,
    detector: Option<TableDetector>,
}

impl PdfSource {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P, options: &ExtractOptions) -> Result<Self> {
        let path = path.as_ref();

        match detect_format_from_path(path)? {
            SourceFormat::Pdf(format) => log::debug!("opening {} ({})", path.display(), format),
            SourceFormat::Json => return Err(Error::UnknownFormat),
        }

        let doc = LopdfDocument::load(path)?;
        Self::from_document(doc, options)
    }

    /// Load a PDF from bytes.
    pub fn from_bytes(data: &[u8], options: &ExtractOptions) -> Result<Self> {
        match detect_format_from_bytes(data)? {
            SourceFormat::Pdf(_) => {}
            SourceFormat::Json => return Err(Error::UnknownFormat),
        }

        let doc = LopdfDocument::load_mem(data)?;
        Self::from_document(doc, options)
    }

    fn from_document(doc: LopdfDocument, options: &ExtractOptions) -> Result<Self> {
        if doc.is_encrypted() {
            return Err(Error::Encrypted);
        }

        let pages = doc.get_pages();
        let detector = options
            .detect_tables
            .then(|| TableDetector::with_config(options.table_detector.clone()));

        Ok(Self {
            doc,
            pages,
            detector,
        })
    }

    /// PDF version from the document header.
    pub fn version(&self) -> &str {
        &self.doc.version
    }

    /// Positioned text runs of one page, in page space.
    fn page_runs(&self, page_id: ObjectId, media_box: [f64; 4]) -> Result<Vec<PlacedRun>> {
        let fonts = self.doc.get_page_fonts(page_id)?;
        let encodings: HashMap<&[u8], _> = fonts
            .iter()
            .filter_map(|(name, font)| {
                font.get_font_encoding(&self.doc)
                    .ok()
                    .map(|enc| (name.as_slice(), enc))
            })
            .collect();

        let content = self.doc.get_page_content(page_id)?;
        let operations = lopdf::content::Content::decode(&content)?.operations;

        let decode = |font: &[u8], bytes: &[u8]| -> String {
            encodings
                .get(font)
                .and_then(|enc| LopdfDocument::decode_text(enc, bytes).ok())
                .unwrap_or_else(|| decode_text_simple(bytes))
        };
        let runs = ContentInterpreter::new(decode).run(&operations);

        let [left, _, _, upper] = media_box;
        Ok(runs.iter().map(|run| run.place(left, upper)).collect())
    }

    /// MediaBox of a page, following `Parent` links for inherited values.
    fn media_box(&self, page_id: ObjectId) -> [f64; 4] {
        let mut current = self.doc.get_dictionary(page_id).ok();
        for _ in 0..MAX_INHERITANCE_DEPTH {
            let Some(dict) = current else {
                break;
            };
            if let Some(media_box) = dict.get(b"MediaBox").ok().and_then(|obj| self.as_rect(obj)) {
                return media_box;
            }
            current = dict
                .get(b"Parent")
                .and_then(Object::as_reference)
                .and_then(|id| self.doc.get_dictionary(id))
                .ok();
        }
        LETTER_MEDIA_BOX
    }

    fn as_rect(&self, obj: &Object) -> Option<[f64; 4]> {
        let obj = match obj {
            Object::Reference(id) => self.doc.get_object(*id).ok()?,
            other => other,
        };
        let array = obj.as_array().ok()?;
        if array.len() != 4 {
            return None;
        }

        let mut rect = [0.0; 4];
        for (slot, value) in rect.iter_mut().zip(array) {
            *slot = f64::from(value.as_float().ok()?);
        }
        // Normalize so the upper-right corner comes last
        Some([
            rect[0].min(rect[2]),
            rect[1].min(rect[3]),
            rect[0].max(rect[2]),
            rect[1].max(rect[3]),
        ])
    }
}

impl PageSource for PdfSource {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn extract_page(&self, number: u32) -> Result<PagePrimitives> {
        let page_id = *self
            .pages
            .get(&number)
            .ok_or(Error::PageOutOfRange(number, self.page_count()))?;

        let media_box = self.media_box(page_id);
        let [x0, y0, x1, y1] = media_box;
        let mut page = PagePrimitives::new(number, x1 - x0, y1 - y0);

        let runs = self.page_runs(page_id, media_box)?;
        for run in &runs {
            page.words.extend(run.words());
        }
        if let Some(detector) = &self.detector {
            page.tables = detector.detect(&runs);
        }

        log::debug!(
            "page {}: {} runs, {} words, {} tables",
            number,
            runs.len(),
            page.words.len(),
            page.tables.len()
        );
        Ok(page)
    }
}

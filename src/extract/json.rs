//! Page primitives read from JSON.
//!
//! The input is a JSON array of pages as produced by
//! [`to_json`](crate::render::to_json), or by any external extractor that
//! writes the same shape.

use std::fs;
use std::path::Path;

use crate::detect::{detect_format_from_bytes, SourceFormat};
use crate::error::{Error, Result};
use crate::model::PagePrimitives;

use super::PageSource;

/// Page primitives loaded from a JSON document.
#[derive(Debug, Clone)]
pub struct JsonSource {
    pages: Vec<PagePrimitives>,
}

impl JsonSource {
    /// Read a JSON file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::SourceNotFound(path.to_path_buf()));
        }
        Self::from_bytes(&fs::read(path)?)
    }

    /// Parse JSON bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        match detect_format_from_bytes(data)? {
            SourceFormat::Json => {}
            SourceFormat::Pdf(_) => return Err(Error::UnknownFormat),
        }

        let data = data.strip_prefix(b"\xEF\xBB\xBF".as_slice()).unwrap_or(data);
        let pages: Vec<PagePrimitives> = serde_json::from_slice(data)?;
        Ok(Self::from_pages(pages))
    }

    /// Wrap pages already in memory.
    ///
    /// Pages are served in the given order and renumbered from 1.
    pub fn from_pages(mut pages: Vec<PagePrimitives>) -> Self {
        for (i, page) in pages.iter_mut().enumerate() {
            page.number = i as u32 + 1;
        }
        Self { pages }
    }
}

impl PageSource for JsonSource {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn extract_page(&self, number: u32) -> Result<PagePrimitives> {
        number
            .checked_sub(1)
            .and_then(|index| self.pages.get(index as usize))
            .cloned()
            .ok_or(Error::PageOutOfRange(number, self.page_count()))
    }
}

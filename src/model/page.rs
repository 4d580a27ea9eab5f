//! Page-level types.

use super::{TableRegion, Word};
use serde::{Deserialize, Serialize};

/// The primitives an extractor yields for one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagePrimitives {
    /// Page number (1-indexed)
    pub number: u32,

    /// Page width in points
    #[serde(default)]
    pub width: f64,

    /// Page height in points
    #[serde(default)]
    pub height: f64,

    /// Words on the page, in extraction order
    #[serde(default)]
    pub words: Vec<Word>,

    /// Table regions on the page, in extraction order
    #[serde(default)]
    pub tables: Vec<TableRegion>,
}

impl PagePrimitives {
    /// Create an empty page with the given dimensions.
    pub fn new(number: u32, width: f64, height: f64) -> Self {
        Self {
            number,
            width,
            height,
            words: Vec::new(),
            tables: Vec::new(),
        }
    }

    /// Create an empty page with standard Letter size.
    pub fn letter(number: u32) -> Self {
        Self::new(number, 612.0, 792.0)
    }

    /// Add a word.
    pub fn add_word(&mut self, word: Word) {
        self.words.push(word);
    }

    /// Add a table region.
    pub fn add_table(&mut self, table: TableRegion) {
        self.tables.push(table);
    }

    /// Builder form of [`add_word`](Self::add_word).
    pub fn with_word(mut self, word: Word) -> Self {
        self.add_word(word);
        self
    }

    /// Builder form of [`add_table`](Self::add_table).
    pub fn with_table(mut self, table: TableRegion) -> Self {
        self.add_table(table);
        self
    }

    /// Check if the page carries no primitives.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty() && self.tables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_builder() {
        let page = PagePrimitives::letter(1)
            .with_word(Word::new("Hello", 0.0, 0.0))
            .with_table(TableRegion::from_strings((0.0, 10.0, 50.0, 30.0), [["A"]]));
        assert_eq!(page.words.len(), 1);
        assert_eq!(page.tables.len(), 1);
        assert!(!page.is_empty());
        assert!(PagePrimitives::letter(2).is_empty());
    }

    #[test]
    fn test_minimal_json_page() {
        let page: PagePrimitives = serde_json::from_str(r#"{"number":3}"#).unwrap();
        assert_eq!(page.number, 3);
        assert!(page.is_empty());
    }
}

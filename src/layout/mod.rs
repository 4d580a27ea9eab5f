//! Layout reconstruction: from page primitives to an ordered element list.
//!
//! The pipeline for one page is a single linear pass:
//!
//! 1. drop words anchored inside a table ([`free_words`]),
//! 2. cluster the rest into lines ([`LineGrouping::group`]),
//! 3. merge lines with tables by vertical position ([`sequence`]).

mod classify;
mod lines;
mod sequence;

pub use classify::{free_words, is_inside_any_table};
pub use lines::{LineGrouping, LineKey, TextLine};
pub use sequence::{sequence, Element};

use crate::model::PagePrimitives;

/// Options for layout reconstruction.
#[derive(Debug, Clone, Default)]
pub struct LayoutOptions {
    /// Tolerance used to cluster words into lines
    pub line_grouping: LineGrouping,
}

impl LayoutOptions {
    /// Create new layout options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the line-grouping precision (decimal places).
    pub fn with_line_precision(mut self, precision: u32) -> Self {
        self.line_grouping = LineGrouping::new(precision);
        self
    }
}

/// Lay out one page into reading-order elements.
pub fn layout_page(page: &PagePrimitives, options: &LayoutOptions) -> Vec<Element> {
    let words = free_words(&page.words, &page.tables);
    let lines = options.line_grouping.group(words.iter().copied());
    let elements = sequence(&page.tables, lines);

    log::debug!(
        "page {}: {} words, {} tables -> {} elements",
        page.number,
        page.words.len(),
        page.tables.len(),
        elements.len()
    );

    elements
}

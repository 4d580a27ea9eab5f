//! Markdown rendering of laid-out pages.

use rayon::prelude::*;

use crate::error::Result;
use crate::layout::{layout_page, Element, LayoutOptions};
use crate::model::{Document, PagePrimitives};

use super::{table_to_markdown, RenderOptions, RenderResult, RenderStats};

/// Markdown line ending that keeps the next line in the same paragraph.
pub const SOFT_BREAK: &str = "  \n";

/// Inserted between two consecutive pages.
pub const PAGE_SEPARATOR: &str = "  \n---  \n";

/// Convert a document to Markdown.
pub fn to_markdown(doc: &Document, layout: &LayoutOptions, options: &RenderOptions) -> Result<String> {
    let renderer = MarkdownRenderer::new(layout.clone(), options.clone());
    renderer.render(doc)
}

/// Convert a document to Markdown with statistics.
pub fn to_markdown_with_stats(
    doc: &Document,
    layout: &LayoutOptions,
    options: &RenderOptions,
) -> Result<RenderResult> {
    let renderer = MarkdownRenderer::new(layout.clone(), options.clone());
    renderer.render_with_stats(doc)
}

/// Render reading-order elements of one page.
///
/// Consecutive text lines form one paragraph block; every line, including
/// the last of a block, ends with a soft break. A table flushes the pending
/// block before its own rendering, so blocks never span a table.
pub fn render_elements(elements: &[Element]) -> String {
    accumulate(elements).0
}

fn accumulate(elements: &[Element]) -> (String, RenderStats) {
    let mut accumulator = ParagraphAccumulator::default();
    for element in elements {
        accumulator.push(element);
    }
    accumulator.finish()
}

/// Concatenate page outputs in order with [`PAGE_SEPARATOR`] between them.
pub fn join_pages<I, S>(pages: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut output = String::new();
    for (i, page) in pages.into_iter().enumerate() {
        if i > 0 {
            output.push_str(PAGE_SEPARATOR);
        }
        output.push_str(page.as_ref());
    }
    output
}

#[derive(Default)]
struct ParagraphAccumulator {
    pending: Vec<String>,
    output: String,
    stats: RenderStats,
}

impl ParagraphAccumulator {
    fn push(&mut self, element: &Element) {
        match element {
            Element::TextLine { text, .. } => {
                self.pending.push(text.clone());
            }
            Element::Table { grid, .. } => {
                self.flush();
                self.output.push_str(&table_to_markdown(grid));
                self.stats.table_count += 1;
            }
        }
    }

    fn flush(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        for line in self.pending.drain(..) {
            self.output.push_str(&line);
            self.output.push_str(SOFT_BREAK);
            self.stats.line_count += 1;
        }
        self.stats.paragraph_count += 1;
    }

    fn finish(mut self) -> (String, RenderStats) {
        self.flush();
        (self.output, self.stats)
    }
}

/// Markdown renderer.
pub struct MarkdownRenderer {
    layout: LayoutOptions,
    options: RenderOptions,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(layout: LayoutOptions, options: RenderOptions) -> Self {
        Self { layout, options }
    }

    /// Render a document to Markdown.
    pub fn render(self, doc: &Document) -> Result<String> {
        Ok(self.render_internal(doc).0)
    }

    /// Render a document to Markdown with statistics.
    pub fn render_with_stats(mut self, doc: &Document) -> Result<RenderResult> {
        self.options.collect_stats = true;
        let (content, stats) = self.render_internal(doc);
        Ok(RenderResult::new(content, stats))
    }

    /// Render one page.
    pub fn render_page(&self, page: &PagePrimitives) -> String {
        self.render_page_with_stats(page).0
    }

    fn render_page_with_stats(&self, page: &PagePrimitives) -> (String, RenderStats) {
        let elements = layout_page(page, &self.layout);
        let (markdown, mut stats) = accumulate(&elements);
        stats.page_count = 1;
        if self.options.collect_stats {
            stats.count_text(&markdown);
        }
        (markdown, stats)
    }

    fn render_internal(&self, doc: &Document) -> (String, RenderStats) {
        // Collecting from an indexed parallel iterator keeps page order.
        let pages: Vec<(String, RenderStats)> = if self.options.parallel {
            doc.pages
                .par_iter()
                .map(|page| self.render_page_with_stats(page))
                .collect()
        } else {
            doc.pages
                .iter()
                .map(|page| self.render_page_with_stats(page))
                .collect()
        };

        let mut stats = RenderStats::new();
        if self.options.collect_stats {
            for (_, page_stats) in &pages {
                stats.merge(page_stats);
            }
        }

        let markdown = if self.options.page_separator {
            join_pages(pages.iter().map(|(md, _)| md))
        } else {
            pages.iter().map(|(md, _)| md.as_str()).collect()
        };

        log::debug!("rendered {} pages ({} bytes)", pages.len(), markdown.len());
        (markdown, stats)
    }
}

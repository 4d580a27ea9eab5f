//! Rendering options and configuration.

use std::ops::RangeInclusive;

use crate::error::{Error, Result};

/// Options for rendering page layout to Markdown.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Insert a horizontal rule between consecutive pages
    pub page_separator: bool,

    /// Lay out and render pages on the rayon thread pool
    pub parallel: bool,

    /// Collect statistics during rendering
    pub collect_stats: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the page separator.
    pub fn with_page_separator(mut self, separate: bool) -> Self {
        self.page_separator = separate;
        self
    }

    /// Enable or disable parallel page rendering.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Render pages one after another on the calling thread.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Enable statistics collection during rendering.
    pub fn with_stats(mut self, collect: bool) -> Self {
        self.collect_stats = collect;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            page_separator: true,
            parallel: true,
            collect_stats: false,
        }
    }
}

/// Page selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PageSelection {
    /// All pages
    #[default]
    All,
    /// A range of pages (inclusive, 1-indexed)
    Range(RangeInclusive<u32>),
    /// Specific pages (1-indexed)
    Pages(Vec<u32>),
}

impl PageSelection {
    /// Check if a page number should be included.
    pub fn includes(&self, page: u32) -> bool {
        match self {
            PageSelection::All => true,
            PageSelection::Range(range) => range.contains(&page),
            PageSelection::Pages(pages) => pages.contains(&page),
        }
    }

    /// Parse a page selection string (e.g., "1-10", "1,3,5,7-10", "all").
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();

        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(PageSelection::All);
        }

        if let Some((start, end)) = s.split_once('-') {
            if !start.contains(',') && !end.contains(',') {
                let (start, end) = (parse_page(start, s)?, parse_page(end, s)?);
                if start > end {
                    return Err(Error::InvalidPageRange(s.to_string()));
                }
                return Ok(PageSelection::Range(start..=end));
            }
        }

        let mut pages = Vec::new();
        for part in s.split(',') {
            let part = part.trim();
            if let Some((start, end)) = part.split_once('-') {
                let (start, end) = (parse_page(start, s)?, parse_page(end, s)?);
                pages.extend(start..=end);
            } else {
                pages.push(parse_page(part, s)?);
            }
        }

        pages.sort_unstable();
        pages.dedup();
        Ok(PageSelection::Pages(pages))
    }
}

fn parse_page(part: &str, input: &str) -> Result<u32> {
    match part.trim().parse::<u32>() {
        Ok(0) | Err(_) => Err(Error::InvalidPageRange(input.to_string())),
        Ok(page) => Ok(page),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = RenderOptions::default();
        assert!(options.page_separator);
        assert!(options.parallel);
        assert!(!options.collect_stats);
    }

    #[test]
    fn test_builder() {
        let options = RenderOptions::new()
            .sequential()
            .with_page_separator(false)
            .with_stats(true);
        assert!(!options.parallel);
        assert!(!options.page_separator);
        assert!(options.collect_stats);
    }

    #[test]
    fn test_parse_selection() {
        assert_eq!(PageSelection::parse("all").unwrap(), PageSelection::All);
        assert_eq!(PageSelection::parse("").unwrap(), PageSelection::All);
        assert_eq!(
            PageSelection::parse("2-4").unwrap(),
            PageSelection::Range(2..=4)
        );
        assert_eq!(
            PageSelection::parse("5, 1,3-4,3").unwrap(),
            PageSelection::Pages(vec![1, 3, 4, 5])
        );
    }

    #[test]
    fn test_parse_selection_rejects_garbage() {
        assert!(matches!(
            PageSelection::parse("x-3"),
            Err(Error::InvalidPageRange(_))
        ));
        assert!(PageSelection::parse("0").is_err());
        assert!(PageSelection::parse("5-2").is_err());
    }

    #[test]
    fn test_includes() {
        assert!(PageSelection::All.includes(99));
        assert!(PageSelection::Range(2..=3).includes(3));
        assert!(!PageSelection::Range(2..=3).includes(4));
        assert!(PageSelection::Pages(vec![1, 7]).includes(7));
    }
}

//! Extraction options and configuration.

use crate::render::PageSelection;

use super::TableDetectorConfig;

/// Options for extracting page primitives from a source.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,

    /// Page selection (which pages to extract)
    pub pages: PageSelection,

    /// Whether to run table detection on PDF sources
    pub detect_tables: bool,

    /// Table detector tuning
    pub table_detector: TableDetectorConfig,
}

impl ExtractOptions {
    /// Create new extract options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (failed pages render empty).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.pages = pages;
        self
    }

    /// Enable or disable table detection.
    pub fn with_table_detection(mut self, detect: bool) -> Self {
        self.detect_tables = detect;
        self
    }

    /// Extract text only, without table regions.
    pub fn text_only(mut self) -> Self {
        self.detect_tables = false;
        self
    }

    /// Set table detector configuration.
    pub fn with_table_detector(mut self, config: TableDetectorConfig) -> Self {
        self.table_detector = config;
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Strict,
            pages: PageSelection::All,
            detect_tables: true,
            table_detector: TableDetectorConfig::default(),
        }
    }
}

/// Error handling mode during extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on the first page that cannot be extracted
    #[default]
    Strict,
    /// Log the failure and continue with an empty page
    Lenient,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_options_builder() {
        let options = ExtractOptions::new()
            .lenient()
            .text_only()
            .with_pages(PageSelection::Range(2..=4));

        assert_eq!(options.error_mode, ErrorMode::Lenient);
        assert!(!options.detect_tables);
        assert!(options.pages.includes(3));
        assert!(!options.pages.includes(1));
    }

    #[test]
    fn test_default_options() {
        let options = ExtractOptions::default();
        assert_eq!(options.error_mode, ErrorMode::Strict);
        assert!(options.detect_tables);
        assert_eq!(options.table_detector.max_columns, 6);
    }
}

//! Word primitives.

use serde::{Deserialize, Serialize};

/// A positioned word as produced by a page-primitive extractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    /// The word text
    pub text: String,

    /// Left edge
    pub x0: f64,

    /// Right edge
    #[serde(default)]
    pub x1: f64,

    /// Top edge (top-left origin)
    pub top: f64,

    /// Bottom edge
    #[serde(default)]
    pub bottom: f64,
}

impl Word {
    /// Create a word anchored at `(x0, top)` with zero extent.
    pub fn new(text: impl Into<String>, x0: f64, top: f64) -> Self {
        Self {
            text: text.into(),
            x0,
            x1: x0,
            top,
            bottom: top,
        }
    }

    /// Set the right and bottom edges.
    pub fn with_extent(mut self, x1: f64, bottom: f64) -> Self {
        self.x1 = x1;
        self.bottom = bottom;
        self
    }
}

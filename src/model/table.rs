//! Table region types.

use super::BBox;
use serde::{Deserialize, Serialize};

/// A single table cell. `None` marks a cell the extractor left empty.
pub type Cell = Option<String>;

/// Table cell contents as ordered rows of ordered cells.
///
/// Row 0 is the header row. Rows may differ in length.
pub type Grid = Vec<Vec<Cell>>;

/// A located table with its cell grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRegion {
    /// Table bounds on the page
    pub bbox: BBox,

    /// Cell contents
    pub grid: Grid,
}

impl TableRegion {
    /// Create a table region.
    pub fn new(bbox: impl Into<BBox>, grid: Grid) -> Self {
        Self {
            bbox: bbox.into(),
            grid,
        }
    }

    /// Create a table region from plain strings (no empty cells).
    pub fn from_strings<R, S>(bbox: impl Into<BBox>, rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let grid = rows
            .into_iter()
            .map(|row| row.into_iter().map(|cell| Some(cell.into())).collect())
            .collect();
        Self::new(bbox, grid)
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.grid.len()
    }

    /// Get the number of columns (based on the header row).
    pub fn column_count(&self) -> usize {
        self.grid.first().map(Vec::len).unwrap_or(0)
    }

    /// Check if the grid has no rows.
    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }

    /// Whether every row has the header row's width.
    pub fn is_rectangular(&self) -> bool {
        let width = self.column_count();
        self.grid.iter().all(|row| row.len() == width)
    }
}

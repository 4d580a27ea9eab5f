//! Reading-order sequencing of tables and text lines.

use std::cmp::Ordering;

use crate::model::{Grid, TableRegion};

use super::TextLine;

/// One page element in reading order.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// A line of free text
    TextLine {
        /// Rounded top of the line
        y: f64,
        /// Line text
        text: String,
    },
    /// A table
    Table {
        /// Top of the table box
        y: f64,
        /// Table cells
        grid: Grid,
    },
}

impl Element {
    /// The vertical coordinate this element is ordered by.
    pub fn y(&self) -> f64 {
        match self {
            Element::TextLine { y, .. } | Element::Table { y, .. } => *y,
        }
    }

    /// Check if this element is a table.
    pub fn is_table(&self) -> bool {
        matches!(self, Element::Table { .. })
    }

    fn rank(&self) -> u8 {
        match self {
            Element::Table { .. } => 0,
            Element::TextLine { .. } => 1,
        }
    }

    /// Reading-order comparison: by `y`, then tables before text at equal `y`.
    pub fn reading_order(&self, other: &Element) -> Ordering {
        self.y()
            .total_cmp(&other.y())
            .then_with(|| self.rank().cmp(&other.rank()))
    }
}

/// Merge a page's tables and text lines into one sequence sorted by `y`.
///
/// The sort is stable, so tables sharing a `y` keep their extraction order,
/// as do lines sharing a `y`.
pub fn sequence(tables: &[TableRegion], lines: Vec<TextLine>) -> Vec<Element> {
    let mut elements: Vec<Element> = Vec::with_capacity(tables.len() + lines.len());

    elements.extend(tables.iter().map(|table| Element::Table {
        y: table.bbox.top,
        grid: table.grid.clone(),
    }));
    elements.extend(
        lines
            .into_iter()
            .map(|line| Element::TextLine {
                y: line.y,
                text: line.text,
            }),
    );

    elements.sort_by(Element::reading_order);
    elements
}

//! Table detection using text position analysis (Stream mode algorithm).
//!
//! Inspired by Camelot's Stream mode, this module detects tables by analyzing
//! text alignment patterns without relying on graphical lines. Runs are in
//! page space (top-left origin).

use std::collections::{HashMap, HashSet};

use crate::model::{Cell, TableRegion};

use super::content::PlacedRun;

/// Left edges within this distance share a column bucket.
const BUCKET_SIZE: f64 = 5.0;

/// Distance from a column edge that still counts as aligned.
const ALIGNMENT_TOLERANCE: f64 = 5.0;

/// Runs starting slightly before a column edge still belong to it.
const COLUMN_LEAD: f64 = 10.0;

/// A row of runs grouped by vertical position.
#[derive(Debug, Clone)]
struct RowData {
    spans: Vec<PlacedRun>,
}

/// Table detector configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct TableDetectorConfig {
    /// Minimum number of rows to consider as table
    pub min_rows: usize,
    /// Minimum number of columns to consider as table
    pub min_columns: usize,
    /// Maximum number of columns (above this, likely word-level splitting)
    pub max_columns: usize,
    /// Tolerance for grouping runs into rows (fraction of font size)
    pub y_tolerance_factor: f64,
    /// Minimum column alignment ratio (0.0-1.0)
    pub min_alignment_ratio: f64,
    /// Minimum gap between columns (points)
    pub min_column_gap: f64,
}

impl Default for TableDetectorConfig {
    fn default() -> Self {
        Self {
            min_rows: 2,
            min_columns: 2,
            max_columns: 6,
            y_tolerance_factor: 0.4,
            min_alignment_ratio: 0.3,
            min_column_gap: 15.0,
        }
    }
}

/// Detects tables in the text runs of one page.
#[derive(Debug, Clone, Default)]
pub struct TableDetector {
    config: TableDetectorConfig,
}

impl TableDetector {
    /// Create a new table detector with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new table detector with custom configuration.
    pub fn with_config(config: TableDetectorConfig) -> Self {
        Self { config }
    }

    /// Detect table regions among the given runs.
    pub(crate) fn detect(&self, spans: &[PlacedRun]) -> Vec<TableRegion> {
        log::debug!("TableDetector: starting with {} runs", spans.len());

        if spans.len() < self.config.min_rows * self.config.min_columns {
            return vec![];
        }

        // Step 1: Group runs into rows by vertical position
        let rows = self.group_into_rows(spans);
        if rows.len() < self.config.min_rows {
            log::debug!(
                "TableDetector: not enough rows ({} < {})",
                rows.len(),
                self.config.min_rows
            );
            return vec![];
        }

        // Step 2: Detect column boundaries from text edges
        let columns = self.detect_columns(&rows);
        log::debug!(
            "TableDetector: detected {} columns at positions: {:?}",
            columns.len(),
            columns
        );
        if columns.len() < self.config.min_columns {
            return vec![];
        }

        // Step 3: Find contiguous rows with consistent column alignment
        let regions = self.find_table_regions(&rows, &columns);
        log::debug!("TableDetector: found {} candidate regions", regions.len());

        // Step 4: Validate each region and build its grid
        let mut tables = Vec::new();
        for (start_row, end_row) in regions {
            let table_rows = &rows[start_row..=end_row];

            // Re-detect columns for this specific region
            let table_columns = self.detect_columns(table_rows);
            if table_columns.len() < self.config.min_columns {
                continue;
            }
            if table_columns.len() > self.config.max_columns {
                log::debug!(
                    "TableDetector: skipping region, too many columns ({} > {})",
                    table_columns.len(),
                    self.config.max_columns
                );
                continue;
            }
            if self.is_list_pattern(table_rows, &table_columns) {
                log::debug!("TableDetector: skipping region, detected as list pattern");
                continue;
            }

            if let Some(region) = self.build_region(table_rows, &table_columns) {
                tables.push(region);
            }
        }

        tables
    }

    /// Group runs into rows, top to bottom, each row sorted left to right.
    fn group_into_rows(&self, spans: &[PlacedRun]) -> Vec<RowData> {
        let mut sorted = spans.to_vec();
        sorted.sort_by(|a, b| a.top.total_cmp(&b.top).then(a.x0.total_cmp(&b.x0)));

        let mut rows: Vec<RowData> = Vec::new();
        let mut current: Vec<PlacedRun> = Vec::new();
        let mut current_top: Option<f64> = None;

        for span in sorted {
            let tolerance = span.font_size * self.config.y_tolerance_factor;
            match current_top {
                Some(top) if (span.top - top).abs() <= tolerance => current.push(span),
                _ => {
                    if !current.is_empty() {
                        rows.push(RowData {
                            spans: std::mem::take(&mut current),
                        });
                    }
                    current_top = Some(span.top);
                    current.push(span);
                }
            }
        }

        if !current.is_empty() {
            rows.push(RowData { spans: current });
        }

        for row in &mut rows {
            row.spans.sort_by(|a, b| a.x0.total_cmp(&b.x0));
        }
        rows
    }

    /// Detect column boundaries from aligned left edges.
    ///
    /// Rows with two or more runs are the evidence; when too few exist every
    /// row contributes instead.
    fn detect_columns(&self, rows: &[RowData]) -> Vec<f64> {
        if rows.is_empty() {
            return vec![];
        }

        let multi_span_rows: Vec<&RowData> = rows.iter().filter(|r| r.spans.len() >= 2).collect();
        let evidence: Vec<&RowData> = if multi_span_rows.len() >= self.config.min_rows {
            multi_span_rows
        } else {
            rows.iter().collect()
        };

        // Each bucket counts at most once per row
        let mut edge_counts: HashMap<i64, usize> = HashMap::new();
        for row in &evidence {
            let buckets: HashSet<i64> = row
                .spans
                .iter()
                .map(|span| (span.x0 / BUCKET_SIZE).round() as i64)
                .collect();
            for bucket in buckets {
                *edge_counts.entry(bucket).or_insert(0) += 1;
            }
        }

        let min_occurrences =
            ((evidence.len() as f64 * self.config.min_alignment_ratio) as usize).max(2);

        let mut edges: Vec<f64> = edge_counts
            .iter()
            .filter(|(_, count)| **count >= min_occurrences)
            .map(|(bucket, _)| *bucket as f64 * BUCKET_SIZE)
            .collect();
        edges.sort_by(f64::total_cmp);

        // Merge close edges
        let mut merged: Vec<f64> = Vec::new();
        for edge in edges {
            match merged.last() {
                Some(last) if edge - last < self.config.min_column_gap => {}
                _ => merged.push(edge),
            }
        }
        merged
    }

    /// Find contiguous row ranges that form tables.
    fn find_table_regions(&self, rows: &[RowData], columns: &[f64]) -> Vec<(usize, usize)> {
        let mut regions = Vec::new();
        let mut current_start: Option<usize> = None;

        for (i, row) in rows.iter().enumerate() {
            if alignment_score(row, columns) >= self.config.min_alignment_ratio {
                current_start.get_or_insert(i);
            } else if let Some(start) = current_start.take() {
                if i - start >= self.config.min_rows {
                    regions.push((start, i - 1));
                }
            }
        }

        if let Some(start) = current_start {
            if rows.len() - start >= self.config.min_rows {
                regions.push((start, rows.len() - 1));
            }
        }

        regions
    }

    /// Build the region's bounds and grid. Row 0 becomes the header.
    fn build_region(&self, rows: &[RowData], columns: &[f64]) -> Option<TableRegion> {
        let bbox = rows
            .iter()
            .flat_map(|row| row.spans.iter())
            .map(PlacedRun::bbox)
            .reduce(|acc, b| acc.union(&b))?;

        let grid = rows
            .iter()
            .map(|row| {
                let mut cells: Vec<Vec<&str>> = vec![Vec::new(); columns.len()];
                for span in &row.spans {
                    let col = find_column_for_span(span.x0, columns, bbox.x1);
                    cells[col].push(span.text.trim());
                }
                cells
                    .into_iter()
                    .map(|parts| -> Cell {
                        let text = parts.join(" ");
                        (!text.is_empty()).then_some(text)
                    })
                    .collect()
            })
            .collect();

        Some(TableRegion::new(bbox, grid))
    }

    /// Check if the rows actually form a numbered or bulleted list.
    ///
    /// A list marker and its item text are separate runs at different left
    /// edges, which otherwise reads as a two-column table.
    fn is_list_pattern(&self, rows: &[RowData], columns: &[f64]) -> bool {
        if columns.len() < 2 || rows.is_empty() {
            return false;
        }

        let mut bullet_count = 0;
        let mut number_count = 0;
        for row in rows {
            // Rows are sorted left to right
            if let Some(span) = row.spans.first() {
                let text = span.text.trim();
                if is_bullet_marker(text) {
                    bullet_count += 1;
                } else if is_number_marker(text) {
                    number_count += 1;
                }
            }
        }

        let bullet_ratio = bullet_count as f64 / rows.len() as f64;
        let total_ratio = (bullet_count + number_count) as f64 / rows.len() as f64;
        log::debug!(
            "TableDetector: list markers: bullets={}, numbers={}, rows={}",
            bullet_count,
            number_count,
            rows.len()
        );

        // Numbered first columns are common in real tables, so numbers only
        // reject two-column candidates
        bullet_ratio >= 0.5 || (columns.len() == 2 && total_ratio >= 0.5)
    }
}

/// Fraction of a row's runs that start on a column edge.
fn alignment_score(row: &RowData, columns: &[f64]) -> f64 {
    if row.spans.is_empty() || columns.is_empty() {
        return 0.0;
    }

    let aligned = row
        .spans
        .iter()
        .filter(|span| {
            columns
                .iter()
                .any(|col| (span.x0 - col).abs() <= ALIGNMENT_TOLERANCE)
        })
        .count();

    aligned as f64 / row.spans.len() as f64
}

/// Column whose `[start, next start)` band holds `x`, else the closest one.
fn find_column_for_span(x: f64, columns: &[f64], right_x: f64) -> usize {
    for (i, &col_start) in columns.iter().enumerate() {
        let col_end = columns.get(i + 1).copied().unwrap_or(right_x + 100.0);
        if x >= col_start - COLUMN_LEAD && x < col_end - COLUMN_LEAD {
            return i;
        }
    }

    columns
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| (x - **a).abs().total_cmp(&(x - **b).abs()))
        .map(|(i, _)| i)
        .unwrap_or(0)
}

fn is_bullet_marker(text: &str) -> bool {
    matches!(
        text.trim(),
        "-" | "–"
            | "—"
            | "•"
            | "·"
            | "*"
            | "○"
            | "▪"
            | "◦"
            | "▸"
            | "▹"
            | "►"
            | "■"
            | "●"
            | "※"
            | "□"
            | "◆"
            | "◇"
            | "▶"
            | "▷"
            | "☞"
            | "➤"
            | "➜"
    )
}

/// Number-style list markers: `1.`, `2)`, `a.`, or a bare number.
fn is_number_marker(text: &str) -> bool {
    let cleaned: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        return false;
    }

    if let Some(pos) = cleaned.find(|c: char| !c.is_ascii_digit()) {
        let (prefix, suffix) = cleaned.split_at(pos);
        if !prefix.is_empty() && (suffix == "." || suffix == ")") {
            return true;
        }
    }

    if cleaned.parse::<u32>().is_ok() {
        return true;
    }

    let mut chars = cleaned.chars();
    matches!(
        (chars.next(), chars.next(), chars.next()),
        (Some(letter), Some('.' | ')'), None) if letter.is_alphabetic()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_span(text: &str, x0: f64, top: f64) -> PlacedRun {
        PlacedRun {
            text: text.to_string(),
            x0,
            x1: x0 + text.chars().count() as f64 * 6.0,
            top,
            bottom: top + 12.0,
            font_size: 12.0,
        }
    }

    #[test]
    fn test_group_into_rows() {
        let detector = TableDetector::new();
        let spans = vec![
            make_span("B2", 60.0, 115.0),
            make_span("A1", 10.0, 100.0),
            make_span("B1", 60.0, 101.0),
            make_span("A2", 10.0, 115.0),
        ];

        let rows = detector.group_into_rows(&spans);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].spans[0].text, "A1");
        assert_eq!(rows[0].spans[1].text, "B1");
        assert_eq!(rows[1].spans[0].text, "A2");
    }

    #[test]
    fn test_detect_simple_table() {
        let detector = TableDetector::new();
        let spans = vec![
            make_span("Name", 10.0, 100.0),
            make_span("Age", 60.0, 100.0),
            make_span("Alice", 10.0, 115.0),
            make_span("30", 60.0, 115.0),
            make_span("Bob", 10.0, 130.0),
            make_span("25", 60.0, 130.0),
        ];

        let tables = detector.detect(&spans);
        assert_eq!(tables.len(), 1);

        let table = &tables[0];
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.column_count(), 2);
        assert_eq!(
            table.grid[0],
            vec![Some("Name".to_string()), Some("Age".to_string())]
        );
        assert_eq!(table.bbox.x0, 10.0);
        assert_eq!(table.bbox.top, 100.0);
        assert_eq!(table.bbox.bottom, 142.0);
    }

    #[test]
    fn test_missing_cell_is_none() {
        let detector = TableDetector::new();
        let spans = vec![
            make_span("Key", 10.0, 100.0),
            make_span("Value", 80.0, 100.0),
            make_span("a", 10.0, 115.0),
            make_span("1", 80.0, 115.0),
            make_span("b", 10.0, 130.0),
        ];

        let tables = detector.detect(&spans);
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].grid[2], vec![Some("b".to_string()), None]);
    }

    #[test]
    fn test_no_table_single_column() {
        let detector = TableDetector::new();
        let spans = vec![
            make_span("Line 1", 10.0, 100.0),
            make_span("Line 2", 10.0, 115.0),
            make_span("Line 3", 10.0, 130.0),
            make_span("Line 4", 10.0, 145.0),
        ];

        assert!(detector.detect(&spans).is_empty());
    }

    #[test]
    fn test_too_many_columns_rejected() {
        let config = TableDetectorConfig {
            max_columns: 2,
            ..Default::default()
        };
        let detector = TableDetector::with_config(config);
        let mut spans = Vec::new();
        for row in 0..3 {
            for col in 0..3 {
                spans.push(make_span("x", 10.0 + col as f64 * 50.0, 100.0 + row as f64 * 15.0));
            }
        }

        assert!(detector.detect(&spans).is_empty());
        assert_eq!(TableDetector::new().detect(&spans).len(), 1);
    }

    #[test]
    fn test_numbered_list_not_detected_as_table() {
        let detector = TableDetector::new();
        let spans = vec![
            make_span("1.", 50.0, 100.0),
            make_span("장비관리설정", 80.0, 100.0),
            make_span("2.", 50.0, 130.0),
            make_span("Object관리", 80.0, 130.0),
            make_span("3.", 50.0, 160.0),
            make_span("정책관리 및 라우팅", 80.0, 160.0),
            make_span("4.", 50.0, 190.0),
            make_span("VPN", 80.0, 190.0),
        ];

        assert!(detector.detect(&spans).is_empty());
    }

    #[test]
    fn test_bullet_list_not_detected_as_table() {
        let detector = TableDetector::new();
        let spans = vec![
            make_span("-", 50.0, 100.0),
            make_span("Management", 80.0, 100.0),
            make_span("-", 50.0, 130.0),
            make_span("Interface/Service Option", 80.0, 130.0),
            make_span("-", 50.0, 160.0),
            make_span("Firmware", 80.0, 160.0),
        ];

        assert!(detector.detect(&spans).is_empty());
    }

    #[test]
    fn test_list_markers() {
        for marker in ["1.", "12.", "1)", "1 .", "3", "a.", "B)"] {
            assert!(is_number_marker(marker), "{}", marker);
        }
        for marker in ["-", "•", "*", "–"] {
            assert!(is_bullet_marker(marker), "{}", marker);
        }
        for text in ["Name", "Hello World", "Alice", ""] {
            assert!(!is_number_marker(text) && !is_bullet_marker(text), "{}", text);
        }
    }

    #[test]
    fn test_find_column_for_span() {
        let columns = [10.0, 60.0, 120.0];
        assert_eq!(find_column_for_span(12.0, &columns, 200.0), 0);
        assert_eq!(find_column_for_span(55.0, &columns, 200.0), 1);
        assert_eq!(find_column_for_span(150.0, &columns, 200.0), 2);
        assert_eq!(find_column_for_span(-50.0, &columns, 200.0), 0);
    }
}

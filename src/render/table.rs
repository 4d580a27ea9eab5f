//! Markdown table serialization.

use crate::model::Cell;

/// Normalize a cell for use inside a markdown table row.
///
/// `None` becomes empty; surrounding whitespace is trimmed; embedded
/// newlines become `<br>`; pipes are escaped so they do not split columns.
pub fn clean_cell(cell: Option<&str>) -> String {
    match cell {
        None => String::new(),
        Some(text) => text.trim().replace('\n', "<br>").replace('|', "\\|"),
    }
}

/// Render a grid as a markdown table.
///
/// Row 0 is always the header and is followed by a `---` separator with one
/// entry per header cell. The output ends with a blank line. An empty grid
/// renders as the empty string.
///
/// Rows are written with whatever number of cells they have; ragged grids
/// are not padded.
pub fn table_to_markdown(grid: &[Vec<Cell>]) -> String {
    let Some((header, body)) = grid.split_first() else {
        return String::new();
    };

    let mut output = String::new();
    push_row(&mut output, header.iter().map(|c| clean_cell(c.as_deref())));
    push_row(&mut output, header.iter().map(|_| "---".to_string()));
    for row in body {
        push_row(&mut output, row.iter().map(|c| clean_cell(c.as_deref())));
    }
    output.push('\n');
    output
}

fn push_row(output: &mut String, cells: impl Iterator<Item = String>) {
    output.push_str("| ");
    output.push_str(&cells.collect::<Vec<_>>().join(" | "));
    output.push_str(" |\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[Option<&str>]]) -> Vec<Vec<Cell>> {
        rows.iter()
            .map(|row| row.iter().map(|c| c.map(String::from)).collect())
            .collect()
    }

    #[test]
    fn test_two_by_two() {
        let g = grid(&[&[Some("A"), Some("B")], &[Some("1"), Some("2")]]);
        assert_eq!(
            table_to_markdown(&g),
            "| A | B |\n| --- | --- |\n| 1 | 2 |\n\n"
        );
    }

    #[test]
    fn test_empty_grid() {
        assert_eq!(table_to_markdown(&[]), "");
    }

    #[test]
    fn test_header_only() {
        let g = grid(&[&[Some("Only")]]);
        assert_eq!(table_to_markdown(&g), "| Only |\n| --- |\n\n");
    }

    #[test]
    fn test_clean_cell() {
        assert_eq!(clean_cell(None), "");
        assert_eq!(clean_cell(Some("a|b")), "a\\|b");
        assert_eq!(clean_cell(Some("a\nb")), "a<br>b");
        assert_eq!(clean_cell(Some("  padded \n")), "padded");
    }

    #[test]
    fn test_null_cells_render_empty() {
        let g = grid(&[&[Some("H"), None], &[None, Some("x")]]);
        assert_eq!(
            table_to_markdown(&g),
            "| H |  |\n| --- | --- |\n|  | x |\n\n"
        );
    }

    #[test]
    fn test_empty_header_row() {
        let g: Vec<Vec<Cell>> = vec![vec![]];
        assert_eq!(table_to_markdown(&g), "|  |\n|  |\n\n");
    }

    #[test]
    fn test_ragged_rows_pass_through() {
        let g = grid(&[&[Some("A"), Some("B")], &[Some("1")], &[Some("x"), Some("y"), Some("z")]]);
        let md = table_to_markdown(&g);
        let lines: Vec<&str> = md.lines().collect();
        assert_eq!(lines[2], "| 1 |");
        assert_eq!(lines[3], "| x | y | z |");
    }

    #[test]
    fn test_row_count() {
        for rows in 1..6 {
            let g: Vec<Vec<Cell>> = (0..rows).map(|i| vec![Some(i.to_string())]).collect();
            let md = table_to_markdown(&g);
            let rendered = md.lines().filter(|l| l.starts_with('|')).count();
            assert_eq!(rendered, 2 + (rows - 1));
        }
    }

    #[test]
    fn test_rendering_is_repeatable() {
        let g = grid(&[&[Some("a|b"), Some("c\nd")], &[None, Some(" e ")]]);
        assert_eq!(table_to_markdown(&g), table_to_markdown(&g));
    }
}

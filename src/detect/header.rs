//! Preamble and header analysis over the winning table.
//!
//! Preamble rows are skipped first: comment-marked rows always, and rows
//! that are structurally unlike the bulk of the table (wrong field count,
//! or a mostly-empty banner row) as long as at least two rows remain for
//! the header decision. The first surviving row is then classified as
//! header or data by comparing its cell shapes against the columns below.

use super::shape::{Shape, cell_shape, column_shapes};
use super::table::Table;
use crate::metadata::Header;
use std::collections::HashSet;

/// Rows whose first field starts with this byte are always preamble.
pub const COMMENT_MARKER: u8 = b'#';

/// Decide the header layout of the winning table.
pub fn detect_header(table: &Table) -> Header {
    let num_preamble_rows = count_preamble_rows(table);
    let has_header_row = is_header_row(table, num_preamble_rows);
    Header::new(has_header_row, num_preamble_rows)
}

fn count_preamble_rows(table: &Table) -> usize {
    let num_rows = table.num_rows();
    let modal = table.modal_field_count();
    let mut skipped = 0;

    for (i, row) in table.rows.iter().enumerate() {
        if is_comment_row(row) {
            skipped += 1;
            continue;
        }
        // Structural rules must leave at least two rows standing, so the
        // header decision still has data to compare against.
        if num_rows - i <= 2 {
            break;
        }
        if table.field_counts[i] != modal && mostly_modal_below(table, i + 1, modal) {
            skipped += 1;
            continue;
        }
        if table.field_counts[i] == modal
            && mostly_empty(row)
            && mostly_populated_below(table, i + 1)
        {
            skipped += 1;
            continue;
        }
        break;
    }
    skipped
}

fn is_comment_row(row: &[String]) -> bool {
    row.first()
        .is_some_and(|cell| cell.trim_start().as_bytes().first() == Some(&COMMENT_MARKER))
}

fn mostly_modal_below(table: &Table, start: usize, modal: usize) -> bool {
    let below = &table.field_counts[start..];
    if below.is_empty() {
        return false;
    }
    let modal_rows = below.iter().filter(|&&count| count == modal).count();
    modal_rows * 2 >= below.len()
}

fn mostly_empty(row: &[String]) -> bool {
    let empty = row
        .iter()
        .filter(|cell| cell_shape(cell) == Shape::Empty)
        .count();
    empty * 2 > row.len()
}

fn mostly_populated_below(table: &Table, start: usize) -> bool {
    let mut cells = 0;
    let mut populated = 0;
    for row in table.rows.iter().skip(start) {
        for cell in row {
            cells += 1;
            if cell_shape(cell) != Shape::Empty {
                populated += 1;
            }
        }
    }
    cells > 0 && populated * 2 >= cells
}

/// Weighted evidence that the first non-preamble row holds column labels
/// rather than data.
fn is_header_row(table: &Table, num_preamble_rows: usize) -> bool {
    let rows = &table.rows[num_preamble_rows.min(table.num_rows())..];
    if rows.len() < 2 {
        // A lone row cannot be told apart from data.
        return false;
    }
    let first = &rows[0];
    if first.is_empty() {
        return false;
    }

    let first_shapes: Vec<Shape> = first.iter().map(|cell| cell_shape(cell)).collect();
    let first_text = first_shapes.iter().filter(|&&s| s == Shape::Text).count();
    let first_typed = first_shapes.iter().filter(|s| s.is_typed()).count();

    let data_shapes = column_shapes(table, num_preamble_rows + 1);
    let data_text = data_shapes.iter().filter(|&&s| s == Shape::Text).count();

    let mut evidence = 0.0;

    // Labels are text where the columns beneath are typed.
    if first_text > data_text {
        evidence += 1.0;
    }
    // A label row is predominantly non-numeric.
    if first_text > first_typed {
        evidence += 0.5;
    }
    // Labels do not repeat.
    let mut seen = HashSet::new();
    if first.iter().all(|cell| seen.insert(cell.as_str())) {
        evidence += 0.5;
    }
    // Labels tend to be no longer than the values beneath them.
    let avg_len = |row: &[String]| {
        row.iter().map(String::len).sum::<usize>() as f64 / row.len().max(1) as f64
    };
    if avg_len(first) <= avg_len(&rows[1]) {
        evidence += 0.3;
    }

    evidence / 4.0 > 0.4
}

//! Structural cell shapes used by preamble and header analysis.
//!
//! Shapes classify what a cell *looks like* (numeric, date-like, empty,
//! free text) without parsing its value; that is all header detection
//! needs to tell a label row from a data row.

use super::table::Table;
use regex::Regex;
use std::sync::LazyLock;

static FLOAT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[-+]?(?:\d+\.?\d*|\d*\.?\d+)(?:[eE][-+]?\d+)?$").expect("float pattern")
});

static DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{1,4}[-/.]\d{1,2}[-/.]\d{1,4}$").expect("date pattern")
});

static DATETIME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{1,4}[-/.]\d{1,2}[-/.]\d{1,4}[T ]\d{1,2}:\d{2}(:\d{2})?(\.\d+)?(Z|[+-]\d{2}:?\d{2})?$")
        .expect("datetime pattern")
});

/// What a cell value looks like structurally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Empty or a conventional null marker.
    Empty,
    /// Integer or float.
    Numeric,
    /// Date or datetime.
    Temporal,
    /// Anything else.
    Text,
}

impl Shape {
    /// Clearly-typed shapes: evidence that a row is data, not labels.
    pub fn is_typed(&self) -> bool {
        matches!(self, Shape::Numeric | Shape::Temporal)
    }
}

fn is_null_marker(s: &str) -> bool {
    matches!(
        s,
        "-" | "--" | "?" | "null" | "NULL" | "Null" | "none" | "NONE" | "None" | "na" | "NA"
            | "n/a" | "N/A" | "nan" | "NaN" | "NAN"
    )
}

// Hot path: every cell in the sample goes through here, so integers are
// recognized with direct byte checks before any regex runs.
fn is_integer(s: &str) -> bool {
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    !digits.is_empty() && digits.len() <= 19 && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Classify a single cell value.
pub fn cell_shape(value: &str) -> Shape {
    let trimmed = value.trim();
    if trimmed.is_empty() || is_null_marker(trimmed) {
        return Shape::Empty;
    }
    if is_integer(trimmed) || FLOAT_PATTERN.is_match(trimmed) {
        return Shape::Numeric;
    }
    if DATETIME_PATTERN.is_match(trimmed) || DATE_PATTERN.is_match(trimmed) {
        return Shape::Temporal;
    }
    Shape::Text
}

/// Modal shape per field position over `table.rows[start..]`, considering
/// the first `modal_field_count` positions. Empty cells do not vote unless
/// a column is entirely empty.
pub fn column_shapes(table: &Table, start: usize) -> Vec<Shape> {
    let num_cols = table.modal_field_count();
    let mut tallies = vec![[0usize; 3]; num_cols]; // Numeric, Temporal, Text
    let mut seen = vec![0usize; num_cols];

    for row in table.rows.iter().skip(start) {
        for (col, cell) in row.iter().enumerate().take(num_cols) {
            seen[col] += 1;
            match cell_shape(cell) {
                Shape::Numeric => tallies[col][0] += 1,
                Shape::Temporal => tallies[col][1] += 1,
                Shape::Text => tallies[col][2] += 1,
                Shape::Empty => {}
            }
        }
    }

    tallies
        .iter()
        .zip(&seen)
        .map(|(tally, &seen_cells)| {
            if seen_cells == 0 || tally.iter().sum::<usize>() == 0 {
                return Shape::Empty;
            }
            // Ties fall through to Text: only a clear majority counts as
            // typed evidence.
            let (numeric, temporal, text) = (tally[0], tally[1], tally[2]);
            if numeric > temporal && numeric > text {
                Shape::Numeric
            } else if temporal > numeric && temporal > text {
                Shape::Temporal
            } else {
                Shape::Text
            }
        })
        .collect()
}

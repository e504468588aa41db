//! Row tokenization: parsing a byte sample into a row matrix under one
//! candidate dialect.

use super::candidates::{PotentialDialect, normalize_newlines, split_lines};
use crate::metadata::Quote;
use foldhash::{HashMap, HashMapExt};
use std::cell::OnceCell;

/// A sample tokenized under one candidate dialect.
///
/// Rows are kept exactly as tokenized; ragged rows are preserved. The modal
/// field count is computed on first use and memoized so that header
/// detection and uniformity scoring observe the same value within a sniff.
#[derive(Debug, Clone)]
pub struct Table {
    /// The tokenized rows.
    pub rows: Vec<Vec<String>>,
    /// Number of fields in each row; `field_counts[i] == rows[i].len()`.
    pub field_counts: Vec<usize>,
    modal: OnceCell<usize>,
    unclosed_quote: bool,
}

impl Table {
    /// Build a table from already-tokenized rows.
    #[allow(dead_code)]
    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        let field_counts = rows.iter().map(Vec::len).collect();
        Self {
            rows,
            field_counts,
            modal: OnceCell::new(),
            unclosed_quote: false,
        }
    }

    /// Tokenize `data` under `dialect`, honoring quoted spans when the
    /// dialect has a quote convention. `max_rows` of 0 means unlimited.
    pub fn parse(data: &[u8], dialect: &PotentialDialect, max_rows: usize) -> Self {
        let normalized = normalize_newlines(data, dialect.line_terminator);
        let limit = if max_rows == 0 { usize::MAX } else { max_rows };

        let (rows, unclosed_quote) = match dialect.quote {
            Quote::Some(q) => tokenize_quoted(&normalized, dialect.delimiter, q, limit),
            Quote::None => (tokenize_plain(&normalized, dialect.delimiter, limit), false),
        };

        let field_counts = rows.iter().map(Vec::len).collect();
        Self {
            rows,
            field_counts,
            modal: OnceCell::new(),
            unclosed_quote,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[inline]
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// True when a quoted span was still open at the end of the sample.
    #[inline]
    pub fn has_unclosed_quote(&self) -> bool {
        self.unclosed_quote
    }

    /// The most frequent field count. Exact ties break toward the larger
    /// count: assuming more columns only leaves extra fields empty, while
    /// assuming fewer silently truncates data.
    pub fn modal_field_count(&self) -> usize {
        *self.modal.get_or_init(|| {
            if self.field_counts.is_empty() {
                return 0;
            }
            let mut histogram: HashMap<usize, usize> =
                HashMap::with_capacity(self.field_counts.len());
            for &count in &self.field_counts {
                *histogram.entry(count).or_insert(0) += 1;
            }
            histogram
                .into_iter()
                .max_by(|(count_a, freq_a), (count_b, freq_b)| {
                    freq_a.cmp(freq_b).then_with(|| count_a.cmp(count_b))
                })
                .map_or(0, |(count, _)| count)
        })
    }

    /// True iff every row has the modal field count.
    pub fn is_uniform(&self) -> bool {
        let modal = self.modal_field_count();
        self.field_counts.iter().all(|&count| count == modal)
    }

    #[inline]
    pub fn min_field_count(&self) -> usize {
        self.field_counts.iter().copied().min().unwrap_or(0)
    }

    #[inline]
    pub fn max_field_count(&self) -> usize {
        self.field_counts.iter().copied().max().unwrap_or(0)
    }
}

fn take_field(buf: &mut Vec<u8>) -> String {
    let field = String::from_utf8_lossy(buf).into_owned();
    buf.clear();
    field
}

/// Quote-aware tokenization over LF-normalized bytes.
///
/// A field entering quoted mode must *begin* with the quote byte. Inside a
/// quoted span, delimiters and newlines are content and a doubled quote is
/// an escaped literal quote. Blank lines produce no row. Returns the rows
/// and whether a quoted span ran past the end of the sample.
fn tokenize_quoted(
    bytes: &[u8],
    delimiter: u8,
    quote: u8,
    limit: usize,
) -> (Vec<Vec<String>>, bool) {
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field: Vec<u8> = Vec::new();
    // Tracks whether the current field has consumed any byte, so an empty
    // quoted field ("") still yields a row and a mid-field quote stays
    // literal.
    let mut field_started = false;
    let mut in_quotes = false;

    let mut i = 0;
    while i < bytes.len() && rows.len() < limit {
        let b = bytes[i];

        if in_quotes {
            if b == quote {
                if bytes.get(i + 1) == Some(&quote) {
                    field.push(quote);
                    i += 2;
                } else {
                    in_quotes = false;
                    i += 1;
                }
            } else {
                field.push(b);
                i += 1;
            }
            continue;
        }

        if b == quote && !field_started {
            in_quotes = true;
            field_started = true;
            i += 1;
        } else if b == delimiter {
            row.push(take_field(&mut field));
            field_started = false;
            i += 1;
        } else if b == b'\n' {
            if field_started || !row.is_empty() {
                row.push(take_field(&mut field));
                rows.push(std::mem::take(&mut row));
            }
            field_started = false;
            i += 1;
        } else {
            field.push(b);
            field_started = true;
            i += 1;
        }
    }

    // A span still open after the row cap is truncation, not malformed
    // input; only an open span at the true end of the sample counts.
    let unclosed = in_quotes && i >= bytes.len();
    if rows.len() < limit && (field_started || !row.is_empty()) {
        row.push(take_field(&mut field));
        rows.push(row);
    }
    (rows, unclosed)
}

/// Tokenization without a quote convention: split physical lines, then
/// split each line on the delimiter. Quote bytes are ordinary content.
fn tokenize_plain(bytes: &[u8], delimiter: u8, limit: usize) -> Vec<Vec<String>> {
    let (lines, _) = split_lines(bytes);
    lines
        .into_iter()
        .filter(|line| !line.is_empty())
        .take(limit)
        .map(|line| {
            line.split(|&b| b == delimiter)
                .map(|f| String::from_utf8_lossy(f).into_owned())
                .collect()
        })
        .collect()
}

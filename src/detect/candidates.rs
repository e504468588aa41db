//! Candidate dialect generation and line-terminator handling.

use crate::metadata::{LineTerminator, Quote};
use memchr::memchr2;
use std::borrow::Cow;

/// A dialect hypothesis, not yet validated. Created per candidate during
/// the search and discarded after scoring.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PotentialDialect {
    /// Field delimiter byte.
    pub delimiter: u8,
    /// Quote convention.
    pub quote: Quote,
    /// Line terminator, detected once for the whole sample.
    pub line_terminator: LineTerminator,
}

impl PotentialDialect {
    pub const fn new(delimiter: u8, quote: Quote, line_terminator: LineTerminator) -> Self {
        Self {
            delimiter,
            quote,
            line_terminator,
        }
    }
}

/// Delimiters searched when none is forced, ordered by real-world frequency.
pub const DELIMITERS: &[u8] = b",\t;|";

/// Quote conventions searched when none is forced.
pub const QUOTES: &[Quote] = &[Quote::Some(b'"'), Quote::Some(b'\''), Quote::None];

/// Detect the line terminator from the first `\r\n`, `\n`, or `\r` in the
/// sample. A sample without any terminator is a single line; LF is assumed.
pub fn detect_line_terminator(data: &[u8]) -> LineTerminator {
    match memchr2(b'\r', b'\n', data) {
        Some(pos) if data[pos] == b'\n' => LineTerminator::LF,
        Some(pos) if data.get(pos + 1) == Some(&b'\n') => LineTerminator::CRLF,
        Some(_) => LineTerminator::CR,
        None => LineTerminator::LF,
    }
}

/// Split the sample into physical lines on the detected terminator.
///
/// An empty sample yields zero lines; a trailing terminator does not yield
/// a trailing empty line.
pub fn split_lines(data: &[u8]) -> (Vec<&[u8]>, LineTerminator) {
    let terminator = detect_line_terminator(data);
    let lines = data
        .split(|&b| b == terminator.as_bytes()[0])
        .map(|line| match terminator {
            // For CRLF the split on `\r` leaves the `\n` at the line start.
            LineTerminator::CRLF => line.strip_prefix(b"\n").unwrap_or(line),
            _ => line,
        })
        .collect::<Vec<_>>();
    let lines = match lines.as_slice() {
        [head @ .., last] if last.is_empty() => head.to_vec(),
        _ => lines,
    };
    (lines, terminator)
}

/// Rewrite the sample's terminators as LF so tokenization only has to look
/// for a single row-boundary byte. LF input is returned borrowed.
pub fn normalize_newlines(data: &[u8], terminator: LineTerminator) -> Cow<'_, [u8]> {
    match terminator {
        LineTerminator::LF => Cow::Borrowed(data),
        LineTerminator::CRLF => {
            let mut out = Vec::with_capacity(data.len());
            let mut i = 0;
            while i < data.len() {
                if data[i] == b'\r' && data.get(i + 1) == Some(&b'\n') {
                    out.push(b'\n');
                    i += 2;
                } else {
                    out.push(data[i]);
                    i += 1;
                }
            }
            Cow::Owned(out)
        }
        LineTerminator::CR => Cow::Owned(
            data.iter()
                .map(|&b| if b == b'\r' { b'\n' } else { b })
                .collect(),
        ),
    }
}

/// Generate the candidate set for one sniff. A forced delimiter or quote
/// fixes that dimension; only the remaining dimensions are searched. The
/// terminator is never searched.
pub fn generate_candidates(
    forced_delimiter: Option<u8>,
    forced_quote: Option<Quote>,
    line_terminator: LineTerminator,
) -> Vec<PotentialDialect> {
    let delimiters: Vec<u8> = match forced_delimiter {
        Some(d) => vec![d],
        None => DELIMITERS.to_vec(),
    };
    let quotes: Vec<Quote> = match forced_quote {
        Some(q) => vec![q],
        None => QUOTES.to_vec(),
    };

    let mut candidates = Vec::with_capacity(delimiters.len() * quotes.len());
    for &delimiter in &delimiters {
        for &quote in &quotes {
            candidates.push(PotentialDialect::new(delimiter, quote, line_terminator));
        }
    }
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_terminator_occurrence_wins() {
        assert_eq!(detect_line_terminator(b"a,b\nc,d\r\n"), LineTerminator::LF);
        assert_eq!(
            detect_line_terminator(b"a,b\r\nc,d\n"),
            LineTerminator::CRLF
        );
        assert_eq!(detect_line_terminator(b"a,b\rc,d"), LineTerminator::CR);
        assert_eq!(detect_line_terminator(b"no terminator"), LineTerminator::LF);
        assert_eq!(detect_line_terminator(b""), LineTerminator::LF);
    }

    #[test]
    fn split_lines_lf() {
        let (lines, terminator) = split_lines(b"a,b\n1,2\n");
        assert_eq!(terminator, LineTerminator::LF);
        assert_eq!(lines, vec![&b"a,b"[..], &b"1,2"[..]]);
    }

    #[test]
    fn split_lines_crlf() {
        let (lines, terminator) = split_lines(b"a,b\r\n1,2\r\n3,4");
        assert_eq!(terminator, LineTerminator::CRLF);
        assert_eq!(lines, vec![&b"a,b"[..], &b"1,2"[..], &b"3,4"[..]]);
    }

    #[test]
    fn split_lines_edge_cases() {
        let (lines, _) = split_lines(b"");
        assert!(lines.is_empty());

        let (lines, terminator) = split_lines(b"single line");
        assert_eq!(terminator, LineTerminator::LF);
        assert_eq!(lines, vec![&b"single line"[..]]);
    }

    #[test]
    fn normalize_is_zero_copy_for_lf() {
        let data = b"a,b\n1,2\n";
        assert!(matches!(
            normalize_newlines(data, LineTerminator::LF),
            Cow::Borrowed(_)
        ));
        assert_eq!(
            normalize_newlines(b"a\r\nb", LineTerminator::CRLF).as_ref(),
            b"a\nb"
        );
        assert_eq!(
            normalize_newlines(b"a\rb", LineTerminator::CR).as_ref(),
            b"a\nb"
        );
    }

    #[test]
    fn candidate_set_is_full_cross_product() {
        let all = generate_candidates(None, None, LineTerminator::LF);
        assert_eq!(all.len(), DELIMITERS.len() * QUOTES.len());
    }

    #[test]
    fn forced_values_fix_their_dimension() {
        let forced_delim = generate_candidates(Some(b'^'), None, LineTerminator::LF);
        assert_eq!(forced_delim.len(), QUOTES.len());
        assert!(forced_delim.iter().all(|c| c.delimiter == b'^'));

        let forced_both =
            generate_candidates(Some(b';'), Some(Quote::None), LineTerminator::CRLF);
        assert_eq!(forced_both.len(), 1);
        assert_eq!(forced_both[0].quote, Quote::None);
    }
}

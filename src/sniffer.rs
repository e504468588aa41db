//! The sniffer entry point: configuration plus the `sniff_*` operations.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::detect::candidates::{detect_line_terminator, generate_candidates};
use crate::detect::header::detect_header;
use crate::detect::score::{ScoredCandidate, find_best, score_candidates};
use crate::detect::table::Table;
use crate::encoding::strip_bom;
use crate::error::{Result, SnifferError};
use crate::metadata::{Dialect, Header, LineTerminator, Metadata, Quote};
use crate::sample::SampleSize;

/// Dialect sniffer for delimited text.
///
/// Configuration is fixed once built; a configured sniffer is a pure
/// function of the sample bytes and can be reused (and shared) across any
/// number of calls.
///
/// # Example
///
/// ```no_run
/// use tabsniff::Sniffer;
///
/// let sniffer = Sniffer::new();
/// let metadata = sniffer.sniff_path("data.csv").unwrap();
/// println!("delimiter: {}", metadata.dialect.delimiter as char);
/// println!("header: {}", metadata.dialect.header.has_header_row);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Sniffer {
    sample_size: SampleSize,
    forced_delimiter: Option<u8>,
    forced_quote: Option<Quote>,
}

impl Sniffer {
    /// A sniffer with default settings: search all candidate dialects,
    /// sample roughly 100 records from readers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bound how much data the reader entry points pull in.
    pub fn with_sample_size(mut self, sample_size: SampleSize) -> Self {
        self.sample_size = sample_size;
        self
    }

    /// Fix the delimiter; only the quote convention is searched.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.forced_delimiter = Some(delimiter);
        self
    }

    /// Fix the quote convention; only the delimiter is searched.
    pub fn with_quote(mut self, quote: Quote) -> Self {
        self.forced_quote = Some(quote);
        self
    }

    /// Sniff a delimited file at the given path.
    pub fn sniff_path<P: AsRef<Path>>(&self, path: P) -> Result<Metadata> {
        let file = File::open(path.as_ref())?;
        self.sniff_reader(BufReader::new(file))
    }

    /// Sniff delimited data from a reader, sampling according to the
    /// configured [`SampleSize`].
    pub fn sniff_reader<R: Read>(&self, reader: R) -> Result<Metadata> {
        let data = self.read_sample(reader)?;
        self.sniff_bytes(&data)
    }

    /// Sniff a byte sample directly. This is the core operation: pure,
    /// synchronous, and free of IO; the caller bounds the sample.
    pub fn sniff_bytes(&self, data: &[u8]) -> Result<Metadata> {
        let data = strip_bom(data);

        if data.is_empty() {
            return Ok(empty_metadata(LineTerminator::LF));
        }

        if let Err(e) = simdutf8::basic::from_utf8(data) {
            return Err(SnifferError::Encoding {
                msg: "sample is not valid UTF-8".into(),
                source: Some(Box::new(e)),
            });
        }

        let line_terminator = detect_line_terminator(data);
        let candidates =
            generate_candidates(self.forced_delimiter, self.forced_quote, line_terminator);
        let scored = score_candidates(data, &candidates, self.sample_size.max_rows());

        match find_best(&scored) {
            Some(best) => self.build_metadata(data, best, line_terminator),
            // Nothing parsed into a single row (e.g. all-blank sample).
            None => Ok(empty_metadata(line_terminator)),
        }
    }

    /// Sniff a remote file over HTTP, fetching only as much as the
    /// configured [`SampleSize`] requires.
    #[cfg(feature = "http")]
    pub fn sniff_url(&self, url: &str) -> Result<Metadata> {
        let max_bytes = match self.sample_size {
            SampleSize::Bytes(n) => Some(n),
            SampleSize::Records(n) => Some(n.saturating_mul(1024).max(8192)),
            SampleSize::All => None,
        };
        let fetched = crate::http::fetch_url(url, max_bytes)
            .map_err(|e| SnifferError::Io(std::io::Error::other(e)))?;
        self.sniff_bytes(&fetched.data)
    }

    fn read_sample<R: Read>(&self, mut reader: R) -> Result<Vec<u8>> {
        match self.sample_size {
            SampleSize::Bytes(n) => {
                let mut buf = Vec::with_capacity(n.min(1 << 20));
                reader.take(n as u64).read_to_end(&mut buf)?;
                Ok(buf)
            }
            SampleSize::All => {
                let mut buf = Vec::new();
                reader.read_to_end(&mut buf)?;
                Ok(buf)
            }
            SampleSize::Records(n) => {
                // Read chunkwise until the sample spans the requested
                // number of records, with slack for preamble and header.
                let target = n.saturating_add(8);
                let mut buf = Vec::new();
                let mut chunk = [0u8; 8192];
                loop {
                    let got = reader.read(&mut chunk)?;
                    if got == 0 {
                        break;
                    }
                    buf.extend_from_slice(&chunk[..got]);
                    if bytecount::count(&buf, b'\n') >= target {
                        break;
                    }
                }
                Ok(buf)
            }
        }
    }

    fn build_metadata(
        &self,
        data: &[u8],
        best: &ScoredCandidate,
        line_terminator: LineTerminator,
    ) -> Result<Metadata> {
        if best.table.has_unclosed_quote() {
            return Err(SnifferError::parse(
                "quoted field left open at end of sample",
            ));
        }

        let header = detect_header(&best.table);
        let num_fields = best.score.num_fields;
        let fields = field_names(&best.table, &header, num_fields);
        let avg_record_len = data.len() / best.table.num_rows();

        Ok(Metadata {
            dialect: Dialect {
                delimiter: best.score.dialect.delimiter,
                quote: best.score.dialect.quote,
                line_terminator,
                header,
                flexible: !best.score.is_uniform,
            },
            num_fields,
            fields,
            avg_record_len,
        })
    }
}

fn empty_metadata(line_terminator: LineTerminator) -> Metadata {
    Metadata {
        dialect: Dialect {
            line_terminator,
            header: Header::new(false, 0),
            ..Dialect::default()
        },
        num_fields: 0,
        fields: Vec::new(),
        avg_record_len: 0,
    }
}

fn field_names(table: &Table, header: &Header, num_fields: usize) -> Vec<String> {
    if !header.has_header_row {
        return (1..=num_fields).map(|i| format!("field_{i}")).collect();
    }
    let mut names = table.rows[header.num_preamble_rows].clone();
    names.truncate(num_fields);
    while names.len() < num_fields {
        names.push(format!("field_{}", names.len() + 1));
    }
    names
}

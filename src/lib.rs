//! tabsniff: dialect sniffing for delimited text files.
//!
//! Given the raw bytes of an unknown delimited file, the sniffer infers
//! the structural dialect — field delimiter, quote convention, line
//! terminator, header and preamble layout, and whether records vary in
//! field count — without being told anything in advance.
//!
//! # Quick start
//!
//! ```
//! use tabsniff::Sniffer;
//!
//! let metadata = Sniffer::new()
//!     .sniff_bytes(b"id,name,age\n1,alice,25\n2,bob,30")
//!     .unwrap();
//!
//! assert_eq!(metadata.dialect.delimiter, b',');
//! assert!(metadata.dialect.header.has_header_row);
//! assert_eq!(metadata.fields, vec!["id", "name", "age"]);
//! ```
//!
//! # How detection works
//!
//! The sample is normalized (BOM stripped, UTF-8 validated, line
//! terminator detected from its first occurrence), then tokenized under
//! every candidate dialect: each combination of common delimiters and
//! quote conventions, or just the dimensions left open by
//! [`Sniffer::with_delimiter`] / [`Sniffer::with_quote`]. Each candidate's
//! table is scored by two independent uniformity measures over its per-row
//! field counts, and the best-scoring candidate wins. The winner's table
//! is then searched for comment and report preamble rows and for a header
//! row; field names fall back to `field_1 .. field_n` when no header is
//! found.
//!
//! Ambiguity is resolved by scoring, never by failing: an oddly shaped
//! file yields a best-effort dialect with `flexible: true`. Errors are
//! reserved for input that is not text ([`SnifferError::Encoding`]) or a
//! quoted field left open at the end of the sample
//! ([`SnifferError::Parse`]).

mod detect;
mod encoding;
mod error;
mod metadata;
mod sample;
mod sniffer;

#[cfg(feature = "http")]
pub mod http;

pub use error::{Result, SnifferError};
pub use metadata::{Dialect, Header, LineTerminator, Metadata, Quote};
pub use sample::SampleSize;
pub use sniffer::Sniffer;

// For callers holding bytes in a legacy encoding.
pub use encoding::{detect_and_transcode, is_utf8};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_surface_is_reachable() {
        let _sniffer = Sniffer::new()
            .with_sample_size(SampleSize::Records(50))
            .with_delimiter(b',')
            .with_quote(Quote::Some(b'"'));
        let _dialect = Dialect::default();
        let _terminator = LineTerminator::CRLF;
    }

    #[test]
    fn doc_example_holds() {
        let metadata = Sniffer::new()
            .sniff_bytes(b"id,name,age\n1,alice,25\n2,bob,30")
            .unwrap();
        assert_eq!(metadata.dialect.delimiter, b',');
        assert!(metadata.dialect.header.has_header_row);
        assert_eq!(metadata.num_fields, 3);
    }
}

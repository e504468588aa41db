use std::io;
use thiserror::Error;

type Cause = Box<dyn std::error::Error + Send + Sync>;

/// Error type for dialect sniffing operations.
///
/// Heuristic ambiguity never surfaces here: an oddly shaped file still
/// produces a best-effort [`Metadata`](crate::Metadata). Errors are reserved
/// for input that admits no reasonable interpretation.
#[derive(Error, Debug)]
pub enum SnifferError {
    /// The sample cannot be treated as text under the assumed encoding.
    #[error("invalid text encoding: {msg}")]
    Encoding {
        msg: String,
        #[source]
        source: Option<Cause>,
    },

    /// Structural failure that the ragged-row policy cannot absorb, such as
    /// a quoted field left open at the end of the sample.
    #[error("unparseable structure: {msg}")]
    Parse {
        msg: String,
        #[source]
        source: Option<Cause>,
    },

    /// IO error while reading a sample.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl SnifferError {
    pub(crate) fn parse(msg: impl Into<String>) -> Self {
        SnifferError::Parse {
            msg: msg.into(),
            source: None,
        }
    }
}

/// Result type alias for sniffing operations.
pub type Result<T> = std::result::Result<T, SnifferError>;

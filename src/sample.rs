/// How much of a file the reader entry points pull into memory before
/// sniffing. `sniff_bytes` ignores this: the caller already bounded the
/// sample by constructing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleSize {
    /// Read enough bytes to cover roughly this many records, and cap the
    /// number of rows scored per candidate at the same value.
    Records(usize),
    /// Read exactly this many bytes.
    Bytes(usize),
    /// Read the entire file.
    ///
    /// # Warning
    ///
    /// This loads the whole file into memory. For large files prefer
    /// [`SampleSize::Bytes`] with a sensible limit.
    All,
}

impl Default for SampleSize {
    fn default() -> Self {
        SampleSize::Records(100)
    }
}

impl SampleSize {
    /// Row cap to apply while scoring candidates; 0 means unlimited.
    pub(crate) fn max_rows(&self) -> usize {
        match self {
            SampleSize::Records(n) => *n,
            SampleSize::Bytes(_) | SampleSize::All => 0,
        }
    }
}

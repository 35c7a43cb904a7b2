use thiserror::Error;

/// The unified error type for the `ohlc_feed` crate.
#[derive(Debug, Error)]
pub enum FeedError {
    /// A generic I/O error (e.g., data file missing or unreadable).
    #[error("I/O error")]
    Io(#[from] std::io::Error),

    /// A malformed CSV record or header.
    #[error("CSV error")]
    Csv(#[from] csv::Error),

    /// A timestamp that cannot be parsed. Fatal for the whole load, since
    /// the bar sequence is unusable without orderable time.
    #[error("row {row}: unparseable timestamp {value:?}")]
    Timestamp {
        /// Zero-based data row index.
        row: usize,
        /// The offending raw field.
        value: String,
    },
}

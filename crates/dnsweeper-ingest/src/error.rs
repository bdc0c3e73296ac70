use thiserror::Error;

/// Result type alias for ingestion operations
pub type IngestResult<T> = std::result::Result<T, IngestError>;

/// Batch-level ingestion failures
#[derive(Error, Debug)]
pub enum IngestError {
    /// The CSV reader could not tokenize the input
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Input is empty or has no header row
    #[error("input has no header row")]
    MissingHeader,

    /// Delimiter is not a single ASCII character
    #[error("unsupported delimiter: {0:?}")]
    Delimiter(char),

    /// Fallback encoding label not recognized
    #[error("unknown encoding label: {0}")]
    UnknownEncoding(String),

    /// File read error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<IngestError> for dnsweeper_core::DnsweeperError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::Csv(e) => Self::Csv(e.to_string()),
            IngestError::MissingHeader => Self::MissingHeader,
            IngestError::Delimiter(c) => Self::Config(format!("unsupported delimiter: {c:?}")),
            IngestError::UnknownEncoding(label) => {
                Self::Config(format!("unknown encoding label: {label}"))
            }
            IngestError::Io(e) => Self::Io(e),
        }
    }
}

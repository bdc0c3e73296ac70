use thiserror::Error;

/// Result type alias for DNSweeper operations
pub type Result<T> = std::result::Result<T, DnsweeperError>;

/// Errors that abort a whole ingest or audit call.
///
/// Row-level defects never surface here; they are collected in
/// [`ParseResult::errors`](crate::ParseResult) instead.
#[derive(Error, Debug)]
pub enum DnsweeperError {
    /// The tabular reader could not tokenize the input
    #[error("CSV framing error: {0}")]
    Csv(String),

    /// The input has no header row
    #[error("input has no header row")]
    MissingHeader,

    /// A provider name did not match any registered parser
    #[error("unknown provider: {0}")]
    UnknownProvider(String),

    /// A suspicious-name pattern failed to compile
    #[error("invalid suspicious pattern {pattern:?}: {reason}")]
    InvalidPattern {
        /// Pattern source as configured
        pattern: String,
        /// Compiler message
        reason: String,
    },

    /// Configuration is invalid
    #[error("configuration error: {0}")]
    Config(String),

    /// File could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

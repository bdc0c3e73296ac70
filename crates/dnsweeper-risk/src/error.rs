use thiserror::Error;

/// Result type alias for risk engine construction
pub type RiskResult<T> = std::result::Result<T, RiskError>;

/// Errors raised while building a risk calculator.
///
/// Scoring itself never fails.
#[derive(Error, Debug)]
pub enum RiskError {
    /// A suspicious-name pattern is not a valid regular expression
    #[error("invalid suspicious pattern {pattern:?}: {source}")]
    Pattern {
        /// Pattern source as configured
        pattern: String,
        /// Compiler error
        #[source]
        source: regex::Error,
    },

    /// Thresholds are out of range
    #[error("invalid risk config: {0}")]
    Config(String),
}

impl From<RiskError> for dnsweeper_core::DnsweeperError {
    fn from(err: RiskError) -> Self {
        match err {
            RiskError::Pattern { pattern, source } => Self::InvalidPattern {
                pattern,
                reason: source.to_string(),
            },
            RiskError::Config(msg) => Self::Config(msg),
        }
    }
}

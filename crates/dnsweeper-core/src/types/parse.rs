use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::CanonicalRecord;
use crate::DnsweeperError;

/// Zone export schema a file was parsed with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Cloudflare dashboard export
    Cloudflare,
    /// AWS Route53 record export
    Route53,
    /// Hand-made CSV with `domain,record_type,value` columns
    Generic,
}

impl Provider {
    /// All providers in detection priority order (most specific first)
    pub const ALL: [Self; 3] = [Self::Cloudflare, Self::Route53, Self::Generic];

    /// Lower-case name used in record ids and on the command line
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cloudflare => "cloudflare",
            Self::Route53 => "route53",
            Self::Generic => "generic",
        }
    }
}

impl FromStr for Provider {
    type Err = DnsweeperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cloudflare" | "cf" => Ok(Self::Cloudflare),
            "route53" | "aws" => Ok(Self::Route53),
            "generic" | "csv" => Ok(Self::Generic),
            other => Err(DnsweeperError::UnknownProvider(other.to_string())),
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category of a row-level defect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParseErrorKind {
    /// One or more required columns are absent or empty
    MissingFields,
    /// A present field could not be converted into the record model
    ConversionError,
}

impl std::fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingFields => write!(f, "missing-fields"),
            Self::ConversionError => write!(f, "conversion-error"),
        }
    }
}

/// A defect scoped to one input row. Never aborts the batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseError {
    /// Defect category
    pub kind: ParseErrorKind,
    /// Human-readable description
    pub message: String,
    /// Zero-based data row index (header excluded)
    pub row_index: usize,
}

impl ParseError {
    /// Row is missing the listed required fields
    #[must_use]
    pub fn missing_fields(row_index: usize, fields: &[&str]) -> Self {
        Self {
            kind: ParseErrorKind::MissingFields,
            message: format!("missing required fields: {}", fields.join(", ")),
            row_index,
        }
    }

    /// Row could not be converted
    #[must_use]
    pub fn conversion(row_index: usize, message: impl Into<String>) -> Self {
        Self {
            kind: ParseErrorKind::ConversionError,
            message: message.into(),
            row_index,
        }
    }
}

/// How much an encoding guess can be trusted
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reliability {
    /// Heuristics barely separated candidates
    Low,
    /// Heuristics favour one candidate
    Medium,
    /// BOM present or unambiguous byte patterns
    High,
}

impl Reliability {
    /// Bucket a confidence value
    #[must_use]
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= 0.9 {
            Self::High
        } else if confidence >= 0.6 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// Outcome of character encoding detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodingInfo {
    /// WHATWG encoding label (e.g. `UTF-8`, `Shift_JIS`)
    pub detected_encoding: String,
    /// Confidence in `[0, 1]`
    pub confidence: f64,
    /// Bucketed confidence
    pub reliability: Reliability,
    /// A byte-order mark decided the result
    pub bom_present: bool,
}

/// Outcome of delimiter detection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelimiterInfo {
    /// Candidates that appeared consistently, best first
    pub detected: Vec<char>,
    /// Delimiter the table was split with
    pub used: char,
}

/// Parse bookkeeping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseMeta {
    /// Schema the rows were parsed with
    pub provider: Provider,
    /// Normalized (trimmed, lower-cased) header names
    pub headers: Vec<String>,
    /// When parsing finished
    pub parsed_at: DateTime<Utc>,
}

/// Records and row defects produced from one file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResult {
    /// Records in input row order
    pub records: Vec<CanonicalRecord>,
    /// Row-level defects in input row order
    pub errors: Vec<ParseError>,
    /// Data rows seen (header excluded)
    pub total_rows: usize,
    /// Rows that produced a record
    pub valid_rows: usize,
    /// Provider, headers and timestamp
    pub meta: ParseMeta,
    /// Present when parsing started from raw bytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding_info: Option<EncodingInfo>,
    /// Present when parsing started from raw bytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delimiter_info: Option<DelimiterInfo>,
}

impl ParseResult {
    /// Returns true if every row produced a record
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Errors of one kind
    pub fn errors_of(&self, kind: ParseErrorKind) -> impl Iterator<Item = &ParseError> {
        self.errors.iter().filter(move |e| e.kind == kind)
    }
}

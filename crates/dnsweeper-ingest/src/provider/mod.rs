//! Provider-specific row parsers.
//!
//! Each provider maps its own column layout onto [`CanonicalRecord`]. The
//! shared [`RowParser::parse`] loop handles required-field checks, error
//! collection and bookkeeping so that individual parsers only describe
//! their columns.

mod cloudflare;
mod generic;
mod route53;

pub use cloudflare::CloudflareParser;
pub use generic::GenericParser;
pub use route53::Route53Parser;

use chrono::Utc;
use dnsweeper_core::{
    CanonicalRecord, ParseError, ParseMeta, ParseResult, Provider, RecordType, DEFAULT_TTL,
};
use tracing::debug;

use crate::table::{Row, Table};

/// A field that is present but cannot be converted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Column name
    pub field: &'static str,
    /// What was wrong
    pub reason: String,
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid {}: {}", self.field, self.reason)
    }
}

/// Converts the rows of one provider's export into canonical records.
pub trait RowParser: Send + Sync {
    /// Provider this parser handles
    fn provider(&self) -> Provider;

    /// Columns every row must fill
    fn required_fields(&self) -> &'static [&'static str];

    /// Build one record from a row whose required fields are present
    fn convert(&self, row: &Row<'_>, id: String) -> Result<CanonicalRecord, FieldError>;

    /// Returns true if `headers` contain every required column
    fn matches(&self, headers: &[String]) -> bool {
        self.required_fields()
            .iter()
            .all(|field| headers.iter().any(|h| h == field))
    }

    /// Parse all rows, collecting row-level errors instead of failing.
    fn parse(&self, table: &Table) -> ParseResult {
        let provider = self.provider();
        let required = self.required_fields();

        let (records, errors) = table.rows().fold(
            (Vec::with_capacity(table.len()), Vec::new()),
            |(mut records, mut errors), row| {
                let missing = row.missing(required);
                if missing.is_empty() {
                    let id = format!("{}-{}", provider.as_str(), row.index());
                    match self.convert(&row, id) {
                        Ok(record) => records.push(record),
                        Err(e) => errors.push(ParseError::conversion(row.index(), e.to_string())),
                    }
                } else {
                    errors.push(ParseError::missing_fields(row.index(), &missing));
                }
                (records, errors)
            },
        );

        debug!(
            provider = provider.as_str(),
            records = records.len(),
            errors = errors.len(),
            "rows parsed"
        );

        ParseResult {
            valid_rows: records.len(),
            total_rows: table.len(),
            records,
            errors,
            meta: ParseMeta {
                provider,
                headers: table.headers().to_vec(),
                parsed_at: Utc::now(),
            },
            encoding_info: None,
            delimiter_info: None,
        }
    }
}

/// Build the provider-neutral part of a record.
///
/// Shared by all parsers: validates the owner name, strips the root dot and
/// applies the TTL default. Any type token is kept, unknown ones as
/// [`RecordType::Other`].
pub(crate) fn base_record(
    id: String,
    name: &str,
    record_type: &str,
    value: &str,
    ttl: Option<&str>,
    name_field: &'static str,
) -> Result<CanonicalRecord, FieldError> {
    let name = name.strip_suffix('.').unwrap_or(name);
    if name.is_empty() || name.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(FieldError {
            field: name_field,
            reason: format!("{name:?} is not a domain name"),
        });
    }

    Ok(CanonicalRecord::new(id, name, RecordType::from(record_type), value).with_ttl(parse_ttl(ttl)))
}

/// TTL in seconds, [`DEFAULT_TTL`] when absent or not a non-negative integer
#[must_use]
pub fn parse_ttl(raw: Option<&str>) -> u32 {
    raw.and_then(|s| s.parse().ok()).unwrap_or(DEFAULT_TTL)
}

/// Optional small integer, `None` unless it parses
#[must_use]
pub fn parse_u16(raw: Option<&str>) -> Option<u16> {
    raw.and_then(|s| s.parse().ok())
}

/// Optional boolean in the spellings exports commonly use
#[must_use]
pub fn parse_flag(raw: Option<&str>) -> Option<bool> {
    match raw?.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Some(true),
        "false" | "no" | "0" | "off" => Some(false),
        _ => None,
    }
}

//! Hand-made CSV (`domain,record_type,value,ttl,priority,weight,port`).

use dnsweeper_core::{CanonicalRecord, Provider};

use super::{base_record, parse_u16, FieldError, RowParser};
use crate::table::Row;

/// Catch-all parser for generic CSV files
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericParser;

impl RowParser for GenericParser {
    fn provider(&self) -> Provider {
        Provider::Generic
    }

    fn required_fields(&self) -> &'static [&'static str] {
        &["domain", "record_type", "value"]
    }

    fn convert(&self, row: &Row<'_>, id: String) -> Result<CanonicalRecord, FieldError> {
        let mut record = base_record(
            id,
            row.get("domain").unwrap_or_default(),
            row.get("record_type").unwrap_or_default(),
            row.get("value").unwrap_or_default(),
            row.get("ttl"),
            "domain",
        )?;
        record.priority = parse_u16(row.get("priority"));
        record.weight = parse_u16(row.get("weight"));
        record.port = parse_u16(row.get("port"));
        Ok(record)
    }
}

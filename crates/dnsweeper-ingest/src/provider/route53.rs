//! AWS Route53 record export (`name,type,value,ttl,weight,setidentifier`).

use dnsweeper_core::{CanonicalRecord, Provider};

use super::{base_record, parse_u16, FieldError, RowParser};
use crate::table::Row;

/// Parser for Route53 CSV exports
#[derive(Debug, Clone, Copy, Default)]
pub struct Route53Parser;

impl RowParser for Route53Parser {
    fn provider(&self) -> Provider {
        Provider::Route53
    }

    fn required_fields(&self) -> &'static [&'static str] {
        &["name", "type", "value"]
    }

    fn convert(&self, row: &Row<'_>, id: String) -> Result<CanonicalRecord, FieldError> {
        let mut record = base_record(
            id,
            row.get("name").unwrap_or_default(),
            row.get("type").unwrap_or_default(),
            row.get("value").unwrap_or_default(),
            row.get("ttl"),
            "name",
        )?;
        record.weight = parse_u16(row.get("weight"));
        record.set_identifier = row
            .get_any(&["setidentifier", "set_identifier"])
            .map(str::to_string);
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Table;
    use dnsweeper_core::{ParseErrorKind, RecordType};

    #[test]
    fn parses_weighted_records() {
        let table = Table::new(
            ["Name", "Type", "Value", "TTL", "Weight", "SetIdentifier"],
            vec![
                vec!["api.example.com.", "CNAME", "lb-1.example.net", "60", "70", "blue"],
                vec!["api.example.com.", "CNAME", "lb-2.example.net", "60", "30", "green"],
            ],
        );
        let result = Route53Parser.parse(&table);

        assert!(result.is_clean());
        assert_eq!(result.records.len(), 2);
        let first = &result.records[0];
        assert_eq!(first.id, "route53-0");
        assert_eq!(first.name, "api.example.com");
        assert_eq!(first.record_type, RecordType::Cname);
        assert_eq!(first.ttl, 60);
        assert_eq!(first.weight, Some(70));
        assert_eq!(first.set_identifier.as_deref(), Some("blue"));
        assert_eq!(result.records[1].id, "route53-1");
    }

    #[test]
    fn bad_ttl_never_fails_row() {
        let table = Table::new(
            ["name", "type", "value", "ttl", "weight"],
            vec![vec!["example.com", "TXT", "hello", "soon", "heavy"]],
        );
        let result = Route53Parser.parse(&table);

        assert!(result.is_clean());
        assert_eq!(result.records[0].ttl, 300);
        assert_eq!(result.records[0].weight, None);
    }

    #[test]
    fn conversion_error_keeps_batch_going() {
        let table = Table::new(
            ["name", "type", "value"],
            vec![
                vec!["bad host.example.com", "A", "192.0.2.1"],
                vec!["good.example.com", "A", "192.0.2.2"],
            ],
        );
        let result = Route53Parser.parse(&table);

        assert_eq!(result.valid_rows, 1);
        assert_eq!(result.records[0].name, "good.example.com");
        assert_eq!(result.errors[0].kind, ParseErrorKind::ConversionError);
        assert_eq!(result.errors[0].row_index, 0);
    }
}

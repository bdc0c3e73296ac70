//! Cloudflare dashboard export (`name,type,content,ttl,priority,proxied`).

use dnsweeper_core::{CanonicalRecord, Provider};

use super::{base_record, parse_flag, parse_u16, FieldError, RowParser};
use crate::table::Row;

/// Parser for Cloudflare CSV exports
#[derive(Debug, Clone, Copy, Default)]
pub struct CloudflareParser;

impl RowParser for CloudflareParser {
    fn provider(&self) -> Provider {
        Provider::Cloudflare
    }

    fn required_fields(&self) -> &'static [&'static str] {
        &["name", "type", "content"]
    }

    fn convert(&self, row: &Row<'_>, id: String) -> Result<CanonicalRecord, FieldError> {
        let mut record = base_record(
            id,
            row.get("name").unwrap_or_default(),
            row.get("type").unwrap_or_default(),
            row.get("content").unwrap_or_default(),
            row.get("ttl"),
            "name",
        )?;
        record.priority = parse_u16(row.get("priority"));
        record.proxied = parse_flag(row.get("proxied"));
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Table;
    use dnsweeper_core::{ParseErrorKind, RecordType};

    #[test]
    fn maps_content_to_value() {
        let table = Table::new(
            ["name", "type", "content", "ttl"],
            vec![vec!["example.com", "a", "192.168.1.1", "300"]],
        );
        let result = CloudflareParser.parse(&table);

        assert!(result.errors.is_empty());
        assert_eq!(result.valid_rows, 1);
        let record = &result.records[0];
        assert_eq!(record.id, "cloudflare-0");
        assert_eq!(record.name, "example.com");
        assert_eq!(record.record_type, RecordType::A);
        assert_eq!(record.value, "192.168.1.1");
        assert_eq!(record.ttl, 300);
        assert_eq!(record.created, record.updated);
    }

    #[test]
    fn optional_columns() {
        let table = Table::new(
            ["name", "type", "content", "ttl", "priority", "proxied"],
            vec![
                vec!["example.com", "MX", "mail.example.com", "3600", "10", "false"],
                vec!["www.example.com", "A", "192.0.2.1", "1", "", "true"],
            ],
        );
        let result = CloudflareParser.parse(&table);

        assert_eq!(result.records[0].priority, Some(10));
        assert_eq!(result.records[0].proxied, Some(false));
        assert_eq!(result.records[1].priority, None);
        assert_eq!(result.records[1].proxied, Some(true));
        assert_eq!(result.records[1].ttl, 1);
    }

    #[test]
    fn missing_content_is_row_error() {
        let table = Table::new(
            ["name", "type", "content"],
            vec![
                vec!["a.example.com", "A", ""],
                vec!["b.example.com", "A", "192.0.2.2"],
            ],
        );
        let result = CloudflareParser.parse(&table);

        assert_eq!(result.total_rows, 2);
        assert_eq!(result.valid_rows, 1);
        assert_eq!(result.records[0].id, "cloudflare-1");
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].kind, ParseErrorKind::MissingFields);
        assert_eq!(result.errors[0].row_index, 0);
        assert!(result.errors[0].message.contains("content"));
    }

    #[test]
    fn matches_headers() {
        let headers: Vec<String> = ["name", "type", "content", "ttl"].map(String::from).to_vec();
        assert!(CloudflareParser.matches(&headers));

        let route53: Vec<String> = ["name", "type", "value"].map(String::from).to_vec();
        assert!(!CloudflareParser.matches(&route53));
    }
}

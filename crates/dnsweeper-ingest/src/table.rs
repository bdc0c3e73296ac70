//! Header + rows view over a tokenized CSV file.

use csv::{ReaderBuilder, Trim};
use tracing::debug;

use crate::error::{IngestError, IngestResult};

/// Tokenized table with normalized headers.
///
/// Rows may be shorter or longer than the header; missing cells read as
/// absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Build a table from already-split cells. Headers are normalized.
    #[must_use]
    pub fn new<H, R>(headers: H, rows: Vec<Vec<R>>) -> Self
    where
        H: IntoIterator,
        H::Item: AsRef<str>,
        R: Into<String>,
    {
        Self {
            headers: headers
                .into_iter()
                .map(|h| normalize_header(h.as_ref()))
                .collect(),
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    /// Tokenize `text` with `delimiter`.
    ///
    /// Framing errors from the CSV reader are fatal for the whole file.
    pub fn from_text(text: &str, delimiter: char) -> IngestResult<Self> {
        let delimiter = u8::try_from(delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or(IngestError::Delimiter(delimiter))?;

        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .trim(Trim::All)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers: Vec<String> = reader.headers()?.iter().map(normalize_header).collect();
        if headers.iter().all(String::is_empty) {
            return Err(IngestError::MissingHeader);
        }

        let rows = reader
            .records()
            .map(|record| record.map(|r| r.iter().map(str::to_string).collect()))
            .collect::<Result<Vec<Vec<String>>, csv::Error>>()?;

        debug!(columns = headers.len(), rows = rows.len(), "table tokenized");
        Ok(Self { headers, rows })
    }

    /// Normalized header names
    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of data rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if there are no data rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column position of a normalized header name
    #[must_use]
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Returns true if every name in `fields` is a header
    #[must_use]
    pub fn has_columns(&self, fields: &[&str]) -> bool {
        fields.iter().all(|f| self.column(f).is_some())
    }

    /// Iterate data rows in input order
    pub fn rows(&self) -> impl ExactSizeIterator<Item = Row<'_>> {
        self.rows.iter().enumerate().map(move |(index, cells)| Row {
            table: self,
            cells,
            index,
        })
    }
}

/// One data row
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    table: &'a Table,
    cells: &'a [String],
    index: usize,
}

impl<'a> Row<'a> {
    /// Zero-based data row index
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Trimmed cell under `column`; `None` when the column or cell is absent or blank
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&'a str> {
        let position = self.table.column(column)?;
        self.cells
            .get(position)
            .map(|cell| cell.trim())
            .filter(|cell| !cell.is_empty())
    }

    /// First non-blank cell among several column aliases
    #[must_use]
    pub fn get_any(&self, columns: &[&str]) -> Option<&'a str> {
        columns.iter().find_map(|c| self.get(c))
    }

    /// Required columns that are absent or blank in this row
    #[must_use]
    pub fn missing<'f>(&self, required: &[&'f str]) -> Vec<&'f str> {
        required
            .iter()
            .copied()
            .filter(|field| self.get(field).is_none())
            .collect()
    }
}

/// Trim and lower-case a header name
#[must_use]
pub fn normalize_header(name: &str) -> String {
    name.trim().trim_start_matches('\u{feff}').trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_headers() {
        let table = Table::from_text(" Name , TYPE,Content\nexample.com,A,192.0.2.1\n", ',').unwrap();
        assert_eq!(table.headers(), ["name", "type", "content"]);
        assert!(table.has_columns(&["name", "content"]));
        assert!(!table.has_columns(&["value"]));
    }

    #[test]
    fn short_rows_are_tolerated() {
        let table = Table::from_text("domain,record_type,value\nexample.com,A\n", ',').unwrap();
        assert_eq!(table.len(), 1);

        let row = table.rows().next().unwrap();
        assert_eq!(row.get("domain"), Some("example.com"));
        assert_eq!(row.get("value"), None);
        assert_eq!(row.missing(&["domain", "value"]), vec!["value"]);
    }

    #[test]
    fn blank_cells_read_as_absent() {
        let table = Table::new(["name", "ttl"], vec![vec!["a.example.com", "   "]]);
        let row = table.rows().next().unwrap();
        assert_eq!(row.get("ttl"), None);
        assert_eq!(row.get_any(&["missing", "name"]), Some("a.example.com"));
    }

    #[test]
    fn quoted_fields_keep_delimiters() {
        let text = "name;type;content\nexample.com;TXT;\"v=spf1; -all\"\n";
        let table = Table::from_text(text, ';').unwrap();
        let row = table.rows().next().unwrap();
        assert_eq!(row.get("content"), Some("v=spf1; -all"));
    }

    #[test]
    fn empty_input_has_no_header() {
        assert!(matches!(
            Table::from_text("", ','),
            Err(IngestError::MissingHeader)
        ));
    }

    #[test]
    fn non_ascii_delimiter_rejected() {
        assert!(matches!(
            Table::from_text("a§b", '§'),
            Err(IngestError::Delimiter('§'))
        ));
    }

    #[test]
    fn row_indices_are_zero_based() {
        let table = Table::from_text("name\na\nb\nc\n", ',').unwrap();
        let indices: Vec<usize> = table.rows().map(|r| r.index()).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }
}

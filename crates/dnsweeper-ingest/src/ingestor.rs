//! Bytes-to-records entry point.

use std::path::Path;
use std::sync::Arc;

use dnsweeper_core::{DelimiterInfo, EncodingInfo, ParseResult, Provider};
use encoding_rs::Encoding;
use tracing::{debug, instrument};

use crate::delimiter::{detect_delimiter, DEFAULT_SAMPLE_LINES};
use crate::dispatch::ParserRegistry;
use crate::encoding::{detect_encoding, encoding_for_label, DEFAULT_FALLBACK};
use crate::error::{IngestError, IngestResult};
use crate::table::Table;

/// What the detectors concluded about a file, without parsing rows
#[derive(Debug, Clone, PartialEq)]
pub struct Sniff {
    /// Encoding decision
    pub encoding: EncodingInfo,
    /// Delimiter decision
    pub delimiter: DelimiterInfo,
    /// Provider picked from the header row
    pub provider: Provider,
    /// Normalized header row
    pub headers: Vec<String>,
}

/// Parses zone exports from raw bytes.
///
/// Cheap to clone; the parser registry is shared.
#[derive(Debug, Clone)]
pub struct ZoneIngestor {
    inner: Arc<IngestorInner>,
}

#[derive(Debug)]
struct IngestorInner {
    registry: ParserRegistry,
    fallback_encoding: &'static Encoding,
    sample_lines: usize,
    delimiter: Option<char>,
    provider: Option<Provider>,
}

impl Default for ZoneIngestor {
    fn default() -> Self {
        ZoneIngestorBuilder::new().build()
    }
}

impl ZoneIngestor {
    /// Ingestor with auto-detection for encoding, delimiter and provider
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder() -> ZoneIngestorBuilder {
        ZoneIngestorBuilder::new()
    }

    /// Parse a whole file held in memory.
    ///
    /// Row defects are reported in the result; only CSV framing problems
    /// and a missing header fail the call.
    #[instrument(skip_all, fields(bytes = bytes.len()))]
    pub fn ingest_bytes(&self, bytes: &[u8]) -> IngestResult<ParseResult> {
        let detected = detect_encoding(bytes, self.inner.fallback_encoding);
        let text = detected.decode(bytes);
        let delimiter = self.delimiter_for(&text);

        let table = Table::from_text(&text, delimiter.used)?;
        let mut result = self.inner.registry.parse(&table, self.inner.provider);
        result.encoding_info = Some(detected.info);
        result.delimiter_info = Some(delimiter);
        Ok(result)
    }

    /// Parse already-decoded text; encoding info is left empty
    pub fn ingest_str(&self, text: &str) -> IngestResult<ParseResult> {
        let delimiter = self.delimiter_for(text);
        let table = Table::from_text(text, delimiter.used)?;
        let mut result = self.inner.registry.parse(&table, self.inner.provider);
        result.delimiter_info = Some(delimiter);
        Ok(result)
    }

    /// Parse an already-tokenized table
    #[must_use]
    pub fn ingest_table(&self, table: &Table) -> ParseResult {
        self.inner.registry.parse(table, self.inner.provider)
    }

    /// Read and parse a file. Reading is the only await point.
    pub async fn ingest_file(&self, path: impl AsRef<Path>) -> IngestResult<ParseResult> {
        let path = path.as_ref();
        debug!(path = %path.display(), "reading zone export");
        let bytes = tokio::fs::read(path).await?;
        self.ingest_bytes(&bytes)
    }

    /// Run the detectors and read the header row only
    pub fn sniff(&self, bytes: &[u8]) -> IngestResult<Sniff> {
        let detected = detect_encoding(bytes, self.inner.fallback_encoding);
        let text = detected.decode(bytes);
        let delimiter = self.delimiter_for(&text);

        let header_line = text.lines().find(|l| !l.trim().is_empty()).unwrap_or_default();
        let table = Table::from_text(header_line, delimiter.used)?;
        let provider = self
            .inner
            .provider
            .unwrap_or_else(|| self.inner.registry.detect(table.headers()));

        Ok(Sniff {
            encoding: detected.info,
            delimiter,
            provider,
            headers: table.headers().to_vec(),
        })
    }

    fn delimiter_for(&self, text: &str) -> DelimiterInfo {
        let detected = detect_delimiter(text, self.inner.sample_lines);
        match self.inner.delimiter {
            Some(forced) => DelimiterInfo {
                detected: detected.detected,
                used: forced,
            },
            None => detected,
        }
    }
}

/// Builder for configuring a [`ZoneIngestor`]
#[derive(Debug)]
pub struct ZoneIngestorBuilder {
    fallback_encoding: &'static Encoding,
    sample_lines: usize,
    delimiter: Option<char>,
    provider: Option<Provider>,
}

impl Default for ZoneIngestorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ZoneIngestorBuilder {
    /// Builder with auto-detection everywhere
    #[must_use]
    pub fn new() -> Self {
        Self {
            fallback_encoding: DEFAULT_FALLBACK,
            sample_lines: DEFAULT_SAMPLE_LINES,
            delimiter: None,
            provider: None,
        }
    }

    /// Force a provider instead of detecting it from the header
    #[must_use]
    pub const fn provider(mut self, provider: Provider) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Force a delimiter instead of sniffing it
    #[must_use]
    pub const fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// Number of non-empty lines the delimiter sniffer looks at
    #[must_use]
    pub fn sample_lines(mut self, lines: usize) -> Self {
        self.sample_lines = lines.max(1);
        self
    }

    /// Encoding assumed when heuristics find nothing better
    pub fn fallback_encoding(mut self, label: &str) -> IngestResult<Self> {
        self.fallback_encoding =
            encoding_for_label(label).ok_or_else(|| IngestError::UnknownEncoding(label.to_string()))?;
        Ok(self)
    }

    /// Build the ingestor
    #[must_use]
    pub fn build(self) -> ZoneIngestor {
        ZoneIngestor {
            inner: Arc::new(IngestorInner {
                registry: ParserRegistry::new(),
                fallback_encoding: self.fallback_encoding,
                sample_lines: self.sample_lines,
                delimiter: self.delimiter,
                provider: self.provider,
            }),
        }
    }
}

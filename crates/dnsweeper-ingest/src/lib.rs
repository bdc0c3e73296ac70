//! Zone export ingestion for DNSweeper.
//!
//! This crate turns raw provider exports into [`ParseResult`]s:
//!
//! 1. [`encoding`] sniffs the character encoding (BOM first, then byte heuristics)
//! 2. [`delimiter`] picks the most consistent field delimiter
//! 3. [`ParserRegistry`] detects the provider from the header row
//! 4. a [`RowParser`] maps rows to [`CanonicalRecord`](dnsweeper_core::CanonicalRecord)s,
//!    collecting row-level errors instead of failing
//!
//! # Example
//!
//! ```rust
//! use dnsweeper_ingest::ZoneIngestor;
//!
//! let csv = b"name,type,content,ttl\nexample.com,A,192.0.2.1,300\n";
//! let result = ZoneIngestor::new().ingest_bytes(csv).unwrap();
//! assert_eq!(result.valid_rows, 1);
//! ```

#![doc(html_root_url = "https://docs.rs/dnsweeper-ingest/0.3.0")]

pub mod delimiter;
mod dispatch;
pub mod encoding;
mod error;
mod ingestor;
pub mod provider;
mod table;

pub use dispatch::ParserRegistry;
pub use dnsweeper_core::{ParseResult, Provider};
pub use error::{IngestError, IngestResult};
pub use ingestor::{Sniff, ZoneIngestor, ZoneIngestorBuilder};
pub use provider::{CloudflareParser, GenericParser, Route53Parser, RowParser};
pub use table::{normalize_header, Row, Table};

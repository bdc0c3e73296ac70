//! Core types and errors for DNSweeper.
//!
//! This crate provides the foundational types shared across the workspace:
//!
//! - **Records**: [`CanonicalRecord`], the provider-neutral DNS record model
//! - **Parsing**: [`ParseResult`], [`ParseError`] and detection metadata
//! - **Risk**: [`RiskFactors`], [`RiskScore`], [`RiskLevel`], [`RiskSummary`]
//! - **Errors**: batch-level failures via [`DnsweeperError`]
//!
//! # Example
//!
//! ```rust
//! use dnsweeper_core::{CanonicalRecord, RecordType};
//!
//! let record = CanonicalRecord::new("generic-0", "www.example.com", "cname", "example.com")
//!     .with_ttl(3600);
//! assert_eq!(record.record_type, RecordType::Cname);
//! assert_eq!(record.subdomain_depth(), 1);
//! ```

#![doc(html_root_url = "https://docs.rs/dnsweeper-core/0.3.0")]

mod error;
pub mod types;

pub use error::{DnsweeperError, Result};
pub use types::*;

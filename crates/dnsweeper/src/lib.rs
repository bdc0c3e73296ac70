//! DNS zone export auditing.
//!
//! DNSweeper reads record exports from DNS providers (Cloudflare, Route53 or
//! a generic CSV layout), normalizes them into [`CanonicalRecord`]s and ranks
//! every record by how likely it is to be stale, forgotten or risky.
//!
//! # Quick Start
//!
//! ```rust
//! use dnsweeper::{audit, AuditOptions, RiskLevel};
//!
//! let export = b"name,type,content,ttl\n\
//!     example.com,A,192.0.2.1,3600\n\
//!     tmp.example.com,CNAME,old.example.net,60\n";
//!
//! let report = audit(export, &AuditOptions::new().min_level(RiskLevel::High)).unwrap();
//! assert_eq!(report.parse.valid_rows, 2);
//! assert_eq!(report.ranked[0].record.name, "tmp.example.com");
//! ```
//!
//! # Features
//!
//! - `default` - Enables `parallel`
//! - `parallel` - Score batches on the rayon thread pool

#![doc(html_root_url = "https://docs.rs/dnsweeper/0.3.0")]

mod audit;

pub use audit::{audit, audit_file, AuditOptions, AuditReport, Auditor};

// Re-export core types
pub use dnsweeper_core::*;

// Re-export pipeline stages
pub use dnsweeper_ingest as ingest;
pub use dnsweeper_ingest::{ZoneIngestor, ZoneIngestorBuilder};
pub use dnsweeper_risk as risk;
pub use dnsweeper_risk::{LastSeenMap, RiskCalculator, RiskCalculatorConfig};

// Re-export runtime for convenience
pub use serde_json;
pub use tokio;

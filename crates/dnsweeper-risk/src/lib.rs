//! Multi-factor risk scoring for DNS records.
//!
//! Scoring is split in two pure steps:
//!
//! 1. [`RiskAnalyzer`] extracts independent [`RiskFactors`] from a record
//!    (staleness, suspicious name, TTL band, type risk, subdomain depth)
//! 2. [`aggregator::score`] sums the banded contributions, clamps the total
//!    to 100, assigns a [`RiskLevel`] and emits review hints
//!
//! [`RiskCalculator`] ties both together and adds batch operations.
//!
//! # Example
//!
//! ```rust
//! use dnsweeper_core::{CanonicalRecord, RecordType, RiskLevel};
//! use dnsweeper_risk::RiskCalculator;
//!
//! let calculator = RiskCalculator::with_defaults().unwrap();
//! let record = CanonicalRecord::new("1", "example.com", RecordType::A, "192.0.2.1")
//!     .with_ttl(3600);
//!
//! let score = calculator.calculate(&record, Some(chrono::Utc::now()));
//! assert_eq!(score.level, RiskLevel::Low);
//! ```
//!
//! # Features
//!
//! - `parallel` (default): score batches on the rayon thread pool

#![doc(html_root_url = "https://docs.rs/dnsweeper-risk/0.3.0")]

pub mod aggregator;
mod analyzer;
mod batch;
mod calculator;
mod config;
mod error;
pub mod tables;

pub use analyzer::{last_seen_days, RiskAnalyzer};
pub use batch::{summarize, LastSeenMap};
pub use calculator::RiskCalculator;
pub use config::{RiskCalculatorConfig, DEFAULT_SUSPICIOUS_PATTERNS};
pub use dnsweeper_core::{RiskFactors, RiskLevel, RiskScore, RiskSummary};
pub use error::{RiskError, RiskResult};

//! # dnsweeper-cli
//!
//! Command-line auditor for DNS zone exports.
//!
//! ## Features
//!
//! - **Analyze**: parse a Cloudflare, Route53 or generic CSV export and rank
//!   every record by risk
//! - **Detect**: show the encoding, delimiter and provider an export is read with
//! - **Config**: persistent defaults and scoring thresholds in a TOML file
//! - **Multiple output formats**: Pretty tables, JSON, CSV, YAML

pub mod cli;
pub mod config;
pub mod output;

pub use cli::run;

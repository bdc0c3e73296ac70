//! Command-line argument definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use dnsweeper::{Provider, RiskLevel};

use crate::output::OutputFormat;

/// Audit DNS zone exports for stale and risky records
///
/// Reads Cloudflare, Route53 or generic CSV exports in any common encoding,
/// scores every record and lists the ones worth reviewing first.
#[derive(Parser, Debug)]
#[command(name = "dnsweeper")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Increase verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Config file to use instead of the platform default
    #[arg(long, env = "DNSWEEPER_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse an export and rank its records by risk
    Analyze(AnalyzeArgs),

    /// Show how an export would be read, without scoring it
    Detect(DetectArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),
}

// ============================================================================
// Analyze command
// ============================================================================

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Zone export (CSV, any delimiter or encoding)
    pub file: PathBuf,

    /// Parse as this provider instead of detecting it (cloudflare, route53, generic)
    #[arg(short, long)]
    pub provider: Option<Provider>,

    /// Only list records at or above this level (low, medium, high, critical)
    #[arg(short, long)]
    pub min_level: Option<RiskLevel>,

    /// CSV with `name,last_seen` columns (RFC 3339 or YYYY-MM-DD)
    #[arg(long)]
    pub last_seen: Option<PathBuf>,

    /// Show at most this many records
    #[arg(short, long)]
    pub top: Option<usize>,
}

// ============================================================================
// Detect command
// ============================================================================

#[derive(Args, Debug)]
pub struct DetectArgs {
    /// Zone export to inspect
    pub file: PathBuf,
}

// ============================================================================
// Config command
// ============================================================================

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Show config file path
    Path,

    /// Write a config file with the default settings
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

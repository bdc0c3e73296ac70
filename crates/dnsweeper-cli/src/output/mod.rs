//! Output formatting for different formats.

use clap::ValueEnum;
use colored::{ColoredString, Colorize};
use dnsweeper::RiskLevel;
use serde::{Deserialize, Serialize};

/// Available output formats.
#[derive(Debug, Clone, Copy, Default, ValueEnum, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed tables with colors
    #[default]
    Pretty,
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// YAML output
    Yaml,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pretty => write!(f, "pretty"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
            Self::Yaml => write!(f, "yaml"),
        }
    }
}

/// Risk level painted by severity
pub fn level_label(level: RiskLevel) -> ColoredString {
    match level {
        RiskLevel::Critical => level.as_str().red().bold(),
        RiskLevel::High => level.as_str().red(),
        RiskLevel::Medium => level.as_str().yellow(),
        RiskLevel::Low => level.as_str().green(),
    }
}

/// Truncate to `max` characters, marking the cut
pub fn clip(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::CanonicalRecord;
use crate::DnsweeperError;

/// Discrete risk bucket. Ordered `Low < Medium < High < Critical`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Nothing worth reviewing
    #[default]
    Low,
    /// Worth a look during routine cleanup
    Medium,
    /// Review soon
    High,
    /// Review immediately
    Critical,
}

impl RiskLevel {
    /// All levels, lowest first
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::Critical];

    /// Lower-case name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl FromStr for RiskLevel {
    type Err = DnsweeperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" | "med" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" | "crit" => Ok(Self::Critical),
            other => Err(DnsweeperError::Config(format!(
                "unknown risk level: {other} (expected low, medium, high or critical)"
            ))),
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Independent risk signals for one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskFactors {
    /// Whole days since the record was last observed; 999 when unknown
    pub last_seen_days: i64,
    /// Host labels match a configured suspicious pattern
    pub has_suspicious_pattern: bool,
    /// TTL band contribution (5..=30)
    pub ttl_score: u32,
    /// Record type contribution (0..=20)
    pub record_type_risk: u32,
    /// Subdomain depth contribution (0..=15)
    pub domain_depth: u32,
}

/// Aggregated risk for one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskScore {
    /// Clamped total in `[0, 100]`
    pub total: u32,
    /// Inputs the total was computed from
    pub factors: RiskFactors,
    /// Bucket of `total`
    pub level: RiskLevel,
    /// Review hints, in a fixed rule order
    pub recommendations: Vec<String>,
}

/// Record count per risk level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelCounts {
    /// Low-risk records
    pub low: usize,
    /// Medium-risk records
    pub medium: usize,
    /// High-risk records
    pub high: usize,
    /// Critical-risk records
    pub critical: usize,
}

impl LevelCounts {
    /// Count one more record at `level`
    pub fn add(&mut self, level: RiskLevel) {
        match level {
            RiskLevel::Low => self.low += 1,
            RiskLevel::Medium => self.medium += 1,
            RiskLevel::High => self.high += 1,
            RiskLevel::Critical => self.critical += 1,
        }
    }

    /// Count at `level`
    #[must_use]
    pub const fn get(&self, level: RiskLevel) -> usize {
        match level {
            RiskLevel::Low => self.low,
            RiskLevel::Medium => self.medium,
            RiskLevel::High => self.high,
            RiskLevel::Critical => self.critical,
        }
    }
}

/// Statistics over a set of scores
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskSummary {
    /// Number of scored records
    pub total: usize,
    /// Records per level
    pub by_level: LevelCounts,
    /// Mean of `total` scores; 0 for an empty set
    pub average_score: f64,
    /// Sum of recommendation counts
    pub total_recommendations: usize,
}

/// One entry of the risk-ranked inventory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedRecord {
    /// The scored record
    pub record: CanonicalRecord,
    /// Its score
    pub score: RiskScore,
}

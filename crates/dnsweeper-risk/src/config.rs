//! Risk calculator configuration.

use serde::{Deserialize, Serialize};

use crate::error::{RiskError, RiskResult};
use crate::tables::{DEFAULT_HIGH_RISK_TTL, DEFAULT_UNUSED_DAYS};

/// Name fragments that usually mark leftovers. Regex sources, matched
/// case-insensitively against host labels.
pub const DEFAULT_SUSPICIOUS_PATTERNS: &[&str] = &[
    "test",
    "temp",
    "tmp",
    "old",
    "backup",
    "bak",
    "dev",
    "staging",
    "demo",
    "sample",
    "example",
    "unused",
    "deprecated",
    "_",
    "-old",
    "-temp",
    "-test",
    "-bak",
];

/// Thresholds and patterns for one analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskCalculatorConfig {
    /// Regex sources flagged as suspicious (case-insensitive)
    pub suspicious_patterns: Vec<String>,

    /// TTL at or below which the top TTL band applies
    pub high_risk_ttl_threshold: u32,

    /// Days without observation after which a record is presumed unused
    pub unused_days_threshold: i64,
}

impl Default for RiskCalculatorConfig {
    fn default() -> Self {
        Self {
            suspicious_patterns: DEFAULT_SUSPICIOUS_PATTERNS
                .iter()
                .map(|p| (*p).to_string())
                .collect(),
            high_risk_ttl_threshold: DEFAULT_HIGH_RISK_TTL,
            unused_days_threshold: DEFAULT_UNUSED_DAYS,
        }
    }
}

impl RiskCalculatorConfig {
    /// Create the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the suspicious patterns
    #[must_use]
    pub fn suspicious_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.suspicious_patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Add one suspicious pattern
    #[must_use]
    pub fn add_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.suspicious_patterns.push(pattern.into());
        self
    }

    /// Set the high-risk TTL threshold
    #[must_use]
    pub const fn high_risk_ttl_threshold(mut self, seconds: u32) -> Self {
        self.high_risk_ttl_threshold = seconds;
        self
    }

    /// Set the unused-days threshold
    #[must_use]
    pub const fn unused_days_threshold(mut self, days: i64) -> Self {
        self.unused_days_threshold = days;
        self
    }

    /// Reject thresholds that would make the bands meaningless
    pub fn validate(&self) -> RiskResult<()> {
        if self.unused_days_threshold <= 0 {
            return Err(RiskError::Config(format!(
                "unused_days_threshold must be positive, got {}",
                self.unused_days_threshold
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = RiskCalculatorConfig::default();
        assert_eq!(config.high_risk_ttl_threshold, 300);
        assert_eq!(config.unused_days_threshold, 180);
        assert!(config.suspicious_patterns.iter().any(|p| p == "staging"));
        assert!(config.suspicious_patterns.iter().any(|p| p == "-bak"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builder_methods() {
        let config = RiskCalculatorConfig::new()
            .suspicious_patterns(["^old-"])
            .add_pattern("legacy")
            .high_risk_ttl_threshold(60)
            .unused_days_threshold(365);
        assert_eq!(config.suspicious_patterns, vec!["^old-", "legacy"]);
        assert_eq!(config.high_risk_ttl_threshold, 60);
        assert_eq!(config.unused_days_threshold, 365);
    }

    #[test]
    fn rejects_non_positive_unused_days() {
        let config = RiskCalculatorConfig::new().unused_days_threshold(0);
        assert!(matches!(config.validate(), Err(RiskError::Config(_))));
    }

    #[test]
    fn partial_deserialization_keeps_defaults() {
        let config: RiskCalculatorConfig =
            serde_json::from_str(r#"{"unused_days_threshold": 90}"#).unwrap();
        assert_eq!(config.unused_days_threshold, 90);
        assert_eq!(config.high_risk_ttl_threshold, 300);
        assert!(!config.suspicious_patterns.is_empty());
    }
}

//! Single-record risk calculation.

use chrono::{DateTime, Utc};
use dnsweeper_core::{CanonicalRecord, RiskFactors, RiskScore};
use tracing::instrument;

use crate::aggregator;
use crate::analyzer::RiskAnalyzer;
use crate::config::RiskCalculatorConfig;
use crate::error::RiskResult;

/// Scores records against one configuration.
///
/// Construction validates the configuration and compiles patterns; scoring
/// never fails afterwards.
#[derive(Debug, Clone)]
pub struct RiskCalculator {
    config: RiskCalculatorConfig,
    analyzer: RiskAnalyzer,
}

impl RiskCalculator {
    /// Validate `config` and compile its patterns
    #[instrument(skip_all, fields(patterns = config.suspicious_patterns.len()))]
    pub fn new(config: RiskCalculatorConfig) -> RiskResult<Self> {
        config.validate()?;
        let analyzer = RiskAnalyzer::new(&config)?;
        Ok(Self { config, analyzer })
    }

    /// Calculator with the default thresholds and patterns
    pub fn with_defaults() -> RiskResult<Self> {
        Self::new(RiskCalculatorConfig::default())
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &RiskCalculatorConfig {
        &self.config
    }

    /// Factor analyzer
    #[must_use]
    pub const fn analyzer(&self) -> &RiskAnalyzer {
        &self.analyzer
    }

    /// Score `record` relative to the current time
    #[must_use]
    pub fn calculate(&self, record: &CanonicalRecord, last_seen: Option<DateTime<Utc>>) -> RiskScore {
        self.calculate_at(record, last_seen, Utc::now())
    }

    /// Score `record` relative to `now`
    #[must_use]
    pub fn calculate_at(
        &self,
        record: &CanonicalRecord,
        last_seen: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> RiskScore {
        let factors = self.analyzer.analyze_at(record, last_seen, now);
        self.score(record, &factors)
    }

    /// Aggregate precomputed factors
    #[must_use]
    pub fn score(&self, record: &CanonicalRecord, factors: &RiskFactors) -> RiskScore {
        aggregator::score(record, factors, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use dnsweeper_core::{RecordType, RiskLevel};

    use crate::error::RiskError;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 15, 8, 30, 0).unwrap()
    }

    fn calculator() -> RiskCalculator {
        RiskCalculator::with_defaults().unwrap()
    }

    #[test]
    fn apex_seen_today_is_low() {
        let record = CanonicalRecord::new("1", "example.com", RecordType::A, "192.0.2.1").with_ttl(3600);
        let score = calculator().calculate_at(&record, Some(now()), now());

        assert_eq!(score.level, RiskLevel::Low);
        assert!(score.recommendations.is_empty());
    }

    #[test]
    fn stale_suspicious_srv_is_critical() {
        let record = CanonicalRecord::new(
            "2",
            "test-old-backup.example.com",
            RecordType::Srv,
            "10 5 5060 sip.example.com",
        )
        .with_ttl(30);
        let score = calculator().calculate_at(&record, Some(now() - Duration::days(365)), now());

        assert_eq!(score.level, RiskLevel::Critical);
        assert_eq!(score.total, 100);
        assert_eq!(score.factors.last_seen_days, 365);
        assert!(score.factors.has_suspicious_pattern);
        assert!(score.recommendations.iter().any(|r| r.contains("365 days")));
        assert!(score.recommendations.iter().any(|r| r.contains("temporary or test")));
        assert!(score.recommendations.iter().any(|r| r.contains("Short TTL of 30s")));
    }

    #[test]
    fn unknown_last_seen_is_at_least_high() {
        let record = CanonicalRecord::new("3", "example.com", RecordType::A, "192.0.2.1");
        let score = calculator().calculate_at(&record, None, now());

        assert_eq!(score.factors.last_seen_days, 999);
        assert!(score.level >= RiskLevel::High);
    }

    #[test]
    fn unknown_type_degrades_to_default_risk() {
        let record = CanonicalRecord::new("4", "example.com", "HINFO", "x86 linux");
        let score = calculator().calculate_at(&record, Some(now()), now());
        assert_eq!(score.factors.record_type_risk, 10);
    }

    #[test]
    fn identical_inputs_give_identical_scores() {
        let calculator = calculator();
        let record = CanonicalRecord::new("5", "dev.api.example.com", RecordType::Cname, "lb.example.net");
        let seen = Some(now() - Duration::days(42));

        let first = calculator.calculate_at(&record, seen, now());
        let second = calculator.calculate_at(&record, seen, now());
        assert_eq!(first, second);
    }

    #[test]
    fn staleness_never_lowers_the_total() {
        let calculator = calculator();
        let record = CanonicalRecord::new("6", "www.example.com", RecordType::A, "192.0.2.1");
        let mut previous = 0;
        for days in 0..=400 {
            let score = calculator.calculate_at(&record, Some(now() - Duration::days(days)), now());
            assert!(score.total >= previous, "total dropped at {days} days");
            assert!(score.total <= 100);
            previous = score.total;
        }
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = RiskCalculatorConfig::new().unused_days_threshold(-1);
        assert!(matches!(RiskCalculator::new(config), Err(RiskError::Config(_))));

        let config = RiskCalculatorConfig::new().add_pattern("[");
        assert!(matches!(RiskCalculator::new(config), Err(RiskError::Pattern { .. })));
    }
}

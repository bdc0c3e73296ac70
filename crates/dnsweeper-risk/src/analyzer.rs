//! Per-record risk factor extraction.

use chrono::{DateTime, Utc};
use dnsweeper_core::{CanonicalRecord, RiskFactors};
use regex::{RegexBuilder, RegexSet, RegexSetBuilder};
use tracing::debug;

use crate::config::RiskCalculatorConfig;
use crate::error::{RiskError, RiskResult};
use crate::tables::{depth_score, record_type_risk, ttl_score, UNKNOWN_LAST_SEEN_DAYS};

const SECONDS_PER_DAY: i64 = 86_400;

/// Computes [`RiskFactors`] for single records.
///
/// Suspicious patterns are compiled once, case-insensitively, when the
/// analyzer is built.
#[derive(Debug, Clone)]
pub struct RiskAnalyzer {
    patterns: RegexSet,
    high_risk_ttl_threshold: u32,
}

impl RiskAnalyzer {
    /// Compile the patterns in `config`
    pub fn new(config: &RiskCalculatorConfig) -> RiskResult<Self> {
        // Compile one by one first so the error names the bad pattern.
        for pattern in &config.suspicious_patterns {
            RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .map_err(|source| RiskError::Pattern {
                    pattern: pattern.clone(),
                    source,
                })?;
        }

        let patterns = RegexSetBuilder::new(&config.suspicious_patterns)
            .case_insensitive(true)
            .build()
            .map_err(|source| RiskError::Pattern {
                pattern: config.suspicious_patterns.join("|"),
                source,
            })?;

        debug!(patterns = patterns.len(), "risk analyzer ready");

        Ok(Self {
            patterns,
            high_risk_ttl_threshold: config.high_risk_ttl_threshold,
        })
    }

    /// Factors relative to the current time
    #[must_use]
    pub fn analyze(&self, record: &CanonicalRecord, last_seen: Option<DateTime<Utc>>) -> RiskFactors {
        self.analyze_at(record, last_seen, Utc::now())
    }

    /// Factors relative to `now`
    #[must_use]
    pub fn analyze_at(
        &self,
        record: &CanonicalRecord,
        last_seen: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> RiskFactors {
        RiskFactors {
            last_seen_days: last_seen_days(last_seen, now),
            has_suspicious_pattern: self.is_suspicious(record),
            ttl_score: ttl_score(record.ttl, self.high_risk_ttl_threshold),
            record_type_risk: record_type_risk(&record.record_type),
            domain_depth: depth_score(record.subdomain_depth()),
        }
    }

    /// True when a pattern matches the host labels of `record`.
    ///
    /// Only labels left of the registrable domain are inspected, so an apex
    /// record is never suspicious.
    #[must_use]
    pub fn is_suspicious(&self, record: &CanonicalRecord) -> bool {
        let host = record.host_part();
        !host.is_empty() && self.patterns.is_match(&host)
    }
}

/// Whole days between `last_seen` and `now`, rounded down.
///
/// Future timestamps give negative values.
#[must_use]
pub fn last_seen_days(last_seen: Option<DateTime<Utc>>, now: DateTime<Utc>) -> i64 {
    last_seen.map_or(UNKNOWN_LAST_SEEN_DAYS, |seen| {
        (now - seen).num_seconds().div_euclid(SECONDS_PER_DAY)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use dnsweeper_core::RecordType;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    fn analyzer() -> RiskAnalyzer {
        RiskAnalyzer::new(&RiskCalculatorConfig::default()).unwrap()
    }

    fn record(name: &str, record_type: RecordType, ttl: u32) -> CanonicalRecord {
        CanonicalRecord::new("r1", name, record_type, "value").with_ttl(ttl)
    }

    #[test]
    fn unknown_last_seen_is_sentinel() {
        let factors = analyzer().analyze_at(&record("example.com", RecordType::A, 300), None, now());
        assert_eq!(factors.last_seen_days, 999);
    }

    #[test]
    fn day_count_rounds_down() {
        assert_eq!(last_seen_days(Some(now()), now()), 0);
        assert_eq!(last_seen_days(Some(now() - Duration::hours(47)), now()), 1);
        assert_eq!(last_seen_days(Some(now() - Duration::days(365)), now()), 365);
    }

    #[test]
    fn future_last_seen_is_negative() {
        assert_eq!(last_seen_days(Some(now() + Duration::days(3)), now()), -3);
        assert_eq!(last_seen_days(Some(now() + Duration::hours(1)), now()), -1);
    }

    #[test]
    fn suspicious_patterns_are_case_insensitive() {
        let analyzer = analyzer();
        assert!(analyzer.is_suspicious(&record("STAGING.example.com", RecordType::A, 300)));
        assert!(analyzer.is_suspicious(&record("api-old.example.com", RecordType::A, 300)));
        assert!(analyzer.is_suspicious(&record("_dmarc.example.com", RecordType::Txt, 300)));
        assert!(!analyzer.is_suspicious(&record("www.example.com", RecordType::A, 300)));
    }

    #[test]
    fn apex_is_never_suspicious() {
        let analyzer = analyzer();
        assert!(!analyzer.is_suspicious(&record("example.com", RecordType::A, 300)));
        assert!(!analyzer.is_suspicious(&record("test.com", RecordType::A, 300)));
    }

    #[test]
    fn factors_follow_tables() {
        let factors = analyzer().analyze_at(
            &record("a.b.c.example.com", RecordType::Cname, 7200),
            Some(now()),
            now(),
        );
        assert_eq!(factors.ttl_score, 10);
        assert_eq!(factors.record_type_risk, 15);
        assert_eq!(factors.domain_depth, 15);
        assert!(!factors.has_suspicious_pattern);
    }

    #[test]
    fn custom_ttl_threshold() {
        let config = RiskCalculatorConfig::new().high_risk_ttl_threshold(3600);
        let analyzer = RiskAnalyzer::new(&config).unwrap();
        let factors = analyzer.analyze_at(&record("example.com", RecordType::A, 3600), None, now());
        assert_eq!(factors.ttl_score, 30);
    }

    #[test]
    fn invalid_pattern_is_named() {
        let config = RiskCalculatorConfig::new().suspicious_patterns(["ok", "(unclosed"]);
        match RiskAnalyzer::new(&config) {
            Err(RiskError::Pattern { pattern, .. }) => assert_eq!(pattern, "(unclosed"),
            other => panic!("expected pattern error, got {other:?}"),
        }
    }

    #[test]
    fn empty_pattern_list_matches_nothing() {
        let config = RiskCalculatorConfig::new().suspicious_patterns(Vec::<String>::new());
        let analyzer = RiskAnalyzer::new(&config).unwrap();
        assert!(!analyzer.is_suspicious(&record("test.example.com", RecordType::A, 300)));
    }
}

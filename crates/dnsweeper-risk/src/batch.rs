//! Batch scoring over record collections.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use dnsweeper_core::{CanonicalRecord, RankedRecord, RiskLevel, RiskScore, RiskSummary};
use tracing::{debug, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::calculator::RiskCalculator;

/// Last observation per record, keyed by record id or owner name.
///
/// An id entry takes precedence over a name entry. Owner names compare
/// without regard to ASCII case as long as name keys are stored lower-cased.
pub type LastSeenMap = HashMap<String, DateTime<Utc>>;

fn lookup(last_seen: &LastSeenMap, record: &CanonicalRecord) -> Option<DateTime<Utc>> {
    last_seen
        .get(&record.id)
        .or_else(|| last_seen.get(&record.name))
        .or_else(|| last_seen.get(&record.name.to_ascii_lowercase()))
        .copied()
}

impl RiskCalculator {
    /// Score every record, in input order
    #[instrument(skip_all, fields(records = records.len()))]
    pub fn score_all_at(
        &self,
        records: &[CanonicalRecord],
        last_seen: &LastSeenMap,
        now: DateTime<Utc>,
    ) -> Vec<RiskScore> {
        #[cfg(feature = "parallel")]
        let scores: Vec<RiskScore> = records
            .par_iter()
            .map(|record| self.calculate_at(record, lookup(last_seen, record), now))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let scores: Vec<RiskScore> = records
            .iter()
            .map(|record| self.calculate_at(record, lookup(last_seen, record), now))
            .collect();

        debug!(scored = scores.len(), "batch scored");
        scores
    }

    /// Scores keyed by record id, relative to the current time
    #[must_use]
    pub fn calculate_batch(
        &self,
        records: &[CanonicalRecord],
        last_seen: &LastSeenMap,
    ) -> HashMap<String, RiskScore> {
        self.calculate_batch_at(records, last_seen, Utc::now())
    }

    /// Scores keyed by record id, relative to `now`.
    ///
    /// Records sharing an id keep the score of the last one.
    #[must_use]
    pub fn calculate_batch_at(
        &self,
        records: &[CanonicalRecord],
        last_seen: &LastSeenMap,
        now: DateTime<Utc>,
    ) -> HashMap<String, RiskScore> {
        records
            .iter()
            .zip(self.score_all_at(records, last_seen, now))
            .map(|(record, score)| (record.id.clone(), score))
            .collect()
    }

    /// Records at or above `min_level`, in input order
    #[must_use]
    pub fn filter_by_level<'a>(
        &self,
        records: &'a [CanonicalRecord],
        last_seen: &LastSeenMap,
        min_level: RiskLevel,
    ) -> Vec<&'a CanonicalRecord> {
        self.filter_by_level_at(records, last_seen, min_level, Utc::now())
    }

    /// Records at or above `min_level` relative to `now`, in input order
    #[must_use]
    pub fn filter_by_level_at<'a>(
        &self,
        records: &'a [CanonicalRecord],
        last_seen: &LastSeenMap,
        min_level: RiskLevel,
        now: DateTime<Utc>,
    ) -> Vec<&'a CanonicalRecord> {
        records
            .iter()
            .zip(self.score_all_at(records, last_seen, now))
            .filter(|(_, score)| score.level >= min_level)
            .map(|(record, _)| record)
            .collect()
    }

    /// Records paired with their scores, riskiest first
    #[must_use]
    pub fn rank(&self, records: &[CanonicalRecord], last_seen: &LastSeenMap) -> Vec<RankedRecord> {
        self.rank_at(records, last_seen, Utc::now())
    }

    /// Ranking relative to `now`.
    ///
    /// Ordered by total descending, then level descending, then name and id
    /// ascending, so equal inputs always rank the same way.
    #[must_use]
    pub fn rank_at(
        &self,
        records: &[CanonicalRecord],
        last_seen: &LastSeenMap,
        now: DateTime<Utc>,
    ) -> Vec<RankedRecord> {
        let mut ranked: Vec<RankedRecord> = records
            .iter()
            .cloned()
            .zip(self.score_all_at(records, last_seen, now))
            .map(|(record, score)| RankedRecord { record, score })
            .collect();

        ranked.sort_by(|a, b| {
            b.score
                .total
                .cmp(&a.score.total)
                .then_with(|| b.score.level.cmp(&a.score.level))
                .then_with(|| a.record.name.cmp(&b.record.name))
                .then_with(|| a.record.id.cmp(&b.record.id))
        });
        ranked
    }
}

/// Counts, per-level counts, mean total and recommendation count
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn summarize<'a, I>(scores: I) -> RiskSummary
where
    I: IntoIterator<Item = &'a RiskScore>,
{
    let mut summary = RiskSummary::default();
    let mut sum: u64 = 0;

    for score in scores {
        summary.total += 1;
        summary.by_level.add(score.level);
        summary.total_recommendations += score.recommendations.len();
        sum += u64::from(score.total);
    }

    if summary.total > 0 {
        summary.average_score = sum as f64 / summary.total as f64;
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use dnsweeper_core::RecordType;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 10, 0, 0, 0).unwrap()
    }

    fn records() -> Vec<CanonicalRecord> {
        vec![
            CanonicalRecord::new("a", "example.com", RecordType::A, "192.0.2.1").with_ttl(3600),
            CanonicalRecord::new("b", "test-old-backup.example.com", RecordType::Srv, "sip").with_ttl(30),
            CanonicalRecord::new("c", "www.example.com", RecordType::Cname, "example.com").with_ttl(3600),
        ]
    }

    fn last_seen() -> LastSeenMap {
        let mut map = LastSeenMap::new();
        map.insert("a".into(), now());
        map.insert("test-old-backup.example.com".into(), now() - Duration::days(365));
        map.insert("c".into(), now() - Duration::days(10));
        map
    }

    fn calculator() -> RiskCalculator {
        RiskCalculator::with_defaults().unwrap()
    }

    #[test]
    fn batch_is_keyed_by_id() {
        let scores = calculator().calculate_batch_at(&records(), &last_seen(), now());
        assert_eq!(scores.len(), 3);
        assert_eq!(scores["a"].level, RiskLevel::Low);
        assert_eq!(scores["b"].level, RiskLevel::Critical);
        assert_eq!(scores["b"].factors.last_seen_days, 365);
        assert_eq!(scores["c"].factors.last_seen_days, 10);
    }

    #[test]
    fn id_takes_precedence_over_name() {
        let mut map = last_seen();
        map.insert("example.com".into(), now() - Duration::days(500));
        let scores = calculator().calculate_batch_at(&records(), &map, now());
        assert_eq!(scores["a"].factors.last_seen_days, 0);
    }

    #[test]
    fn name_lookup_ignores_case() {
        let records = vec![
            CanonicalRecord::new("x", "WWW.Example.com", RecordType::Cname, "example.com"),
        ];
        let mut map = LastSeenMap::new();
        map.insert("www.example.com".into(), now() - Duration::days(3));

        let scores = calculator().calculate_batch_at(&records, &map, now());
        assert_eq!(scores["x"].factors.last_seen_days, 3);
    }

    #[test]
    fn batch_matches_single_calculation() {
        let calculator = calculator();
        let records = records();
        let map = last_seen();
        let scores = calculator.calculate_batch_at(&records, &map, now());
        for record in &records {
            let single = calculator.calculate_at(record, lookup(&map, record), now());
            assert_eq!(scores[&record.id], single);
        }
    }

    #[test]
    fn filter_preserves_input_order() {
        let records = records();
        let kept = calculator().filter_by_level_at(&records, &LastSeenMap::new(), RiskLevel::Low, now());
        let ids: Vec<&str> = kept.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);

        let kept = calculator().filter_by_level_at(&records, &last_seen(), RiskLevel::High, now());
        let ids: Vec<&str> = kept.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["b"]);
    }

    #[test]
    fn rank_orders_riskiest_first() {
        let ranked = calculator().rank_at(&records(), &last_seen(), now());
        let ids: Vec<&str> = ranked.iter().map(|r| r.record.id.as_str()).collect();
        assert_eq!(ids[0], "b");
        assert!(ranked.windows(2).all(|w| w[0].score.total >= w[1].score.total));
    }

    #[test]
    fn rank_breaks_ties_by_name() {
        let records = vec![
            CanonicalRecord::new("2", "zeta.example.com", RecordType::A, "192.0.2.2"),
            CanonicalRecord::new("1", "alpha.example.com", RecordType::A, "192.0.2.1"),
        ];
        let ranked = calculator().rank_at(&records, &LastSeenMap::new(), now());
        assert_eq!(ranked[0].record.name, "alpha.example.com");
    }

    #[test]
    fn summary_counts() {
        let scores = calculator().calculate_batch_at(&records(), &last_seen(), now());
        let summary = summarize(scores.values());

        assert_eq!(summary.total, 3);
        assert_eq!(summary.by_level.critical, 1);
        assert_eq!(summary.by_level.medium, 1);
        assert_eq!(summary.by_level.low, 1);
        let expected: u32 = scores.values().map(|s| s.total).sum();
        assert!((summary.average_score - f64::from(expected) / 3.0).abs() < f64::EPSILON);
        let recs: usize = scores.values().map(|s| s.recommendations.len()).sum();
        assert_eq!(summary.total_recommendations, recs);
    }

    #[test]
    fn empty_summary_has_zero_mean() {
        let summary = summarize(std::iter::empty::<&RiskScore>());
        assert_eq!(summary.total, 0);
        assert!(summary.average_score.abs() < f64::EPSILON);
        assert_eq!(summary.by_level.get(RiskLevel::Critical), 0);
    }
}

//! Scoring bands and lookup tables.
//!
//! Every contribution is banded independently; the aggregator only adds
//! them up and clamps the sum.

use dnsweeper_core::{RecordType, RiskLevel};

/// `lastSeenDays` reported when no observation timestamp exists.
/// Large enough to land in the top staleness band.
pub const UNKNOWN_LAST_SEEN_DAYS: i64 = 999;

/// Default TTL at or below which a record counts as high risk
pub const DEFAULT_HIGH_RISK_TTL: u32 = 300;

/// Default age after which a record is presumed unused
pub const DEFAULT_UNUSED_DAYS: i64 = 180;

/// Upper bound of the one-hour TTL band
pub const HOUR_TTL: u32 = 3600;

/// Upper bound of the one-day TTL band
pub const DAY_TTL: u32 = 86_400;

/// TTL contribution at or below the high-risk threshold
pub const TTL_SCORE_HIGH_RISK: u32 = 30;
/// TTL contribution up to one hour
pub const TTL_SCORE_HOUR: u32 = 20;
/// TTL contribution up to one day
pub const TTL_SCORE_DAY: u32 = 10;
/// TTL contribution above one day
pub const TTL_SCORE_LONG: u32 = 5;

/// Type risk for anything not in the table
pub const DEFAULT_TYPE_RISK: u32 = 10;

/// Staleness contribution at or past the unused threshold
pub const STALE_POINTS_UNUSED: u32 = 40;
/// Staleness contribution from 90 days
pub const STALE_POINTS_QUARTER: u32 = 25;
/// Staleness contribution from 30 days
pub const STALE_POINTS_MONTH: u32 = 15;
/// Staleness contribution from 7 days
pub const STALE_POINTS_WEEK: u32 = 5;

/// Contribution of a suspicious name
pub const SUSPICIOUS_POINTS: u32 = 20;

/// Scores are clamped to `0..=MAX_SCORE`
pub const MAX_SCORE: u32 = 100;

/// Lowest total classified critical
pub const CRITICAL_MIN: u32 = 70;
/// Lowest total classified high
pub const HIGH_MIN: u32 = 50;
/// Lowest total classified medium
pub const MEDIUM_MIN: u32 = 30;

/// CNAMEs unseen for longer than this get a takeover warning
pub const STALE_CNAME_DAYS: i64 = 90;

/// Depth contribution from which a deep-subdomain hint is emitted
pub const DEEP_SUBDOMAIN_SCORE: u32 = 10;

/// Band a TTL. Boundaries are inclusive.
#[must_use]
pub const fn ttl_score(ttl: u32, high_risk_threshold: u32) -> u32 {
    if ttl <= high_risk_threshold {
        TTL_SCORE_HIGH_RISK
    } else if ttl <= HOUR_TTL {
        TTL_SCORE_HOUR
    } else if ttl <= DAY_TTL {
        TTL_SCORE_DAY
    } else {
        TTL_SCORE_LONG
    }
}

/// Fixed per-type risk
#[must_use]
pub const fn record_type_risk(record_type: &RecordType) -> u32 {
    match record_type {
        RecordType::Srv => 20,
        RecordType::Cname | RecordType::Ptr => 15,
        RecordType::Txt | RecordType::Caa => 10,
        RecordType::Mx | RecordType::A | RecordType::Aaaa => 5,
        RecordType::Ns | RecordType::Soa => 0,
        RecordType::Other(_) => DEFAULT_TYPE_RISK,
    }
}

/// Band the number of labels left of the registrable domain
#[must_use]
pub const fn depth_score(depth: usize) -> u32 {
    match depth {
        0 => 0,
        1 => 5,
        2 => 10,
        _ => 15,
    }
}

/// Band days since last observation. Negative values score nothing.
#[must_use]
pub const fn staleness_points(last_seen_days: i64, unused_days_threshold: i64) -> u32 {
    if last_seen_days >= unused_days_threshold {
        STALE_POINTS_UNUSED
    } else if last_seen_days >= 90 {
        STALE_POINTS_QUARTER
    } else if last_seen_days >= 30 {
        STALE_POINTS_MONTH
    } else if last_seen_days >= 7 {
        STALE_POINTS_WEEK
    } else {
        0
    }
}

/// Level for a clamped total. Lower bounds are inclusive.
#[must_use]
pub const fn level_for(total: u32) -> RiskLevel {
    if total >= CRITICAL_MIN {
        RiskLevel::Critical
    } else if total >= HIGH_MIN {
        RiskLevel::High
    } else if total >= MEDIUM_MIN {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

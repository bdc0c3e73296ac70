//! Factor aggregation, level assignment and recommendations.

use dnsweeper_core::{CanonicalRecord, RecordType, RiskFactors, RiskLevel, RiskScore};

use crate::config::RiskCalculatorConfig;
use crate::tables::{
    level_for, staleness_points, DEEP_SUBDOMAIN_SCORE, MAX_SCORE, STALE_CNAME_DAYS,
    SUSPICIOUS_POINTS, TTL_SCORE_HIGH_RISK,
};

/// Combine `factors` into a clamped score with recommendations.
///
/// Rule checks read the unclamped factor values; only `total` is clamped.
#[must_use]
pub fn score(
    record: &CanonicalRecord,
    factors: &RiskFactors,
    config: &RiskCalculatorConfig,
) -> RiskScore {
    let raw = staleness_points(factors.last_seen_days, config.unused_days_threshold)
        + if factors.has_suspicious_pattern {
            SUSPICIOUS_POINTS
        } else {
            0
        }
        + factors.ttl_score
        + factors.record_type_risk
        + factors.domain_depth;

    let total = raw.min(MAX_SCORE);
    let level = level_for(total);

    RiskScore {
        total,
        factors: *factors,
        level,
        recommendations: recommendations(record, factors, level, config),
    }
}

fn recommendations(
    record: &CanonicalRecord,
    factors: &RiskFactors,
    level: RiskLevel,
    config: &RiskCalculatorConfig,
) -> Vec<String> {
    let mut out = Vec::new();

    if factors.last_seen_days >= config.unused_days_threshold {
        out.push(format!(
            "Not seen for {} days; confirm the record is still in use or remove it",
            factors.last_seen_days
        ));
    }

    if factors.has_suspicious_pattern {
        out.push(
            "Name looks like a temporary or test entry; confirm it belongs in production"
                .to_string(),
        );
    }

    if factors.ttl_score >= TTL_SCORE_HIGH_RISK {
        out.push(format!(
            "Short TTL of {}s; raise it unless the record changes often",
            record.ttl
        ));
    }

    if factors.domain_depth >= DEEP_SUBDOMAIN_SCORE {
        out.push("Deeply nested subdomain; check whether it is still needed".to_string());
    }

    match level {
        RiskLevel::Critical => out.push("Critical risk: review this record immediately".to_string()),
        RiskLevel::High => out.push("High risk: schedule a review of this record".to_string()),
        RiskLevel::Medium | RiskLevel::Low => {}
    }

    if record.record_type == RecordType::Cname && factors.last_seen_days > STALE_CNAME_DAYS {
        out.push(format!(
            "Stale CNAME to {} may allow subdomain takeover; verify the target still exists",
            record.value
        ));
    }

    if record.record_type == RecordType::Txt && factors.has_suspicious_pattern {
        out.push(
            "Suspicious TXT record; look for leftover verification tokens or secrets".to_string(),
        );
    }

    out
}

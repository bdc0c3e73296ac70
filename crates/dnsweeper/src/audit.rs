//! End-to-end audit: ingest an export, score it, summarize it.

use std::path::Path;

use chrono::{DateTime, Utc};
use dnsweeper_core::{ParseResult, Provider, RankedRecord, Result, RiskLevel, RiskSummary};
use dnsweeper_ingest::ZoneIngestor;
use dnsweeper_risk::{summarize, LastSeenMap, RiskCalculator, RiskCalculatorConfig};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Knobs for one audit run
#[derive(Debug, Clone, Default)]
pub struct AuditOptions {
    /// Skip header detection and parse as this provider
    pub provider: Option<Provider>,
    /// Last observation per record id or owner name
    pub last_seen: LastSeenMap,
    /// Ranked records below this level are dropped from the report
    pub min_level: RiskLevel,
    /// Scoring thresholds and patterns
    pub risk: RiskCalculatorConfig,
    /// Reference time; the wall clock when unset
    pub now: Option<DateTime<Utc>>,
}

impl AuditOptions {
    /// Options with auto-detection and default scoring
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Force a provider
    #[must_use]
    pub const fn provider(mut self, provider: Provider) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set last-seen timestamps
    #[must_use]
    pub fn last_seen(mut self, last_seen: LastSeenMap) -> Self {
        self.last_seen = last_seen;
        self
    }

    /// Set the minimum level kept in the ranking
    #[must_use]
    pub const fn min_level(mut self, level: RiskLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Set the risk configuration
    #[must_use]
    pub fn risk(mut self, config: RiskCalculatorConfig) -> Self {
        self.risk = config;
        self
    }

    /// Pin the reference time
    #[must_use]
    pub const fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }
}

/// Outcome of an audit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
    /// Ingestion outcome including row errors
    pub parse: ParseResult,
    /// Records at or above the minimum level, riskiest first
    pub ranked: Vec<RankedRecord>,
    /// Statistics over every parsed record, before level filtering
    pub summary: RiskSummary,
    /// Reference time the scores were computed against
    pub evaluated_at: DateTime<Utc>,
}

impl AuditReport {
    /// Ranked records at exactly `level`
    pub fn at_level(&self, level: RiskLevel) -> impl Iterator<Item = &RankedRecord> {
        self.ranked.iter().filter(move |r| r.score.level == level)
    }
}

/// Reusable ingest-and-score pipeline
#[derive(Debug, Clone)]
pub struct Auditor {
    ingestor: ZoneIngestor,
    calculator: RiskCalculator,
    options: AuditOptions,
}

impl Auditor {
    /// Validate the risk configuration and build the pipeline
    pub fn new(options: AuditOptions) -> Result<Self> {
        let mut builder = ZoneIngestor::builder();
        if let Some(provider) = options.provider {
            builder = builder.provider(provider);
        }
        let calculator = RiskCalculator::new(options.risk.clone())?;

        Ok(Self {
            ingestor: builder.build(),
            calculator,
            options,
        })
    }

    /// Audit an export held in memory
    #[instrument(skip_all, fields(bytes = bytes.len()))]
    pub fn audit_bytes(&self, bytes: &[u8]) -> Result<AuditReport> {
        let parse = self.ingestor.ingest_bytes(bytes)?;
        Ok(self.report(parse))
    }

    /// Read and audit an export file
    pub async fn audit_file(&self, path: impl AsRef<Path>) -> Result<AuditReport> {
        let parse = self.ingestor.ingest_file(path).await?;
        Ok(self.report(parse))
    }

    /// Score an existing parse result
    #[must_use]
    pub fn report(&self, parse: ParseResult) -> AuditReport {
        let now = self.options.now.unwrap_or_else(Utc::now);
        let ranked = self
            .calculator
            .rank_at(&parse.records, &self.options.last_seen, now);
        let summary = summarize(ranked.iter().map(|r| &r.score));

        let ranked: Vec<RankedRecord> = ranked
            .into_iter()
            .filter(|r| r.score.level >= self.options.min_level)
            .collect();

        debug!(
            records = parse.records.len(),
            row_errors = parse.errors.len(),
            kept = ranked.len(),
            average = summary.average_score,
            "audit complete"
        );

        AuditReport {
            parse,
            ranked,
            summary,
            evaluated_at: now,
        }
    }

    /// Underlying calculator
    #[must_use]
    pub const fn calculator(&self) -> &RiskCalculator {
        &self.calculator
    }
}

/// One-shot audit of an export held in memory
pub fn audit(bytes: &[u8], options: &AuditOptions) -> Result<AuditReport> {
    Auditor::new(options.clone())?.audit_bytes(bytes)
}

/// One-shot audit of an export file
pub async fn audit_file(path: impl AsRef<Path>, options: &AuditOptions) -> Result<AuditReport> {
    Auditor::new(options.clone())?.audit_file(path).await
}

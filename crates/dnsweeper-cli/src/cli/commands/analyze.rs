//! `dnsweeper analyze` - Rank the records of an export by risk.

use std::path::Path;

use anyhow::{Context as _, Result};
use chrono::{DateTime, NaiveDate, Utc};
use colored::Colorize;
use dnsweeper::{audit_file, AuditOptions, AuditReport, LastSeenMap, RiskLevel};
use serde::Deserialize;
use tabled::{settings::Style, Table, Tabled};
use tracing::debug;

use super::Context;
use crate::cli::args::AnalyzeArgs;
use crate::output::{clip, level_label, OutputFormat};

/// Rows shown in pretty output when `--top` is not given
const PRETTY_LIMIT: usize = 25;

#[derive(Tabled)]
struct RankedRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    record_type: String,
    #[tabled(rename = "TTL")]
    ttl: u32,
    #[tabled(rename = "Score")]
    score: u32,
    #[tabled(rename = "Level")]
    level: String,
    #[tabled(rename = "Last seen")]
    last_seen: String,
    #[tabled(rename = "First hint")]
    hint: String,
}

pub async fn execute(ctx: Context, args: AnalyzeArgs) -> Result<()> {
    let last_seen = match &args.last_seen {
        Some(path) => load_last_seen(path)?,
        None => LastSeenMap::new(),
    };

    let mut options = AuditOptions::new()
        .last_seen(last_seen)
        .min_level(args.min_level.or(ctx.config.min_level).unwrap_or_default())
        .risk(ctx.config.risk.clone());
    if let Some(provider) = args.provider {
        options = options.provider(provider);
    }

    let mut report = audit_file(&args.file, &options)
        .await
        .with_context(|| format!("auditing {}", args.file.display()))?;

    if let Some(top) = args.top {
        report.ranked.truncate(top);
    }

    match ctx.output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Yaml => {
            println!("{}", serde_yaml::to_string(&report)?);
        }
        OutputFormat::Csv => write_csv(&report)?,
        OutputFormat::Pretty => print_report_pretty(&report, &args, &ctx),
    }

    Ok(())
}

fn write_csv(report: &AuditReport) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    wtr.write_record([
        "id",
        "name",
        "type",
        "value",
        "ttl",
        "score",
        "level",
        "last_seen_days",
        "recommendations",
    ])?;

    for ranked in &report.ranked {
        let record = &ranked.record;
        let score = &ranked.score;
        wtr.write_record(&[
            record.id.clone(),
            record.name.clone(),
            record.record_type.to_string(),
            record.value.clone(),
            record.ttl.to_string(),
            score.total.to_string(),
            score.level.to_string(),
            score.factors.last_seen_days.to_string(),
            score.recommendations.join("; "),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

fn print_report_pretty(report: &AuditReport, args: &AnalyzeArgs, ctx: &Context) {
    let parse = &report.parse;

    // Header
    println!("{} {}", "File:".bold(), args.file.display().to_string().dimmed());
    println!("{} {}", "Provider:".bold(), parse.meta.provider.as_str().cyan());
    if let Some(encoding) = &parse.encoding_info {
        println!(
            "{} {} ({:?} reliability)",
            "Encoding:".bold(),
            encoding.detected_encoding,
            encoding.reliability
        );
    }
    println!(
        "{} {} of {} parsed",
        "Rows:".bold(),
        parse.valid_rows.to_string().cyan(),
        parse.total_rows
    );
    println!();

    // Row errors
    if !parse.errors.is_empty() {
        println!("{}", "Row errors:".bold().underline());
        for error in &parse.errors {
            println!(
                "  {} {} {}",
                format!("row {}", error.row_index + 1).yellow(),
                format!("[{}]", error.kind).dimmed(),
                error.message
            );
        }
        println!();
    }

    // Ranked records
    let limit = args.top.unwrap_or(PRETTY_LIMIT);
    if report.ranked.is_empty() {
        println!("{}", "No records at or above the selected level.".green());
    } else {
        println!("{}", "Records by risk:".bold().underline());

        let rows: Vec<RankedRow> = report
            .ranked
            .iter()
            .take(limit)
            .map(|r| RankedRow {
                name: clip(&r.record.name, 40),
                record_type: r.record.record_type.to_string(),
                ttl: r.record.ttl,
                score: r.score.total,
                level: level_label(r.score.level).to_string(),
                last_seen: last_seen_label(r.score.factors.last_seen_days),
                hint: r
                    .score
                    .recommendations
                    .first()
                    .map(|h| clip(h, 50))
                    .unwrap_or_default(),
            })
            .collect();

        let table = Table::new(&rows).with(Style::rounded()).to_string();
        println!("{table}");

        if report.ranked.len() > limit {
            println!();
            println!(
                "{}",
                format!("... and {} more records", report.ranked.len() - limit).dimmed()
            );
        }

        if ctx.verbose {
            print_recommendations(report, limit);
        }
    }

    // Summary
    let summary = &report.summary;
    println!();
    println!("{}", "Summary:".bold().underline());
    println!(
        "  {} records, average score {:.1}, {} recommendations",
        summary.total, summary.average_score, summary.total_recommendations
    );
    for level in RiskLevel::ALL.iter().rev() {
        println!(
            "  {:>10}  {}",
            level_label(*level),
            summary.by_level.get(*level)
        );
    }

    if args.last_seen.is_none() {
        println!();
        println!(
            "{}",
            "Tip: pass --last-seen with observation dates; unknown records are treated as stale"
                .dimmed()
        );
    }
}

fn print_recommendations(report: &AuditReport, limit: usize) {
    println!();
    println!("{}", "Recommendations:".bold().underline());
    for ranked in report.ranked.iter().take(limit) {
        if ranked.score.recommendations.is_empty() {
            continue;
        }
        println!("  {}", ranked.record.name.bold());
        for hint in &ranked.score.recommendations {
            println!("    - {hint}");
        }
    }
}

fn last_seen_label(days: i64) -> String {
    match days {
        999 => "unknown".to_string(),
        d if d < 0 => "future".to_string(),
        0 => "today".to_string(),
        1 => "1 day".to_string(),
        d => format!("{d} days"),
    }
}

#[derive(Deserialize)]
struct LastSeenRow {
    name: String,
    last_seen: String,
}

/// Read a `name,last_seen` CSV into a lookup keyed by lower-cased owner name
fn load_last_seen(path: &Path) -> Result<LastSeenMap> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let mut map = LastSeenMap::new();
    for (index, row) in reader.deserialize::<LastSeenRow>().enumerate() {
        let row = row.with_context(|| format!("{}: row {}", path.display(), index + 1))?;
        let seen = parse_timestamp(&row.last_seen).with_context(|| {
            format!(
                "{}: row {}: {:?} is neither RFC 3339 nor YYYY-MM-DD",
                path.display(),
                index + 1,
                row.last_seen
            )
        })?;
        let name = row.name.strip_suffix('.').unwrap_or(&row.name).to_ascii_lowercase();
        map.insert(name, seen);
    }

    debug!(entries = map.len(), path = %path.display(), "loaded last-seen dates");
    Ok(map)
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

//! `dnsweeper detect` - Show how an export would be read.

use anyhow::{Context as _, Result};
use colored::Colorize;
use dnsweeper::{DelimiterInfo, EncodingInfo, Provider, ZoneIngestor};
use serde::Serialize;

use super::Context;
use crate::cli::args::DetectArgs;
use crate::output::OutputFormat;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Detection {
    file: String,
    provider: Provider,
    headers: Vec<String>,
    encoding: EncodingInfo,
    delimiter: DelimiterInfo,
}

pub async fn execute(ctx: Context, args: DetectArgs) -> Result<()> {
    let bytes = tokio::fs::read(&args.file)
        .await
        .with_context(|| format!("reading {}", args.file.display()))?;
    let sniff = ZoneIngestor::new().sniff(&bytes)?;

    let detection = Detection {
        file: args.file.display().to_string(),
        provider: sniff.provider,
        headers: sniff.headers,
        encoding: sniff.encoding,
        delimiter: sniff.delimiter,
    };

    match ctx.output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&detection)?);
        }
        OutputFormat::Yaml => {
            println!("{}", serde_yaml::to_string(&detection)?);
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            wtr.write_record(["file", "provider", "encoding", "confidence", "bom", "delimiter"])?;
            wtr.write_record(&[
                detection.file.clone(),
                detection.provider.to_string(),
                detection.encoding.detected_encoding.clone(),
                format!("{:.2}", detection.encoding.confidence),
                detection.encoding.bom_present.to_string(),
                delimiter_name(detection.delimiter.used),
            ])?;
            wtr.flush()?;
        }
        OutputFormat::Pretty => print_detection_pretty(&detection),
    }

    Ok(())
}

fn print_detection_pretty(detection: &Detection) {
    println!("{} {}", "File:".bold(), detection.file.dimmed());
    println!("{} {}", "Provider:".bold(), detection.provider.as_str().cyan());
    println!(
        "{} {} ({:.0}% confidence, {:?} reliability{})",
        "Encoding:".bold(),
        detection.encoding.detected_encoding.cyan(),
        detection.encoding.confidence * 100.0,
        detection.encoding.reliability,
        if detection.encoding.bom_present { ", BOM" } else { "" }
    );

    let candidates: Vec<String> = detection
        .delimiter
        .detected
        .iter()
        .map(|c| delimiter_name(*c))
        .collect();
    println!(
        "{} {} (candidates: {})",
        "Delimiter:".bold(),
        delimiter_name(detection.delimiter.used).cyan(),
        if candidates.is_empty() {
            "none".to_string()
        } else {
            candidates.join(", ")
        }
    );
    println!("{} {}", "Columns:".bold(), detection.headers.join(", "));
}

fn delimiter_name(c: char) -> String {
    match c {
        '\t' => "tab".to_string(),
        ',' => "comma".to_string(),
        ';' => "semicolon".to_string(),
        '|' => "pipe".to_string(),
        other => other.to_string(),
    }
}

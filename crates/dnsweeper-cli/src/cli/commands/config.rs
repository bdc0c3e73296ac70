//! `dnsweeper config` - CLI configuration management.

use anyhow::Result;
use colored::Colorize;

use super::Context;
use crate::cli::args::{ConfigArgs, ConfigCommands};
use crate::config::Config;
use crate::output::OutputFormat;

pub async fn execute(ctx: Context, args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Show => show_config(&ctx),
        ConfigCommands::Path => show_path(&ctx),
        ConfigCommands::Init { force } => init_config(&ctx, force),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    let config = &ctx.config;

    match ctx.output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(config)?);
        }
        OutputFormat::Yaml => {
            println!("{}", serde_yaml::to_string(config)?);
        }
        OutputFormat::Csv | OutputFormat::Pretty => {
            println!("{}", "Current Configuration:".bold());
            println!();

            let unset = || "(not set)".dimmed().to_string();
            println!(
                "  {} {}",
                "output_format:".bold(),
                config.output_format.map_or_else(unset, |f| f.to_string())
            );
            println!(
                "  {} {}",
                "min_level:".bold(),
                config.min_level.map_or_else(unset, |l| l.to_string())
            );

            println!();
            println!("{}", "[risk]".bold());
            println!(
                "  {} {}s",
                "high_risk_ttl_threshold:".bold(),
                config.risk.high_risk_ttl_threshold
            );
            println!(
                "  {} {} days",
                "unused_days_threshold:".bold(),
                config.risk.unused_days_threshold
            );
            println!(
                "  {} {}",
                "suspicious_patterns:".bold(),
                config.risk.suspicious_patterns.join(" ")
            );

            println!();
            let source = if ctx.config_path.exists() {
                ctx.config_path.display().to_string()
            } else {
                format!("{} (defaults, file not found)", ctx.config_path.display())
            };
            println!("{} {}", "Loaded from:".dimmed(), source.dimmed());
        }
    }

    Ok(())
}

fn show_path(ctx: &Context) -> Result<()> {
    println!("{}", ctx.config_path.display());
    Ok(())
}

fn init_config(ctx: &Context, force: bool) -> Result<()> {
    let path = &ctx.config_path;
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists: {}\n\
             Use --force to overwrite it.",
            path.display()
        );
    }

    Config::default().save_to(path)?;
    println!(
        "{} Wrote default configuration to {}.",
        "Success:".green().bold(),
        path.display().to_string().cyan()
    );
    Ok(())
}

//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;

use anyhow::Result;
use args::{Cli, Commands};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Run the CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    if cli.no_color {
        colored::control::set_override(false);
    }

    // Load configuration
    let config_path = match cli.config {
        Some(path) => path,
        None => Config::path()?,
    };
    let config = Config::load_from(&config_path)?;

    // Flag beats config file beats default
    let output_format = cli.output.or(config.output_format).unwrap_or_default();

    let ctx = commands::Context {
        output_format,
        verbose: cli.verbose,
        config,
        config_path,
    };

    match cli.command {
        Commands::Analyze(args) => commands::analyze::execute(ctx, args).await,
        Commands::Detect(args) => commands::detect::execute(ctx, args).await,
        Commands::Config(args) => commands::config::execute(ctx, args).await,
    }
}

/// Log to stderr. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

//! CLI module for the dead liquidity report
//!
//! Runs the per-token analysis and lists the configured tokens.

use std::path::PathBuf;

use chrono::Utc;
use clap::{Args, Parser, Subcommand};

use crate::{
    configuration::{get_configuration, set_configuration, Config},
    error::Error,
    handler::{
        dead_liquidity::analyze_token,
        report_file::{report_file_name, write_report},
    },
    helpers::unix_to_date,
    provider::Subgraph,
};

/// Aave dead liquidity report
#[derive(Parser)]
#[command(name = "dead-liquidity")]
#[command(
    about = "Finds lending deposits untouched since the inactivity cutoff",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Log per-page and per-batch details
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the CSV reports (default if no command specified)
    Analyze(AnalyzeArgs),

    /// List the configured tokens
    Tokens,
}

#[derive(Args, Debug, Default, Clone)]
pub struct AnalyzeArgs {
    /// Only analyze these token symbols (repeatable)
    #[arg(long = "token")]
    pub tokens: Vec<String>,

    /// Append today's date to report file names
    #[arg(long)]
    pub dated: bool,

    /// Directory for the reports, overrides OUTPUT_DIRECTORY
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}

/// Initialize configuration and return Config
pub fn init_config() -> Result<Config, Error> {
    set_configuration()?;
    get_configuration()
}

pub async fn run_analyze(args: AnalyzeArgs) -> Result<(), Error> {
    let config = init_config()?;
    let tokens = config.select_tokens(&args.tokens)?;
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.output_directory));

    let now = Utc::now().timestamp();
    let cutoff = config.cutoff(now);
    let date = if args.dated {
        Some(unix_to_date(now)?)
    } else {
        None
    };

    tracing::info!("Starting multi-token analysis...");
    tracing::info!("Cutoff date: {}", unix_to_date(cutoff)?);
    tracing::info!(
        "Analyzing tokens: {}",
        tokens
            .iter()
            .map(|token| token.symbol.as_str())
            .collect::<Vec<&str>>()
            .join(", ")
    );

    let subgraph = Subgraph::new(config.clone())?;
    let mut summary = Vec::with_capacity(tokens.len());

    for token in &tokens {
        tracing::info!("Analyzing {} ({})...", token.symbol, token.address);

        let report = analyze_token(&subgraph, token, &config, cutoff, now).await?;
        let file_name = report_file_name(&token.symbol, date);
        let path = write_report(&output_dir, &file_name, &report.csv)?;

        tracing::info!("{} CSV saved to: {}", token.symbol, path.display());
        summary.push((token.symbol.to_owned(), report.users.len()));
    }

    let total: usize = summary.iter().map(|(_, users)| users).sum();
    tracing::info!("Total dead liquidity users across all tokens: {}", total);
    tracing::info!("Breakdown by token:");
    for (symbol, users) in &summary {
        tracing::info!("  {}: {} users", symbol, users);
    }

    Ok(())
}

pub fn run_tokens() -> Result<(), Error> {
    let config = init_config()?;

    for token in &config.tokens {
        tracing::info!("{} {}", token.symbol, token.address);
    }

    Ok(())
}

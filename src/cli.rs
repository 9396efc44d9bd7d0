//! Subcommands of the `agroverse` binary:
//! - `diagnose`: compose a diagnosis from similarity-index rows
//! - `seasonal`: seasonal relevance of a disease for a month
//! - `classify`: confidence level of a score

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use agroverse::{
    classify, render_summary, AgroverseConfig, Clock, FixedClock, RawCandidate, SystemClock,
};
use anyhow::{Context, Result};
use chrono::Datelike;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

/// Plant disease diagnosis confidence engine
#[derive(Parser, Debug)]
#[command(name = "agroverse")]
#[command(about = "Score ranked plant-disease candidates into an explainable diagnosis")]
#[command(version)]
pub struct Cli {
    /// Configuration file (YAML, JSON, or TOML). Defaults to ./agroverse.* when present.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compose a diagnosis from similarity-index rows (a JSON array)
    Diagnose {
        /// File with the rows, or `-` for stdin
        #[arg(long)]
        candidates: String,
        /// Keep at most this many candidates (defaults to engine.match_count)
        #[arg(long)]
        top_k: Option<usize>,
        /// Score seasonality for this month instead of the current one
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Print the seasonal relevance of a disease
    Seasonal {
        disease: String,
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,
    },
    /// Print the confidence level of a score
    Classify {
        #[arg(allow_negative_numbers = true)]
        score: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON, one line
    Json,
    /// Indented JSON
    Pretty,
    /// Human-readable report
    Summary,
}

pub fn run(cli: Cli, config: &AgroverseConfig) -> Result<ExitCode> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let status = execute(cli, config, &SystemClock, &mut out)?;
    Ok(ExitCode::from(status))
}

/// Run a parsed command against `clock`, writing results to `out`.
///
/// Returns the process exit status: `0`, or `1` when a diagnosis fails.
fn execute(
    cli: Cli,
    config: &AgroverseConfig,
    clock: &dyn Clock,
    out: &mut dyn Write,
) -> Result<u8> {
    match cli.command {
        Commands::Diagnose {
            candidates,
            top_k,
            month,
            format,
        } => diagnose(config, clock, &candidates, top_k, month, format, out),
        Commands::Seasonal { disease, month } => {
            let composer = config.build_composer()?;
            let month = month.unwrap_or_else(|| clock.month());
            let relevance = composer.seasonal_table().relevance(&disease, month);
            writeln!(out, "{relevance:.2}")?;
            Ok(0)
        }
        Commands::Classify { score } => {
            writeln!(out, "{}", classify(score))?;
            Ok(0)
        }
    }
}

fn diagnose(
    config: &AgroverseConfig,
    clock: &dyn Clock,
    input: &str,
    top_k: Option<usize>,
    month: Option<u32>,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<u8> {
    let composer = config.build_composer()?;
    let rows = read_rows(input)?;
    let top_k = top_k.unwrap_or(config.engine.match_count);
    info!(rows = rows.len(), top_k, "diagnose_start");

    let result = match month {
        Some(month) => composer.compose_raw(rows, top_k, &month_clock(clock, month)?),
        None => composer.compose_raw(rows, top_k, clock),
    };

    match format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(&result)?)?,
        OutputFormat::Pretty => writeln!(out, "{}", serde_json::to_string_pretty(&result)?)?,
        OutputFormat::Summary => write!(out, "{}", render_summary(&result))?,
    }

    Ok(if result.success { 0 } else { 1 })
}

/// First day of `month` in the current year of `clock`.
fn month_clock(clock: &dyn Clock, month: u32) -> Result<FixedClock> {
    let year = clock.today().year();
    FixedClock::for_month(year, month).with_context(|| format!("invalid month {month}"))
}

fn read_rows(input: &str) -> Result<Vec<RawCandidate>> {
    let text = if input == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read candidates from stdin")?;
        buf
    } else {
        fs::read_to_string(input).with_context(|| format!("failed to read {input}"))?
    };
    serde_json::from_str(&text).context("candidates must be a JSON array of index rows")
}

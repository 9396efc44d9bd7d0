//! `agroverse` command-line entry point.
//!
//! Results go to stdout; logs go to stderr.

#![forbid(unsafe_code)]

use std::process::ExitCode;

use agroverse::{AgroverseConfig, LoggingConfig};
use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;

fn main() -> Result<ExitCode> {
    let _ = dotenvy::dotenv();

    let cli = cli::Cli::parse();
    let config = AgroverseConfig::load(cli.config.as_deref())
        .context("failed to load configuration")?;
    init_tracing(&config.logging);

    cli::run(cli, &config)
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.level.as_str()));
    let registry = tracing_subscriber::registry().with(filter);
    if logging.json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

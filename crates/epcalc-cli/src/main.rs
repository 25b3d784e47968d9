//! EPCalc CLI
//!
//! Reads a model document, runs validation and evaluation, writes the
//! report document and prints a summary.

mod config;
mod output;

use std::fs;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use epcalc_common::EpcError;
use epcalc_engine::{EpcEngine, EpcReport};
use serde_json::Value;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::{Args, CliConfig};

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            return ExitCode::from(output::usage_exit_code(&err));
        }
    };

    match CliConfig::load(args).map_err(anyhow::Error::from).and_then(|c| run(&c)) {
        Ok(report) => {
            print!("{}", output::summary(&report));
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{:#}", err);
            ExitCode::from(output::exit_code(&err))
        }
    }
}

fn run(config: &CliConfig) -> Result<EpcReport> {
    info!(
        "Evaluating {} (margin={}, strict={})",
        config.input.display(),
        config.margin,
        config.strict
    );

    let text = fs::read_to_string(&config.input)
        .map_err(EpcError::from)
        .with_context(|| format!("Failed to read model file {}", config.input.display()))?;
    let raw: Value = serde_json::from_str(&text)
        .map_err(EpcError::from)
        .with_context(|| format!("Failed to parse model JSON {}", config.input.display()))?;

    let report = EpcEngine::new(config.engine_config()).run(&raw)?;

    let rendered = serde_json::to_string_pretty(&report).map_err(EpcError::from)?;
    fs::write(&config.output, rendered)
        .map_err(EpcError::from)
        .with_context(|| format!("Failed to write result {}", config.output.display()))?;
    info!("Wrote {}", config.output.display());

    Ok(report)
}

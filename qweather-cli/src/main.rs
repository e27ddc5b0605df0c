//! Binary crate for the `qweather` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive configuration
//! - Human-friendly output formatting

use clap::Parser;
use qweather_core::{LogLevel, QWeatherError};
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod render;

#[tokio::main]
async fn main() -> ExitCode {
    let cmd = cli::Cli::parse();

    match run(cmd).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", report(&err));
            ExitCode::FAILURE
        }
    }
}

async fn run(cmd: cli::Cli) -> anyhow::Result<()> {
    let config = cmd.config()?;
    init_tracing(config.log_level);
    cmd.run(config).await
}

/// Logs go to stderr so `--json` output stays clean. `RUST_LOG` wins over the
/// configured level.
fn init_tracing(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_directives(level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn log_directives(level: LogLevel) -> String {
    let level = level.filter_directive();
    format!("qweather_core={level},qweather={level}")
}

/// Core errors already spell out their cause chain; anything else gets the
/// full anyhow chain on one line.
fn report(err: &anyhow::Error) -> String {
    match err.downcast_ref::<QWeatherError>() {
        Some(err) => err.to_string(),
        None => format!("{err:#}"),
    }
}

pub mod cli;
pub mod core;
pub mod parsers;
pub mod providers;

use crate::core::MemorySink;
use crate::core::config::AppConfig;
use crate::providers::ExchangeInput;
use anyhow::{Context, Result};
use chrono::Utc;
use clap::ValueEnum;
use std::time::Duration;
use tracing::{debug, error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// InfluxDB line protocol
    #[default]
    Line,
    /// Human readable table
    Table,
}

pub enum AppCommand {
    Gather {
        format: OutputFormat,
        interval: Option<Duration>,
    },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let input = ExchangeInput::from_config(config.exchange)
        .context("Invalid exchange configuration")?;

    match command {
        AppCommand::Gather {
            format,
            interval: None,
        } => {
            let output = gather_once(&input, format).await?;
            println!("{output}");
            Ok(())
        }
        AppCommand::Gather {
            format,
            interval: Some(period),
        } => gather_every(&input, format, period).await,
    }
}

/// Runs a single cycle and renders its points.
pub async fn gather_once(input: &ExchangeInput, format: OutputFormat) -> Result<String> {
    let sink = MemorySink::new();
    input.gather(&sink).await?;
    let points = sink.take_points();
    info!(points = points.len(), "Gathered exchange rates");

    let now = Utc::now();
    Ok(match format {
        OutputFormat::Line => cli::output::render_line_protocol(&points, now),
        OutputFormat::Table => {
            cli::output::render_table(&points, &input.config().base_currency, now)
        }
    })
}

/// Gathers on a fixed period until interrupted. A failed cycle is logged and
/// the next one runs as usual.
async fn gather_every(input: &ExchangeInput, format: OutputFormat, period: Duration) -> Result<()> {
    info!(?period, "Gathering exchange rates periodically");
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match gather_once(input, format).await {
                    Ok(output) => println!("{output}"),
                    Err(e) => error!(error = %e, "Gather cycle failed"),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, stopping");
                return Ok(());
            }
        }
    }
}

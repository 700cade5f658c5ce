//! Market Pipeline CLI
//!
//! Usage:
//!   market-pipeline simulate [--hours 2] [--ticks 10] [--tick-ms 1000]
//!   market-pipeline replay <file>
//!
//! Prints the final chart frame as JSON on stdout; logs go to stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use data_aggregator::{Timeframe, ViewWindow};
use indicator_engine::IndicatorId;
use market_pipeline::host::{self, SimulateOptions};
use market_pipeline::{ChartFrame, PipelineConfig};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "market-pipeline")]
#[command(version, about = "Trade to candle and indicator pipeline")]
struct Cli {
    /// Configuration file (toml, json or yaml)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Candle timeframe: 1m, 5m, 15m or 1h
    #[arg(short, long, global = true)]
    timeframe: Option<Timeframe>,

    /// Comma separated indicators, e.g. vwap,ema9,macd
    #[arg(short, long, global = true, value_delimiter = ',')]
    indicators: Vec<IndicatorId>,

    /// Trailing view window: 15m, 1h, 1d or 1w
    #[arg(short, long, global = true)]
    window: Option<ViewWindow>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Stream simulated trades through the pipeline
    Simulate {
        /// Starting price
        #[arg(long)]
        base_price: Option<f64>,
        /// Hours of history loaded before live ticks
        #[arg(long, default_value_t = 2)]
        hours: u32,
        /// Number of live ticks
        #[arg(long, default_value_t = 10)]
        ticks: u32,
        /// Milliseconds between live ticks
        #[arg(long, default_value_t = 1000)]
        tick_ms: u64,
        /// Seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Replay newline-delimited feed messages from a file
    Replay {
        /// Feed capture, one JSON message per line
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let mut config = PipelineConfig::load(cli.config.as_deref())?;
    if let Some(timeframe) = cli.timeframe {
        config.timeframe = Some(timeframe);
    }
    if !cli.indicators.is_empty() {
        config.indicators = cli.indicators;
    }
    if cli.window.is_some() {
        config.view_window = cli.window;
    }

    info!(
        "Starting market pipeline v{} ({} candles, indicators: {:?})",
        env!("CARGO_PKG_VERSION"),
        config.initial_timeframe(),
        config.indicators
    );

    let frame = match cli.command {
        Commands::Simulate {
            base_price,
            hours,
            ticks,
            tick_ms,
            seed,
        } => {
            if let Some(base_price) = base_price {
                config.simulation.base_price = base_price;
            }
            if seed.is_some() {
                config.simulation.seed = seed;
            }
            config.validate()?;

            let options = SimulateOptions {
                hours,
                ticks,
                tick_interval: Duration::from_millis(tick_ms.max(1)),
            };
            host::simulate(&config, options).await?
        }
        Commands::Replay { file } => host::replay(&config, &file).await?,
    };

    print_frame(&frame)
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "market_pipeline=info,data_aggregator=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_line_number(true),
        )
        .init();
}

fn print_frame(frame: &ChartFrame) -> Result<()> {
    let json = serde_json::to_string_pretty(frame).context("Failed to encode chart frame")?;
    println!("{json}");
    Ok(())
}

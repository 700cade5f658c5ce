//! Async hosts driving a pipeline from a trade source

use crate::{ChartFrame, Pipeline, PipelineConfig};
use anyhow::{Context, Result};
use chrono::{TimeZone, Utc};
use data_aggregator::feed::{TradeSimulator, parse_message};
use services_common::{Clock, ManualClock, SystemClock, Trade};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

const TICK_CHANNEL_CAPACITY: usize = 64;

/// Live phase of a simulation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulateOptions {
    /// Hours of history loaded before the live phase
    pub hours: u32,
    /// Number of live ticks
    pub ticks: u32,
    /// Interval between live ticks
    pub tick_interval: Duration,
}

impl Default for SimulateOptions {
    fn default() -> Self {
        Self {
            hours: 2,
            ticks: 10,
            tick_interval: Duration::from_secs(1),
        }
    }
}

/// Load simulated history, then stream live ticks through the pipeline
///
/// A producer task emits one batch per tick over a channel while this task
/// ingests and renders a frame for each batch. Returns the final frame.
pub async fn simulate(config: &PipelineConfig, options: SimulateOptions) -> Result<ChartFrame> {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let pipeline = Pipeline::new(config, clock.clone())?;
    let mut simulator = TradeSimulator::new(config.simulation.clone());

    let history = simulator.historical(clock.now_ms(), options.hours);
    let loaded = pipeline.aggregator().ingest_batch(history);
    info!(
        "Loaded {} historical trades ({}h ending {})",
        loaded,
        options.hours,
        format_timestamp(clock.now_ms())
    );

    let (tx, mut rx) = mpsc::channel::<Vec<Trade>>(TICK_CHANNEL_CAPACITY);
    let producer = {
        let clock = clock.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(options.tick_interval);
            for _ in 0..options.ticks {
                interval.tick().await;
                let batch = simulator.tick(clock.now_ms());
                if tx.send(batch).await.is_err() {
                    warn!("Frame consumer went away, stopping trade producer");
                    break;
                }
            }
        })
    };

    let mut frame = pipeline.frame(clock.now_ms());
    while let Some(batch) = rx.recv().await {
        let accepted = pipeline.aggregator().ingest_batch(batch);
        frame = pipeline.frame(clock.now_ms());
        if let Some(last) = frame.series.candles.last() {
            debug!(
                "Tick: {} trades, {} candles, last close {:.4}",
                accepted,
                frame.series.candles.len(),
                last.candle.close
            );
        }
    }

    producer.await.context("Trade producer task failed")?;
    info!(
        "Simulation finished with {} retained trades",
        pipeline.aggregator().len()
    );
    Ok(frame)
}

/// Replay newline-delimited feed messages from a file
///
/// Retention runs on a manual clock that follows the newest trade seen, so a
/// recorded session replays the same regardless of wall time. Blank lines are
/// skipped and undecodable lines are logged.
pub async fn replay(config: &PipelineConfig, path: &Path) -> Result<ChartFrame> {
    let clock = Arc::new(ManualClock::new(0));
    let pipeline = Pipeline::new(config, clock.clone())?;

    let file = tokio::fs::File::open(path)
        .await
        .with_context(|| format!("Failed to open feed file {}", path.display()))?;
    let mut lines = BufReader::new(file).lines();

    let mut line_number = 0usize;
    let mut accepted = 0usize;
    while let Some(line) = lines.next_line().await? {
        line_number += 1;
        if line.trim().is_empty() {
            continue;
        }

        match parse_message(&line) {
            Ok(raw) => {
                // out-of-range timestamps are rejected on ingest, never followed
                if let Some(newest) = raw.iter().filter_map(|t| t.timestamp_ms().ok()).max() {
                    clock.advance_to(newest);
                }
                accepted += pipeline.on_raw_trades(raw);
            }
            Err(e) => warn!("Line {}: {}", line_number, e),
        }
    }

    info!(
        "Replayed {} lines from {}, {} trades accepted, clock at {}",
        line_number,
        path.display(),
        accepted,
        format_timestamp(clock.now_ms())
    );
    Ok(pipeline.frame(clock.now_ms()))
}

fn format_timestamp(ms: i64) -> String {
    Utc.timestamp_millis_opt(ms)
        .single()
        .map_or_else(|| ms.to_string(), |t| t.to_rfc3339())
}

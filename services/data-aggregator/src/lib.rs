//! Data Aggregator
//!
//! Aggregates raw trades into OHLCV candles at selectable resolutions:
//! - Bounded trade log (24h retention by default)
//! - Candle snapshots re-derived from the log on every read (1m, 5m, 15m, 1h
//!   or any positive width)
//! - Trailing view windows and price-change summaries for consumers
//! - Trade feed decoding and a synthetic trade source

pub mod aggregators;
pub mod config;
pub mod feed;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use services_common::constants::buckets::{
    FIFTEEN_MINUTES_MS, FIVE_MINUTES_MS, ONE_HOUR_MS, ONE_MINUTE_MS,
};
use services_common::{Candle, PipelineError, PipelineResult, Trade};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::warn;

pub use aggregators::{CandleAggregator, PriceChange, ViewWindow, filter_window};
pub use config::AggregatorConfig;

/// Timeframe for aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Timeframe {
    /// 1 minute bars
    #[default]
    M1,
    /// 5 minute bars
    M5,
    /// 15 minute bars
    M15,
    /// 1 hour bars
    H1,
}

impl Timeframe {
    /// Bucket width in milliseconds
    #[must_use]
    pub const fn duration_ms(&self) -> i64 {
        match self {
            Timeframe::M1 => ONE_MINUTE_MS,
            Timeframe::M5 => FIVE_MINUTES_MS,
            Timeframe::M15 => FIFTEEN_MINUTES_MS,
            Timeframe::H1 => ONE_HOUR_MS,
        }
    }

    /// Short label ("1m", "5m", "15m", "1h")
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Timeframe::M1 => "1m",
            Timeframe::M5 => "5m",
            Timeframe::M15 => "15m",
            Timeframe::H1 => "1h",
        }
    }

    /// All selectable timeframes in ascending order
    #[must_use]
    pub const fn all() -> &'static [Timeframe] {
        &[Timeframe::M1, Timeframe::M5, Timeframe::M15, Timeframe::H1]
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Timeframe {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Timeframe::all()
            .iter()
            .copied()
            .find(|tf| tf.label() == s.trim())
            .ok_or_else(|| PipelineError::InvalidConfiguration(format!("unknown timeframe '{s}'")))
    }
}

impl TryFrom<String> for Timeframe {
    type Error = PipelineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Timeframe> for String {
    fn from(tf: Timeframe) -> Self {
        tf.label().to_string()
    }
}

/// Thread-safe handle to a `CandleAggregator`
///
/// Every operation takes the same lock, so a snapshot never observes a
/// half-applied append or eviction.
#[derive(Debug, Clone)]
pub struct SharedAggregator {
    inner: Arc<Mutex<CandleAggregator>>,
}

impl SharedAggregator {
    /// Wrap an aggregator
    #[must_use]
    pub fn new(aggregator: CandleAggregator) -> Self {
        Self {
            inner: Arc::new(Mutex::new(aggregator)),
        }
    }

    /// Ingest a single trade
    pub fn ingest(&self, trade: Trade) -> PipelineResult<()> {
        self.inner.lock().ingest(trade)
    }

    /// Ingest a batch under one lock, returning the number accepted
    ///
    /// Rejected trades are logged and skipped.
    pub fn ingest_batch<I>(&self, trades: I) -> usize
    where
        I: IntoIterator<Item = Trade>,
    {
        let mut aggregator = self.inner.lock();
        let mut accepted = 0;
        for trade in trades {
            match aggregator.ingest(trade) {
                Ok(()) => accepted += 1,
                Err(e) => warn!("Dropping trade from batch: {}", e),
            }
        }
        accepted
    }

    /// Candle snapshot for an arbitrary bucket width
    pub fn snapshot(&self, bucket_width_ms: i64) -> PipelineResult<Vec<Candle>> {
        self.inner.lock().snapshot(bucket_width_ms)
    }

    /// Candle snapshot for a named timeframe
    #[must_use]
    pub fn snapshot_timeframe(&self, timeframe: Timeframe) -> Vec<Candle> {
        self.inner.lock().snapshot_timeframe(timeframe)
    }

    /// Number of retained trades
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Whether no trades are retained
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Drop every retained trade
    pub fn reset(&self) {
        self.inner.lock().reset();
    }
}

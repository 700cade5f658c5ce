//! Candle aggregator implementation
//!
//! The aggregator keeps no committed candle state. It owns the retained trade
//! log and re-derives the whole candle series from it on every snapshot, so
//! switching resolution is always consistent with the raw trades.

use crate::Timeframe;
use crate::config::AggregatorConfig;
use services_common::{Candle, Clock, PipelineError, PipelineResult, SystemClock, Trade};
use std::sync::Arc;
use tracing::{debug, warn};

/// A trade tagged with its arrival order
#[derive(Debug, Clone)]
struct RetainedTrade {
    seq: u64,
    trade: Trade,
}

/// Aggregator for candle data processing
#[derive(Debug)]
pub struct CandleAggregator {
    config: AggregatorConfig,
    clock: Arc<dyn Clock>,
    trades: Vec<RetainedTrade>,
    /// Smallest retained timestamp, `i64::MAX` when empty
    oldest_timestamp: i64,
    next_seq: u64,
}

impl Default for CandleAggregator {
    fn default() -> Self {
        Self::with_clock(AggregatorConfig::default(), Arc::new(SystemClock))
    }
}

impl CandleAggregator {
    /// Create a candle aggregator reading the system clock
    pub fn new(config: AggregatorConfig) -> PipelineResult<Self> {
        config.validate()?;
        Ok(Self::with_clock(config, Arc::new(SystemClock)))
    }

    /// Create a candle aggregator with an injected clock
    ///
    /// The config is assumed valid; use [`CandleAggregator::new`] or call
    /// [`AggregatorConfig::validate`] first for untrusted input.
    #[must_use]
    pub fn with_clock(config: AggregatorConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            clock,
            trades: Vec::new(),
            oldest_timestamp: i64::MAX,
            next_seq: 0,
        }
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    /// Append a trade and evict everything outside the retention window
    ///
    /// Malformed trades are rejected with `InvalidTrade` and leave the log
    /// untouched. Timestamps may arrive out of order.
    pub fn ingest(&mut self, trade: Trade) -> PipelineResult<()> {
        if let Err(e) = trade.validate() {
            warn!("Rejected trade at ingest: {}", e);
            return Err(e);
        }

        self.oldest_timestamp = self.oldest_timestamp.min(trade.timestamp);
        self.trades.push(RetainedTrade {
            seq: self.next_seq,
            trade,
        });
        self.next_seq += 1;
        self.evict_expired();
        Ok(())
    }

    /// Drop trades older than `now - retention`, returning how many went
    pub fn evict_expired(&mut self) -> usize {
        let cutoff = self.cutoff();
        if self.oldest_timestamp >= cutoff {
            return 0;
        }

        let before = self.trades.len();
        self.trades.retain(|t| t.trade.timestamp >= cutoff);
        self.oldest_timestamp = self
            .trades
            .iter()
            .map(|t| t.trade.timestamp)
            .min()
            .unwrap_or(i64::MAX);
        let evicted = before - self.trades.len();
        if evicted > 0 {
            debug!("Evicted {} trades older than {}", evicted, cutoff);
        }
        evicted
    }

    /// Time-ordered candle series for `bucket_width_ms`
    ///
    /// Trades sharing a timestamp are ordered by arrival: the first one
    /// ingested opens the bucket, the last one ingested closes it. Trades that
    /// aged out since the last ingest are ignored.
    pub fn snapshot(&self, bucket_width_ms: i64) -> PipelineResult<Vec<Candle>> {
        if bucket_width_ms <= 0 {
            return Err(PipelineError::InvalidConfiguration(format!(
                "bucket width must be positive, got {bucket_width_ms} ms"
            )));
        }

        let cutoff = self.cutoff();
        let mut ordered: Vec<&RetainedTrade> = self
            .trades
            .iter()
            .filter(|t| t.trade.timestamp >= cutoff)
            .collect();
        ordered.sort_unstable_by_key(|t| (t.trade.timestamp, t.seq));

        let mut candles: Vec<Candle> = Vec::new();
        for retained in ordered {
            let trade = &retained.trade;
            let key = bucket_start(trade.timestamp, bucket_width_ms);
            match candles.last_mut() {
                Some(current) if current.timestamp == key => current.apply(trade),
                _ => candles.push(Candle::from_trade(key, trade)),
            }
        }

        debug!(
            "Snapshot of {} trades into {} candles ({} ms buckets)",
            self.trades.len(),
            candles.len(),
            bucket_width_ms
        );
        Ok(candles)
    }

    /// Time-ordered candle series for a named timeframe
    #[must_use]
    pub fn snapshot_timeframe(&self, timeframe: Timeframe) -> Vec<Candle> {
        // Timeframe widths are always positive
        self.snapshot(timeframe.duration_ms()).unwrap_or_default()
    }

    /// Number of retained trades
    #[must_use]
    pub fn len(&self) -> usize {
        self.trades.len()
    }

    /// Whether no trades are retained
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }

    /// Drop every retained trade
    pub fn reset(&mut self) {
        self.trades.clear();
        self.oldest_timestamp = i64::MAX;
    }

    fn cutoff(&self) -> i64 {
        self.clock.now_ms().saturating_sub(self.config.retention_ms)
    }
}

/// Start of the bucket containing `timestamp`
#[must_use]
pub const fn bucket_start(timestamp: i64, bucket_width_ms: i64) -> i64 {
    timestamp.div_euclid(bucket_width_ms) * bucket_width_ms
}

//! Market Pipeline
//!
//! Wires a trade source into the candle aggregator and renders chart frames
//! with the consumer's timeframe, indicator selection and view window.

pub mod config;
pub mod host;

pub use config::PipelineConfig;

use data_aggregator::feed::{FeedError, RawTrade, parse_message};
use data_aggregator::{
    CandleAggregator, PriceChange, SharedAggregator, Timeframe, ViewWindow, filter_window,
};
use indicator_engine::{ChartSeries, IndicatorId, annotate};
use serde::Serialize;
use services_common::{Clock, PipelineResult, Trade};
use std::sync::Arc;
use tracing::{debug, warn};

/// Everything a consumer needs to draw one chart update
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartFrame {
    pub timeframe: Timeframe,
    pub window: Option<ViewWindow>,
    pub series: ChartSeries,
    pub change: PriceChange,
}

/// Aggregator plus the consumer's current view selection
#[derive(Debug, Clone)]
pub struct Pipeline {
    aggregator: SharedAggregator,
    timeframe: Timeframe,
    indicators: Vec<IndicatorId>,
    view_window: Option<ViewWindow>,
}

impl Pipeline {
    /// Build a pipeline whose retention follows `clock`
    pub fn new(config: &PipelineConfig, clock: Arc<dyn Clock>) -> PipelineResult<Self> {
        config.validate()?;
        let aggregator = CandleAggregator::with_clock(config.aggregator.clone(), clock);

        Ok(Self {
            aggregator: SharedAggregator::new(aggregator),
            timeframe: config.initial_timeframe(),
            indicators: config.indicators.clone(),
            view_window: config.view_window,
        })
    }

    /// Shared handle for producers running elsewhere
    #[must_use]
    pub fn aggregator(&self) -> &SharedAggregator {
        &self.aggregator
    }

    /// Ingest a single trade
    pub fn on_trade(&self, trade: Trade) -> PipelineResult<()> {
        self.aggregator.ingest(trade)
    }

    /// Ingest decoded feed trades, returning how many were accepted
    ///
    /// Malformed entries are logged and skipped.
    pub fn on_raw_trades(&self, raw: Vec<RawTrade>) -> usize {
        let trades = raw.into_iter().filter_map(|raw| match raw.into_trade() {
            Ok(trade) => Some(trade),
            Err(e) => {
                warn!("Skipping feed trade: {}", e);
                None
            }
        });
        self.aggregator.ingest_batch(trades)
    }

    /// Decode one feed message and ingest its trades
    pub fn on_message(&self, text: &str) -> Result<usize, FeedError> {
        let raw = parse_message(text)?;
        Ok(self.on_raw_trades(raw))
    }

    #[must_use]
    pub const fn timeframe(&self) -> Timeframe {
        self.timeframe
    }

    pub fn set_timeframe(&mut self, timeframe: Timeframe) {
        debug!("Timeframe {} -> {}", self.timeframe, timeframe);
        self.timeframe = timeframe;
    }

    #[must_use]
    pub fn indicators(&self) -> &[IndicatorId] {
        &self.indicators
    }

    pub fn set_indicators(&mut self, indicators: Vec<IndicatorId>) {
        self.indicators = indicators;
    }

    pub fn set_view_window(&mut self, window: Option<ViewWindow>) {
        self.view_window = window;
    }

    /// Current candles with indicators, trimmed to the view window
    ///
    /// Indicators run over the whole retained series before trimming, so a
    /// narrow window still shows values that need a long lookback. This differs
    /// from the reference charting app, which computes indicators on the
    /// windowed candles, so its session VWAP restarts at the window start.
    #[must_use]
    pub fn frame(&self, now_ms: i64) -> ChartFrame {
        let candles = self.aggregator.snapshot_timeframe(self.timeframe);
        let mut series = annotate(&candles, &self.indicators);

        let visible = match self.view_window {
            Some(window) => filter_window(&candles, now_ms, window),
            None => &candles[..],
        };
        let hidden = candles.len() - visible.len();
        if hidden > 0 {
            series.candles.drain(..hidden);
            let first_visible = visible.first().map_or(i64::MAX, |c| c.timestamp);
            series.macd.retain(|point| point.timestamp >= first_visible);
        }

        ChartFrame {
            timeframe: self.timeframe,
            window: self.view_window,
            change: PriceChange::from_candles(visible),
            series,
        }
    }
}

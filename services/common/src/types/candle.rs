//! OHLCV candle data

use super::trade::Trade;
use serde::{Deserialize, Serialize};

/// Aggregate trading activity in the half-open bucket
/// `[timestamp, timestamp + width)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Bucket start, a multiple of the bucket width
    pub timestamp: i64,
    /// Price of the first trade in the bucket
    pub open: f64,
    /// Highest price seen
    pub high: f64,
    /// Lowest price seen
    pub low: f64,
    /// Price of the latest trade seen so far
    pub close: f64,
    /// Sum of trade volumes
    pub volume: f64,
}

impl Candle {
    /// Create a candle from explicit OHLCV values
    #[must_use]
    pub const fn new(
        timestamp: i64,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Open a bucket with its first trade
    #[must_use]
    pub const fn from_trade(bucket_start: i64, trade: &Trade) -> Self {
        Self {
            timestamp: bucket_start,
            open: trade.price,
            high: trade.price,
            low: trade.price,
            close: trade.price,
            volume: trade.volume,
        }
    }

    /// Fold a later trade of the same bucket into the candle
    pub fn apply(&mut self, trade: &Trade) {
        self.high = self.high.max(trade.price);
        self.low = self.low.min(trade.price);
        self.close = trade.price;
        self.volume += trade.volume;
    }

    /// (High + Low + Close) / 3
    #[must_use]
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }

    /// `low <= open, close <= high`, finite prices and non-negative volume
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.open.is_finite()
            && self.high.is_finite()
            && self.low.is_finite()
            && self.close.is_finite()
            && self.volume.is_finite()
            && self.low <= self.open
            && self.open <= self.high
            && self.low <= self.close
            && self.close <= self.high
            && self.volume >= 0.0
    }
}

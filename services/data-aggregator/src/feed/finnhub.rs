//! Finnhub-style trade message decoding
//!
//! Messages look like
//! `{"type":"trade","data":[{"p":100.5,"v":10,"t":1700000000000,"s":"AAPL","c":["1"]}]}`.

use serde::Deserialize;
use services_common::{PipelineError, PipelineResult, Trade};
use thiserror::Error;

/// Feed decoding errors
#[derive(Debug, Error)]
pub enum FeedError {
    /// Message is not valid JSON for the feed schema
    #[error("Malformed feed message: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Upstream reported an error message
    #[error("Upstream error: {0}")]
    Upstream(String),
}

// i64::MIN and i64::MAX + 1 are exact in f64
const MIN_TIMESTAMP_MS: f64 = i64::MIN as f64;
const MAX_TIMESTAMP_MS: f64 = i64::MAX as f64;

/// One trade as sent on the wire
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawTrade {
    /// Price
    #[serde(rename = "p")]
    pub price: f64,
    /// Volume
    #[serde(rename = "v")]
    pub volume: f64,
    /// Timestamp in milliseconds
    #[serde(rename = "t")]
    pub timestamp: f64,
    /// Symbol
    #[serde(rename = "s", default)]
    pub symbol: Option<String>,
    /// Trade conditions
    #[serde(rename = "c", default)]
    pub conditions: Option<Vec<String>>,
}

impl RawTrade {
    /// Timestamp as whole milliseconds
    ///
    /// Non-finite values and values outside the `i64` range are rejected
    /// instead of saturating.
    pub fn timestamp_ms(&self) -> PipelineResult<i64> {
        if !self.timestamp.is_finite() {
            return Err(PipelineError::InvalidTrade(format!(
                "timestamp must be finite, got {}",
                self.timestamp
            )));
        }
        let millis = self.timestamp.trunc();
        if !(MIN_TIMESTAMP_MS..MAX_TIMESTAMP_MS).contains(&millis) {
            return Err(PipelineError::InvalidTrade(format!(
                "timestamp out of range, got {}",
                self.timestamp
            )));
        }
        Ok(millis as i64)
    }

    /// Convert into a domain trade
    ///
    /// Only the timestamp is checked here; price and volume are validated by
    /// the aggregator on ingest.
    pub fn into_trade(self) -> PipelineResult<Trade> {
        let timestamp = self.timestamp_ms()?;
        Ok(Trade::new(self.price, self.volume, timestamp)
            .with_conditions(self.conditions.unwrap_or_default()))
    }
}

/// Decoded feed message
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FeedMessage {
    /// Batch of executed trades
    Trade {
        /// Trades in the batch
        data: Vec<RawTrade>,
    },
    /// Upstream error notice
    Error {
        /// Error text
        msg: String,
    },
    /// Anything else (pings, subscription acks)
    #[serde(other)]
    Ignored,
}

/// Decode one message into the trades it carries
///
/// Non-trade messages yield an empty batch; upstream errors are surfaced.
pub fn parse_message(text: &str) -> Result<Vec<RawTrade>, FeedError> {
    match serde_json::from_str::<FeedMessage>(text)? {
        FeedMessage::Trade { data } => Ok(data),
        FeedMessage::Error { msg } => Err(FeedError::Upstream(msg)),
        FeedMessage::Ignored => Ok(Vec::new()),
    }
}

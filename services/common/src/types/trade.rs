//! Trade events delivered by a trade source

use crate::errors::{PipelineError, PipelineResult};
use serde::{Deserialize, Serialize};

/// A single executed transaction
///
/// Trades are immutable facts. The aggregator validates them on ingest and
/// never mutates them afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    /// Execution price
    pub price: f64,
    /// Traded size
    pub volume: f64,
    /// Execution time in milliseconds since epoch
    pub timestamp: i64,
    /// Informational condition tags from the source
    #[serde(default)]
    pub conditions: Vec<String>,
}

impl Trade {
    /// Create a trade without condition tags
    #[must_use]
    pub const fn new(price: f64, volume: f64, timestamp: i64) -> Self {
        Self {
            price,
            volume,
            timestamp,
            conditions: Vec::new(),
        }
    }

    /// Attach condition tags
    #[must_use]
    pub fn with_conditions<I, S>(mut self, conditions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.conditions = conditions.into_iter().map(Into::into).collect();
        self
    }

    /// Check the trade is safe to fold into a candle
    pub fn validate(&self) -> PipelineResult<()> {
        if !self.price.is_finite() || self.price <= 0.0 {
            return Err(PipelineError::InvalidTrade(format!(
                "price must be positive and finite, got {}",
                self.price
            )));
        }
        if !self.volume.is_finite() || self.volume < 0.0 {
            return Err(PipelineError::InvalidTrade(format!(
                "volume must be non-negative and finite, got {}",
                self.volume
            )));
        }
        if self.timestamp < 0 {
            return Err(PipelineError::InvalidTrade(format!(
                "timestamp must not precede the epoch, got {}",
                self.timestamp
            )));
        }
        Ok(())
    }
}

//! Core indicator trait and output types

use crate::macd::MacdValue;
use crate::series::TimeSeries;
use serde::{Deserialize, Serialize};
use services_common::Candle;

/// Which candle price an indicator reads
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceSource {
    Open,
    High,
    Low,
    #[default]
    Close,
    /// (high + low) / 2
    Hl2,
    /// (high + low + close) / 3
    Hlc3,
    /// (open + high + low + close) / 4
    Ohlc4,
}

impl PriceSource {
    /// Extract the price from a candle
    #[must_use]
    pub fn extract(self, candle: &Candle) -> f64 {
        match self {
            Self::Open => candle.open,
            Self::High => candle.high,
            Self::Low => candle.low,
            Self::Close => candle.close,
            Self::Hl2 => (candle.high + candle.low) / 2.0,
            Self::Hlc3 => candle.typical_price(),
            Self::Ohlc4 => (candle.open + candle.high + candle.low + candle.close) / 4.0,
        }
    }

    /// Extract the price from every candle
    #[must_use]
    pub fn series(self, candles: &[Candle]) -> Vec<f64> {
        candles.iter().map(|c| self.extract(c)).collect()
    }
}

/// Result of running an indicator over a candle series
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum IndicatorOutput {
    /// Single line drawn over price (VWAP, SMA, EMA)
    Line { values: TimeSeries<f64> },
    /// Bounded oscillator with reference levels (RSI)
    Oscillator {
        values: TimeSeries<f64>,
        lower_bound: f64,
        upper_bound: f64,
    },
    /// MACD line, signal line and histogram
    Macd { values: TimeSeries<MacdValue> },
}

impl IndicatorOutput {
    /// Scalar value per candle, where the indicator has one
    ///
    /// For MACD this is the MACD line.
    #[must_use]
    pub fn scalar_series(&self) -> TimeSeries<f64> {
        match self {
            Self::Line { values } | Self::Oscillator { values, .. } => values.clone(),
            Self::Macd { values } => values.map(|v| v.macd),
        }
    }

    /// Candle index of the first slot
    #[must_use]
    pub fn start_index(&self) -> usize {
        match self {
            Self::Line { values } | Self::Oscillator { values, .. } => values.start_index(),
            Self::Macd { values } => values.start_index(),
        }
    }

    /// Number of output slots
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Line { values } | Self::Oscillator { values, .. } => values.len(),
            Self::Macd { values } => values.len(),
        }
    }

    /// Whether the indicator produced nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The MACD tuples, if this is a MACD output
    #[must_use]
    pub fn as_macd(&self) -> Option<&TimeSeries<MacdValue>> {
        match self {
            Self::Macd { values } => Some(values),
            _ => None,
        }
    }
}

/// A pure function from a candle series to an aligned output series
pub trait Indicator: Send + Sync {
    /// Run over the whole series
    ///
    /// Empty or too-short input yields an empty output, never an error.
    fn calculate(&self, candles: &[Candle]) -> IndicatorOutput;

    /// Candles required before the first value appears
    fn lookback(&self) -> usize;

    /// Whether the indicator shares the price axis
    fn is_overlay(&self) -> bool;

    /// Display name, e.g. `EMA(9)`
    fn name(&self) -> String;
}

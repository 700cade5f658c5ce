//! Simple and exponential moving averages

use crate::indicator::{Indicator, IndicatorOutput, PriceSource};
use crate::series::TimeSeries;
use services_common::Candle;

/// SMA over `prices`, one value per full window
///
/// `result[i]` belongs to `prices[i + period - 1]`. Returns nothing when the
/// period is zero or longer than the input.
#[must_use]
pub fn sma(prices: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || prices.len() < period {
        return Vec::new();
    }

    let divisor = period as f64;
    prices
        .windows(period)
        .map(|window| window.iter().sum::<f64>() / divisor)
        .collect()
}

/// EMA over `prices`, seeded with the SMA of the first `period` prices
///
/// Uses `k = 2 / (period + 1)`. `result[i]` belongs to `prices[i + period - 1]`.
#[must_use]
pub fn ema(prices: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || prices.len() < period {
        return Vec::new();
    }

    let k = 2.0 / (period as f64 + 1.0);
    let seed = prices[..period].iter().sum::<f64>() / period as f64;

    let mut result = Vec::with_capacity(prices.len() - period + 1);
    result.push(seed);
    let mut prev = seed;
    for &price in &prices[period..] {
        prev = price * k + prev * (1.0 - k);
        result.push(prev);
    }
    result
}

/// Simple moving average
#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
    source: PriceSource,
}

impl Sma {
    #[must_use]
    pub const fn new(period: usize) -> Self {
        Self {
            period,
            source: PriceSource::Close,
        }
    }

    #[must_use]
    pub const fn with_source(mut self, source: PriceSource) -> Self {
        self.source = source;
        self
    }
}

impl Indicator for Sma {
    fn calculate(&self, candles: &[Candle]) -> IndicatorOutput {
        let values = sma(&self.source.series(candles), self.period);
        IndicatorOutput::Line {
            values: aligned(&values, self.period),
        }
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn is_overlay(&self) -> bool {
        true
    }

    fn name(&self) -> String {
        format!("SMA({})", self.period)
    }
}

/// Exponential moving average
#[derive(Debug, Clone)]
pub struct Ema {
    period: usize,
    source: PriceSource,
}

impl Ema {
    #[must_use]
    pub const fn new(period: usize) -> Self {
        Self {
            period,
            source: PriceSource::Close,
        }
    }

    #[must_use]
    pub const fn with_source(mut self, source: PriceSource) -> Self {
        self.source = source;
        self
    }
}

impl Indicator for Ema {
    fn calculate(&self, candles: &[Candle]) -> IndicatorOutput {
        let values = ema(&self.source.series(candles), self.period);
        IndicatorOutput::Line {
            values: aligned(&values, self.period),
        }
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn is_overlay(&self) -> bool {
        true
    }

    fn name(&self) -> String {
        format!("EMA({})", self.period)
    }
}

/// Wrap a windowed result so slot 0 lands on candle `period - 1`
fn aligned(values: &[f64], period: usize) -> TimeSeries<f64> {
    if values.is_empty() {
        return TimeSeries::new();
    }
    TimeSeries::from_values(values, period - 1)
}

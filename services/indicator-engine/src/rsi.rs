//! RSI (Relative Strength Index) with Wilder smoothing

use crate::indicator::{Indicator, IndicatorOutput, PriceSource};
use crate::series::TimeSeries;
use services_common::Candle;
use services_common::constants::indicators::{RSI_LOWER_BOUND, RSI_MAX, RSI_PERIOD, RSI_UPPER_BOUND};

/// RSI over `prices`
///
/// The first `period` deltas seed the average gain and loss, later deltas
/// are smoothed as `avg = (avg * (period - 1) + x) / period`. `result[i]`
/// belongs to `prices[i + period]`. A zero average loss reads as 100.
#[must_use]
pub fn rsi(prices: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || prices.len() <= period {
        return Vec::new();
    }

    let divisor = period as f64;
    let deltas: Vec<f64> = prices.windows(2).map(|w| w[1] - w[0]).collect();

    let (gains, losses) = deltas[..period]
        .iter()
        .fold((0.0, 0.0), |(g, l), &d| (g + d.max(0.0), l + (-d).max(0.0)));
    let mut avg_gain = gains / divisor;
    let mut avg_loss = losses / divisor;

    let mut result = Vec::with_capacity(deltas.len() - period + 1);
    result.push(relative_strength_index(avg_gain, avg_loss));

    for &delta in &deltas[period..] {
        avg_gain = (avg_gain * (divisor - 1.0) + delta.max(0.0)) / divisor;
        avg_loss = (avg_loss * (divisor - 1.0) + (-delta).max(0.0)) / divisor;
        result.push(relative_strength_index(avg_gain, avg_loss));
    }
    result
}

fn relative_strength_index(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return RSI_MAX;
    }
    let rs = avg_gain / avg_loss;
    RSI_MAX - RSI_MAX / (1.0 + rs)
}

/// RSI oscillator, reported with 30/70 reference levels
#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    source: PriceSource,
}

impl Default for Rsi {
    fn default() -> Self {
        Self::new(RSI_PERIOD)
    }
}

impl Rsi {
    #[must_use]
    pub const fn new(period: usize) -> Self {
        Self {
            period,
            source: PriceSource::Close,
        }
    }
}

impl Indicator for Rsi {
    fn calculate(&self, candles: &[Candle]) -> IndicatorOutput {
        let values = rsi(&self.source.series(candles), self.period);
        let values = if values.is_empty() {
            TimeSeries::new()
        } else {
            TimeSeries::from_values(&values, self.period)
        };

        IndicatorOutput::Oscillator {
            values,
            lower_bound: RSI_LOWER_BOUND,
            upper_bound: RSI_UPPER_BOUND,
        }
    }

    fn lookback(&self) -> usize {
        self.period + 1
    }

    fn is_overlay(&self) -> bool {
        false
    }

    fn name(&self) -> String {
        format!("RSI({})", self.period)
    }
}

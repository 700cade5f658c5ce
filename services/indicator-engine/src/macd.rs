//! MACD (Moving Average Convergence Divergence)

use crate::indicator::{Indicator, IndicatorOutput, PriceSource};
use crate::moving_average::ema;
use crate::series::TimeSeries;
use serde::{Deserialize, Serialize};
use services_common::Candle;
use services_common::constants::indicators::{
    MACD_FAST_PERIOD, MACD_SIGNAL_PERIOD, MACD_SLOW_PERIOD,
};

/// MACD configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacdConfig {
    /// Fast EMA period (default: 12)
    pub fast_period: usize,
    /// Slow EMA period (default: 26)
    pub slow_period: usize,
    /// Signal line EMA period (default: 9)
    pub signal_period: usize,
    pub price_source: PriceSource,
}

impl Default for MacdConfig {
    fn default() -> Self {
        Self {
            fast_period: MACD_FAST_PERIOD,
            slow_period: MACD_SLOW_PERIOD,
            signal_period: MACD_SIGNAL_PERIOD,
            price_source: PriceSource::Close,
        }
    }
}

/// One MACD tuple
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdValue {
    /// Fast EMA minus slow EMA
    pub macd: f64,
    /// EMA of the MACD line
    pub signal: f64,
    /// `macd - signal`
    pub histogram: f64,
}

/// MACD indicator
#[derive(Debug, Clone, Default)]
pub struct Macd {
    config: MacdConfig,
}

impl Macd {
    #[must_use]
    pub const fn new(config: MacdConfig) -> Self {
        Self { config }
    }

    /// Full MACD tuples, aligned so the first one sits on the first candle
    /// where both the slow EMA and the signal EMA exist
    ///
    /// Both EMAs run over the whole price series before they are trimmed to
    /// their common range.
    #[must_use]
    pub fn calculate_macd(&self, candles: &[Candle]) -> TimeSeries<MacdValue> {
        let MacdConfig {
            fast_period: fast,
            slow_period: slow,
            signal_period: signal,
            price_source,
        } = self.config;

        if fast == 0 || slow == 0 || signal == 0 {
            return TimeSeries::new();
        }

        let prices = price_source.series(candles);
        let macd_start = fast.max(slow) - 1;
        if prices.len() <= macd_start {
            return TimeSeries::new();
        }

        let fast_ema = ema(&prices, fast);
        let slow_ema = ema(&prices, slow);

        // fast_ema[j] belongs to price j + fast - 1, slow_ema[j] to j + slow - 1
        let macd_line: Vec<f64> = (macd_start..prices.len())
            .map(|i| fast_ema[i + 1 - fast] - slow_ema[i + 1 - slow])
            .collect();

        let signal_line = ema(&macd_line, signal);
        if signal_line.is_empty() {
            return TimeSeries::new();
        }

        let values: Vec<MacdValue> = macd_line[signal - 1..]
            .iter()
            .zip(&signal_line)
            .map(|(&macd, &signal)| MacdValue {
                macd,
                signal,
                histogram: macd - signal,
            })
            .collect();

        TimeSeries::from_values(&values, macd_start + signal - 1)
    }
}

impl Indicator for Macd {
    fn calculate(&self, candles: &[Candle]) -> IndicatorOutput {
        IndicatorOutput::Macd {
            values: self.calculate_macd(candles),
        }
    }

    fn lookback(&self) -> usize {
        self.config.fast_period.max(self.config.slow_period) + self.config.signal_period - 1
    }

    fn is_overlay(&self) -> bool {
        false
    }

    fn name(&self) -> String {
        format!(
            "MACD({},{},{})",
            self.config.fast_period, self.config.slow_period, self.config.signal_period
        )
    }
}

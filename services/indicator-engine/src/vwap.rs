//! Session-cumulative volume weighted average price

use crate::indicator::{Indicator, IndicatorOutput, PriceSource};
use crate::series::TimeSeries;
use services_common::Candle;

/// VWAP over the supplied range, priced at the typical price by default
///
/// Each candle gets `Σ(price · volume) / Σ volume` over every candle up to and
/// including it. While the running volume is still zero the slot stays empty.
#[derive(Debug, Clone)]
pub struct Vwap {
    source: PriceSource,
}

impl Default for Vwap {
    fn default() -> Self {
        Self {
            source: PriceSource::Hlc3,
        }
    }
}

impl Vwap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_source(source: PriceSource) -> Self {
        Self { source }
    }
}

impl Indicator for Vwap {
    fn calculate(&self, candles: &[Candle]) -> IndicatorOutput {
        let mut cumulative_pv = 0.0;
        let mut cumulative_volume = 0.0;

        let values = candles
            .iter()
            .map(|candle| {
                cumulative_pv += self.source.extract(candle) * candle.volume;
                cumulative_volume += candle.volume;
                (cumulative_volume > 0.0).then(|| cumulative_pv / cumulative_volume)
            })
            .collect();

        IndicatorOutput::Line {
            values: TimeSeries::with_offset(values, 0),
        }
    }

    fn lookback(&self) -> usize {
        1
    }

    fn is_overlay(&self) -> bool {
        true
    }

    fn name(&self) -> String {
        "VWAP".to_string()
    }
}

//! Indicator dispatch and per-candle annotation

use crate::indicator::IndicatorOutput;
use crate::registry::IndicatorId;
use serde::Serialize;
use services_common::{Candle, PipelineResult};
use std::collections::BTreeMap;
use tracing::debug;

/// Run one indicator over a candle series
#[must_use]
pub fn compute(candles: &[Candle], id: IndicatorId) -> IndicatorOutput {
    id.spec().kind.build().calculate(candles)
}

/// Run one indicator selected by its wire key
///
/// Unknown keys are an `InvalidConfiguration` error.
pub fn compute_key(candles: &[Candle], key: &str) -> PipelineResult<IndicatorOutput> {
    let id: IndicatorId = key.parse()?;
    Ok(compute(candles, id))
}

/// A candle with the indicator values computable at its index
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatedCandle {
    #[serde(flatten)]
    pub candle: Candle,
    /// Only indicators whose lookback is met appear here
    #[serde(flatten)]
    pub indicators: BTreeMap<IndicatorId, f64>,
}

impl AnnotatedCandle {
    #[must_use]
    pub fn get(&self, id: IndicatorId) -> Option<f64> {
        self.indicators.get(&id).copied()
    }
}

/// MACD tuple on its own time axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MacdPoint {
    pub timestamp: i64,
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// Candles with attached indicators plus the parallel MACD series
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartSeries {
    pub candles: Vec<AnnotatedCandle>,
    pub macd: Vec<MacdPoint>,
}

/// Attach every requested indicator to the candles it belongs to
///
/// Each indicator is computed independently, so the order and duplicates in
/// `ids` do not change the result. MACD also contributes its MACD line per
/// candle.
#[must_use]
pub fn annotate(candles: &[Candle], ids: &[IndicatorId]) -> ChartSeries {
    let mut annotated: Vec<AnnotatedCandle> = candles
        .iter()
        .map(|candle| AnnotatedCandle {
            candle: *candle,
            indicators: BTreeMap::new(),
        })
        .collect();
    let mut macd = Vec::new();

    let mut requested = ids.to_vec();
    requested.sort_unstable();
    requested.dedup();

    for id in requested {
        let output = compute(candles, id);
        debug!(
            "{} over {} candles: {} values from index {}",
            id,
            candles.len(),
            output.len(),
            output.start_index()
        );

        for (index, value) in output.scalar_series().iter() {
            if let Some(slot) = annotated.get_mut(index) {
                slot.indicators.insert(id, *value);
            }
        }

        if let Some(series) = output.as_macd() {
            macd = series
                .iter()
                .filter_map(|(index, value)| {
                    candles.get(index).map(|candle| MacdPoint {
                        timestamp: candle.timestamp,
                        macd: value.macd,
                        signal: value.signal,
                        histogram: value.histogram,
                    })
                })
                .collect();
        }
    }

    ChartSeries {
        candles: annotated,
        macd,
    }
}

//! Trailing display windows over a candle series

use serde::{Deserialize, Serialize};
use services_common::Candle;
use services_common::constants::time::{
    MILLIS_PER_DAY, MILLIS_PER_HOUR, MILLIS_PER_MINUTE, MILLIS_PER_WEEK,
};
use services_common::{PipelineError, PipelineResult};
use std::str::FromStr;

/// How far back a consumer looks at the candle series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewWindow {
    /// Last 15 minutes
    #[serde(rename = "15m")]
    M15,
    /// Last hour
    #[serde(rename = "1h")]
    H1,
    /// Last day
    #[serde(rename = "1d")]
    D1,
    /// Last week
    #[serde(rename = "1w")]
    W1,
}

impl ViewWindow {
    /// Window length in milliseconds
    #[must_use]
    pub const fn duration_ms(&self) -> i64 {
        match self {
            ViewWindow::M15 => 15 * MILLIS_PER_MINUTE,
            ViewWindow::H1 => MILLIS_PER_HOUR,
            ViewWindow::D1 => MILLIS_PER_DAY,
            ViewWindow::W1 => MILLIS_PER_WEEK,
        }
    }

    /// Short label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            ViewWindow::M15 => "15m",
            ViewWindow::H1 => "1h",
            ViewWindow::D1 => "1d",
            ViewWindow::W1 => "1w",
        }
    }
}

impl FromStr for ViewWindow {
    type Err = PipelineError;

    fn from_str(s: &str) -> PipelineResult<Self> {
        match s.trim() {
            "15m" => Ok(ViewWindow::M15),
            "1h" => Ok(ViewWindow::H1),
            "1d" => Ok(ViewWindow::D1),
            "1w" => Ok(ViewWindow::W1),
            other => Err(PipelineError::InvalidConfiguration(format!(
                "unknown view window '{other}'"
            ))),
        }
    }
}

/// Candles whose bucket starts strictly after `now_ms - window`
///
/// `candles` must be in ascending time order, as snapshots are.
#[must_use]
pub fn filter_window(candles: &[Candle], now_ms: i64, window: ViewWindow) -> &[Candle] {
    let since = now_ms.saturating_sub(window.duration_ms());
    let first = candles.partition_point(|c| c.timestamp <= since);
    &candles[first..]
}

/// Move between the first open and the last close of a series
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PriceChange {
    /// `last.close - first.open`
    pub delta: f64,
    /// Delta as a percentage of the first open
    pub percent: f64,
}

impl PriceChange {
    /// Change across `candles`, zero for fewer than two candles
    #[must_use]
    pub fn from_candles(candles: &[Candle]) -> Self {
        match (candles.first(), candles.last()) {
            (Some(first), Some(last)) if candles.len() >= 2 => {
                let delta = last.close - first.open;
                Self {
                    delta,
                    percent: delta / first.open * 100.0,
                }
            }
            _ => Self::default(),
        }
    }

    /// Whether the series closed at or above where it opened
    ///
    /// Series with fewer than two candles count as up.
    #[must_use]
    pub fn is_up(candles: &[Candle]) -> bool {
        match (candles.first(), candles.last()) {
            (Some(first), Some(last)) if candles.len() >= 2 => last.close >= first.open,
            _ => true,
        }
    }
}

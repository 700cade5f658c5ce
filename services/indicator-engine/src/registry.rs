//! Indicator table
//!
//! Every selectable indicator is one row in [`INDICATORS`]. The row carries
//! the wire key, display metadata and the [`IndicatorKind`] that builds the
//! calculation, so dispatch never branches per indicator elsewhere.

use crate::indicator::Indicator;
use crate::macd::{Macd, MacdConfig};
use crate::moving_average::{Ema, Sma};
use crate::rsi::Rsi;
use crate::vwap::Vwap;
use serde::{Deserialize, Serialize};
use services_common::constants::indicators::{
    EMA_FAST_PERIOD, EMA_MEDIUM_PERIOD, MACD_FAST_PERIOD, MACD_SIGNAL_PERIOD, MACD_SLOW_PERIOD,
    RSI_PERIOD, SMA_LONG_PERIOD, SMA_MEDIUM_PERIOD, SMA_SHORT_PERIOD,
};
use services_common::{PipelineError, PipelineResult};
use std::fmt;
use std::str::FromStr;

/// Selectable indicator identifier
///
/// Discriminants index [`INDICATORS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorId {
    Vwap,
    Ema9,
    Ema21,
    Sma20,
    Sma50,
    Sma200,
    Macd,
    Rsi,
}

impl IndicatorId {
    /// Table row for this identifier
    #[must_use]
    pub fn spec(self) -> &'static IndicatorSpec {
        &INDICATORS[self as usize]
    }

    /// Wire key, e.g. `ema9`
    #[must_use]
    pub fn key(self) -> &'static str {
        self.spec().key
    }

    /// Every identifier in table order
    pub fn all() -> impl Iterator<Item = Self> {
        INDICATORS.iter().map(|spec| spec.id)
    }
}

impl fmt::Display for IndicatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for IndicatorId {
    type Err = PipelineError;

    fn from_str(s: &str) -> PipelineResult<Self> {
        let key = s.trim().to_ascii_lowercase();
        INDICATORS
            .iter()
            .find(|spec| spec.key == key)
            .map(|spec| spec.id)
            .ok_or_else(|| PipelineError::InvalidConfiguration(format!("unknown indicator: {s}")))
    }
}

/// How an indicator is calculated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorKind {
    Vwap,
    Sma { period: usize },
    Ema { period: usize },
    Macd { fast: usize, slow: usize, signal: usize },
    Rsi { period: usize },
}

impl IndicatorKind {
    /// Build the calculation for this kind
    #[must_use]
    pub fn build(self) -> Box<dyn Indicator> {
        match self {
            Self::Vwap => Box::new(Vwap::new()),
            Self::Sma { period } => Box::new(Sma::new(period)),
            Self::Ema { period } => Box::new(Ema::new(period)),
            Self::Macd { fast, slow, signal } => Box::new(Macd::new(MacdConfig {
                fast_period: fast,
                slow_period: slow,
                signal_period: signal,
                ..MacdConfig::default()
            })),
            Self::Rsi { period } => Box::new(Rsi::new(period)),
        }
    }

    /// Candles needed for the first value
    #[must_use]
    pub fn lookback(self) -> usize {
        self.build().lookback()
    }
}

/// One row of the indicator table
#[derive(Debug)]
pub struct IndicatorSpec {
    pub id: IndicatorId,
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub kind: IndicatorKind,
}

/// All selectable indicators, in [`IndicatorId`] order
pub static INDICATORS: [IndicatorSpec; 8] = [
    IndicatorSpec {
        id: IndicatorId::Vwap,
        key: "vwap",
        name: "VWAP",
        description: "Volume Weighted Average Price - Shows the average price weighted by volume",
        kind: IndicatorKind::Vwap,
    },
    IndicatorSpec {
        id: IndicatorId::Ema9,
        key: "ema9",
        name: "EMA(9)",
        description: "9-period Exponential Moving Average - Emphasizes recent price action",
        kind: IndicatorKind::Ema {
            period: EMA_FAST_PERIOD,
        },
    },
    IndicatorSpec {
        id: IndicatorId::Ema21,
        key: "ema21",
        name: "EMA(21)",
        description: "21-period EMA - Medium-term trend indicator",
        kind: IndicatorKind::Ema {
            period: EMA_MEDIUM_PERIOD,
        },
    },
    IndicatorSpec {
        id: IndicatorId::Sma20,
        key: "sma20",
        name: "SMA(20)",
        description: "20-period Simple Moving Average - Shows average closing price over 20 periods",
        kind: IndicatorKind::Sma {
            period: SMA_SHORT_PERIOD,
        },
    },
    IndicatorSpec {
        id: IndicatorId::Sma50,
        key: "sma50",
        name: "SMA(50)",
        description: "50-period SMA - Medium-term trend indicator",
        kind: IndicatorKind::Sma {
            period: SMA_MEDIUM_PERIOD,
        },
    },
    IndicatorSpec {
        id: IndicatorId::Sma200,
        key: "sma200",
        name: "SMA(200)",
        description: "200-period SMA - Long-term trend indicator, commonly used to identify bull/bear markets",
        kind: IndicatorKind::Sma {
            period: SMA_LONG_PERIOD,
        },
    },
    IndicatorSpec {
        id: IndicatorId::Macd,
        key: "macd",
        name: "MACD(12,26,9)",
        description: "Moving Average Convergence Divergence - Gap between the 12 and 26-period EMAs with a 9-period signal line",
        kind: IndicatorKind::Macd {
            fast: MACD_FAST_PERIOD,
            slow: MACD_SLOW_PERIOD,
            signal: MACD_SIGNAL_PERIOD,
        },
    },
    IndicatorSpec {
        id: IndicatorId::Rsi,
        key: "rsi",
        name: "RSI(14)",
        description: "14-period Relative Strength Index - Momentum oscillator bounded between 0 and 100",
        kind: IndicatorKind::Rsi { period: RSI_PERIOD },
    },
];

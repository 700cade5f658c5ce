//! Indicator Engine
//!
//! Stateless technical indicators over a candle series:
//! - VWAP (session-cumulative, typical price)
//! - SMA / EMA (close, SMA-seeded EMA)
//! - MACD (12/26/9) with signal and histogram
//! - RSI (14, Wilder smoothing)
//!
//! Every indicator reports values aligned to candle indices, so a value is
//! attached to the candle it was computed at and candles inside the lookback
//! carry nothing.

pub mod engine;
pub mod indicator;
pub mod macd;
pub mod moving_average;
pub mod registry;
pub mod rsi;
pub mod series;
pub mod vwap;

pub use engine::{AnnotatedCandle, ChartSeries, MacdPoint, annotate, compute, compute_key};
pub use indicator::{Indicator, IndicatorOutput, PriceSource};
pub use macd::{Macd, MacdConfig, MacdValue};
pub use moving_average::{Ema, Sma};
pub use registry::{INDICATORS, IndicatorId, IndicatorKind, IndicatorSpec};
pub use rsi::Rsi;
pub use series::TimeSeries;
pub use vwap::Vwap;

//! Aggregator implementations

pub mod candle;
pub mod window;

pub use candle::CandleAggregator;
pub use window::{PriceChange, ViewWindow, filter_window};

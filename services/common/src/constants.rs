//! Common constants used across the pipeline services
//!
//! Single source of truth for bucket widths, retention and indicator periods

/// Time constants
pub mod time {
    /// Milliseconds per second
    pub const MILLIS_PER_SEC: i64 = 1000;

    /// Milliseconds per minute
    pub const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SEC;

    /// Milliseconds per hour
    pub const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;

    /// Milliseconds per day
    pub const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;

    /// Milliseconds per week
    pub const MILLIS_PER_WEEK: i64 = 7 * MILLIS_PER_DAY;
}

/// Candle bucket widths
pub mod buckets {
    use super::time::{MILLIS_PER_HOUR, MILLIS_PER_MINUTE};

    /// 1 minute bucket
    pub const ONE_MINUTE_MS: i64 = MILLIS_PER_MINUTE;

    /// 5 minute bucket
    pub const FIVE_MINUTES_MS: i64 = 5 * MILLIS_PER_MINUTE;

    /// 15 minute bucket
    pub const FIFTEEN_MINUTES_MS: i64 = 15 * MILLIS_PER_MINUTE;

    /// 1 hour bucket
    pub const ONE_HOUR_MS: i64 = MILLIS_PER_HOUR;
}

/// Trade log retention
pub mod retention {
    use super::time::MILLIS_PER_DAY;

    /// Trades older than this (relative to now) are evicted
    pub const DEFAULT_RETENTION_MS: i64 = MILLIS_PER_DAY;
}

/// Indicator default parameters
pub mod indicators {
    /// Fast EMA period
    pub const EMA_FAST_PERIOD: usize = 9;

    /// Medium EMA period
    pub const EMA_MEDIUM_PERIOD: usize = 21;

    /// Short SMA period
    pub const SMA_SHORT_PERIOD: usize = 20;

    /// Medium SMA period
    pub const SMA_MEDIUM_PERIOD: usize = 50;

    /// Long SMA period
    pub const SMA_LONG_PERIOD: usize = 200;

    /// MACD fast EMA period
    pub const MACD_FAST_PERIOD: usize = 12;

    /// MACD slow EMA period
    pub const MACD_SLOW_PERIOD: usize = 26;

    /// MACD signal EMA period
    pub const MACD_SIGNAL_PERIOD: usize = 9;

    /// RSI period (Wilder)
    pub const RSI_PERIOD: usize = 14;

    /// RSI oversold guide line
    pub const RSI_LOWER_BOUND: f64 = 30.0;

    /// RSI overbought guide line
    pub const RSI_UPPER_BOUND: f64 = 70.0;

    /// RSI value when there were no losses in the window
    pub const RSI_MAX: f64 = 100.0;
}

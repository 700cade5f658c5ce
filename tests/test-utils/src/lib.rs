//! Test utilities and fixtures for the candle pipeline
//!
//! This module provides:
//! - Trade and candle factories
//! - rstest fixtures (clocks, base timestamps)
//! - Custom assertions for candle series and floating point values
//! - Test logging setup


pub use assertions::*;
pub use factories::*;
pub use fixtures::*;
pub use helpers::*;

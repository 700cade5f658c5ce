//! Core types for the candle pipeline

pub mod candle;
pub mod trade;

// Re-export all types
pub use candle::*;
pub use trade::*;

//! Trade sources
//!
//! - `finnhub` decodes trade messages from a Finnhub-style JSON feed
//! - `simulator` generates synthetic historical and live trades

pub mod finnhub;
pub mod simulator;

pub use finnhub::{FeedError, FeedMessage, RawTrade, parse_message};
pub use simulator::{SimulatorConfig, TradeSimulator};

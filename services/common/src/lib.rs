//! Common types shared by the candle pipeline services
//!
//! - `Trade` and `Candle` domain types
//! - `Clock` abstraction for retention decisions
//! - `PipelineError` taxonomy
//! - Shared constants (bucket widths, retention, indicator periods)

pub mod clock;
pub mod constants;
pub mod errors;
pub mod types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use errors::{PipelineError, PipelineResult};
pub use types::{Candle, Trade};

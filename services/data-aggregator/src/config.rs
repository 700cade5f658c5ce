//! Data aggregator configuration

use crate::Timeframe;
use serde::{Deserialize, Serialize};
use services_common::constants::retention::DEFAULT_RETENTION_MS;
use services_common::{PipelineError, PipelineResult};

/// Data aggregator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregatorConfig {
    /// Trades older than `now - retention_ms` are evicted
    pub retention_ms: i64,

    /// Timeframe used when the consumer does not pick one
    pub default_timeframe: Timeframe,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            retention_ms: DEFAULT_RETENTION_MS,
            default_timeframe: Timeframe::M1,
        }
    }
}

impl AggregatorConfig {
    /// Configuration with a custom retention window
    #[must_use]
    pub fn with_retention_ms(retention_ms: i64) -> Self {
        Self {
            retention_ms,
            ..Self::default()
        }
    }

    /// Reject non-positive retention windows
    pub fn validate(&self) -> PipelineResult<()> {
        if self.retention_ms <= 0 {
            return Err(PipelineError::InvalidConfiguration(format!(
                "retention window must be positive, got {} ms",
                self.retention_ms
            )));
        }
        Ok(())
    }
}

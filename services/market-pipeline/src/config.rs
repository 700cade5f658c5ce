//! Pipeline configuration

use anyhow::{Context, Result};
use data_aggregator::feed::SimulatorConfig;
use data_aggregator::{AggregatorConfig, Timeframe, ViewWindow};
use indicator_engine::IndicatorId;
use serde::{Deserialize, Serialize};
use services_common::{PipelineError, PipelineResult};
use std::path::Path;

/// Environment variable prefix, e.g. `PIPELINE_TIMEFRAME=5m` or
/// `PIPELINE_AGGREGATOR__RETENTION_MS=3600000`
pub const ENV_PREFIX: &str = "PIPELINE";

/// Pipeline configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Retention and fallback timeframe
    pub aggregator: AggregatorConfig,

    /// Initial bucket width, falls back to `aggregator.default_timeframe`
    pub timeframe: Option<Timeframe>,

    /// Indicators attached to every frame
    pub indicators: Vec<IndicatorId>,

    /// Trailing window shown to the consumer, whole series when unset
    pub view_window: Option<ViewWindow>,

    /// Trade simulator settings for `simulate`
    pub simulation: SimulatorConfig,
}

impl PipelineConfig {
    /// Load configuration from an optional file plus `PIPELINE_*` variables
    ///
    /// The file format follows its extension (toml, json, yaml, ...).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read pipeline configuration")?;

        let config: Self = settings
            .try_deserialize()
            .context("Invalid pipeline configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Timeframe the pipeline starts on
    #[must_use]
    pub fn initial_timeframe(&self) -> Timeframe {
        self.timeframe.unwrap_or(self.aggregator.default_timeframe)
    }

    /// Reject settings the aggregator or simulator cannot run with
    pub fn validate(&self) -> PipelineResult<()> {
        self.aggregator.validate()?;

        let sim = &self.simulation;
        if !sim.base_price.is_finite() || sim.base_price <= 0.0 {
            return Err(PipelineError::InvalidConfiguration(format!(
                "simulation base price must be positive, got {}",
                sim.base_price
            )));
        }
        if !sim.volatility.is_finite() || sim.volatility < 0.0 {
            return Err(PipelineError::InvalidConfiguration(format!(
                "simulation volatility must be non-negative, got {}",
                sim.volatility
            )));
        }
        let ranges = [
            ("trades_per_minute", sim.trades_per_minute),
            ("trades_per_tick", sim.trades_per_tick),
            ("volume_range", (sim.volume_range.0 as usize, sim.volume_range.1 as usize)),
        ];
        for (name, (min, max)) in ranges {
            if min >= max {
                return Err(PipelineError::InvalidConfiguration(format!(
                    "simulation {name} must be a non-empty range, got {min}..{max}"
                )));
            }
        }
        Ok(())
    }
}

//! Common error types for the pipeline services

use thiserror::Error;

/// Result alias for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Pipeline error types
///
/// Insufficient history is not an error: indicators with unmet lookback
/// return empty output instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// Trade rejected at ingest, aggregate state unchanged
    #[error("Invalid trade: {0}")]
    InvalidTrade(String),

    /// Bad bucket width, retention window or indicator identifier
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

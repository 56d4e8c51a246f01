//! Top-level error aggregating every subsystem.

use super::error_code::CausaErrorCode;
use super::{ConfigError, DataError, DiscoveryError, EstimationError, StatsError};

/// Errors that can occur while running a full discovery/estimation pipeline.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Statistics error: {0}")]
    Stats(#[from] StatsError),

    #[error("Discovery error: {0}")]
    Discovery(#[from] DiscoveryError),

    #[error("Estimation error: {0}")]
    Estimation(#[from] EstimationError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl CausaErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Data(e) => e.error_code(),
            Self::Stats(e) => e.error_code(),
            Self::Discovery(e) => e.error_code(),
            Self::Estimation(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}

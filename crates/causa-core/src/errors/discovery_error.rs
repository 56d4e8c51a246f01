//! Structure discovery errors: CI testing, skeleton search and orientation.

use super::error_code::{self, CausaErrorCode};
use super::{DataError, StatsError};

#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("Unknown variable: {0}")]
    UnknownVariable(String),

    #[error("At least two variables are required, got {0}")]
    TooFewVariables(usize),

    #[error("Invalid candidate pair {x} - {y}")]
    InvalidCandidate { x: String, y: String },

    #[error("Insufficient samples: n = {n} with {conditioning} conditioning variables")]
    InsufficientSamples { n: usize, conditioning: usize },

    #[error("Orienting {from} -> {to} would create a cycle")]
    CycleDetected { from: String, to: String },

    #[error("No edge between {a} and {b}")]
    MissingEdge { a: String, b: String },

    #[error("Statistics error: {0}")]
    Stats(#[from] StatsError),

    #[error("Data error: {0}")]
    Data(#[from] DataError),
}

impl CausaErrorCode for DiscoveryError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownVariable(_) => error_code::UNKNOWN_VARIABLE,
            Self::InsufficientSamples { .. } => error_code::INSUFFICIENT_SAMPLES,
            Self::CycleDetected { .. } => error_code::CYCLE_DETECTED,
            Self::Stats(e) => e.error_code(),
            Self::Data(e) => e.error_code(),
            _ => error_code::DISCOVERY_ERROR,
        }
    }
}

//! Effect estimation errors.

use super::error_code::{self, CausaErrorCode};
use super::{DataError, StatsError};

#[derive(Debug, thiserror::Error)]
pub enum EstimationError {
    #[error("Unknown variable: {0}")]
    UnknownVariable(String),

    #[error("Edge list is not acyclic: {cycle}")]
    NotADag { cycle: String },

    #[error("Insufficient samples for {target}: {n} rows, {parameters} parameters")]
    InsufficientSamples {
        target: String,
        n: usize,
        parameters: usize,
    },

    #[error("Singular design matrix for {target}")]
    Singular { target: String },

    #[error("Statistics error: {0}")]
    Stats(#[from] StatsError),

    #[error("Data error: {0}")]
    Data(#[from] DataError),
}

impl CausaErrorCode for EstimationError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownVariable(_) => error_code::UNKNOWN_VARIABLE,
            Self::NotADag { .. } => error_code::CYCLE_DETECTED,
            Self::InsufficientSamples { .. } => error_code::INSUFFICIENT_SAMPLES,
            Self::Singular { .. } => error_code::SINGULAR_MATRIX,
            Self::Stats(e) => e.error_code(),
            Self::Data(e) => e.error_code(),
        }
    }
}

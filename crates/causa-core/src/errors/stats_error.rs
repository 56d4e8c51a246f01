//! Numerical errors from the statistics kernels.

use super::error_code::{self, CausaErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    #[error("Matrix is singular (pivot {pivot:.3e} at column {column})")]
    Singular { column: usize, pivot: f64 },

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Zero variance in column {0}")]
    ZeroVariance(usize),

    #[error("Not enough observations: {n} rows for {required} required")]
    NotEnoughObservations { n: usize, required: usize },

    #[error("Invalid distribution parameters: {0}")]
    Distribution(String),
}

impl CausaErrorCode for StatsError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Singular { .. } => error_code::SINGULAR_MATRIX,
            Self::NotEnoughObservations { .. } => error_code::INSUFFICIENT_SAMPLES,
            _ => error_code::STATS_ERROR,
        }
    }
}

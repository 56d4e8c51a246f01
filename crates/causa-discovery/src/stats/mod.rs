//! Dense linear algebra and correlation kernels.

pub mod correlation;
pub mod matrix;

pub use correlation::{correlation_matrix, covariance_matrix, mean, partial_correlation};
pub use matrix::Matrix;

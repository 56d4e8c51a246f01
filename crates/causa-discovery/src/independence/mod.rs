//! Conditional-independence tests.
//!
//! A test is built once per dataset (the full correlation matrix is
//! computed up front) and then queried by column index. `p_value > alpha`
//! is read as "independent".

pub mod fisher_z;
pub mod partial_correlation;

use causa_core::errors::DiscoveryError;
use causa_core::types::CiTestKind;
use causa_core::Dataset;
use serde::Serialize;

use crate::stats::{correlation_matrix, Matrix};

pub use fisher_z::FisherZTest;
pub use partial_correlation::PartialCorrelationTest;

/// Outcome of one CI test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CiOutcome {
    /// Partial correlation of x and y given the conditioning set.
    pub statistic: f64,
    pub p_value: f64,
    /// Degrees of freedom used for the reference distribution.
    pub dof: f64,
    /// Number of observations.
    pub n: usize,
}

impl CiOutcome {
    pub fn is_independent(&self, alpha: f64) -> bool {
        self.p_value > alpha
    }
}

/// Tests whether `x` and `y` are independent given `s`, all by column index.
pub trait IndependenceTest: Send + Sync {
    fn name(&self) -> &'static str;

    fn test(&self, x: usize, y: usize, s: &[usize]) -> Result<CiOutcome, DiscoveryError>;
}

/// Build the configured test over `data`.
pub fn build_test(
    kind: CiTestKind,
    data: &Dataset,
) -> Result<Box<dyn IndependenceTest>, DiscoveryError> {
    let corr = CorrelationCache::new(data)?;
    Ok(match kind {
        CiTestKind::PartialCorrelation => Box::new(PartialCorrelationTest::new(corr)),
        CiTestKind::FisherZ => Box::new(FisherZTest::new(corr)),
    })
}

/// Full correlation matrix plus sample size, shared by the test variants.
#[derive(Debug, Clone)]
pub struct CorrelationCache {
    corr: Matrix,
    n: usize,
}

impl CorrelationCache {
    pub fn new(data: &Dataset) -> Result<Self, DiscoveryError> {
        let columns: Vec<&[f64]> = (0..data.n_columns())
            .filter_map(|i| data.column_at(i))
            .collect();
        let corr = correlation_matrix(&columns)?;
        Ok(Self {
            corr,
            n: data.n_rows(),
        })
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn n_variables(&self) -> usize {
        self.corr.rows()
    }

    pub fn partial_correlation(&self, x: usize, y: usize, s: &[usize]) -> Result<f64, DiscoveryError> {
        let k = self.n_variables();
        if let Some(&bad) = [x, y].iter().chain(s).find(|&&i| i >= k) {
            return Err(DiscoveryError::UnknownVariable(format!("#{bad}")));
        }
        Ok(crate::stats::correlation::partial_correlation_from(&self.corr, x, y, s)?)
    }
}

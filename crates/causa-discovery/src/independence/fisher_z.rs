//! Fisher z-transform test: `z = atanh(r) * sqrt(n - |S| - 3)`, normal p-value.

use causa_core::errors::{DiscoveryError, StatsError};
use statrs::distribution::{ContinuousCDF, Normal};

use super::{CiOutcome, CorrelationCache, IndependenceTest};

pub struct FisherZTest {
    cache: CorrelationCache,
}

impl FisherZTest {
    pub fn new(cache: CorrelationCache) -> Self {
        Self { cache }
    }
}

impl IndependenceTest for FisherZTest {
    fn name(&self) -> &'static str {
        "fisher_z"
    }

    fn test(&self, x: usize, y: usize, s: &[usize]) -> Result<CiOutcome, DiscoveryError> {
        let n = self.cache.n();
        let dof = n as f64 - s.len() as f64 - 3.0;
        if dof <= 0.0 {
            return Err(DiscoveryError::InsufficientSamples {
                n,
                conditioning: s.len(),
            });
        }

        let r = self.cache.partial_correlation(x, y, s)?;
        let p_value = z_test_p_value(r, dof)?;

        tracing::trace!(x, y, ?s, r, p_value, "fisher z test");
        Ok(CiOutcome {
            statistic: r,
            p_value,
            dof,
            n,
        })
    }
}

fn z_test_p_value(r: f64, dof: f64) -> Result<f64, StatsError> {
    if r.abs() >= 1.0 {
        return Ok(0.0);
    }
    let z = r.atanh() * dof.sqrt();
    let normal = Normal::new(0.0, 1.0).map_err(|e| StatsError::Distribution(e.to_string()))?;
    Ok((2.0 * (1.0 - normal.cdf(z.abs()))).clamp(0.0, 1.0))
}

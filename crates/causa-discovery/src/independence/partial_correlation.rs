//! Partial correlation t-test.
//!
//! `dof = n - |S| - 2`, `t = r * sqrt(dof / (1 - r^2))`, two-sided p-value
//! from Student's t via `statrs`.

use causa_core::errors::{DiscoveryError, StatsError};
use statrs::distribution::{ContinuousCDF, StudentsT};

use super::{CiOutcome, CorrelationCache, IndependenceTest};

pub struct PartialCorrelationTest {
    cache: CorrelationCache,
}

impl PartialCorrelationTest {
    pub fn new(cache: CorrelationCache) -> Self {
        Self { cache }
    }
}

impl IndependenceTest for PartialCorrelationTest {
    fn name(&self) -> &'static str {
        "partial_correlation"
    }

    fn test(&self, x: usize, y: usize, s: &[usize]) -> Result<CiOutcome, DiscoveryError> {
        let n = self.cache.n();
        let dof = n as f64 - s.len() as f64 - 2.0;
        if dof <= 0.0 {
            return Err(DiscoveryError::InsufficientSamples {
                n,
                conditioning: s.len(),
            });
        }

        let r = self.cache.partial_correlation(x, y, s)?;
        let p_value = t_test_p_value(r, dof)?;

        tracing::trace!(x, y, ?s, r, p_value, "partial correlation test");
        Ok(CiOutcome {
            statistic: r,
            p_value,
            dof,
            n,
        })
    }
}

/// Two-sided p-value for a correlation coefficient with `dof` degrees of freedom.
pub fn t_test_p_value(r: f64, dof: f64) -> Result<f64, StatsError> {
    let one_minus_r2 = 1.0 - r * r;
    if one_minus_r2 <= 0.0 {
        return Ok(0.0);
    }
    let t = r * (dof / one_minus_r2).sqrt();
    let dist =
        StudentsT::new(0.0, 1.0, dof).map_err(|e| StatsError::Distribution(e.to_string()))?;
    let p = 2.0 * (1.0 - dist.cdf(t.abs()));
    Ok(p.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_correlation_has_unit_p_value() {
        let p = t_test_p_value(0.0, 50.0).unwrap();
        assert!((p - 1.0).abs() < 1e-12);
    }

    #[test]
    fn perfect_correlation_has_zero_p_value() {
        assert_eq!(t_test_p_value(1.0, 10.0).unwrap(), 0.0);
        assert_eq!(t_test_p_value(-1.0, 10.0).unwrap(), 0.0);
    }

    #[test]
    fn known_value() {
        // r = 0.3, n = 30 => t = 1.6596, dof 28, p ~= 0.1073
        let p = t_test_p_value(0.3, 28.0).unwrap();
        assert!((p - 0.1073).abs() < 1e-3, "p = {p}");
    }
}

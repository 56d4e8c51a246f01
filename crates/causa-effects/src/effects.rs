//! Effect sizes and the backdoor adjustment.

use std::fmt;

use causa_core::config::EstimationConfig;
use causa_core::errors::EstimationError;
use causa_core::Dataset;
use serde::Serialize;

use crate::ols;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectReport {
    pub from: String,
    pub to: String,
    /// Coefficient on the edge itself.
    pub direct: f64,
    /// Sum of path products over every directed path.
    pub total: f64,
    /// Regression of `to` on `from` and the parents of `from`.
    pub adjusted: f64,
}

impl fmt::Display for EffectReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(4);
        writeln!(f, "effect of {} on {}", self.from, self.to)?;
        writeln!(f, "  direct    {:>12.precision$}", self.direct)?;
        writeln!(f, "  total     {:>12.precision$}", self.total)?;
        write!(f, "  adjusted  {:>12.precision$}", self.adjusted)
    }
}

/// Backdoor estimate of the effect of `x` on `y` given a DAG as `(from, to)`
/// edges: the coefficient on `x` when `y` is regressed on `x` and the
/// parents of `x`.
pub fn adjusted_effect(
    data: &Dataset,
    edges: &[(String, String)],
    x: &str,
    y: &str,
    config: &EstimationConfig,
) -> Result<f64, EstimationError> {
    let mut parents: Vec<String> = edges
        .iter()
        .filter(|(_, to)| to == x)
        .map(|(from, _)| from.clone())
        .collect();
    parents.sort_by_key(|p| data.index_of(p));
    parents.dedup();
    backdoor_estimate(data, x, y, &parents, config)
}

pub(crate) fn backdoor_estimate(
    data: &Dataset,
    x: &str,
    y: &str,
    parents: &[String],
    config: &EstimationConfig,
) -> Result<f64, EstimationError> {
    for name in [x, y].into_iter().chain(parents.iter().map(String::as_str)) {
        if !data.has_column(name) {
            return Err(EstimationError::UnknownVariable(name.to_string()));
        }
    }
    if x == y {
        return Ok(1.0);
    }
    // A parent of the cause cannot be its effect in a DAG.
    if parents.iter().any(|p| p == y) {
        tracing::debug!(x, y, "effect is a parent of the cause");
        return Ok(0.0);
    }

    let mut regressors: Vec<&str> = vec![x];
    regressors.extend(parents.iter().map(String::as_str));
    let fit = ols::fit(data, y, &regressors, config)?;

    tracing::debug!(x, y, adjustment_set = parents.len(), "backdoor adjustment");
    Ok(fit.coefficients[0])
}

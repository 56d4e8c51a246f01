//! Covariance, correlation and partial correlation.

use causa_core::errors::{DiscoveryError, StatsError};
use causa_core::Dataset;

use super::Matrix;

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample covariance matrix (n - 1 denominator) of equally long columns.
pub fn covariance_matrix(columns: &[&[f64]]) -> Result<Matrix, StatsError> {
    let k = columns.len();
    let n = columns.first().map(|c| c.len()).unwrap_or(0);
    if n < 2 {
        return Err(StatsError::NotEnoughObservations { n, required: 2 });
    }
    if let Some(bad) = columns.iter().find(|c| c.len() != n) {
        return Err(StatsError::DimensionMismatch {
            expected: n,
            actual: bad.len(),
        });
    }

    let centered: Vec<Vec<f64>> = columns
        .iter()
        .map(|c| {
            let m = mean(c);
            c.iter().map(|v| v - m).collect()
        })
        .collect();

    let denom = (n - 1) as f64;
    let mut cov = Matrix::zeros(k, k);
    for i in 0..k {
        for j in i..k {
            let s: f64 = centered[i].iter().zip(&centered[j]).map(|(a, b)| a * b).sum();
            cov[(i, j)] = s / denom;
            cov[(j, i)] = s / denom;
        }
    }
    Ok(cov)
}

/// Pearson correlation matrix. A constant column is a `ZeroVariance` error.
pub fn correlation_matrix(columns: &[&[f64]]) -> Result<Matrix, StatsError> {
    let cov = covariance_matrix(columns)?;
    let k = cov.rows();
    let sd: Vec<f64> = (0..k).map(|i| cov[(i, i)].sqrt()).collect();
    if let Some(i) = sd.iter().position(|s| !(*s > 0.0) || !s.is_finite()) {
        return Err(StatsError::ZeroVariance(i));
    }

    let mut corr = Matrix::zeros(k, k);
    for i in 0..k {
        for j in 0..k {
            corr[(i, j)] = if i == j {
                1.0
            } else {
                (cov[(i, j)] / (sd[i] * sd[j])).clamp(-1.0, 1.0)
            };
        }
    }
    Ok(corr)
}

/// Partial correlation of `x` and `y` given `s`, read from a full
/// correlation matrix: `r = -P_xy / sqrt(P_xx * P_yy)` where `P` is the
/// inverse of the correlation submatrix over `[x, y, s...]`.
pub fn partial_correlation_from(
    corr: &Matrix,
    x: usize,
    y: usize,
    s: &[usize],
) -> Result<f64, StatsError> {
    if s.is_empty() {
        return Ok(corr[(x, y)]);
    }
    let mut indices = Vec::with_capacity(s.len() + 2);
    indices.push(x);
    indices.push(y);
    indices.extend_from_slice(s);

    let precision = corr.principal_submatrix(&indices).invert()?;
    let denom = (precision[(0, 0)] * precision[(1, 1)]).sqrt();
    if !(denom > 0.0) || !denom.is_finite() {
        return Err(StatsError::Singular {
            column: 0,
            pivot: denom,
        });
    }
    Ok((-precision[(0, 1)] / denom).clamp(-1.0, 1.0))
}

/// Partial correlation of two named columns given named covariates.
pub fn partial_correlation(
    data: &Dataset,
    x: &str,
    y: &str,
    s: &[&str],
) -> Result<f64, DiscoveryError> {
    let mut columns: Vec<&[f64]> = Vec::with_capacity(s.len() + 2);
    for name in [x, y].iter().chain(s.iter()) {
        columns.push(
            data.column(name)
                .map_err(|_| DiscoveryError::UnknownVariable(name.to_string()))?,
        );
    }
    let corr = correlation_matrix(&columns)?;
    let s_idx: Vec<usize> = (2..columns.len()).collect();
    partial_correlation_from(&corr, 0, 1, &s_idx).map_err(DiscoveryError::from)
}

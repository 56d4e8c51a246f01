//! Ordinary least squares of one column on a set of regressors.

use causa_core::config::EstimationConfig;
use causa_core::errors::{EstimationError, StatsError};
use causa_core::Dataset;
use causa_discovery::stats::{mean, Matrix};

/// A fitted regression. `coefficients` follow the regressor order given.
#[derive(Debug, Clone, PartialEq)]
pub struct OlsFit {
    pub intercept: f64,
    pub coefficients: Vec<f64>,
    pub residual_variance: f64,
    pub r_squared: f64,
}

/// Regress `target` on `regressors`.
pub fn fit(
    data: &Dataset,
    target: &str,
    regressors: &[&str],
    config: &EstimationConfig,
) -> Result<OlsFit, EstimationError> {
    let y = column(data, target)?;
    let xs: Vec<&[f64]> = regressors
        .iter()
        .map(|r| column(data, r))
        .collect::<Result<_, _>>()?;

    let n = data.n_rows();
    let with_intercept = config.effective_fit_intercept();
    let offset = usize::from(with_intercept);
    let parameters = xs.len() + offset;
    if n < parameters * config.effective_min_rows_per_parameter() || n <= parameters {
        return Err(EstimationError::InsufficientSamples {
            target: target.to_string(),
            n,
            parameters,
        });
    }

    let beta = if parameters == 0 {
        Vec::new()
    } else {
        let mut design = Matrix::zeros(n, parameters);
        for r in 0..n {
            if with_intercept {
                design[(r, 0)] = 1.0;
            }
            for (c, x) in xs.iter().enumerate() {
                design[(r, c + offset)] = x[r];
            }
        }
        design.least_squares(y).map_err(|e| match e {
            StatsError::Singular { .. } => EstimationError::Singular {
                target: target.to_string(),
            },
            StatsError::NotEnoughObservations { n, required } => {
                EstimationError::InsufficientSamples {
                    target: target.to_string(),
                    n,
                    parameters: required,
                }
            }
            other => EstimationError::Stats(other),
        })?
    };

    let intercept = if with_intercept { beta[0] } else { 0.0 };
    let coefficients = beta[offset..].to_vec();

    let ssr: f64 = (0..n)
        .map(|r| {
            let fitted: f64 =
                intercept + xs.iter().zip(&coefficients).map(|(x, b)| b * x[r]).sum::<f64>();
            (y[r] - fitted).powi(2)
        })
        .sum();
    let y_mean = mean(y);
    let sst: f64 = y.iter().map(|v| (v - y_mean).powi(2)).sum();
    let r_squared = if sst > 0.0 { (1.0 - ssr / sst).max(0.0) } else { 0.0 };

    Ok(OlsFit {
        intercept,
        coefficients,
        residual_variance: ssr / (n - parameters) as f64,
        r_squared,
    })
}

fn column<'a>(data: &'a Dataset, name: &str) -> Result<&'a [f64], EstimationError> {
    data.column(name)
        .map_err(|_| EstimationError::UnknownVariable(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data() -> Dataset {
        let x = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let y: Vec<f64> = x.iter().map(|v| 2.0 + 3.0 * v).collect();
        Dataset::from_columns(vec!["x".into(), "y".into()], vec![x, y]).unwrap()
    }

    #[test]
    fn exact_line() {
        let fit = fit(&data(), "y", &["x"], &EstimationConfig::default()).unwrap();
        assert!((fit.intercept - 2.0).abs() < 1e-9);
        assert!((fit.coefficients[0] - 3.0).abs() < 1e-9);
        assert!(fit.residual_variance < 1e-12);
        assert!((fit.r_squared - 1.0).abs() < 1e-9);
    }

    #[test]
    fn intercept_only_is_the_mean() {
        let fit = fit(&data(), "x", &[], &EstimationConfig::default()).unwrap();
        assert!((fit.intercept - 3.5).abs() < 1e-12);
        assert!(fit.coefficients.is_empty());
        assert_eq!(fit.r_squared, 0.0);
    }

    #[test]
    fn without_intercept() {
        let config = EstimationConfig {
            fit_intercept: Some(false),
            ..Default::default()
        };
        let fit = fit(&data(), "y", &["x"], &config).unwrap();
        assert_eq!(fit.intercept, 0.0);
        assert_eq!(fit.coefficients.len(), 1);
    }

    #[test]
    fn collinear_regressors_are_singular() {
        let x = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let x2: Vec<f64> = x.iter().map(|v| 2.0 * v).collect();
        let y = vec![1.0, 0.0, 1.0, 0.0, 1.0, 0.0];
        let data =
            Dataset::from_columns(vec!["x".into(), "x2".into(), "y".into()], vec![x, x2, y]).unwrap();
        let err = fit(&data, "y", &["x", "x2"], &EstimationConfig::default()).unwrap_err();
        assert!(matches!(err, EstimationError::Singular { ref target } if target == "y"));
    }

    #[test]
    fn too_few_rows() {
        let err = fit(&data(), "y", &["x"], &EstimationConfig {
            min_rows_per_parameter: Some(4),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(
            err,
            EstimationError::InsufficientSamples { n: 6, parameters: 2, .. }
        ));
    }

    #[test]
    fn unknown_column() {
        let err = fit(&data(), "y", &["w"], &EstimationConfig::default()).unwrap_err();
        assert!(matches!(err, EstimationError::UnknownVariable(ref v) if v == "w"));
    }
}

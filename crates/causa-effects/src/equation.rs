//! One fitted structural equation.

use std::fmt;

use serde::Serialize;

/// `target = intercept + sum(beta_i * parent_i) + noise`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Equation {
    pub target: String,
    pub intercept: f64,
    /// `(parent, beta)` in dataset column order.
    pub coefficients: Vec<(String, f64)>,
    /// Residual sum of squares over residual degrees of freedom.
    pub residual_variance: f64,
    pub r_squared: f64,
}

impl Equation {
    pub fn coefficient(&self, parent: &str) -> Option<f64> {
        self.coefficients
            .iter()
            .find(|(p, _)| p == parent)
            .map(|&(_, beta)| beta)
    }

    pub fn parents(&self) -> impl Iterator<Item = &str> {
        self.coefficients.iter().map(|(p, _)| p.as_str())
    }

    pub fn is_exogenous(&self) -> bool {
        self.coefficients.is_empty()
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(4);
        write!(f, "{} = {:.precision$}", self.target, self.intercept)?;
        for (parent, beta) in &self.coefficients {
            let sign = if *beta < 0.0 { '-' } else { '+' };
            write!(f, " {sign} {:.precision$}*{parent}", beta.abs())?;
        }
        write!(
            f,
            "  (r2 = {:.precision$}, resid var = {:.precision$})",
            self.r_squared, self.residual_variance
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eq() -> Equation {
        Equation {
            target: "y".to_string(),
            intercept: 0.5,
            coefficients: vec![("x".to_string(), 0.4), ("m".to_string(), -0.25)],
            residual_variance: 1.0,
            r_squared: 0.3,
        }
    }

    #[test]
    fn lookup() {
        let e = eq();
        assert_eq!(e.coefficient("m"), Some(-0.25));
        assert_eq!(e.coefficient("z"), None);
        assert_eq!(e.parents().collect::<Vec<_>>(), vec!["x", "m"]);
        assert!(!e.is_exogenous());
    }

    #[test]
    fn display_signs() {
        assert_eq!(
            format!("{:.2}", eq()),
            "y = 0.50 + 0.40*x - 0.25*m  (r2 = 0.30, resid var = 1.00)"
        );
    }
}

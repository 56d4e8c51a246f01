//! Effect estimation configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct EstimationConfig {
    /// Include an intercept in every structural equation. Default: true.
    pub fit_intercept: Option<bool>,
    /// Minimum rows required per estimated parameter. Default: 2.
    pub min_rows_per_parameter: Option<usize>,
}

impl EstimationConfig {
    pub fn effective_fit_intercept(&self) -> bool {
        self.fit_intercept.unwrap_or(true)
    }

    pub fn effective_min_rows_per_parameter(&self) -> usize {
        self.min_rows_per_parameter.unwrap_or(2)
    }
}

//! Report output configuration.

use serde::{Deserialize, Serialize};

use crate::types::OutputFormat;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Report format. Default: text.
    pub format: Option<OutputFormat>,
    /// Decimal places for p-values and coefficients. Default: 4.
    pub precision: Option<usize>,
}

impl OutputConfig {
    pub fn effective_format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }

    pub fn effective_precision(&self) -> usize {
        self.precision.unwrap_or(4)
    }
}

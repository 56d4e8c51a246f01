//! CausaErrorCode trait for structured error reporting at the CLI boundary.

/// Every error enum implements this to expose a stable machine-readable code.
pub trait CausaErrorCode {
    /// Returns the error code string (e.g., "DATA_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted string `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const DATA_ERROR: &str = "DATA_ERROR";
pub const STATS_ERROR: &str = "STATS_ERROR";
pub const SINGULAR_MATRIX: &str = "SINGULAR_MATRIX";
pub const DISCOVERY_ERROR: &str = "DISCOVERY_ERROR";
pub const UNKNOWN_VARIABLE: &str = "UNKNOWN_VARIABLE";
pub const CYCLE_DETECTED: &str = "CYCLE_DETECTED";
pub const INSUFFICIENT_SAMPLES: &str = "INSUFFICIENT_SAMPLES";
pub const ESTIMATION_ERROR: &str = "ESTIMATION_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const USAGE_ERROR: &str = "USAGE_ERROR";
pub const CLI_ERROR: &str = "CLI_ERROR";

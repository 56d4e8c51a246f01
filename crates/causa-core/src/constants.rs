//! Compiled defaults and numeric limits.

/// Significance level used when none is configured.
pub const DEFAULT_ALPHA: f64 = 0.05;

/// Upper bound accepted for `discovery.max_conditioning`.
pub const MAX_CONDITIONING_LIMIT: usize = 32;

/// Pivots smaller than this are treated as zero during matrix inversion.
pub const SINGULAR_EPSILON: f64 = 1e-12;

/// Project-level configuration file name.
pub const PROJECT_CONFIG_FILE: &str = "causa.toml";

/// Environment variable holding the tracing filter directive.
pub const LOG_ENV_VAR: &str = "CAUSA_LOG";

/// Default tracing filter when `CAUSA_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str =
    "warn,causa=info,causa_core=info,causa_discovery=info,causa_effects=info";

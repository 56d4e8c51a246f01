//! Top-level Causa configuration with layered resolution.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{DiscoveryConfig, EstimationConfig, OutputConfig};
use crate::constants::{MAX_CONDITIONING_LIMIT, PROJECT_CONFIG_FILE};
use crate::errors::ConfigError;
use crate::types::{CiTestKind, OutputFormat, SkeletonStrategy};

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`CAUSA_*`)
/// 3. Project config (`causa.toml` in the project root)
/// 4. User config (`~/.causa/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct CausaConfig {
    pub discovery: DiscoveryConfig,
    pub estimation: EstimationConfig,
    pub output: OutputConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub alpha: Option<f64>,
    pub ci_test: Option<CiTestKind>,
    pub strategy: Option<SkeletonStrategy>,
    pub max_conditioning: Option<usize>,
    pub format: Option<OutputFormat>,
}

impl CausaConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Lowest priority: user config. Only a parse failure is fatal here.
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        tracing::warn!(path = %user_config_path.display(), error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config)?;

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;
        tracing::debug!(?config, "configuration resolved");

        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &CausaConfig) -> Result<(), ConfigError> {
        if let Some(alpha) = config.discovery.alpha {
            if !(alpha > 0.0 && alpha < 1.0) {
                return Err(ConfigError::ValidationFailed {
                    field: "discovery.alpha".to_string(),
                    message: "must be strictly between 0.0 and 1.0".to_string(),
                });
            }
        }
        if let Some(max) = config.discovery.max_conditioning {
            if max > MAX_CONDITIONING_LIMIT {
                return Err(ConfigError::ValidationFailed {
                    field: "discovery.max_conditioning".to_string(),
                    message: format!("must be at most {MAX_CONDITIONING_LIMIT}"),
                });
            }
        }
        if let Some(0) = config.estimation.min_rows_per_parameter {
            return Err(ConfigError::ValidationFailed {
                field: "estimation.min_rows_per_parameter".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if let Some(precision) = config.output.precision {
            if precision > 16 {
                return Err(ConfigError::ValidationFailed {
                    field: "output.precision".to_string(),
                    message: "must be at most 16".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Returns the user config path: `~/.causa/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".causa").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are ignored.
    fn merge_toml_file(config: &mut CausaConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: CausaConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins wherever it has a value.
    fn merge(base: &mut CausaConfig, other: &CausaConfig) {
        // Discovery
        if other.discovery.alpha.is_some() {
            base.discovery.alpha = other.discovery.alpha;
        }
        if other.discovery.ci_test.is_some() {
            base.discovery.ci_test = other.discovery.ci_test;
        }
        if other.discovery.strategy.is_some() {
            base.discovery.strategy = other.discovery.strategy;
        }
        if other.discovery.max_conditioning.is_some() {
            base.discovery.max_conditioning = other.discovery.max_conditioning;
        }
        if other.discovery.parallel.is_some() {
            base.discovery.parallel = other.discovery.parallel;
        }

        // Estimation
        if other.estimation.fit_intercept.is_some() {
            base.estimation.fit_intercept = other.estimation.fit_intercept;
        }
        if other.estimation.min_rows_per_parameter.is_some() {
            base.estimation.min_rows_per_parameter = other.estimation.min_rows_per_parameter;
        }

        // Output
        if other.output.format.is_some() {
            base.output.format = other.output.format;
        }
        if other.output.precision.is_some() {
            base.output.precision = other.output.precision;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `CAUSA_DISCOVERY_ALPHA`, `CAUSA_OUTPUT_FORMAT`, etc.
    fn apply_env_overrides(config: &mut CausaConfig) -> Result<(), ConfigError> {
        if let Some(v) = env_parse::<f64>("CAUSA_DISCOVERY_ALPHA")? {
            config.discovery.alpha = Some(v);
        }
        if let Some(v) = env_parse::<CiTestKind>("CAUSA_DISCOVERY_CI_TEST")? {
            config.discovery.ci_test = Some(v);
        }
        if let Some(v) = env_parse::<SkeletonStrategy>("CAUSA_DISCOVERY_STRATEGY")? {
            config.discovery.strategy = Some(v);
        }
        if let Some(v) = env_parse::<usize>("CAUSA_DISCOVERY_MAX_CONDITIONING")? {
            config.discovery.max_conditioning = Some(v);
        }
        if let Some(v) = env_parse::<bool>("CAUSA_DISCOVERY_PARALLEL")? {
            config.discovery.parallel = Some(v);
        }
        if let Some(v) = env_parse::<OutputFormat>("CAUSA_OUTPUT_FORMAT")? {
            config.output.format = Some(v);
        }
        Ok(())
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut CausaConfig, cli: &CliOverrides) {
        if let Some(v) = cli.alpha {
            config.discovery.alpha = Some(v);
        }
        if let Some(v) = cli.ci_test {
            config.discovery.ci_test = Some(v);
        }
        if let Some(v) = cli.strategy {
            config.discovery.strategy = Some(v);
        }
        if let Some(v) = cli.max_conditioning {
            config.discovery.max_conditioning = Some(v);
        }
        if let Some(v) = cli.format {
            config.output.format = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Read and parse an environment variable. Unset is `Ok(None)`; a value that
/// does not parse is an `InvalidValue` error naming the variable.
fn env_parse<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidValue {
                field: key.to_string(),
                message: e.to_string(),
            }),
        Err(_) => Ok(None),
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}

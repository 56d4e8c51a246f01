//! Configuration system for Causa.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod causa_config;
pub mod discovery_config;
pub mod estimation_config;
pub mod output_config;

pub use causa_config::{CausaConfig, CliOverrides};
pub use discovery_config::DiscoveryConfig;
pub use estimation_config::EstimationConfig;
pub use output_config::OutputConfig;

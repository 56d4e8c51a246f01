//! Error handling for Causa.
//! One error enum per subsystem, `thiserror` only.

pub mod config_error;
pub mod data_error;
pub mod discovery_error;
pub mod error_code;
pub mod estimation_error;
pub mod pipeline_error;
pub mod stats_error;

pub use config_error::ConfigError;
pub use data_error::DataError;
pub use discovery_error::DiscoveryError;
pub use error_code::CausaErrorCode;
pub use estimation_error::EstimationError;
pub use pipeline_error::PipelineError;
pub use stats_error::StatsError;

//! Core types, errors, configuration and dataset loading shared by every Causa crate.

pub mod config;
pub mod constants;
pub mod dataset;
pub mod errors;
pub mod tracing;
pub mod types;

pub use config::CausaConfig;
pub use dataset::Dataset;

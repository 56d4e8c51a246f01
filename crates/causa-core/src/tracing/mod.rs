//! Observability for Causa.
//! `tracing` crate with `EnvFilter`, filter read from `CAUSA_LOG`.

pub mod setup;

pub use setup::init_tracing;

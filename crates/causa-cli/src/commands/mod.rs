//! One module per subcommand.

pub mod config;
pub mod discover;
pub mod effects;
pub mod orient;
pub mod roles;

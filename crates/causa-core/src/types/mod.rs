//! Enumerations shared between configuration, the engine and the CLI.

pub mod kinds;

pub use kinds::{CiTestKind, OutputFormat, SkeletonStrategy};

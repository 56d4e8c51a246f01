//! # causa-discovery
//!
//! Constraint-based causal structure discovery over numeric datasets.
//!
//! The pipeline: conditional-independence tests on partial correlations,
//! skeleton search (exhaustive subset testing or PC-stable), orientation
//! (the collider rule over a skeleton table, or v-structures followed by
//! Meek's rules), and role analysis of confounders, colliders and mediators.

pub mod graph;
pub mod independence;
pub mod orientation;
pub mod pc;
pub mod roles;
pub mod skeleton;
pub mod stats;

pub use graph::PartiallyDirectedGraph;
pub use independence::{build_test, CiOutcome, IndependenceTest};
pub use orientation::{orient_with_collider, CausalTable, DirectedEdge};
pub use pc::{DiscoveryReport, DiscoveryResult, PcAlgorithm};
pub use roles::RoleReport;
pub use skeleton::{discover_skeleton, SkeletonOptions, SkeletonResult, SkeletonTable};

//! Partially directed graphs over named variables.

pub mod dag_enforcement;
pub mod pdag;
pub mod triples;

pub use pdag::{EdgeMark, PartiallyDirectedGraph, VariableNode};
pub use triples::{unshielded_triples, UnshieldedTriple};

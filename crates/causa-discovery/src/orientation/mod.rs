//! Edge orientation.
//!
//! Two routes: the collider rule reads the skeleton table directly for a
//! chosen middle node; the PC route orients v-structures from separation
//! sets and then propagates with Meek's rules.

pub mod collider_rule;
pub mod meek;
pub mod v_structures;

pub use collider_rule::{orient_with_collider, CausalTable, DirectedEdge};
pub use meek::apply_meek_rules;
pub use v_structures::orient_v_structures;

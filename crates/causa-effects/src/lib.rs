//! # causa-effects
//!
//! Linear structural equation models over a causal DAG. Each node is
//! regressed on its parents by ordinary least squares; effects are read off
//! the fitted coefficients (direct), summed over directed paths (total), or
//! re-estimated with a backdoor adjustment on the cause's parents.

pub mod effects;
pub mod equation;
pub mod ols;
pub mod sem;

pub use effects::{adjusted_effect, EffectReport};
pub use equation::Equation;
pub use sem::{LinearSem, SemSummary};

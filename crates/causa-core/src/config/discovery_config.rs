//! Structure discovery configuration.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_ALPHA;
use crate::types::{CiTestKind, SkeletonStrategy};

/// Configuration for skeleton search and orientation.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Significance level. An edge is removed when p > alpha. Default: 0.05.
    pub alpha: Option<f64>,
    /// Conditional-independence test. Default: partial_correlation.
    pub ci_test: Option<CiTestKind>,
    /// Adjacency search. Default: exhaustive.
    pub strategy: Option<SkeletonStrategy>,
    /// Largest conditioning set to try. Default: unbounded.
    pub max_conditioning: Option<usize>,
    /// Test candidate pairs on the rayon pool. Default: true.
    pub parallel: Option<bool>,
}

impl DiscoveryConfig {
    pub fn effective_alpha(&self) -> f64 {
        self.alpha.unwrap_or(DEFAULT_ALPHA)
    }

    pub fn effective_ci_test(&self) -> CiTestKind {
        self.ci_test.unwrap_or_default()
    }

    pub fn effective_strategy(&self) -> SkeletonStrategy {
        self.strategy.unwrap_or_default()
    }

    pub fn effective_parallel(&self) -> bool {
        self.parallel.unwrap_or(true)
    }
}

//! Skeleton discovery: remove every edge whose endpoints test independent
//! given some conditioning set.

mod exhaustive;
mod pc_stable;
pub mod sepset;
pub mod subsets;
pub mod table;

use std::time::Instant;

use causa_core::errors::DiscoveryError;
use causa_core::types::SkeletonStrategy;
use causa_core::Dataset;
use serde::Serialize;

use crate::independence::IndependenceTest;

pub use sepset::SeparationSets;
pub use table::{SkeletonRow, SkeletonTable};

/// Options for [`discover_skeleton`].
#[derive(Debug, Clone)]
pub struct SkeletonOptions {
    pub alpha: f64,
    pub strategy: SkeletonStrategy,
    /// Pairs to test. `None` tests every pair; untested pairs stay in the skeleton.
    pub candidates: Option<Vec<(String, String)>>,
    /// Largest conditioning set size to try. `None` is unbounded.
    pub max_conditioning: Option<usize>,
    /// Run independent pair tests on the rayon pool.
    pub parallel: bool,
}

impl Default for SkeletonOptions {
    fn default() -> Self {
        Self {
            alpha: causa_core::constants::DEFAULT_ALPHA,
            strategy: SkeletonStrategy::default(),
            candidates: None,
            max_conditioning: None,
            parallel: true,
        }
    }
}

/// Output of skeleton discovery.
#[derive(Debug, Clone, Serialize)]
pub struct SkeletonResult {
    /// Variables in dataset order.
    pub variables: Vec<String>,
    /// Every CI test that was run, in execution order.
    pub table: SkeletonTable,
    /// Distinct pairs with at least one test at `p < alpha`, in first-seen order.
    pub dependent_edges: Vec<(String, String)>,
    /// Pairs still adjacent after testing, in variable order.
    pub edges: Vec<(String, String)>,
    #[serde(skip)]
    pub sepsets: SeparationSets,
    pub alpha: f64,
}

impl SkeletonResult {
    pub fn has_edge(&self, a: &str, b: &str) -> bool {
        self.edges
            .iter()
            .any(|(x, y)| (x == a && y == b) || (x == b && y == a))
    }
}

/// Run skeleton discovery over `data` with the given test.
pub fn discover_skeleton(
    data: &Dataset,
    test: &dyn IndependenceTest,
    options: &SkeletonOptions,
) -> Result<SkeletonResult, DiscoveryError> {
    let variables = data.columns().to_vec();
    if variables.len() < 2 {
        return Err(DiscoveryError::TooFewVariables(variables.len()));
    }

    let all_pairs = all_pairs(variables.len());
    let candidates = match &options.candidates {
        Some(named) => resolve_candidates(data, named)?,
        None => all_pairs.clone(),
    };

    let started = Instant::now();
    let search = match options.strategy {
        SkeletonStrategy::Exhaustive => {
            exhaustive::run(&variables, test, &candidates, options)?
        }
        SkeletonStrategy::PcStable => pc_stable::run(&variables, test, &candidates, options)?,
    };

    let edges: Vec<(String, String)> = all_pairs
        .iter()
        .filter(|&&(i, j)| !search.removed.contains(&(i, j)))
        .map(|&(i, j)| (variables[i].clone(), variables[j].clone()))
        .collect();

    let mut table = SkeletonTable::new(search.rows);
    table.mark_removed(&edges);
    let dependent_edges = table.dependent_edges(options.alpha);

    tracing::info!(
        strategy = %options.strategy,
        test = test.name(),
        ci_tests_run = table.len(),
        edges_removed = search.removed.len(),
        skeleton_time_ms = started.elapsed().as_millis() as u64,
        "skeleton discovered"
    );

    Ok(SkeletonResult {
        variables,
        table,
        dependent_edges,
        edges,
        sepsets: search.sepsets,
        alpha: options.alpha,
    })
}

/// What a search strategy hands back before the table is finalised.
pub(crate) struct SearchOutcome {
    pub rows: Vec<SkeletonRow>,
    /// Removed pairs as (lower index, higher index).
    pub removed: std::collections::HashSet<(usize, usize)>,
    pub sepsets: SeparationSets,
}

/// Every unordered pair `(i, j)` with `i < j`, in row-major order.
fn all_pairs(k: usize) -> Vec<(usize, usize)> {
    (0..k)
        .flat_map(|i| ((i + 1)..k).map(move |j| (i, j)))
        .collect()
}

/// Map named candidate pairs to index pairs, keeping the caller's orientation
/// so table rows read `node_1 - node_2` as given.
fn resolve_candidates(
    data: &Dataset,
    named: &[(String, String)],
) -> Result<Vec<(usize, usize)>, DiscoveryError> {
    let mut out: Vec<(usize, usize)> = Vec::with_capacity(named.len());
    for (x, y) in named {
        let i = data
            .index_of(x)
            .ok_or_else(|| DiscoveryError::UnknownVariable(x.clone()))?;
        let j = data
            .index_of(y)
            .ok_or_else(|| DiscoveryError::UnknownVariable(y.clone()))?;
        if i == j {
            return Err(DiscoveryError::InvalidCandidate {
                x: x.clone(),
                y: y.clone(),
            });
        }
        if !out.iter().any(|&(a, b)| ordered(a, b) == ordered(i, j)) {
            out.push((i, j));
        }
    }
    Ok(out)
}

pub(crate) fn ordered(a: usize, b: usize) -> (usize, usize) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

//! The PC pipeline: skeleton search, v-structures, Meek propagation.

use causa_core::config::DiscoveryConfig;
use causa_core::errors::DiscoveryError;
use causa_core::Dataset;
use serde::Serialize;

use crate::graph::{PartiallyDirectedGraph, UnshieldedTriple};
use crate::independence::build_test;
use crate::orientation::{apply_meek_rules, orient_v_structures};
use crate::skeleton::{discover_skeleton, SkeletonOptions, SkeletonResult, SkeletonRow};

/// Runs the full PC procedure with settings taken from [`DiscoveryConfig`].
pub struct PcAlgorithm {
    config: DiscoveryConfig,
    candidates: Option<Vec<(String, String)>>,
}

/// Everything the pipeline produced.
#[derive(Debug, Clone)]
pub struct DiscoveryResult {
    pub skeleton: SkeletonResult,
    pub graph: PartiallyDirectedGraph,
    pub v_structures: Vec<UnshieldedTriple>,
    pub meek_oriented: usize,
}

/// Serializable view of a [`DiscoveryResult`].
#[derive(Debug, Clone, Serialize)]
pub struct DiscoveryReport<'a> {
    pub variables: &'a [String],
    pub alpha: f64,
    pub skeleton_table: &'a [SkeletonRow],
    pub skeleton_edges: &'a [(String, String)],
    pub dependent_edges: &'a [(String, String)],
    pub directed_edges: Vec<(String, String)>,
    pub undirected_edges: Vec<(String, String)>,
    pub v_structures: &'a [UnshieldedTriple],
    pub meek_oriented: usize,
}

impl DiscoveryResult {
    pub fn report(&self) -> DiscoveryReport<'_> {
        DiscoveryReport {
            variables: &self.skeleton.variables,
            alpha: self.skeleton.alpha,
            skeleton_table: self.skeleton.table.rows(),
            skeleton_edges: &self.skeleton.edges,
            dependent_edges: &self.skeleton.dependent_edges,
            directed_edges: self.graph.directed_edges(),
            undirected_edges: self.graph.undirected_edges(),
            v_structures: &self.v_structures,
            meek_oriented: self.meek_oriented,
        }
    }
}

impl PcAlgorithm {
    pub fn new(config: DiscoveryConfig) -> Self {
        Self {
            config,
            candidates: None,
        }
    }

    /// Restrict CI testing to these pairs. Untested pairs stay adjacent.
    pub fn with_candidates(mut self, candidates: Vec<(String, String)>) -> Self {
        self.candidates = Some(candidates);
        self
    }

    pub fn options(&self) -> SkeletonOptions {
        SkeletonOptions {
            alpha: self.config.effective_alpha(),
            strategy: self.config.effective_strategy(),
            candidates: self.candidates.clone(),
            max_conditioning: self.config.max_conditioning,
            parallel: self.config.effective_parallel(),
        }
    }

    /// Skeleton search only.
    pub fn skeleton(&self, data: &Dataset) -> Result<SkeletonResult, DiscoveryError> {
        let test = build_test(self.config.effective_ci_test(), data)?;
        discover_skeleton(data, test.as_ref(), &self.options())
    }

    pub fn run(&self, data: &Dataset) -> Result<DiscoveryResult, DiscoveryError> {
        let skeleton = self.skeleton(data)?;

        let mut graph = PartiallyDirectedGraph::from_skeleton(&skeleton.variables, &skeleton.edges)?;
        let v_structures = orient_v_structures(&mut graph, &skeleton.sepsets);
        let meek_oriented = apply_meek_rules(&mut graph);

        tracing::info!(
            edges = graph.edge_count(),
            v_structures = v_structures.len(),
            meek_oriented,
            "pc orientation complete"
        );

        Ok(DiscoveryResult {
            skeleton,
            graph,
            v_structures,
            meek_oriented,
        })
    }
}

//! Roles of third variables relative to a cause/effect pair in a DAG.
//!
//! Only directed edges are considered; undirected edges in a PDAG carry no
//! causal claim and are ignored.

use std::collections::{BTreeSet, HashSet};

use causa_core::errors::DiscoveryError;
use petgraph::stable_graph::NodeIndex;
use serde::Serialize;

use crate::graph::PartiallyDirectedGraph;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RoleReport {
    pub cause: String,
    pub effect: String,
    /// Common causes of `cause` and `effect`.
    pub confounders: Vec<String>,
    /// Common direct effects of `cause` and `effect`.
    pub colliders: Vec<String>,
    /// Nodes on a directed path from `cause` to `effect`.
    pub mediators: Vec<String>,
}

/// Classify every other node relative to `cause -> effect`.
pub fn classify(
    graph: &PartiallyDirectedGraph,
    cause: &str,
    effect: &str,
) -> Result<RoleReport, DiscoveryError> {
    Ok(RoleReport {
        cause: cause.to_string(),
        effect: effect.to_string(),
        confounders: confounders(graph, cause, effect)?,
        colliders: colliders(graph, cause, effect)?,
        mediators: mediators(graph, cause, effect)?,
    })
}

/// Ancestors of both `x` and `y`, where the path to `y` does not pass
/// through `x`.
pub fn confounders(
    graph: &PartiallyDirectedGraph,
    x: &str,
    y: &str,
) -> Result<Vec<String>, DiscoveryError> {
    let ix = graph.require(x)?;
    let iy = graph.require(y)?;
    let of_x = ancestors(graph, ix, None);
    let of_y = ancestors(graph, iy, Some(ix));
    Ok(names(graph, of_x.intersection(&of_y).copied(), &[ix, iy]))
}

/// Nodes with both `x` and `y` as parents.
pub fn colliders(
    graph: &PartiallyDirectedGraph,
    x: &str,
    y: &str,
) -> Result<Vec<String>, DiscoveryError> {
    let ix = graph.require(x)?;
    let iy = graph.require(y)?;
    let of_x: BTreeSet<NodeIndex> = graph.children(ix).into_iter().collect();
    let of_y: BTreeSet<NodeIndex> = graph.children(iy).into_iter().collect();
    Ok(names(graph, of_x.intersection(&of_y).copied(), &[ix, iy]))
}

/// Descendants of `x` that are also ancestors of `y`.
pub fn mediators(
    graph: &PartiallyDirectedGraph,
    x: &str,
    y: &str,
) -> Result<Vec<String>, DiscoveryError> {
    let ix = graph.require(x)?;
    let iy = graph.require(y)?;
    let down = descendants(graph, ix);
    let up = ancestors(graph, iy, None);
    Ok(names(graph, down.intersection(&up).copied(), &[ix, iy]))
}

/// Strict ancestors of `start`, never expanding through `blocked`.
pub fn ancestors(
    graph: &PartiallyDirectedGraph,
    start: NodeIndex,
    blocked: Option<NodeIndex>,
) -> BTreeSet<NodeIndex> {
    walk(start, blocked, |n| graph.parents(n))
}

/// Strict descendants of `start`.
pub fn descendants(graph: &PartiallyDirectedGraph, start: NodeIndex) -> BTreeSet<NodeIndex> {
    walk(start, None, |n| graph.children(n))
}

fn walk<F>(start: NodeIndex, blocked: Option<NodeIndex>, next: F) -> BTreeSet<NodeIndex>
where
    F: Fn(NodeIndex) -> Vec<NodeIndex>,
{
    let mut seen = HashSet::new();
    let mut out = BTreeSet::new();
    let mut stack = vec![start];
    while let Some(n) = stack.pop() {
        for m in next(n) {
            if Some(m) == blocked || !seen.insert(m) {
                continue;
            }
            out.insert(m);
            stack.push(m);
        }
    }
    out.remove(&start);
    out
}

fn names(
    graph: &PartiallyDirectedGraph,
    nodes: impl Iterator<Item = NodeIndex>,
    exclude: &[NodeIndex],
) -> Vec<String> {
    nodes
        .filter(|n| !exclude.contains(n))
        .map(|n| graph.name(n).to_string())
        .collect()
}

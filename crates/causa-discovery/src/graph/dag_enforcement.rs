//! Cycle checks over the directed part of a PDAG.
//! Every orientation is checked before it is applied.

use petgraph::graphmap::DiGraphMap;
use petgraph::stable_graph::NodeIndex;
use petgraph::visit::{Dfs, EdgeFiltered, EdgeRef, IntoEdgeReferences};

use super::pdag::{EdgeMark, PartiallyDirectedGraph};

/// Whether adding (or orienting) `source -> target` would close a directed cycle.
pub fn would_create_cycle(
    graph: &PartiallyDirectedGraph,
    source: NodeIndex,
    target: NodeIndex,
) -> bool {
    if source == target {
        return true;
    }
    has_directed_path(graph, target, source)
}

/// DFS over directed edges only: can we reach `to` from `from`?
pub fn has_directed_path(graph: &PartiallyDirectedGraph, from: NodeIndex, to: NodeIndex) -> bool {
    let directed = EdgeFiltered::from_fn(&graph.graph, |e| *e.weight() == EdgeMark::Directed);
    let mut dfs = Dfs::new(&directed, from);
    while let Some(node) = dfs.next(&directed) {
        if node == to {
            return true;
        }
    }
    false
}

/// Strongly connected components of the directed part with more than one
/// node. Empty for a valid PDAG.
pub fn find_cycles(graph: &PartiallyDirectedGraph) -> Vec<Vec<NodeIndex>> {
    let mut directed: DiGraphMap<NodeIndex, ()> = DiGraphMap::new();
    for idx in graph.graph.node_indices() {
        directed.add_node(idx);
    }
    for e in graph.graph.edge_references() {
        if *e.weight() == EdgeMark::Directed {
            directed.add_edge(e.source(), e.target(), ());
        }
    }
    petgraph::algo::tarjan_scc(&directed)
        .into_iter()
        .filter(|scc| scc.len() > 1)
        .collect()
}

//! Unshielded triples: `left - middle - right` with `left` and `right` not adjacent.

use serde::Serialize;

use super::PartiallyDirectedGraph;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnshieldedTriple {
    pub left: String,
    pub middle: String,
    pub right: String,
}

/// Every unshielded triple in node order of the middle, with `left < right`
/// by name. Edge marks are ignored.
pub fn unshielded_triples(graph: &PartiallyDirectedGraph) -> Vec<UnshieldedTriple> {
    let mut out = Vec::new();
    for middle in graph.nodes() {
        let adjacent = graph.adjacent_nodes(middle);
        for (i, &a) in adjacent.iter().enumerate() {
            for &b in &adjacent[i + 1..] {
                if graph.is_adjacent(a, b) {
                    continue;
                }
                let (left, right) = if graph.name(a) <= graph.name(b) { (a, b) } else { (b, a) };
                out.push(UnshieldedTriple {
                    left: graph.name(left).to_string(),
                    middle: graph.name(middle).to_string(),
                    right: graph.name(right).to_string(),
                });
            }
        }
    }
    out
}

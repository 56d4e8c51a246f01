//! Meek's orientation rules R1-R3, applied until no rule fires.

use petgraph::stable_graph::NodeIndex;

use crate::graph::PartiallyDirectedGraph;

/// Returns the number of edges oriented.
pub fn apply_meek_rules(graph: &mut PartiallyDirectedGraph) -> usize {
    let mut total = 0;
    loop {
        let fired = rule_1(graph) + rule_2(graph) + rule_3(graph);
        if fired == 0 {
            break;
        }
        total += fired;
    }
    tracing::debug!(meek_oriented = total, "meek rules applied");
    total
}

/// Undirected edges as ordered pairs in both directions.
fn undirected_pairs(graph: &PartiallyDirectedGraph) -> Vec<(NodeIndex, NodeIndex)> {
    let mut pairs = Vec::new();
    for a in graph.nodes() {
        for b in graph.undirected_neighbors(a) {
            pairs.push((a, b));
        }
    }
    pairs
}

fn try_orient(graph: &mut PartiallyDirectedGraph, a: NodeIndex, b: NodeIndex, rule: &str) -> usize {
    if !graph.is_undirected(a, b) {
        return 0;
    }
    match graph.orient(a, b) {
        Ok(true) => {
            tracing::trace!(rule, from = graph.name(a), to = graph.name(b), "meek orientation");
            1
        }
        Ok(false) => 0,
        Err(e) => {
            tracing::warn!(rule, error = %e, "meek orientation skipped");
            0
        }
    }
}

/// R1: `a -> b - c`, `a` and `c` not adjacent  =>  `b -> c`.
fn rule_1(graph: &mut PartiallyDirectedGraph) -> usize {
    let mut fired = 0;
    for (b, c) in undirected_pairs(graph) {
        let fires = graph
            .parents(b)
            .into_iter()
            .any(|a| a != c && !graph.is_adjacent(a, c));
        if fires {
            fired += try_orient(graph, b, c, "R1");
        }
    }
    fired
}

/// R2: `a -> b -> c` and `a - c`  =>  `a -> c`.
fn rule_2(graph: &mut PartiallyDirectedGraph) -> usize {
    let mut fired = 0;
    for (a, c) in undirected_pairs(graph) {
        let fires = graph
            .children(a)
            .into_iter()
            .any(|b| graph.is_directed(b, c));
        if fires {
            fired += try_orient(graph, a, c, "R2");
        }
    }
    fired
}

/// R3: `a - c -> b`, `a - d -> b`, `a - b`, `c` and `d` not adjacent  =>  `a -> b`.
fn rule_3(graph: &mut PartiallyDirectedGraph) -> usize {
    let mut fired = 0;
    for (a, b) in undirected_pairs(graph) {
        let candidates: Vec<NodeIndex> = graph
            .undirected_neighbors(a)
            .into_iter()
            .filter(|&n| n != b && graph.is_directed(n, b))
            .collect();
        let fires = candidates.iter().enumerate().any(|(i, &c)| {
            candidates[i + 1..]
                .iter()
                .any(|&d| !graph.is_adjacent(c, d))
        });
        if fires {
            fired += try_orient(graph, a, b, "R3");
        }
    }
    fired
}

//! Orient unshielded triples `l - m - r` into `l -> m <- r` when `m` is not
//! in the set that separated `l` and `r`.

use crate::graph::{unshielded_triples, PartiallyDirectedGraph, UnshieldedTriple};
use crate::skeleton::SeparationSets;

/// Returns the triples that were oriented as v-structures. An orientation
/// that conflicts with an earlier one is skipped and logged.
pub fn orient_v_structures(
    graph: &mut PartiallyDirectedGraph,
    sepsets: &SeparationSets,
) -> Vec<UnshieldedTriple> {
    let mut oriented = Vec::new();

    for triple in unshielded_triples(graph) {
        match sepsets.separated_by(&triple.left, &triple.right, &triple.middle) {
            Some(false) => {}
            Some(true) => continue,
            None => {
                tracing::debug!(left = %triple.left, right = %triple.right, "no separating set recorded");
                continue;
            }
        }

        let (Some(l), Some(m), Some(r)) = (
            graph.get_node(&triple.left),
            graph.get_node(&triple.middle),
            graph.get_node(&triple.right),
        ) else {
            continue;
        };

        let mut ok = true;
        for end in [l, r] {
            if let Err(e) = graph.orient(end, m) {
                tracing::warn!(
                    left = %triple.left,
                    middle = %triple.middle,
                    right = %triple.right,
                    error = %e,
                    "conflicting v-structure orientation skipped"
                );
                ok = false;
            }
        }
        if ok {
            oriented.push(triple);
        }
    }

    tracing::debug!(v_structures = oriented.len(), "v-structures oriented");
    oriented
}

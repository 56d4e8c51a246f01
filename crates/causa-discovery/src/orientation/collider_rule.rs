//! The collider rule over a skeleton table.
//!
//! For a candidate middle node `c` and each pair `(a, b)`:
//! if some test separated `a` and `b` (p > alpha) without conditioning on
//! `c`, the pair is a v-structure and both point into `c`. Otherwise `c`
//! explains their dependence and points out to both. When the two verdicts
//! disagree, the collider evidence wins: `c -> t` is dropped whenever `t`
//! is already the source of an edge.

use std::fmt;

use causa_core::errors::DiscoveryError;
use serde::Serialize;

use crate::skeleton::SkeletonResult;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DirectedEdge {
    pub from: String,
    pub to: String,
}

impl DirectedEdge {
    pub fn new(from: &str, to: &str) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}

impl fmt::Display for DirectedEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// Directed edges inferred by the collider rule, in inference order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CausalTable {
    edges: Vec<DirectedEdge>,
}

impl CausalTable {
    pub fn edges(&self) -> &[DirectedEdge] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn contains(&self, from: &str, to: &str) -> bool {
        self.edges.iter().any(|e| e.from == from && e.to == to)
    }

    /// `(from, to)` pairs, ready for effect estimation.
    pub fn as_pairs(&self) -> Vec<(String, String)> {
        self.edges
            .iter()
            .map(|e| (e.from.clone(), e.to.clone()))
            .collect()
    }
}

impl fmt::Display for CausalTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.edges.iter().map(|e| e.from.len()).max().unwrap_or(4).max(4);
        writeln!(f, "{:<width$}  dir  to", "from")?;
        for e in &self.edges {
            writeln!(f, "{:<width$}  ->   {}", e.from, e.to)?;
        }
        Ok(())
    }
}

/// Orient `pairs` around `collider` using the rows recorded in `skeleton`.
pub fn orient_with_collider(
    skeleton: &SkeletonResult,
    pairs: &[(String, String)],
    collider: &str,
) -> Result<CausalTable, DiscoveryError> {
    let known = |name: &str| -> Result<(), DiscoveryError> {
        if skeleton.variables.iter().any(|v| v == name) {
            Ok(())
        } else {
            Err(DiscoveryError::UnknownVariable(name.to_string()))
        }
    };
    known(collider)?;

    let alpha = skeleton.alpha;
    let mut records: Vec<DirectedEdge> = Vec::new();
    let mut push = |edge: DirectedEdge| {
        if !records.contains(&edge) {
            records.push(edge);
        }
    };

    for (a, b) in pairs {
        known(a)?;
        known(b)?;

        let separated_without_collider = skeleton
            .table
            .rows_for_pair(a, b)
            .any(|row| row.p_value > alpha && !row.conditions_on(collider));

        if separated_without_collider {
            tracing::debug!(%a, %b, collider, "separated without collider: v-structure");
            push(DirectedEdge::new(a, collider));
            push(DirectedEdge::new(b, collider));
        } else {
            tracing::debug!(%a, %b, collider, "dependent unless collider is conditioned on");
            push(DirectedEdge::new(collider, a));
            push(DirectedEdge::new(collider, b));
        }
    }

    // Collider evidence takes precedence: drop `collider -> t` when `t` is a source.
    let sources: Vec<String> = records.iter().map(|e| e.from.clone()).collect();
    records.retain(|e| !(e.from == collider && sources.contains(&e.to)));

    tracing::info!(collider, edges = records.len(), "collider rule applied");
    Ok(CausalTable { edges: records })
}

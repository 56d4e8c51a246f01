//! petgraph::StableGraph wrapper holding a mix of directed and undirected edges.
//!
//! An undirected edge is stored once, from the endpoint with the lower node
//! index to the higher, and marked [`EdgeMark::Undirected`]. Orienting an
//! edge replaces it with a single [`EdgeMark::Directed`] edge.

use std::collections::HashMap;
use std::fmt::Write as _;

use causa_core::errors::DiscoveryError;
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableGraph};
use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use petgraph::{Directed, Direction};
use serde::Serialize;

use super::dag_enforcement;

#[derive(Debug, Clone, Serialize)]
pub struct VariableNode {
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeMark {
    Undirected,
    Directed,
}

pub type PdagStableGraph = StableGraph<VariableNode, EdgeMark, Directed>;

#[derive(Debug, Clone)]
pub struct PartiallyDirectedGraph {
    pub graph: PdagStableGraph,
    node_index: HashMap<String, NodeIndex>,
}

impl PartiallyDirectedGraph {
    pub fn new() -> Self {
        Self {
            graph: StableGraph::new(),
            node_index: HashMap::new(),
        }
    }

    /// All `variables` as nodes, every pair in `edges` undirected.
    pub fn from_skeleton(
        variables: &[String],
        edges: &[(String, String)],
    ) -> Result<Self, DiscoveryError> {
        let mut g = Self::new();
        for v in variables {
            g.ensure_node(v);
        }
        for (a, b) in edges {
            let ia = g.require(a)?;
            let ib = g.require(b)?;
            g.add_undirected(ia, ib);
        }
        Ok(g)
    }

    /// All `variables` as nodes, every pair in `edges` directed `from -> to`.
    /// Fails if the edges contain a cycle.
    pub fn from_directed(
        variables: &[String],
        edges: &[(String, String)],
    ) -> Result<Self, DiscoveryError> {
        let mut g = Self::new();
        for v in variables {
            g.ensure_node(v);
        }
        for (from, to) in edges {
            let ia = g.require(from)?;
            let ib = g.require(to)?;
            g.add_directed(ia, ib)?;
        }
        Ok(g)
    }

    /// Get or create the node for `name`.
    pub fn ensure_node(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.node_index.get(name) {
            return idx;
        }
        let idx = self.graph.add_node(VariableNode {
            name: name.to_string(),
        });
        self.node_index.insert(name.to_string(), idx);
        idx
    }

    pub fn get_node(&self, name: &str) -> Option<NodeIndex> {
        self.node_index.get(name).copied()
    }

    /// Like [`get_node`](Self::get_node) but unknown names are an error.
    pub fn require(&self, name: &str) -> Result<NodeIndex, DiscoveryError> {
        self.get_node(name)
            .ok_or_else(|| DiscoveryError::UnknownVariable(name.to_string()))
    }

    pub fn name(&self, idx: NodeIndex) -> &str {
        self.graph
            .node_weight(idx)
            .map(|n| n.name.as_str())
            .unwrap_or("")
    }

    /// Node indices in insertion order.
    pub fn nodes(&self) -> Vec<NodeIndex> {
        self.graph.node_indices().collect()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Add an undirected edge unless the pair is already adjacent.
    pub fn add_undirected(&mut self, a: NodeIndex, b: NodeIndex) {
        if a == b || self.is_adjacent(a, b) {
            return;
        }
        let (lo, hi) = if a.index() < b.index() { (a, b) } else { (b, a) };
        self.graph.add_edge(lo, hi, EdgeMark::Undirected);
    }

    /// Add `from -> to`, replacing an undirected edge if present.
    pub fn add_directed(&mut self, from: NodeIndex, to: NodeIndex) -> Result<bool, DiscoveryError> {
        if self.is_adjacent(from, to) {
            return self.orient(from, to);
        }
        if dag_enforcement::would_create_cycle(self, from, to) {
            return Err(self.cycle_error(from, to));
        }
        self.graph.add_edge(from, to, EdgeMark::Directed);
        Ok(true)
    }

    /// Turn the undirected edge `a - b` into `a -> b`.
    ///
    /// Returns `Ok(false)` if `a -> b` already holds. Fails if the pair is not
    /// adjacent, if `b -> a` is already directed, or if the orientation would
    /// close a directed cycle.
    pub fn orient(&mut self, a: NodeIndex, b: NodeIndex) -> Result<bool, DiscoveryError> {
        let (edge, stored_forward, mark) = self.link(a, b).ok_or_else(|| DiscoveryError::MissingEdge {
            a: self.name(a).to_string(),
            b: self.name(b).to_string(),
        })?;

        match (mark, stored_forward) {
            (EdgeMark::Directed, true) => Ok(false),
            (EdgeMark::Directed, false) => Err(self.cycle_error(a, b)),
            (EdgeMark::Undirected, _) => {
                if dag_enforcement::would_create_cycle(self, a, b) {
                    return Err(self.cycle_error(a, b));
                }
                self.graph.remove_edge(edge);
                self.graph.add_edge(a, b, EdgeMark::Directed);
                Ok(true)
            }
        }
    }

    /// The stored edge between `a` and `b` in either direction, whether it is
    /// stored as `a -> b`, and its mark.
    fn link(&self, a: NodeIndex, b: NodeIndex) -> Option<(EdgeIndex, bool, EdgeMark)> {
        if let Some(e) = self.graph.find_edge(a, b) {
            return self.graph.edge_weight(e).map(|&m| (e, true, m));
        }
        self.graph
            .find_edge(b, a)
            .and_then(|e| self.graph.edge_weight(e).map(|&m| (e, false, m)))
    }

    pub fn is_adjacent(&self, a: NodeIndex, b: NodeIndex) -> bool {
        self.link(a, b).is_some()
    }

    /// `a -> b`.
    pub fn is_directed(&self, a: NodeIndex, b: NodeIndex) -> bool {
        matches!(self.link(a, b), Some((_, true, EdgeMark::Directed)))
    }

    /// `a - b`.
    pub fn is_undirected(&self, a: NodeIndex, b: NodeIndex) -> bool {
        matches!(self.link(a, b), Some((_, _, EdgeMark::Undirected)))
    }

    /// Nodes `p` with `p -> n`.
    pub fn parents(&self, n: NodeIndex) -> Vec<NodeIndex> {
        self.directed_neighbors(n, Direction::Incoming)
    }

    /// Nodes `c` with `n -> c`.
    pub fn children(&self, n: NodeIndex) -> Vec<NodeIndex> {
        self.directed_neighbors(n, Direction::Outgoing)
    }

    /// Nodes joined to `n` by an undirected edge.
    pub fn undirected_neighbors(&self, n: NodeIndex) -> Vec<NodeIndex> {
        let mut out: Vec<NodeIndex> = self
            .graph
            .edges_directed(n, Direction::Outgoing)
            .filter(|e| *e.weight() == EdgeMark::Undirected)
            .map(|e| e.target())
            .chain(
                self.graph
                    .edges_directed(n, Direction::Incoming)
                    .filter(|e| *e.weight() == EdgeMark::Undirected)
                    .map(|e| e.source()),
            )
            .collect();
        out.sort();
        out
    }

    /// Every node adjacent to `n`, whatever the edge mark.
    pub fn adjacent_nodes(&self, n: NodeIndex) -> Vec<NodeIndex> {
        let mut out: Vec<NodeIndex> = self
            .graph
            .neighbors_directed(n, Direction::Outgoing)
            .chain(self.graph.neighbors_directed(n, Direction::Incoming))
            .collect();
        out.sort();
        out.dedup();
        out
    }

    fn directed_neighbors(&self, n: NodeIndex, dir: Direction) -> Vec<NodeIndex> {
        let mut out: Vec<NodeIndex> = self
            .graph
            .edges_directed(n, dir)
            .filter(|e| *e.weight() == EdgeMark::Directed)
            .map(|e| match dir {
                Direction::Outgoing => e.target(),
                Direction::Incoming => e.source(),
            })
            .collect();
        out.sort();
        out
    }

    /// Directed edges as `(from, to)` names, sorted by node order.
    pub fn directed_edges(&self) -> Vec<(String, String)> {
        self.edges_with(EdgeMark::Directed)
    }

    /// Undirected edges as `(lower, higher)` names, sorted by node order.
    pub fn undirected_edges(&self) -> Vec<(String, String)> {
        self.edges_with(EdgeMark::Undirected)
    }

    fn edges_with(&self, mark: EdgeMark) -> Vec<(String, String)> {
        let mut edges: Vec<(NodeIndex, NodeIndex)> = self
            .graph
            .edge_references()
            .filter(|e| *e.weight() == mark)
            .map(|e| (e.source(), e.target()))
            .collect();
        edges.sort();
        edges
            .into_iter()
            .map(|(a, b)| (self.name(a).to_string(), self.name(b).to_string()))
            .collect()
    }

    /// Graphviz rendering. Undirected edges are drawn without arrowheads.
    pub fn to_dot(&self) -> String {
        let mut out = String::from("digraph causal {\n");
        for idx in self.graph.node_indices() {
            let _ = writeln!(out, "    \"{}\";", self.name(idx));
        }
        for (a, b) in self.directed_edges() {
            let _ = writeln!(out, "    \"{a}\" -> \"{b}\";");
        }
        for (a, b) in self.undirected_edges() {
            let _ = writeln!(out, "    \"{a}\" -> \"{b}\" [dir=none];");
        }
        out.push_str("}\n");
        out
    }

    fn cycle_error(&self, from: NodeIndex, to: NodeIndex) -> DiscoveryError {
        DiscoveryError::CycleDetected {
            from: self.name(from).to_string(),
            to: self.name(to).to_string(),
        }
    }
}

impl Default for PartiallyDirectedGraph {
    fn default() -> Self {
        Self::new()
    }
}

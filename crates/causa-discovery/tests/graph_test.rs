//! PartiallyDirectedGraph invariants: no directed cycles, explicit errors.

use causa_core::errors::DiscoveryError;
use causa_discovery::graph::dag_enforcement::{find_cycles, has_directed_path};
use causa_discovery::graph::PartiallyDirectedGraph;

fn pair(a: &str, b: &str) -> (String, String) {
    (a.to_string(), b.to_string())
}

fn triangle() -> PartiallyDirectedGraph {
    let vars: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
    PartiallyDirectedGraph::from_skeleton(
        &vars,
        &[pair("a", "b"), pair("b", "c"), pair("a", "c")],
    )
    .unwrap()
}

#[test]
fn orient_rejects_closing_a_cycle() {
    let mut g = triangle();
    let (a, b, c) = (g.require("a").unwrap(), g.require("b").unwrap(), g.require("c").unwrap());
    assert!(g.orient(a, b).unwrap());
    assert!(g.orient(b, c).unwrap());

    let err = g.orient(c, a).unwrap_err();
    assert!(matches!(err, DiscoveryError::CycleDetected { .. }));
    assert!(g.is_undirected(a, c), "failed orientation leaves the edge alone");
    assert!(find_cycles(&g).is_empty());
}

#[test]
fn orient_is_idempotent_and_rejects_reversal() {
    let mut g = triangle();
    let (a, b) = (g.require("a").unwrap(), g.require("b").unwrap());
    assert!(g.orient(b, a).unwrap());
    assert!(!g.orient(b, a).unwrap());
    assert!(matches!(g.orient(a, b), Err(DiscoveryError::CycleDetected { .. })));
    assert_eq!(g.edge_count(), 3);
}

#[test]
fn orient_missing_edge() {
    let vars: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
    let mut g = PartiallyDirectedGraph::from_skeleton(&vars, &[pair("a", "b")]).unwrap();
    let (a, c) = (g.require("a").unwrap(), g.require("c").unwrap());
    assert!(matches!(g.orient(a, c), Err(DiscoveryError::MissingEdge { .. })));
}

#[test]
fn from_directed_rejects_cycles() {
    let vars: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
    let err = PartiallyDirectedGraph::from_directed(
        &vars,
        &[pair("a", "b"), pair("b", "c"), pair("c", "a")],
    )
    .unwrap_err();
    assert!(matches!(err, DiscoveryError::CycleDetected { .. }));
}

#[test]
fn from_skeleton_rejects_unknown_names() {
    let vars: Vec<String> = vec!["a".to_string()];
    let err = PartiallyDirectedGraph::from_skeleton(&vars, &[pair("a", "zz")]).unwrap_err();
    assert!(matches!(err, DiscoveryError::UnknownVariable(ref v) if v == "zz"));
}

#[test]
fn directed_paths_ignore_undirected_edges() {
    let vars: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
    let mut g =
        PartiallyDirectedGraph::from_skeleton(&vars, &[pair("a", "b"), pair("b", "c")]).unwrap();
    let (a, b, c) = (g.require("a").unwrap(), g.require("b").unwrap(), g.require("c").unwrap());
    assert!(!has_directed_path(&g, a, c));
    g.orient(a, b).unwrap();
    assert!(!has_directed_path(&g, a, c));
    g.orient(b, c).unwrap();
    assert!(has_directed_path(&g, a, c));
    assert!(!has_directed_path(&g, c, a));
}

#[test]
fn neighbourhood_queries() {
    let vars: Vec<String> = ["a", "b", "c", "d"].iter().map(|s| s.to_string()).collect();
    let mut g = PartiallyDirectedGraph::from_skeleton(
        &vars,
        &[pair("a", "b"), pair("b", "c"), pair("b", "d")],
    )
    .unwrap();
    let (a, b, c, d) = (
        g.require("a").unwrap(),
        g.require("b").unwrap(),
        g.require("c").unwrap(),
        g.require("d").unwrap(),
    );
    g.orient(a, b).unwrap();
    g.orient(b, c).unwrap();

    assert_eq!(g.parents(b), vec![a]);
    assert_eq!(g.children(b), vec![c]);
    assert_eq!(g.undirected_neighbors(b), vec![d]);
    assert_eq!(g.adjacent_nodes(b), vec![a, c, d]);
}

#[test]
fn dot_output() {
    let vars: Vec<String> = ["x", "y", "z"].iter().map(|s| s.to_string()).collect();
    let mut g =
        PartiallyDirectedGraph::from_skeleton(&vars, &[pair("x", "y"), pair("y", "z")]).unwrap();
    let (x, y) = (g.require("x").unwrap(), g.require("y").unwrap());
    g.orient(x, y).unwrap();

    let dot = g.to_dot();
    assert!(dot.starts_with("digraph causal {"));
    assert!(dot.contains("\"x\" -> \"y\";"));
    assert!(dot.contains("\"y\" -> \"z\" [dir=none];"));
}

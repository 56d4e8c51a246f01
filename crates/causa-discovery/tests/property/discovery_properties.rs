//! Property tests for causa-discovery: orientation never closes a cycle,
//! Meek propagation reaches a fixpoint, skeleton tables are self-consistent.

use proptest::prelude::*;

use causa_core::config::DiscoveryConfig;
use causa_core::types::{CiTestKind, SkeletonStrategy};
use causa_discovery::graph::dag_enforcement;
use causa_discovery::graph::PartiallyDirectedGraph;
use causa_discovery::independence::build_test;
use causa_discovery::orientation::apply_meek_rules;
use causa_discovery::skeleton::{discover_skeleton, SkeletonOptions};
use causa_discovery::PcAlgorithm;
use test_fixtures::{random_columns, LinearGaussianSem};

fn node_names(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("v{i}")).collect()
}

/// Random undirected graph, then try to orient a random selection of its
/// edges in the given direction. Failed orientations are ignored.
fn build_random_pdag(n: usize, edges: &[(usize, usize, bool)]) -> PartiallyDirectedGraph {
    let names = node_names(n);
    let mut pairs: Vec<(String, String)> = Vec::new();
    for &(a, b, _) in edges {
        if a < n && b < n && a != b {
            pairs.push((names[a].clone(), names[b].clone()));
        }
    }
    let mut graph = PartiallyDirectedGraph::from_skeleton(&names, &pairs).unwrap();
    for &(a, b, direct) in edges {
        if direct && a < n && b < n && a != b {
            let ia = graph.require(&names[a]).unwrap();
            let ib = graph.require(&names[b]).unwrap();
            let _ = graph.orient(ia, ib);
        }
    }
    graph
}

fn edge_strategy(n: usize) -> impl Strategy<Value = Vec<(usize, usize, bool)>> {
    prop::collection::vec((0..n, 0..n, any::<bool>()), 0..n * 2)
}

/// Forward-only edges with coefficients, so the generating graph is a DAG.
fn sem_strategy(n: usize) -> impl Strategy<Value = Vec<(usize, usize, f64)>> {
    prop::collection::vec((0..n, 0..n, 0.4_f64..0.9_f64), 0..n * 2).prop_map(|edges| {
        let mut out: Vec<(usize, usize, f64)> = Vec::new();
        for (a, b, c) in edges {
            let (lo, hi) = if a < b { (a, b) } else { (b, a) };
            if lo != hi && !out.iter().any(|&(x, y, _)| x == lo && y == hi) {
                out.push((lo, hi, c));
            }
        }
        out
    })
}

proptest! {
    #[test]
    fn orientation_never_creates_cycles(edges in edge_strategy(12)) {
        let mut graph = build_random_pdag(12, &edges);
        prop_assert!(dag_enforcement::find_cycles(&graph).is_empty());

        apply_meek_rules(&mut graph);
        prop_assert!(dag_enforcement::find_cycles(&graph).is_empty());
    }

    #[test]
    fn meek_reaches_fixpoint(edges in edge_strategy(10)) {
        let mut graph = build_random_pdag(10, &edges);
        let before = graph.edge_count();
        apply_meek_rules(&mut graph);
        prop_assert_eq!(apply_meek_rules(&mut graph), 0);
        prop_assert_eq!(graph.edge_count(), before, "orientation never adds or drops adjacencies");
    }

    #[test]
    fn exhaustive_table_covers_every_subset(k in 2_usize..6, seed in any::<u64>()) {
        let names = node_names(k);
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let data = random_columns(&refs, 40, seed);
        let test = build_test(CiTestKind::PartialCorrelation, &data).unwrap();
        let result = discover_skeleton(&data, test.as_ref(), &SkeletonOptions::default()).unwrap();

        let pairs = k * (k - 1) / 2;
        prop_assert_eq!(result.table.len(), pairs << (k - 2));
        for row in result.table.rows() {
            prop_assert_eq!(row.removed, !result.has_edge(&row.node_1, &row.node_2));
            prop_assert!((0.0..=1.0).contains(&row.p_value));
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn pc_output_is_consistent(
        edges in sem_strategy(5),
        seed in any::<u64>(),
        stable in any::<bool>(),
    ) {
        let names = node_names(5);
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let mut sem = LinearGaussianSem::new(&refs);
        for &(a, b, c) in &edges {
            sem = sem.edge(&names[a], &names[b], c);
        }
        let data = sem.sample(300, seed);

        let strategy = if stable { SkeletonStrategy::PcStable } else { SkeletonStrategy::Exhaustive };
        let config = DiscoveryConfig { strategy: Some(strategy), ..Default::default() };
        let result = PcAlgorithm::new(config).run(&data).unwrap();

        prop_assert!(dag_enforcement::find_cycles(&result.graph).is_empty());
        prop_assert_eq!(result.graph.edge_count(), result.skeleton.edges.len());
        for (a, b) in result.graph.directed_edges().iter().chain(&result.graph.undirected_edges()) {
            prop_assert!(result.skeleton.has_edge(a, b));
        }
        for (a, b) in &result.skeleton.edges {
            prop_assert!(result.skeleton.sepsets.get(a, b).is_none());
        }
    }
}

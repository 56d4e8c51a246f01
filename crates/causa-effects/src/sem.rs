//! Linear structural equation model fitted over a DAG.

use std::collections::HashMap;
use std::fmt;
use std::time::Instant;

use causa_core::config::EstimationConfig;
use causa_core::errors::EstimationError;
use causa_core::Dataset;
use petgraph::algo::{tarjan_scc, toposort};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::Serialize;

use crate::effects::{self, EffectReport};
use crate::equation::Equation;
use crate::ols;

/// Every dataset column as a node; edge weights are the fitted coefficients.
#[derive(Debug, Clone)]
pub struct LinearSem {
    graph: DiGraph<String, f64>,
    node_index: HashMap<String, NodeIndex>,
    /// Topological order of the nodes.
    order: Vec<NodeIndex>,
    equations: Vec<Equation>,
    config: EstimationConfig,
}

/// Serializable view of a fitted model.
#[derive(Debug, Clone, Serialize)]
pub struct SemSummary<'a> {
    pub edges: Vec<(String, String, f64)>,
    pub equations: &'a [Equation],
}

impl LinearSem {
    /// Fit one equation per column of `data`, regressing each on its parents
    /// in `edges` (`(from, to)` pairs).
    pub fn fit(
        data: &Dataset,
        edges: &[(String, String)],
        config: &EstimationConfig,
    ) -> Result<Self, EstimationError> {
        let started = Instant::now();
        let (mut graph, node_index) = build_graph(data, edges)?;

        let order = toposort(&graph, None).map_err(|cycle| EstimationError::NotADag {
            cycle: describe_cycle(&graph, cycle.node_id()),
        })?;

        let mut equations = Vec::with_capacity(order.len());
        for &node in &order {
            let target = graph[node].clone();
            let parents = sorted_parents(&graph, node);
            let names: Vec<&str> = parents.iter().map(|&p| graph[p].as_str()).collect();

            let fit = ols::fit(data, &target, &names, config)?;
            tracing::debug!(
                target = %target,
                parents = names.len(),
                r_squared = fit.r_squared,
                "structural equation fitted"
            );

            let coefficients: Vec<(String, f64)> = names
                .iter()
                .zip(&fit.coefficients)
                .map(|(p, &b)| (p.to_string(), b))
                .collect();
            for (&p, &beta) in parents.iter().zip(&fit.coefficients) {
                if let Some(e) = graph.find_edge(p, node) {
                    graph[e] = beta;
                }
            }
            equations.push(Equation {
                target,
                intercept: fit.intercept,
                coefficients,
                residual_variance: fit.residual_variance,
                r_squared: fit.r_squared,
            });
        }

        tracing::info!(
            equations = equations.len(),
            edges = graph.edge_count(),
            fit_time_ms = started.elapsed().as_millis() as u64,
            "linear sem fitted"
        );

        Ok(Self {
            graph,
            node_index,
            order,
            equations,
            config: config.clone(),
        })
    }

    /// Equations in topological order.
    pub fn equations(&self) -> &[Equation] {
        &self.equations
    }

    pub fn equation(&self, target: &str) -> Option<&Equation> {
        self.equations.iter().find(|e| e.target == target)
    }

    /// Fitted edges as `(from, to, beta)`.
    pub fn edges(&self) -> Vec<(String, String, f64)> {
        self.graph
            .edge_indices()
            .filter_map(|e| {
                let (a, b) = self.graph.edge_endpoints(e)?;
                Some((self.graph[a].clone(), self.graph[b].clone(), self.graph[e]))
            })
            .collect()
    }

    pub fn parents(&self, node: &str) -> Result<Vec<String>, EstimationError> {
        let idx = self.require(node)?;
        Ok(sorted_parents(&self.graph, idx)
            .into_iter()
            .map(|p| self.graph[p].clone())
            .collect())
    }

    /// Coefficient on `from -> to`; 0 when there is no such edge.
    pub fn direct_effect(&self, from: &str, to: &str) -> Result<f64, EstimationError> {
        let a = self.require(from)?;
        let b = self.require(to)?;
        Ok(self
            .graph
            .find_edge(a, b)
            .map(|e| self.graph[e])
            .unwrap_or(0.0))
    }

    /// Sum over every directed path `from -> ... -> to` of the product of its
    /// coefficients. The effect of a node on itself is 1.
    pub fn total_effect(&self, from: &str, to: &str) -> Result<f64, EstimationError> {
        let a = self.require(from)?;
        let b = self.require(to)?;

        let mut effect: HashMap<NodeIndex, f64> = HashMap::new();
        effect.insert(a, 1.0);
        for &node in self.order.iter().skip_while(|&&n| n != a).skip(1) {
            let mut sum = 0.0;
            for e in self.graph.edges_directed(node, Direction::Incoming) {
                if let Some(up) = effect.get(&e.source()) {
                    sum += up * e.weight();
                }
            }
            if sum != 0.0 {
                effect.insert(node, sum);
            }
        }
        Ok(effect.get(&b).copied().unwrap_or(0.0))
    }

    /// Backdoor-adjusted estimate of `x` on `y` using this model's parents of `x`.
    pub fn adjusted_effect(&self, data: &Dataset, x: &str, y: &str) -> Result<f64, EstimationError> {
        self.require(y)?;
        let parents = self.parents(x)?;
        effects::backdoor_estimate(data, x, y, &parents, &self.config)
    }

    /// Direct, total and adjusted effects of `from` on `to`.
    pub fn report(&self, data: &Dataset, from: &str, to: &str) -> Result<EffectReport, EstimationError> {
        Ok(EffectReport {
            from: from.to_string(),
            to: to.to_string(),
            direct: self.direct_effect(from, to)?,
            total: self.total_effect(from, to)?,
            adjusted: self.adjusted_effect(data, from, to)?,
        })
    }

    pub fn summary(&self) -> SemSummary<'_> {
        SemSummary {
            edges: self.edges(),
            equations: &self.equations,
        }
    }

    fn require(&self, name: &str) -> Result<NodeIndex, EstimationError> {
        self.node_index
            .get(name)
            .copied()
            .ok_or_else(|| EstimationError::UnknownVariable(name.to_string()))
    }
}

impl fmt::Display for LinearSem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(4);
        for eq in &self.equations {
            writeln!(f, "{eq:.precision$}")?;
        }
        Ok(())
    }
}

fn build_graph(
    data: &Dataset,
    edges: &[(String, String)],
) -> Result<(DiGraph<String, f64>, HashMap<String, NodeIndex>), EstimationError> {
    let mut graph = DiGraph::new();
    let mut node_index = HashMap::new();
    for name in data.columns() {
        let idx = graph.add_node(name.clone());
        node_index.insert(name.clone(), idx);
    }
    for (from, to) in edges {
        let lookup = |n: &String| {
            node_index
                .get(n)
                .copied()
                .ok_or_else(|| EstimationError::UnknownVariable(n.clone()))
        };
        let a = lookup(from)?;
        let b = lookup(to)?;
        if a == b {
            return Err(EstimationError::NotADag {
                cycle: format!("{from} -> {from}"),
            });
        }
        if graph.find_edge(a, b).is_none() {
            graph.add_edge(a, b, 0.0);
        }
    }
    Ok((graph, node_index))
}

/// Parents in dataset column order.
fn sorted_parents(graph: &DiGraph<String, f64>, node: NodeIndex) -> Vec<NodeIndex> {
    let mut parents: Vec<NodeIndex> = graph.neighbors_directed(node, Direction::Incoming).collect();
    parents.sort();
    parents.dedup();
    parents
}

/// Names of the strongly connected component containing `node`.
fn describe_cycle(graph: &DiGraph<String, f64>, node: NodeIndex) -> String {
    let component = tarjan_scc(graph)
        .into_iter()
        .find(|scc| scc.contains(&node))
        .unwrap_or_else(|| vec![node]);
    let mut names: Vec<&str> = component.iter().map(|&n| graph[n].as_str()).collect();
    names.sort_unstable();
    names.join(", ")
}

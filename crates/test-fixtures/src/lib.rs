//! Synthetic datasets for Causa tests and benchmarks.
//!
//! Data is drawn from a linear-Gaussian structural equation model. The
//! exogenous noise columns are centred and Gram-Schmidt orthogonalised before
//! the structural equations are applied, so the sample covariance of the
//! noise is exactly diagonal. Every d-separation in the generating graph then
//! holds exactly in the sample (the corresponding partial correlation is zero
//! up to rounding), which keeps CI-test outcomes deterministic.
//!
//! Helpers panic on misuse; they are only meant for tests.

use causa_core::Dataset;
use rand::rngs::StdRng;
use rand::SeedableRng;
use statrs::distribution::Normal;

/// A linear-Gaussian SEM: `x_j = sum_i beta_ij * x_i + sigma_j * e_j`.
#[derive(Debug, Clone)]
pub struct LinearGaussianSem {
    nodes: Vec<String>,
    /// (from, to, coefficient)
    edges: Vec<(usize, usize, f64)>,
    noise_std: Vec<f64>,
}

impl LinearGaussianSem {
    pub fn new(nodes: &[&str]) -> Self {
        Self {
            nodes: nodes.iter().map(|s| s.to_string()).collect(),
            edges: Vec::new(),
            noise_std: vec![1.0; nodes.len()],
        }
    }

    /// Add `from -> to` with the given coefficient.
    pub fn edge(mut self, from: &str, to: &str, coefficient: f64) -> Self {
        let f = self.index(from);
        let t = self.index(to);
        self.edges.push((f, t, coefficient));
        self
    }

    /// Override the noise standard deviation of one node.
    pub fn noise(mut self, node: &str, std_dev: f64) -> Self {
        let i = self.index(node);
        self.noise_std[i] = std_dev;
        self
    }

    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    /// Generating edges as `(from, to, coefficient)` by name.
    pub fn edges(&self) -> Vec<(String, String, f64)> {
        self.edges
            .iter()
            .map(|&(f, t, c)| (self.nodes[f].clone(), self.nodes[t].clone(), c))
            .collect()
    }

    /// Draw `n` rows with a fixed seed.
    pub fn sample(&self, n: usize, seed: u64) -> Dataset {
        let k = self.nodes.len();
        assert!(n > k + 2, "need more rows than variables to orthogonalise noise");

        let noise = orthogonal_noise(n, k, seed);
        let order = self.topological_order();

        let mut columns: Vec<Vec<f64>> = vec![Vec::new(); k];
        for &j in &order {
            let mut column: Vec<f64> = noise[j].iter().map(|e| e * self.noise_std[j]).collect();
            for &(f, t, c) in &self.edges {
                if t == j {
                    for (value, parent) in column.iter_mut().zip(&columns[f]) {
                        *value += c * parent;
                    }
                }
            }
            columns[j] = column;
        }

        Dataset::from_columns(self.nodes.clone(), columns).expect("generated dataset is valid")
    }

    fn index(&self, name: &str) -> usize {
        self.nodes
            .iter()
            .position(|n| n == name)
            .unwrap_or_else(|| panic!("unknown node {name}"))
    }

    fn topological_order(&self) -> Vec<usize> {
        let k = self.nodes.len();
        let mut indegree = vec![0usize; k];
        for &(_, t, _) in &self.edges {
            indegree[t] += 1;
        }
        let mut ready: Vec<usize> = (0..k).filter(|&i| indegree[i] == 0).rev().collect();
        let mut order = Vec::with_capacity(k);
        while let Some(i) = ready.pop() {
            order.push(i);
            for &(f, t, _) in &self.edges {
                if f == i {
                    indegree[t] -= 1;
                    if indegree[t] == 0 {
                        ready.push(t);
                    }
                }
            }
        }
        assert_eq!(order.len(), k, "generating graph has a cycle");
        order
    }
}

/// `k` standard-normal columns of length `n`, centred, mutually orthogonal and
/// scaled to unit sample variance.
fn orthogonal_noise(n: usize, k: usize, seed: u64) -> Vec<Vec<f64>> {
    use rand::distributions::Distribution;

    let mut rng = StdRng::seed_from_u64(seed);
    let normal = Normal::new(0.0, 1.0).expect("standard normal");

    let mut basis: Vec<Vec<f64>> = Vec::with_capacity(k);
    for _ in 0..k {
        let mut v: Vec<f64> = (0..n).map(|_| normal.sample(&mut rng)).collect();
        center(&mut v);
        for u in &basis {
            let proj = dot(&v, u) / dot(u, u);
            for (vi, ui) in v.iter_mut().zip(u) {
                *vi -= proj * ui;
            }
        }
        basis.push(v);
    }

    for v in &mut basis {
        let var = dot(v, v) / (n as f64 - 1.0);
        let scale = 1.0 / var.sqrt();
        for x in v.iter_mut() {
            *x *= scale;
        }
    }
    basis
}

fn center(v: &mut [f64]) {
    let mean = v.iter().sum::<f64>() / v.len() as f64;
    for x in v.iter_mut() {
        *x -= mean;
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Independent standard-normal columns with no orthogonalisation. Useful for
/// benchmarks where exact independence is irrelevant.
pub fn random_columns(names: &[&str], n: usize, seed: u64) -> Dataset {
    use rand::distributions::Distribution;

    let mut rng = StdRng::seed_from_u64(seed);
    let normal = Normal::new(0.0, 1.0).expect("standard normal");
    let columns = names
        .iter()
        .map(|_| (0..n).map(|_| normal.sample(&mut rng)).collect())
        .collect();
    Dataset::from_columns(names.iter().map(|s| s.to_string()).collect(), columns)
        .expect("generated dataset is valid")
}

/// `x -> y -> z`
pub fn chain() -> LinearGaussianSem {
    LinearGaussianSem::new(&["x", "y", "z"])
        .edge("x", "y", 0.8)
        .edge("y", "z", 0.7)
}

/// `z -> x`, `z -> y`: `z` confounds `x` and `y`.
pub fn fork() -> LinearGaussianSem {
    LinearGaussianSem::new(&["x", "y", "z"])
        .edge("z", "x", 0.9)
        .edge("z", "y", 0.8)
}

/// `x -> z <- y`: `z` is a collider.
pub fn collider() -> LinearGaussianSem {
    LinearGaussianSem::new(&["x", "y", "z"])
        .edge("x", "z", 0.8)
        .edge("y", "z", 0.7)
}

/// `x -> m -> y` plus a direct `x -> y`: `m` mediates part of the effect.
pub fn mediator() -> LinearGaussianSem {
    LinearGaussianSem::new(&["x", "m", "y"])
        .edge("x", "m", 0.6)
        .edge("m", "y", 0.5)
        .edge("x", "y", 0.4)
}

/// `a -> b`, `a -> c`, `b -> d`, `c -> d`.
pub fn diamond() -> LinearGaussianSem {
    LinearGaussianSem::new(&["a", "b", "c", "d"])
        .edge("a", "b", 0.8)
        .edge("a", "c", 0.7)
        .edge("b", "d", 0.6)
        .edge("c", "d", 0.9)
}

/// Two parents feeding a collider that has a child:
/// `a -> c <- b`, `c -> d`. Exercises v-structure plus Meek rule 1.
pub fn collider_with_child() -> LinearGaussianSem {
    LinearGaussianSem::new(&["a", "b", "c", "d"])
        .edge("a", "c", 0.8)
        .edge("b", "c", 0.7)
        .edge("c", "d", 0.9)
}

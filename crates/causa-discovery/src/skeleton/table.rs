//! The skeleton table: one row per CI test, as reported to the user and
//! consumed by the collider rule.

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkeletonRow {
    pub node_1: String,
    pub node_2: String,
    /// `"node_1 - node_2"`.
    pub edge: String,
    pub conditioning_set: Vec<String>,
    /// Partial correlation of the pair given the conditioning set.
    pub statistic: f64,
    pub p_value: f64,
    /// Whether the pair is absent from the final skeleton.
    pub removed: bool,
}

impl SkeletonRow {
    pub fn new(
        node_1: &str,
        node_2: &str,
        conditioning_set: Vec<String>,
        statistic: f64,
        p_value: f64,
    ) -> Self {
        Self {
            node_1: node_1.to_string(),
            node_2: node_2.to_string(),
            edge: format!("{node_1} - {node_2}"),
            conditioning_set,
            statistic,
            p_value,
            removed: false,
        }
    }

    pub fn is_pair(&self, a: &str, b: &str) -> bool {
        (self.node_1 == a && self.node_2 == b) || (self.node_1 == b && self.node_2 == a)
    }

    pub fn conditions_on(&self, name: &str) -> bool {
        self.conditioning_set.iter().any(|s| s == name)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct SkeletonTable {
    rows: Vec<SkeletonRow>,
}

impl SkeletonTable {
    pub fn new(rows: Vec<SkeletonRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[SkeletonRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows testing `a` and `b`, in either order.
    pub fn rows_for_pair<'a>(
        &'a self,
        a: &'a str,
        b: &'a str,
    ) -> impl Iterator<Item = &'a SkeletonRow> + 'a {
        self.rows.iter().filter(move |r| r.is_pair(a, b))
    }

    /// Set `removed` on every row whose pair is not among `edges`.
    pub fn mark_removed(&mut self, edges: &[(String, String)]) {
        for row in &mut self.rows {
            row.removed = !edges.iter().any(|(a, b)| row.is_pair(a, b));
        }
    }

    /// Distinct pairs with at least one test at `p < alpha`, first-seen order.
    pub fn dependent_edges(&self, alpha: f64) -> Vec<(String, String)> {
        let mut out: Vec<(String, String)> = Vec::new();
        for row in self.rows.iter().filter(|r| r.p_value < alpha) {
            if !out.iter().any(|(a, b)| row.is_pair(a, b)) {
                out.push((row.node_1.clone(), row.node_2.clone()));
            }
        }
        out
    }
}

impl fmt::Display for SkeletonTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(4);
        let sets: Vec<String> = self
            .rows
            .iter()
            .map(|r| format!("{{{}}}", r.conditioning_set.join(", ")))
            .collect();
        let edge_w = self.rows.iter().map(|r| r.edge.len()).max().unwrap_or(0).max(4);
        let set_w = sets.iter().map(String::len).max().unwrap_or(0).max(1);

        writeln!(
            f,
            "{:<edge_w$}  {:<set_w$}  {:>10}  {:>10}  removed",
            "edge", "s", "r", "p-val"
        )?;
        for (row, set) in self.rows.iter().zip(&sets) {
            writeln!(
                f,
                "{:<edge_w$}  {:<set_w$}  {:>10.precision$}  {:>10.precision$}  {}",
                row.edge, set, row.statistic, row.p_value, row.removed
            )?;
        }
        Ok(())
    }
}

//! Small dense row-major matrices.
//!
//! Sizes here are bounded by the number of variables in a conditioning set
//! or the number of parents of a node, so Gauss-Jordan elimination with
//! partial pivoting is adequate.

use std::ops::{Index, IndexMut};

use causa_core::constants::SINGULAR_EPSILON;
use causa_core::errors::StatsError;

#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m[(i, i)] = 1.0;
        }
        m
    }

    /// Build from row vectors. All rows must have the same length.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, StatsError> {
        let cols = rows.first().map(Vec::len).unwrap_or(0);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            if row.len() != cols {
                return Err(StatsError::DimensionMismatch {
                    expected: cols,
                    actual: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    pub fn row(&self, r: usize) -> &[f64] {
        &self.data[r * self.cols..(r + 1) * self.cols]
    }

    pub fn transpose(&self) -> Self {
        let mut t = Self::zeros(self.cols, self.rows);
        for r in 0..self.rows {
            for c in 0..self.cols {
                t[(c, r)] = self[(r, c)];
            }
        }
        t
    }

    pub fn mul(&self, other: &Matrix) -> Result<Matrix, StatsError> {
        if self.cols != other.rows {
            return Err(StatsError::DimensionMismatch {
                expected: self.cols,
                actual: other.rows,
            });
        }
        let mut out = Self::zeros(self.rows, other.cols);
        for r in 0..self.rows {
            for k in 0..self.cols {
                let a = self[(r, k)];
                if a == 0.0 {
                    continue;
                }
                for c in 0..other.cols {
                    out[(r, c)] += a * other[(k, c)];
                }
            }
        }
        Ok(out)
    }

    /// Principal submatrix over `indices` (rows and columns in that order).
    pub fn principal_submatrix(&self, indices: &[usize]) -> Matrix {
        let n = indices.len();
        let mut out = Self::zeros(n, n);
        for (i, &ri) in indices.iter().enumerate() {
            for (j, &cj) in indices.iter().enumerate() {
                out[(i, j)] = self[(ri, cj)];
            }
        }
        out
    }

    /// Inverse by Gauss-Jordan elimination with partial pivoting.
    pub fn invert(&self) -> Result<Matrix, StatsError> {
        if !self.is_square() {
            return Err(StatsError::DimensionMismatch {
                expected: self.rows,
                actual: self.cols,
            });
        }
        let n = self.rows;
        let mut a = self.clone();
        let mut inv = Self::identity(n);
        let tolerance = self.tolerance();

        for col in 0..n {
            let pivot_row = a.pivot_row(col);
            let pivot = a[(pivot_row, col)];
            if pivot.abs() < tolerance {
                return Err(StatsError::Singular { column: col, pivot });
            }
            a.swap_rows(col, pivot_row);
            inv.swap_rows(col, pivot_row);

            let scale = 1.0 / a[(col, col)];
            for c in 0..n {
                a[(col, c)] *= scale;
                inv[(col, c)] *= scale;
            }

            for r in 0..n {
                if r == col {
                    continue;
                }
                let factor = a[(r, col)];
                if factor == 0.0 {
                    continue;
                }
                for c in 0..n {
                    a[(r, c)] -= factor * a[(col, c)];
                    inv[(r, c)] -= factor * inv[(col, c)];
                }
            }
        }
        Ok(inv)
    }

    /// Solve `self * x = b` for square `self`.
    pub fn solve(&self, b: &[f64]) -> Result<Vec<f64>, StatsError> {
        if !self.is_square() {
            return Err(StatsError::DimensionMismatch {
                expected: self.rows,
                actual: self.cols,
            });
        }
        if b.len() != self.rows {
            return Err(StatsError::DimensionMismatch {
                expected: self.rows,
                actual: b.len(),
            });
        }
        let n = self.rows;
        let mut a = self.clone();
        let mut x = b.to_vec();
        let tolerance = self.tolerance();

        for col in 0..n {
            let pivot_row = a.pivot_row(col);
            let pivot = a[(pivot_row, col)];
            if pivot.abs() < tolerance {
                return Err(StatsError::Singular { column: col, pivot });
            }
            a.swap_rows(col, pivot_row);
            x.swap(col, pivot_row);

            for r in (col + 1)..n {
                let factor = a[(r, col)] / a[(col, col)];
                if factor == 0.0 {
                    continue;
                }
                for c in col..n {
                    a[(r, c)] -= factor * a[(col, c)];
                }
                x[r] -= factor * x[col];
            }
        }

        for r in (0..n).rev() {
            let tail: f64 = ((r + 1)..n).map(|c| a[(r, c)] * x[c]).sum();
            x[r] = (x[r] - tail) / a[(r, r)];
        }
        Ok(x)
    }

    /// Ordinary least squares: `argmin_beta |self * beta - y|^2` via the
    /// normal equations.
    pub fn least_squares(&self, y: &[f64]) -> Result<Vec<f64>, StatsError> {
        if y.len() != self.rows {
            return Err(StatsError::DimensionMismatch {
                expected: self.rows,
                actual: y.len(),
            });
        }
        if self.rows < self.cols {
            return Err(StatsError::NotEnoughObservations {
                n: self.rows,
                required: self.cols,
            });
        }
        let xt = self.transpose();
        let xtx = xt.mul(self)?;
        let xty: Vec<f64> = (0..self.cols)
            .map(|c| xt.row(c).iter().zip(y).map(|(a, b)| a * b).sum())
            .collect();
        xtx.solve(&xty)
    }

    fn pivot_row(&self, col: usize) -> usize {
        (col..self.rows)
            .max_by(|&a, &b| {
                self[(a, col)]
                    .abs()
                    .partial_cmp(&self[(b, col)].abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .unwrap_or(col)
    }

    fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        for c in 0..self.cols {
            self.data.swap(a * self.cols + c, b * self.cols + c);
        }
    }

    /// Pivot threshold scaled to the largest entry.
    fn tolerance(&self) -> f64 {
        let max = self.data.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
        SINGULAR_EPSILON * max.max(1.0)
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (r, c): (usize, usize)) -> &f64 {
        &self.data[r * self.cols + c]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (r, c): (usize, usize)) -> &mut f64 {
        &mut self.data[r * self.cols + c]
    }
}

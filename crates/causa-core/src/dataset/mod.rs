//! Column-major numeric datasets.
//!
//! Every variable is one column; every observation is one row. Columns are
//! addressed by name throughout the engine, so names must be unique.

mod csv;
mod json;

use std::collections::HashSet;
use std::path::Path;

use serde::Serialize;

use crate::errors::DataError;

/// A validated numeric table.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    data: Vec<Vec<f64>>,
}

/// Per-column descriptive statistics.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetSummary {
    pub n_rows: usize,
    pub n_columns: usize,
    pub columns: Vec<String>,
    pub means: Vec<f64>,
    pub std_devs: Vec<f64>,
}

impl Dataset {
    /// Build a dataset from named columns.
    ///
    /// Rejects empty or duplicate names, columns of unequal length, zero rows
    /// and non-finite values.
    pub fn from_columns(names: Vec<String>, columns: Vec<Vec<f64>>) -> Result<Self, DataError> {
        if names.len() != columns.len() {
            return Err(DataError::RaggedColumns {
                column: "<header>".to_string(),
                expected: names.len(),
                actual: columns.len(),
            });
        }

        let mut seen = HashSet::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(DataError::EmptyColumnName(i));
            }
            if !seen.insert(name.as_str()) {
                return Err(DataError::DuplicateColumn(name.clone()));
            }
        }

        let n_rows = columns.first().map(Vec::len).unwrap_or(0);
        if n_rows == 0 {
            return Err(DataError::Empty);
        }
        for (name, column) in names.iter().zip(&columns) {
            if column.len() != n_rows {
                return Err(DataError::RaggedColumns {
                    column: name.clone(),
                    expected: n_rows,
                    actual: column.len(),
                });
            }
            if let Some(row) = column.iter().position(|v| !v.is_finite()) {
                return Err(DataError::NonFinite {
                    column: name.clone(),
                    row,
                });
            }
        }

        Ok(Self {
            columns: names,
            data: columns,
        })
    }

    /// Parse delimited text with a header line.
    pub fn from_csv_str(text: &str, delimiter: char) -> Result<Self, DataError> {
        let (names, columns) = csv::parse(text, delimiter)?;
        Self::from_columns(names, columns)
    }

    /// Read and parse a delimited file.
    pub fn from_csv_path(path: &Path, delimiter: char) -> Result<Self, DataError> {
        let text = read(path)?;
        Self::from_csv_str(&text, delimiter)
    }

    /// Parse a JSON object mapping column names to arrays of numbers.
    pub fn from_json_str(text: &str) -> Result<Self, DataError> {
        let (names, columns) = json::parse(text)?;
        Self::from_columns(names, columns)
    }

    /// Load a file, choosing JSON for a `.json` extension and delimited text otherwise.
    pub fn from_path(path: &Path, delimiter: char) -> Result<Self, DataError> {
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&read(path)?)
        } else {
            Self::from_csv_path(path, delimiter)
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn n_rows(&self) -> usize {
        self.data.first().map(Vec::len).unwrap_or(0)
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    /// Values of the named column.
    pub fn column(&self, name: &str) -> Result<&[f64], DataError> {
        self.index_of(name)
            .map(|i| self.data[i].as_slice())
            .ok_or_else(|| DataError::UnknownColumn(name.to_string()))
    }

    /// Values of the column at `index`.
    pub fn column_at(&self, index: usize) -> Option<&[f64]> {
        self.data.get(index).map(Vec::as_slice)
    }

    /// A new dataset restricted to `names`, in the given order.
    pub fn select(&self, names: &[&str]) -> Result<Self, DataError> {
        let mut columns = Vec::with_capacity(names.len());
        for name in names {
            columns.push(self.column(name)?.to_vec());
        }
        Self::from_columns(names.iter().map(|s| s.to_string()).collect(), columns)
    }

    pub fn summary(&self) -> DatasetSummary {
        let n = self.n_rows() as f64;
        let means: Vec<f64> = self.data.iter().map(|c| c.iter().sum::<f64>() / n).collect();
        let std_devs = self
            .data
            .iter()
            .zip(&means)
            .map(|(c, m)| {
                if c.len() < 2 {
                    return 0.0;
                }
                let ss: f64 = c.iter().map(|v| (v - m).powi(2)).sum();
                (ss / (n - 1.0)).sqrt()
            })
            .collect();

        DatasetSummary {
            n_rows: self.n_rows(),
            n_columns: self.n_columns(),
            columns: self.columns.clone(),
            means,
            std_devs,
        }
    }
}

fn read(path: &Path) -> Result<String, DataError> {
    std::fs::read_to_string(path).map_err(|e| DataError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

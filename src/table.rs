// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory tabular data consumed by the metrics, and the metric tables they produce.

use std::fmt;
use std::hash::Hash;

use ndarray::{Array1, Array2, ArrayView1, Axis};

use crate::error::{PifError, Result};

/// Bound for cell values: anything discrete that can be compared and hashed.
#[cfg(not(feature = "parallel"))]
pub trait FeatureValue: Eq + Hash + Clone + fmt::Debug {}
#[cfg(not(feature = "parallel"))]
impl<T: Eq + Hash + Clone + fmt::Debug> FeatureValue for T {}

/// Bound for cell values: anything discrete that can be compared, hashed and shared across threads.
#[cfg(feature = "parallel")]
pub trait FeatureValue: Eq + Hash + Clone + fmt::Debug + Send + Sync {}
#[cfg(feature = "parallel")]
impl<T: Eq + Hash + Clone + fmt::Debug + Send + Sync> FeatureValue for T {}

/// A discrete cell value. Lets one table hold integer, string and boolean columns side by side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    Int(i64),
    Str(String),
    Bool(bool),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(x) => write!(f, "{x}"),
            Value::Str(s) => write!(f, "{s}"),
            Value::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<i64> for Value {
    fn from(x: i64) -> Self {
        Value::Int(x)
    }
}

impl From<i32> for Value {
    fn from(x: i32) -> Self {
        Value::Int(i64::from(x))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

/// Rectangular table of discrete values with named, ordered columns.
///
/// Rows are observations, columns are features. Feature `i` is the `i`-th column.
#[derive(Debug, Clone, PartialEq)]
pub struct Table<V> {
    columns: Vec<String>,
    data: Array2<V>,
}

impl<V: FeatureValue> Table<V> {
    /// Build a table from column names and row-major values.
    pub fn new<S: Into<String>>(columns: Vec<S>, rows: Vec<Vec<V>>) -> Result<Self> {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        let width = columns.len();
        let n_rows = rows.len();
        let mut flat = Vec::with_capacity(n_rows * width);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != width {
                return Err(PifError::RaggedRow {
                    row,
                    expected: width,
                    found: values.len(),
                });
            }
            flat.extend(values);
        }
        let data =
            Array2::from_shape_vec((n_rows, width), flat).map_err(|e| PifError::Shape(e.to_string()))?;
        Ok(Self { columns, data })
    }

    /// Build a table from named columns; every column must be as long as the first.
    pub fn from_columns<S: Into<String>>(columns: Vec<(S, Vec<V>)>) -> Result<Self> {
        let n_rows = columns.first().map_or(0, |(_, c)| c.len());
        let mut headers = Vec::with_capacity(columns.len());
        let mut iters = Vec::with_capacity(columns.len());
        for (name, values) in columns {
            let name: String = name.into();
            if values.len() != n_rows {
                return Err(PifError::ColumnLengthMismatch {
                    column: name,
                    expected: n_rows,
                    found: values.len(),
                });
            }
            headers.push(name);
            iters.push(values.into_iter());
        }
        let rows = (0..n_rows)
            .map(|_| iters.iter_mut().filter_map(Iterator::next).collect())
            .collect();
        Self::new(headers, rows)
    }

    /// Wrap an existing 2D array; `columns` must name every column of `data`.
    pub fn from_array<S: Into<String>>(columns: Vec<S>, data: Array2<V>) -> Result<Self> {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        if columns.len() != data.ncols() {
            return Err(PifError::ColumnCountMismatch {
                names: columns.len(),
                width: data.ncols(),
            });
        }
        Ok(Self { columns, data })
    }

    pub fn n_rows(&self) -> usize {
        self.data.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.data.ncols()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Position of the column called `name`.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| PifError::UnknownColumn(name.to_owned()))
    }

    /// All values of feature `i`, in row order.
    pub fn column(&self, i: usize) -> Result<ArrayView1<'_, V>> {
        if i >= self.n_features() {
            return Err(PifError::MissingFeature(i));
        }
        Ok(self.data.column(i))
    }

    pub fn row(&self, r: usize) -> ArrayView1<'_, V> {
        self.data.row(r)
    }

    /// Iterate rows as ordered value tuples.
    pub fn rows(&self) -> impl Iterator<Item = ArrayView1<'_, V>> + '_ {
        self.data.axis_iter(Axis(0))
    }

    pub fn data(&self) -> &Array2<V> {
        &self.data
    }

    pub(crate) fn ensure_not_empty(&self) -> Result<()> {
        if self.n_rows() == 0 || self.n_features() == 0 {
            return Err(PifError::EmptyTable);
        }
        Ok(())
    }
}

/// Real-valued output shaped like the input table: one metric per cell.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetricTable {
    columns: Vec<String>,
    values: Array2<f64>,
}

impl MetricTable {
    pub fn new(columns: Vec<String>, values: Array2<f64>) -> Result<Self> {
        if columns.len() != values.ncols() {
            return Err(PifError::ColumnCountMismatch {
                names: columns.len(),
                width: values.ncols(),
            });
        }
        Ok(Self { columns, values })
    }

    /// Assemble a table from per-feature columns, each holding one value per row.
    pub(crate) fn from_feature_columns(columns: Vec<String>, per_feature: Vec<Vec<f64>>) -> Self {
        let n_rows = per_feature.first().map_or(0, Vec::len);
        let values = Array2::from_shape_fn((n_rows, per_feature.len()), |(r, c)| per_feature[c][r]);
        Self { columns, values }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    pub fn n_rows(&self) -> usize {
        self.values.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.values.ncols()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.values.get((row, col)).copied()
    }

    pub fn column(&self, name: &str) -> Result<ArrayView1<'_, f64>> {
        let i = self
            .columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| PifError::UnknownColumn(name.to_owned()))?;
        Ok(self.values.column(i))
    }

    pub fn column_at(&self, i: usize) -> Result<ArrayView1<'_, f64>> {
        if i >= self.n_features() {
            return Err(PifError::MissingFeature(i));
        }
        Ok(self.values.column(i))
    }

    /// Sum of each row, skipping NaN cells.
    pub fn row_sums(&self) -> Array1<f64> {
        self.values
            .axis_iter(Axis(0))
            .map(|row| row.iter().filter(|v| !v.is_nan()).sum())
            .collect()
    }

    /// Multiply column `i` by `weights[i]`.
    pub fn scale_columns(&self, weights: &[f64]) -> Result<Self> {
        if weights.len() != self.n_features() {
            return Err(PifError::ColumnCountMismatch {
                names: weights.len(),
                width: self.n_features(),
            });
        }
        let w = Array1::from(weights.to_vec());
        Ok(Self {
            columns: self.columns.clone(),
            values: &self.values * &w,
        })
    }

    /// Round every cell to `digits` decimals, ties to even.
    pub fn round(&self, digits: i32) -> Self {
        Self {
            columns: self.columns.clone(),
            values: self.values.mapv(|v| round_to(v, digits)),
        }
    }
}

pub(crate) fn round_to(v: f64, digits: i32) -> f64 {
    let scale = 10f64.powi(digits);
    (v * scale).round_ties_even() / scale
}

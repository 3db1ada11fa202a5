// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::Array1;

use crate::error::Result;
use crate::table::MetricTable;

pub trait CellValues {
    /// Compute one metric value per cell of the input table.
    fn cell_values(&self) -> Result<MetricTable>;

    /// Derive per-row values as the sum of each row's cell values.
    fn row_values(&self) -> Result<Array1<f64>> {
        Ok(self.cell_values()?.row_sums())
    }
}

pub trait GlobalValue {
    /// Compute and return the dataset-level value of the measure.
    fn global_value(&self) -> Result<f64>;
}

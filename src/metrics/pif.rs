// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::Array1;

use crate::error::{PifError, Result};
use crate::metrics::traits::GlobalValue;
use crate::table::MetricTable;

/// Row information gain (RIG): the sum of each row's CIG values.
///
/// NaN cells, left by features a sampled CIG run never visited, are skipped.
pub fn row_information_gains(cig_table: &MetricTable) -> Array1<f64> {
    cig_table.row_sums()
}

/// Personal information factor (PIF): a percentile of the RIG across all rows.
pub struct PersonalInformationFactor<'a> {
    cig_table: &'a MetricTable,
    percentile: f64,
}

impl<'a> PersonalInformationFactor<'a> {
    pub fn new(cig_table: &'a MetricTable, percentile: f64) -> Self {
        Self {
            cig_table,
            percentile,
        }
    }
}

impl GlobalValue for PersonalInformationFactor<'_> {
    fn global_value(&self) -> Result<f64> {
        if !(0.0..=100.0).contains(&self.percentile) {
            return Err(PifError::PercentileOutOfRange(self.percentile));
        }
        let rig = row_information_gains(self.cig_table);
        percentile_linear(rig, self.percentile)
    }
}

/// Percentile with linear interpolation between the two closest ranks.
///
/// For `n` sorted values the rank is `p / 100 * (n - 1)`; 0 gives the minimum, 100 the maximum.
pub fn percentile_linear(values: Array1<f64>, percentile: f64) -> Result<f64> {
    if !(0.0..=100.0).contains(&percentile) {
        return Err(PifError::PercentileOutOfRange(percentile));
    }
    let mut sorted = values.to_vec();
    if sorted.is_empty() {
        return Err(PifError::EmptyTable);
    }
    sorted.sort_by(f64::total_cmp);
    let rank = percentile / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    Ok(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

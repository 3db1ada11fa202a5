// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use log::debug;

use crate::error::{PifError, Result};
use crate::metrics::engine::{
    FeatureAccuracies, FeaturePriors, abs_prob_change, bucket_by_complement, estimate,
};
use crate::metrics::options::MetricOptions;
use crate::metrics::traits::CellValues;
use crate::table::{FeatureValue, MetricTable, Table};

/// Cell surprise factor (CSF).
///
/// For feature `i` of a row, how far the probability of the row's own value moves between the
/// prior and the accuracy-blended posterior given the other features:
/// $|P_{post}(x) - P_{prior}(x)|$. Every feature is visited exactly once; `samples` in the
/// options is ignored.
pub struct CellSurpriseFactor<'a, V: FeatureValue> {
    table: &'a Table<V>,
    options: MetricOptions<V>,
}

impl<'a, V: FeatureValue> CellSurpriseFactor<'a, V> {
    pub fn new(table: &'a Table<V>, options: MetricOptions<V>) -> Self {
        Self { table, options }
    }
}

impl<V: FeatureValue> CellValues for CellSurpriseFactor<'_, V> {
    fn cell_values(&self) -> Result<MetricTable> {
        let table = self.table;
        table.ensure_not_empty()?;
        let n_features = table.n_features();
        debug!("computing CSF over {} rows x {n_features} features", table.n_rows());

        let priors = FeaturePriors::complete(table, &self.options.priors)?;
        let accuracies = FeatureAccuracies::resolve(&self.options.accuracies, n_features)?;
        let feature_csfs = (0..n_features)
            .map(|i| prob_changes_for_feature(table, i, &priors, &accuracies))
            .collect::<Result<Vec<Vec<f64>>>>()?;

        Ok(MetricTable::from_feature_columns(
            table.columns().to_vec(),
            feature_csfs,
        ))
    }
}

/// Per row, the absolute probability change of that row's value of `feature`.
pub fn prob_changes_for_feature<V: FeatureValue>(
    table: &Table<V>,
    feature: usize,
    priors: &FeaturePriors<V>,
    accuracies: &FeatureAccuracies,
) -> Result<Vec<f64>> {
    let prior = priors.get(feature)?;
    let accuracy = accuracies.get(feature)?;
    let buckets = bucket_by_complement(table, &[feature])?;
    let bucket_changes = buckets
        .iter(0)
        .map(|(_, values)| {
            let posterior = estimate(values, accuracy, Some(prior))?;
            abs_prob_change(&posterior, prior)
        })
        .collect::<Result<Vec<_>>>()?;

    let column = table.column(feature)?;
    buckets
        .bucket_map()
        .iter()
        .zip(column.iter())
        .map(|(&b, value)| {
            bucket_changes[b]
                .get(value)
                .copied()
                .ok_or_else(|| PifError::DomainMismatch {
                    value: format!("{value:?}"),
                })
        })
        .collect()
}

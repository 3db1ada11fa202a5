// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One-call entry points for the cell metrics and the PIF.
//!
//! Each call builds its own configuration from the arguments it is given; empty tables for
//! `feature_priors` / `feature_accuracies` mean "global distribution" and "fully trusted".

use rand::Rng;

use crate::error::Result;
use crate::metrics::engine::{AccuracyTable, PriorTable};
use crate::metrics::{
    CellInformationGain, CellSurpriseFactor, CellValues, GlobalValue, MetricOptions, PersonalInformationFactor,
    WeightedCellInformationGain,
};
use crate::table::{FeatureValue, MetricTable, Table};

fn options<V: FeatureValue>(feature_priors: &PriorTable<V>, feature_accuracies: &AccuracyTable) -> MetricOptions<V> {
    MetricOptions::new()
        .with_priors(feature_priors.clone())
        .with_accuracies(feature_accuracies.clone())
}

/// Cell information gain of every cell of `table`.
///
/// `samples` limits how many single-feature slots are visited, drawn from `rng`;
/// `None` visits every feature once and never touches `rng`.
pub fn compute_cigs<V, R>(
    table: &Table<V>,
    feature_priors: &PriorTable<V>,
    feature_accuracies: &AccuracyTable,
    samples: Option<usize>,
    rng: &mut R,
) -> Result<MetricTable>
where
    V: FeatureValue,
    R: Rng + ?Sized,
{
    let options = options(feature_priors, feature_accuracies).with_samples(samples);
    CellInformationGain::new(table, options).cell_values_with_rng(rng)
}

/// Cell information gain weighted by each feature's relative conditional entropy.
pub fn compute_weighted_cigs<V: FeatureValue>(
    table: &Table<V>,
    feature_priors: &PriorTable<V>,
    feature_accuracies: &AccuracyTable,
) -> Result<MetricTable> {
    WeightedCellInformationGain::new(table, options(feature_priors, feature_accuracies)).cell_values()
}

/// Cell surprise factor of every cell of `table`.
pub fn compute_csfs<V: FeatureValue>(
    table: &Table<V>,
    feature_priors: &PriorTable<V>,
    feature_accuracies: &AccuracyTable,
) -> Result<MetricTable> {
    CellSurpriseFactor::new(table, options(feature_priors, feature_accuracies)).cell_values()
}

/// The `percentile` (0 to 100) of the row information gains of `cig_table`.
pub fn compute_pif(cig_table: &MetricTable, percentile: f64) -> Result<f64> {
    PersonalInformationFactor::new(cig_table, percentile).global_value()
}

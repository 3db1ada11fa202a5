// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use log::{debug, trace};
use rand::Rng;

use crate::error::Result;
use crate::metrics::engine::entropy::conditional_entropy_table;
use crate::metrics::engine::{
    FeatureAccuracies, FeaturePriors, bucket_by_complement, estimate, kl_divergence, sample_subsets_with,
};
use crate::metrics::options::MetricOptions;
use crate::metrics::traits::CellValues;
use crate::table::{FeatureValue, MetricTable, Table};

/// Size of the unknown-feature set in a CIG pass.
const UNKNOWN_FEATURES: usize = 1;

/// Decimal digits kept by the weighted CIG and by the entropy table it is weighted with.
const WEIGHTED_ROUND_DIGITS: i32 = 2;

/// Cell information gain (CIG).
///
/// For feature `i` of a row, the KL divergence (bits) from feature `i`'s prior to its
/// accuracy-blended posterior within the bucket of rows that agree with this row on every
/// other feature. Rows in the same bucket share the same value. 0 means the cell is fully
/// explained by its prior; larger values mean the other columns reveal more about it.
///
/// With `samples` set, only a sample of single-feature slots is visited and each feature
/// reports the mean over the times it was drawn. Features never drawn are reported as NaN.
pub struct CellInformationGain<'a, V: FeatureValue> {
    table: &'a Table<V>,
    options: MetricOptions<V>,
}

impl<'a, V: FeatureValue> CellInformationGain<'a, V> {
    pub fn new(table: &'a Table<V>, options: MetricOptions<V>) -> Self {
        Self { table, options }
    }

    /// Compute the CIG table, drawing sampled slots from `rng`.
    pub fn cell_values_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<MetricTable> {
        let table = self.table;
        table.ensure_not_empty()?;
        let n_features = table.n_features();
        let n_rows = table.n_rows();
        debug!(
            "computing CIG over {n_rows} rows x {n_features} features (samples: {:?})",
            self.options.samples
        );

        let priors = FeaturePriors::complete(table, &self.options.priors)?;
        let accuracies = FeatureAccuracies::resolve(&self.options.accuracies, n_features)?;

        let combinations = sample_subsets_with(
            n_features,
            UNKNOWN_FEATURES,
            self.options.samples,
            rng,
            self.options.sampler,
        )?
        .collect::<Result<Vec<Vec<usize>>>>()?;

        let passes = kl_passes(table, &combinations, &priors, &accuracies)?;

        let mut feature_counts = vec![0usize; n_features];
        let mut feature_kls = vec![vec![0.0_f64; n_rows]; n_features];
        for (unknown, kls) in combinations.iter().zip(passes) {
            for (&i, feature_kl) in unknown.iter().zip(kls) {
                for (total, kl) in feature_kls[i].iter_mut().zip(feature_kl) {
                    *total += kl;
                }
                feature_counts[i] += 1;
            }
        }
        for (kls, &denom) in feature_kls.iter_mut().zip(feature_counts.iter()) {
            // 0 / 0 marks a feature the sampler never drew
            let denom = denom as f64;
            for kl in kls.iter_mut() {
                *kl /= denom;
            }
        }

        debug!("CIG done, feature visit counts: {feature_counts:?}");
        Ok(MetricTable::from_feature_columns(
            table.columns().to_vec(),
            feature_kls,
        ))
    }
}

impl<V: FeatureValue> CellValues for CellInformationGain<'_, V> {
    /// Sampled runs draw from the thread-local generator; use
    /// [`CellInformationGain::cell_values_with_rng`] for reproducible output.
    fn cell_values(&self) -> Result<MetricTable> {
        self.cell_values_with_rng(&mut rand::thread_rng())
    }
}

#[cfg(not(feature = "parallel"))]
fn kl_passes<V: FeatureValue>(
    table: &Table<V>,
    combinations: &[Vec<usize>],
    priors: &FeaturePriors<V>,
    accuracies: &FeatureAccuracies,
) -> Result<Vec<Vec<Vec<f64>>>> {
    combinations
        .iter()
        .map(|unknown| find_kls_for_features(table, unknown, priors, accuracies))
        .collect()
}

// Passes only read the table and priors; collecting an indexed parallel iterator keeps
// the results in combination order, so the merge above stays deterministic.
#[cfg(feature = "parallel")]
fn kl_passes<V: FeatureValue>(
    table: &Table<V>,
    combinations: &[Vec<usize>],
    priors: &FeaturePriors<V>,
    accuracies: &FeatureAccuracies,
) -> Result<Vec<Vec<Vec<f64>>>> {
    use rayon::prelude::*;

    combinations
        .par_iter()
        .map(|unknown| find_kls_for_features(table, unknown, priors, accuracies))
        .collect()
}

/// KL divergence of every cell of the `unknown` features against their priors.
///
/// Rows are bucketed once by the remaining features. Per bucket, the values of each unknown
/// feature give its accuracy-blended posterior, whose divergence from the prior is scattered
/// back to every row of the bucket. Returns one per-row vector per unknown feature.
pub fn find_kls_for_features<V: FeatureValue>(
    table: &Table<V>,
    unknown: &[usize],
    priors: &FeaturePriors<V>,
    accuracies: &FeatureAccuracies,
) -> Result<Vec<Vec<f64>>> {
    let buckets = bucket_by_complement(table, unknown)?;
    trace!("unknown {unknown:?}: {} buckets", buckets.n_buckets());
    unknown
        .iter()
        .enumerate()
        .map(|(u, &feature)| {
            let prior = priors.get(feature)?;
            let accuracy = accuracies.get(feature)?;
            let bucket_kls = buckets
                .iter(u)
                .map(|(_, values)| {
                    let posterior = estimate(values, accuracy, Some(prior))?;
                    kl_divergence(&posterior, prior)
                })
                .collect::<Result<Vec<f64>>>()?;
            buckets.scatter(&bucket_kls)
        })
        .collect()
}

/// CIG weighted per feature by $H(X | Y) / H(X)$, where $Y$ is every other feature.
///
/// Features whose information is already carried by the other columns are weighted
/// towards 0; constant columns ($H(X) = 0$) get weight 0. Results are rounded to two
/// decimals. Always visits every feature, so `samples` in the options is ignored.
pub struct WeightedCellInformationGain<'a, V: FeatureValue> {
    table: &'a Table<V>,
    options: MetricOptions<V>,
}

impl<'a, V: FeatureValue> WeightedCellInformationGain<'a, V> {
    pub fn new(table: &'a Table<V>, options: MetricOptions<V>) -> Self {
        Self { table, options }
    }

    /// Relative conditional entropy of each feature, NaN mapped to 0.
    pub fn feature_weights(&self) -> Result<Vec<f64>> {
        let cond = conditional_entropy_table(self.table, WEIGHTED_ROUND_DIGITS)?;
        Ok(cond
            .iter()
            .map(|row| {
                let w = row.h_x_given_y / row.h_x;
                if w.is_nan() { 0.0 } else { w }
            })
            .collect())
    }
}

impl<V: FeatureValue> CellValues for WeightedCellInformationGain<'_, V> {
    fn cell_values(&self) -> Result<MetricTable> {
        let options = self.options.clone().with_samples(None);
        let cigs = CellInformationGain::new(self.table, options).cell_values()?;
        let weights = self.feature_weights()?;
        debug!("wCIG feature weights: {weights:?}");
        Ok(cigs.scale_columns(&weights)?.round(WEIGHTED_ROUND_DIGITS))
    }
}

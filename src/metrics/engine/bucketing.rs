// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use indexmap::{IndexMap, IndexSet};

use crate::error::{PifError, Result};
use crate::metrics::engine::distribution::EmpiricalCounts;
use crate::table::{FeatureValue, Table};

/// Rows of a table grouped by the values of their "known" features.
///
/// The known features are every column not listed as unknown. Rows sharing the same
/// known values land in the same bucket, and each bucket collects, per unknown feature,
/// the values those rows hold (row order preserved). Bucket ids are compact and follow
/// first occurrence, so `bucket_map` can scatter any per-bucket result back to rows.
#[derive(Debug, Clone)]
pub struct Buckets<V> {
    unknown: Vec<usize>,
    keys: IndexSet<Vec<V>>,
    /// `values[u][b]` holds unknown feature `unknown[u]`'s values in bucket `b`
    values: Vec<Vec<Vec<V>>>,
    bucket_map: Vec<usize>,
}

/// Group the rows of `table` by every feature except `unknown`, in a single pass.
pub fn bucket_by_complement<V: FeatureValue>(table: &Table<V>, unknown: &[usize]) -> Result<Buckets<V>> {
    let n_features = table.n_features();
    if let Some(&i) = unknown.iter().find(|&&i| i >= n_features) {
        return Err(PifError::MissingFeature(i));
    }
    let known: Vec<usize> = (0..n_features).filter(|i| !unknown.contains(i)).collect();

    let mut keys = IndexSet::new();
    let mut values: Vec<Vec<Vec<V>>> = vec![Vec::new(); unknown.len()];
    let mut bucket_map = Vec::with_capacity(table.n_rows());
    for row in table.rows() {
        let key: Vec<V> = known.iter().map(|&i| row[i].clone()).collect();
        let (id, inserted) = keys.insert_full(key);
        if inserted {
            for per_unknown in values.iter_mut() {
                per_unknown.push(Vec::new());
            }
        }
        for (u, &j) in unknown.iter().enumerate() {
            values[u][id].push(row[j].clone());
        }
        bucket_map.push(id);
    }
    Ok(Buckets {
        unknown: unknown.to_vec(),
        keys,
        values,
        bucket_map,
    })
}

impl<V: FeatureValue> Buckets<V> {
    pub fn unknown(&self) -> &[usize] {
        &self.unknown
    }

    pub fn n_buckets(&self) -> usize {
        self.keys.len()
    }

    /// Known-feature values identifying bucket `id`.
    pub fn key(&self, id: usize) -> Option<&[V]> {
        self.keys.get_index(id).map(Vec::as_slice)
    }

    /// Bucket id of `key`, if any row has those known values.
    pub fn id_of(&self, key: &[V]) -> Option<usize> {
        self.keys.get_index_of(key)
    }

    /// Bucket id of each row, in row order.
    pub fn bucket_map(&self) -> &[usize] {
        &self.bucket_map
    }

    /// Values of the `u`-th unknown feature observed in bucket `id`.
    pub fn values(&self, u: usize, id: usize) -> Option<&[V]> {
        self.values.get(u)?.get(id).map(Vec::as_slice)
    }

    /// `(key, values)` of every bucket for the `u`-th unknown feature; empty if `u` is out of range.
    pub fn iter(&self, u: usize) -> impl Iterator<Item = (&[V], &[V])> + '_ {
        let per_bucket = self.values.get(u).map_or(&[][..], Vec::as_slice);
        self.keys
            .iter()
            .zip(per_bucket.iter())
            .map(|(k, v)| (k.as_slice(), v.as_slice()))
    }

    /// Spread one result per bucket out to one result per row.
    pub fn scatter<T: Clone>(&self, per_bucket: &[T]) -> Result<Vec<T>> {
        if per_bucket.len() != self.n_buckets() {
            return Err(PifError::BucketCountMismatch {
                expected: self.n_buckets(),
                found: per_bucket.len(),
            });
        }
        Ok(self.bucket_map.iter().map(|&b| per_bucket[b].clone()).collect())
    }
}

/// Posterior distributions of one feature, one per bucket of the other features.
#[derive(Debug, Clone)]
pub struct PosteriorTable<V> {
    /// Distinct values of the feature, in first-occurrence order
    pub feature_values: Vec<V>,
    /// Per bucket key, the probability of each entry of `feature_values`
    pub posteriors: IndexMap<Vec<V>, Vec<f64>>,
}

/// Empirical posterior of `feature` within every bucket of the other features.
pub fn posterior_distributions<V: FeatureValue>(table: &Table<V>, feature: usize) -> Result<PosteriorTable<V>> {
    let buckets = bucket_by_complement(table, &[feature])?;
    let feature_values: Vec<V> = EmpiricalCounts::from_values(table.column(feature)?.iter())
        .counts
        .into_keys()
        .collect();
    let mut posteriors = IndexMap::with_capacity(buckets.n_buckets());
    for (key, values) in buckets.iter(0) {
        let dist = EmpiricalCounts::from_values(values).distribution()?;
        let probs = feature_values
            .iter()
            .map(|v| dist.get(v).unwrap_or(0.0))
            .collect();
        posteriors.insert(key.to_vec(), probs);
    }
    Ok(PosteriorTable {
        feature_values,
        posteriors,
    })
}

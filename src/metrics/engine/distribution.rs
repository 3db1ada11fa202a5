// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::BTreeMap;
use std::hash::Hash;

use indexmap::IndexMap;
use log::debug;

use crate::error::{PifError, Result};
use crate::table::{FeatureValue, Table};

/// Normalised probability mass over the values of one feature.
///
/// Keys keep first-occurrence order, so iteration (and therefore any sum over it)
/// is deterministic for a given input.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Distribution<V: Hash + Eq> {
    probs: IndexMap<V, f64>,
}

impl<V: FeatureValue> Distribution<V> {
    pub fn get(&self, value: &V) -> Option<f64> {
        self.probs.get(value).copied()
    }

    pub fn contains(&self, value: &V) -> bool {
        self.probs.contains_key(value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&V, f64)> + '_ {
        self.probs.iter().map(|(v, p)| (v, *p))
    }

    pub fn keys(&self) -> impl Iterator<Item = &V> + '_ {
        self.probs.keys()
    }

    pub fn len(&self) -> usize {
        self.probs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probs.is_empty()
    }

    /// Total mass; 1 up to rounding for anything produced by [`estimate`].
    pub fn sum(&self) -> f64 {
        self.probs.values().sum()
    }
}

impl<V: FeatureValue> FromIterator<(V, f64)> for Distribution<V> {
    fn from_iter<I: IntoIterator<Item = (V, f64)>>(iter: I) -> Self {
        Self {
            probs: iter.into_iter().collect(),
        }
    }
}

/// Assumed prior per feature index. Features without an entry get their global distribution.
pub type PriorTable<V> = BTreeMap<usize, Distribution<V>>;

/// Confidence per feature index, in (0, 1]. Features without an entry are fully trusted.
pub type AccuracyTable = BTreeMap<usize, f64>;

/// Occurrence counts of a sample, the basis of every empirical distribution.
pub struct EmpiricalCounts<V: Hash + Eq> {
    /// Counts per unique value, in first-occurrence order
    pub counts: IndexMap<V, usize>,
    /// Total number of observations
    pub n: usize,
}

impl<V: FeatureValue> EmpiricalCounts<V> {
    pub fn from_values<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a V>,
        V: 'a,
    {
        let counts = count_frequencies(values);
        let n = counts.values().sum();
        Self { counts, n }
    }

    /// Number of distinct values observed.
    pub fn k(&self) -> usize {
        self.counts.len()
    }

    /// Plain relative frequencies.
    pub fn distribution(&self) -> Result<Distribution<V>> {
        if self.n == 0 {
            return Err(PifError::EmptySample);
        }
        let n_f = self.n as f64;
        Ok(self
            .counts
            .iter()
            .map(|(v, c)| (v.clone(), *c as f64 / n_f))
            .collect())
    }

    /// Relative frequencies mixed with `prior`: the sample is trusted `accuracy` of the time.
    ///
    /// Iterates the prior's keys, so the result lives on the prior's support;
    /// entries whose mixed mass is zero are dropped.
    pub fn blend(&self, accuracy: f64, prior: &Distribution<V>) -> Result<Distribution<V>> {
        if self.n == 0 {
            return Err(PifError::EmptySample);
        }
        if let Some(v) = self.counts.keys().find(|v| !prior.contains(v)) {
            return Err(PifError::DomainMismatch {
                value: format!("{v:?}"),
            });
        }
        let acc_per_count = accuracy / self.n as f64;
        let one_minus_acc = 1.0 - accuracy;
        Ok(prior
            .iter()
            .map(|(v, p)| {
                let c = self.counts.get(v).copied().unwrap_or(0) as f64;
                (v.clone(), c * acc_per_count + p * one_minus_acc)
            })
            .filter(|(_, p)| *p > 0.0)
            .collect())
    }
}

/// Count the occurrences of each value, keeping first-occurrence order.
pub fn count_frequencies<'a, V, I>(values: I) -> IndexMap<V, usize>
where
    V: FeatureValue + 'a,
    I: IntoIterator<Item = &'a V>,
{
    let mut frequency_map = IndexMap::new();
    for value in values {
        *frequency_map.entry(value.clone()).or_insert(0) += 1;
    }
    frequency_map
}

/// Estimate the distribution of `values`.
///
/// With `accuracy == 1` this is the relative frequency of each value and `prior` is ignored.
/// Below 1 the sample is blended with `prior`, whose support must cover every observed value.
pub fn estimate<'a, V, I>(values: I, accuracy: f64, prior: Option<&Distribution<V>>) -> Result<Distribution<V>>
where
    V: FeatureValue + 'a,
    I: IntoIterator<Item = &'a V>,
{
    check_accuracy(accuracy)?;
    let counts = EmpiricalCounts::from_values(values);
    if accuracy == 1.0 {
        return counts.distribution();
    }
    let prior = prior.ok_or(PifError::MissingPrior)?;
    counts.blend(accuracy, prior)
}

fn check_accuracy(accuracy: f64) -> Result<()> {
    if accuracy > 0.0 && accuracy <= 1.0 {
        Ok(())
    } else {
        Err(PifError::InvalidAccuracy(accuracy))
    }
}

/// One prior per feature of a table, built once per metric call.
#[derive(Debug, Clone)]
pub struct FeaturePriors<V: Hash + Eq> {
    priors: Vec<Distribution<V>>,
}

impl<V: FeatureValue> FeaturePriors<V> {
    /// Fill in every feature of `table` missing from `given` with its global distribution.
    ///
    /// Supplied priors pass through untouched; entries past the last feature are ignored.
    pub fn complete(table: &Table<V>, given: &PriorTable<V>) -> Result<Self> {
        let n_features = table.n_features();
        let mut priors = Vec::with_capacity(n_features);
        for i in 0..n_features {
            let prior = match given.get(&i) {
                Some(fd) => fd.clone(),
                None => estimate(table.column(i)?.iter(), 1.0, None)?,
            };
            priors.push(prior);
        }
        let ignored = given.keys().filter(|&&i| i >= n_features).count();
        if ignored > 0 {
            debug!("ignoring {ignored} priors for features beyond column {n_features}");
        }
        Ok(Self { priors })
    }

    pub fn get(&self, feature: usize) -> Result<&Distribution<V>> {
        self.priors.get(feature).ok_or(PifError::MissingFeature(feature))
    }

    pub fn len(&self) -> usize {
        self.priors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.priors.is_empty()
    }

    /// The completed priors as a feature-indexed map.
    pub fn to_prior_table(&self) -> PriorTable<V> {
        self.priors.iter().cloned().enumerate().collect()
    }
}

/// Accuracy per feature of a table, defaulting to 1.
#[derive(Debug, Clone)]
pub struct FeatureAccuracies {
    accuracies: Vec<f64>,
}

impl FeatureAccuracies {
    pub fn resolve(given: &AccuracyTable, n_features: usize) -> Result<Self> {
        let mut accuracies = vec![1.0; n_features];
        for (&i, &a) in given {
            check_accuracy(a)?;
            if let Some(slot) = accuracies.get_mut(i) {
                *slot = a;
            }
        }
        Ok(Self { accuracies })
    }

    pub fn get(&self, feature: usize) -> Result<f64> {
        self.accuracies
            .get(feature)
            .copied()
            .ok_or(PifError::MissingFeature(feature))
    }
}

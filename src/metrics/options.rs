// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::hash::Hash;

use crate::metrics::engine::{AccuracyTable, Distribution, PriorTable, SamplerConfig};
use crate::table::FeatureValue;

/// Per-call configuration of a cell metric.
///
/// Every metric owns its options; nothing is shared between calls, so priors or
/// accuracies set for one computation never leak into the next.
#[derive(Debug, Clone)]
pub struct MetricOptions<V: Hash + Eq> {
    /// Assumed prior per feature index. Missing features use their global distribution.
    pub priors: PriorTable<V>,
    /// Accuracy per feature index. Missing features default to 1.
    pub accuracies: AccuracyTable,
    /// Number of single-feature slots to visit; `None` visits every feature once.
    pub samples: Option<usize>,
    pub sampler: SamplerConfig,
}

impl<V: Hash + Eq> Default for MetricOptions<V> {
    fn default() -> Self {
        Self {
            priors: PriorTable::new(),
            accuracies: AccuracyTable::new(),
            samples: None,
            sampler: SamplerConfig::default(),
        }
    }
}

impl<V: FeatureValue> MetricOptions<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_priors(mut self, priors: PriorTable<V>) -> Self {
        self.priors = priors;
        self
    }

    pub fn with_prior(mut self, feature: usize, prior: Distribution<V>) -> Self {
        self.priors.insert(feature, prior);
        self
    }

    pub fn with_accuracies(mut self, accuracies: AccuracyTable) -> Self {
        self.accuracies = accuracies;
        self
    }

    pub fn with_accuracy(mut self, feature: usize, accuracy: f64) -> Self {
        self.accuracies.insert(feature, accuracy);
        self
    }

    pub fn with_samples(mut self, samples: Option<usize>) -> Self {
        self.samples = samples;
        self
    }

    pub fn with_sampler(mut self, sampler: SamplerConfig) -> Self {
        self.sampler = sampler;
        self
    }
}

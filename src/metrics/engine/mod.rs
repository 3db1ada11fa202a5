// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

// Building blocks shared by the cell metrics: estimating distributions, choosing
// unknown features, grouping rows, and comparing posteriors against priors.

pub mod bucketing;
pub mod distribution;
pub mod divergence;
pub mod entropy;
pub mod sampling;

pub use bucketing::{Buckets, PosteriorTable, bucket_by_complement, posterior_distributions};
pub use distribution::{
    AccuracyTable, Distribution, EmpiricalCounts, FeatureAccuracies, FeaturePriors, PriorTable, estimate,
};
pub use divergence::{abs_prob_change, kl_divergence};
pub use sampling::{Regime, SamplerConfig, SubsetSampler, binomial, sample_subsets, sample_subsets_with};

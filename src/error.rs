// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use thiserror::Error;

/// Errors raised while estimating distributions or aggregating cell metrics.
///
/// Every failure is surfaced at the point of detection; a metric computation
/// either succeeds for the whole table or returns one of these.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PifError {
    #[error("more samples than combinations: requested {samples}, only {combinations} exist")]
    MoreSamplesThanCombinations { samples: usize, combinations: u128 },
    #[error("a sample budget must request at least one subset")]
    ZeroSamples,
    #[error("cannot choose {r} features out of {n}")]
    SubsetTooLarge { n: usize, r: usize },
    #[error("percentile must lie in [0, 100], got {0}")]
    PercentileOutOfRange(f64),
    #[error("accuracy must lie in (0, 1], got {0}")]
    InvalidAccuracy(f64),
    #[error("an accuracy below 1 requires a prior distribution")]
    MissingPrior,
    #[error("value {value} is not in the domain of the prior distribution")]
    DomainMismatch { value: String },
    #[error("feature index {0} is out of range")]
    MissingFeature(usize),
    #[error("no column named '{0}'")]
    UnknownColumn(String),
    #[error("row {row} has {found} values, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("column '{column}' has {found} values, expected {expected}")]
    ColumnLengthMismatch {
        column: String,
        expected: usize,
        found: usize,
    },
    #[error("invalid table shape: {0}")]
    Shape(String),
    #[error("{names} column names given for rows of length {width}")]
    ColumnCountMismatch { names: usize, width: usize },
    #[error("table has no rows or no columns")]
    EmptyTable,
    #[error("cannot estimate a distribution from an empty sample")]
    EmptySample,
    #[error("{found} per-bucket results given for {expected} buckets")]
    BucketCountMismatch { expected: usize, found: usize },
    #[error("subset sampling gave up after {draws} consecutive rejected draws")]
    SamplingExhausted { draws: usize },
}

pub type Result<T> = std::result::Result<T, PifError>;

// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # pif
//!
//! Disclosure-risk measures for tabular data: how much an observer learns about a cell once
//! the other columns of its row are known, relative to a prior belief about that column.
//!
//! ## Quick Start
//!
//! ```rust
//! use pif::{AccuracyTable, PriorTable, Table, Value, compute_cigs, compute_pif};
//!
//! let table: Table<Value> = Table::from_columns(vec![
//!     ("A", vec![1.into(), 1.into(), 2.into(), 2.into()]),
//!     ("B", vec!["a".into(), "a".into(), "b".into(), "b".into()]),
//! ])
//! .unwrap();
//!
//! let cigs = compute_cigs(
//!     &table,
//!     &PriorTable::new(),
//!     &AccuracyTable::new(),
//!     None,
//!     &mut rand::thread_rng(),
//! )
//! .unwrap();
//! let pif_95 = compute_pif(&cigs, 95.0).unwrap();
//! ```
//!
//! ## Measures
//!
//! | Measure | Granularity | Meaning |
//! |---------|-------------|---------|
//! | CIG  | cell    | KL divergence (bits) of the posterior given the other columns from the prior |
//! | wCIG | cell    | CIG scaled by $H(X \mid Y) / H(X)$, discounting redundant columns |
//! | CSF  | cell    | Absolute change in probability of the cell's own value |
//! | RIG  | row     | Sum of a row's CIG values |
//! | PIF  | dataset | A percentile of the RIG over all rows |
//!
//! ## Architecture
//!
//! 1. **Public API Layer**: free functions in [`calculator`] and the metric types in [`metrics`]
//! 2. **Aggregators**: [`metrics::cig`], [`metrics::csf`], [`metrics::pif`]
//! 3. **Engine**: distribution estimation, subset sampling, bucketing, divergences and
//!    entropies in [`metrics::engine`]
//! 4. **Data**: [`Table`] in, [`MetricTable`] out
//!
//! ## Feature Flags
//!
//! - `parallel`: run the per-feature bucketing passes of CIG on the rayon thread pool
//! - `serde`: derive `Serialize`/`Deserialize` for values, distributions and metric tables

pub mod calculator;
pub mod error;
pub mod metrics;
pub mod table;

pub use calculator::{compute_cigs, compute_csfs, compute_pif, compute_weighted_cigs};
pub use error::{PifError, Result};
pub use metrics::engine::{AccuracyTable, Distribution, PriorTable};
pub use table::{FeatureValue, MetricTable, Table, Value};

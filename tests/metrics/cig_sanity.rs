// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::test_helpers::*;
use pif::metrics::{CellInformationGain, CellValues, MetricOptions};
use pif::{compute_cigs, compute_pif};

fn cigs(table: &Table<Value>) -> MetricTable {
    let mut rng = StdRng::seed_from_u64(0);
    compute_cigs(table, &PriorTable::new(), &AccuracyTable::new(), None, &mut rng).unwrap()
}

#[test]
fn constant_columns_have_no_information_gain() {
    init_logger();
    let cigs = cigs(&same_table());
    assert_eq!(cigs.n_rows(), 4);
    assert_eq!(cigs.columns(), &["A", "B", "C"]);
    for c in ["A", "B", "C"] {
        assert_column_all(&cigs, c, 0.0);
    }
}

#[test]
fn diverse_rows_gain_equally_everywhere() {
    let cigs = cigs(&diverse_table());
    // every bucket pins one of four equally likely values: log2(4)
    for c in ["A", "B", "C"] {
        assert_column_all(&cigs, c, 2.0);
    }
}

#[test]
fn fully_dependent_columns() {
    let cigs = cigs(&fully_dependent_table());
    for c in ["A", "B", "C"] {
        assert_column_all(&cigs, c, 1.0);
    }
}

#[test]
fn accuracy_blends_the_posterior() {
    let table = fully_dependent_table();
    let mut accuracies = AccuracyTable::new();
    accuracies.insert(0, 0.5);
    let mut rng = StdRng::seed_from_u64(0);
    let cigs = compute_cigs(&table, &PriorTable::new(), &accuracies, None, &mut rng).unwrap();
    // posterior of A in a single-row bucket: {own: 0.75, other: 0.25} against {0.5, 0.5}
    let expected = 0.75 * 1.5f64.log2() - 0.25;
    assert_column_all(&cigs, "A", expected);
    assert_column_all(&cigs, "B", 1.0);
    assert_column_all(&cigs, "C", 1.0);
}

#[test]
fn supplied_prior_is_used() {
    let table = fully_dependent_table();
    let mut priors = PriorTable::new();
    priors.insert(0, dist(vec![(Value::from(1), 0.25), (Value::from(2), 0.75)]));
    let mut rng = StdRng::seed_from_u64(0);
    let cigs = compute_cigs(&table, &priors, &AccuracyTable::new(), None, &mut rng).unwrap();
    let a = cigs.column("A").unwrap();
    assert_abs_diff_eq!(a[0], 2.0, epsilon = 1e-12);
    assert_abs_diff_eq!(a[1], 2.0, epsilon = 1e-12);
    assert_abs_diff_eq!(a[2], (1.0f64 / 0.75).log2(), epsilon = 1e-12);
    assert_abs_diff_eq!(a[3], (1.0f64 / 0.75).log2(), epsilon = 1e-12);
}

#[test]
fn prior_missing_an_observed_value_fails() {
    let table = fully_dependent_table();
    let mut priors = PriorTable::new();
    priors.insert(0, dist(vec![(Value::from(1), 1.0)]));
    let mut rng = StdRng::seed_from_u64(0);

    let err = compute_cigs(&table, &priors, &AccuracyTable::new(), None, &mut rng).unwrap_err();
    assert!(matches!(err, PifError::DomainMismatch { .. }));

    let mut accuracies = AccuracyTable::new();
    accuracies.insert(0, 0.9);
    let err = compute_cigs(&table, &priors, &accuracies, None, &mut rng).unwrap_err();
    assert!(matches!(err, PifError::DomainMismatch { .. }));
}

#[test]
fn full_sample_budget_matches_exhaustive() {
    let table = fully_dependent_table();
    let exhaustive = cigs(&table);
    for seed in 0..5 {
        let mut rng = Xoshiro256Plus::seed_from_u64(seed);
        let sampled = compute_cigs(&table, &PriorTable::new(), &AccuracyTable::new(), Some(3), &mut rng).unwrap();
        assert_eq!(sampled, exhaustive);
    }
}

#[test]
fn unvisited_features_are_nan() {
    let table = diverse_table();
    let mut rng = Xoshiro256Plus::seed_from_u64(5);
    let sampled = compute_cigs(&table, &PriorTable::new(), &AccuracyTable::new(), Some(2), &mut rng).unwrap();
    let nan_columns: Vec<usize> = (0..3)
        .filter(|&c| sampled.column_at(c).unwrap().iter().all(|v| v.is_nan()))
        .collect();
    assert_eq!(nan_columns.len(), 1);
    for c in (0..3).filter(|c| !nan_columns.contains(c)) {
        for &v in sampled.column_at(c).unwrap().iter() {
            assert_abs_diff_eq!(v, 2.0, epsilon = 1e-12);
        }
    }
    // row sums skip the unvisited feature
    assert_abs_diff_eq!(compute_pif(&sampled, 50.0).unwrap(), 4.0, epsilon = 1e-12);
}

#[test]
fn sample_budget_over_feature_count_fails() {
    let table = diverse_table();
    let mut rng = StdRng::seed_from_u64(0);
    let err = compute_cigs(&table, &PriorTable::new(), &AccuracyTable::new(), Some(4), &mut rng).unwrap_err();
    assert_eq!(
        err,
        PifError::MoreSamplesThanCombinations {
            samples: 4,
            combinations: 3
        }
    );
}

#[test]
fn zero_sample_budget_fails() {
    let table = fully_dependent_table();
    let mut rng = StdRng::seed_from_u64(0);
    let err = compute_cigs(&table, &PriorTable::new(), &AccuracyTable::new(), Some(0), &mut rng).unwrap_err();
    assert_eq!(err, PifError::ZeroSamples);

    let options = MetricOptions::new().with_samples(Some(0));
    let err = CellInformationGain::new(&table, options).cell_values().unwrap_err();
    assert_eq!(err, PifError::ZeroSamples);
}

#[test]
fn empty_table_fails() {
    let table: Table<Value> = Table::new(vec!["A", "B"], vec![]).unwrap();
    let mut rng = StdRng::seed_from_u64(0);
    let err = compute_cigs(&table, &PriorTable::new(), &AccuracyTable::new(), None, &mut rng).unwrap_err();
    assert_eq!(err, PifError::EmptyTable);
}

#[test]
fn options_do_not_leak_between_calls() {
    let table = fully_dependent_table();
    let skewed = MetricOptions::new()
        .with_prior(0, dist(vec![(Value::from(1), 0.25), (Value::from(2), 0.75)]))
        .with_accuracy(1, 0.5);
    let first = CellInformationGain::new(&table, skewed).cell_values().unwrap();
    let second = CellInformationGain::new(&table, MetricOptions::new()).cell_values().unwrap();
    assert_ne!(first, second);
    assert_eq!(second, cigs(&table));
}

#[test]
fn row_values_sum_cells() {
    let table = fully_dependent_table();
    let rig = CellInformationGain::new(&table, MetricOptions::new()).row_values().unwrap();
    for &v in rig.iter() {
        assert_abs_diff_eq!(v, 3.0, epsilon = 1e-12);
    }
}

#[test]
fn cig_is_non_negative_on_random_tables() {
    for seed in 0..5 {
        let table = random_table(60, 4, 3, seed);
        let mut rng = StdRng::seed_from_u64(seed);
        let cigs = compute_cigs(&table, &PriorTable::new(), &AccuracyTable::new(), None, &mut rng).unwrap();
        assert_eq!(cigs.n_rows(), 60);
        assert_eq!(cigs.n_features(), 4);
        assert!(cigs.values().iter().all(|&v| v >= -1e-12));
    }
}

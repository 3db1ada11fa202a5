// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::test_helpers::*;
use ndarray::{Array1, array};
use pif::metrics::pif::percentile_linear;
use pif::metrics::{GlobalValue, PersonalInformationFactor, row_information_gains};
use pif::{compute_cigs, compute_pif};
use rstest::*;

fn cig_table() -> MetricTable {
    // row sums 1, 4, 2, 3
    MetricTable::new(
        vec!["A".into(), "B".into()],
        array![[0.5, 0.5], [2.0, 2.0], [1.5, 0.5], [1.0, 2.0]],
    )
    .unwrap()
}

#[rstest]
#[case(0.0, 1.0)]
#[case(100.0, 4.0)]
#[case(50.0, 2.5)]
#[case(25.0, 1.75)]
#[case(90.0, 3.7)]
fn percentile_interpolates_linearly(#[case] percentile: f64, #[case] expected: f64) {
    assert_abs_diff_eq!(compute_pif(&cig_table(), percentile).unwrap(), expected, epsilon = 1e-12);
}

#[rstest]
#[case(-1.0)]
#[case(100.5)]
#[case(f64::NAN)]
fn percentile_out_of_range(#[case] percentile: f64) {
    assert!(matches!(
        compute_pif(&cig_table(), percentile),
        Err(PifError::PercentileOutOfRange(_))
    ));
}

#[test]
fn extremes_are_min_and_max_row_sums() {
    let table = random_table(80, 4, 3, 21);
    let mut rng = StdRng::seed_from_u64(0);
    let cigs = compute_cigs(&table, &PriorTable::new(), &AccuracyTable::new(), None, &mut rng).unwrap();
    let rig = row_information_gains(&cigs);
    let max = rig.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = rig.iter().copied().fold(f64::INFINITY, f64::min);
    assert_eq!(compute_pif(&cigs, 100.0).unwrap(), max);
    assert_eq!(compute_pif(&cigs, 0.0).unwrap(), min);
    let median = PersonalInformationFactor::new(&cigs, 50.0).global_value().unwrap();
    assert!(min <= median && median <= max);
}

#[test]
fn row_sums_skip_nan() {
    let table = MetricTable::new(
        vec!["A".into(), "B".into()],
        array![[f64::NAN, 1.0], [f64::NAN, 3.0]],
    )
    .unwrap();
    assert_eq!(row_information_gains(&table), array![1.0, 3.0]);
    assert_abs_diff_eq!(compute_pif(&table, 50.0).unwrap(), 2.0, epsilon = 1e-12);
}

#[test]
fn fully_dependent_rows_share_one_rig() {
    let mut rng = StdRng::seed_from_u64(0);
    let cigs = compute_cigs(
        &fully_dependent_table(),
        &PriorTable::new(),
        &AccuracyTable::new(),
        None,
        &mut rng,
    )
    .unwrap();
    for p in [0.0, 33.0, 100.0] {
        assert_abs_diff_eq!(compute_pif(&cigs, p).unwrap(), 3.0, epsilon = 1e-12);
    }
}

#[test]
fn empty_rig_is_an_error() {
    assert_eq!(percentile_linear(Array1::zeros(0), 50.0).unwrap_err(), PifError::EmptyTable);
}

// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::test_helpers::*;
use pif::metrics::engine::{abs_prob_change, kl_divergence};

#[test]
fn kl_of_identical_distributions_is_zero() {
    let p = dist(vec![("a", 0.2), ("b", 0.3), ("c", 0.5)]);
    assert_abs_diff_eq!(kl_divergence(&p, &p).unwrap(), 0.0, epsilon = 1e-15);
}

#[test]
fn kl_known_values_in_bits() {
    let q = dist(vec![(1, 0.5), (2, 0.5)]);
    let p = dist(vec![(1, 1.0)]);
    assert_abs_diff_eq!(kl_divergence(&p, &q).unwrap(), 1.0, epsilon = 1e-12);

    let q = dist(vec![("a", 0.25), ("b", 0.25), ("c", 0.25), ("d", 0.25)]);
    let p = dist(vec![("a", 0.5), ("b", 0.5)]);
    assert_abs_diff_eq!(kl_divergence(&p, &q).unwrap(), 1.0, epsilon = 1e-12);

    // 0.75 log2(1.5) + 0.25 log2(0.5)
    let q = dist(vec![(1, 0.5), (2, 0.5)]);
    let p = dist(vec![(1, 0.75), (2, 0.25)]);
    let expected = 0.75 * 1.5f64.log2() - 0.25;
    assert_abs_diff_eq!(kl_divergence(&p, &q).unwrap(), expected, epsilon = 1e-12);
}

#[test]
fn kl_skips_zero_posterior_mass() {
    let q = dist(vec![("a", 0.5), ("c", 0.5)]);
    let p = dist(vec![("a", 1.0), ("b", 0.0)]);
    assert_abs_diff_eq!(kl_divergence(&p, &q).unwrap(), 1.0, epsilon = 1e-12);
}

#[test]
fn kl_requires_prior_support() {
    let q = dist(vec![("a", 1.0)]);
    let p = dist(vec![("a", 0.5), ("z", 0.5)]);
    assert!(matches!(kl_divergence(&p, &q), Err(PifError::DomainMismatch { .. })));

    let q = dist(vec![("a", 1.0), ("z", 0.0)]);
    assert!(matches!(kl_divergence(&p, &q), Err(PifError::DomainMismatch { .. })));
}

#[test]
fn kl_is_non_negative() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..200 {
        let k = rng.gen_range(1..8);
        let q_raw: Vec<f64> = (0..k).map(|_| rng.gen_range(0.01..1.0)).collect();
        let q_sum: f64 = q_raw.iter().sum();
        let q = dist((0..k).zip(q_raw.iter().map(|w| w / q_sum)).collect());

        let support = rng.gen_range(1..=k);
        let p_raw: Vec<f64> = (0..support).map(|_| rng.gen_range(0.0..1.0)).collect();
        let p_sum: f64 = p_raw.iter().sum::<f64>().max(f64::MIN_POSITIVE);
        let p = dist((0..support).zip(p_raw.iter().map(|w| w / p_sum)).collect());

        assert!(kl_divergence(&p, &q).unwrap() >= -1e-12);
    }
}

#[test]
fn abs_change_per_posterior_key() {
    let q = dist(vec![("a", 0.25), ("b", 0.25), ("c", 0.5)]);
    let p = dist(vec![("a", 1.0)]);
    let change = abs_prob_change(&p, &q).unwrap();
    assert_eq!(change.len(), 1);
    assert_abs_diff_eq!(change[&"a"], 0.75, epsilon = 1e-12);

    let p = dist(vec![("b", 0.1), ("c", 0.9)]);
    let change = abs_prob_change(&p, &q).unwrap();
    assert_abs_diff_eq!(change[&"b"], 0.15, epsilon = 1e-12);
    assert_abs_diff_eq!(change[&"c"], 0.4, epsilon = 1e-12);

    let p = dist(vec![("z", 1.0)]);
    assert!(matches!(abs_prob_change(&p, &q), Err(PifError::DomainMismatch { .. })));
}

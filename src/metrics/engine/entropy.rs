// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plug-in Shannon entropies (in bits) of column groups, and the measures built from them.
//!
//! Joint distributions are estimated from group counts: the selected columns of each row are
//! reduced to one compact code, and the entropy of the codes is the joint entropy.

use std::collections::HashMap;

use ndarray::Array1;

use crate::error::{PifError, Result};
use crate::table::{FeatureValue, Table, round_to};

/// Reduce the selected columns of every row into a single compact code.
///
/// Each distinct tuple of values gets the next free id, in first-occurrence order.
/// Selecting no columns maps every row to code 0.
pub fn reduce_joint_space_compact<V: FeatureValue>(table: &Table<V>, features: &[usize]) -> Result<Array1<usize>> {
    if let Some(&i) = features.iter().find(|&&i| i >= table.n_features()) {
        return Err(PifError::MissingFeature(i));
    }
    let data = table.data();
    let mut map: HashMap<Vec<&V>, usize> = HashMap::new();
    let mut out = Vec::with_capacity(table.n_rows());
    for r in 0..table.n_rows() {
        let key: Vec<&V> = features.iter().map(|&i| &data[[r, i]]).collect();
        let next_id = map.len();
        out.push(*map.entry(key).or_insert(next_id));
    }
    Ok(Array1::from(out))
}

/// Entropy in bits of a sequence of compact codes: $H = -\sum p_i \log_2 p_i$.
///
/// Codes are dense (`0..k`), so they are counted into a vector rather than a map.
pub fn entropy_of_codes(codes: &Array1<usize>) -> f64 {
    let n = codes.len();
    let Some(&max) = codes.iter().max() else {
        return 0.0;
    };
    let mut dense = vec![0usize; max + 1];
    for &c in codes.iter() {
        dense[c] += 1;
    }
    let n_f = n as f64;
    let mut h = 0.0_f64;
    for &cnt in dense.iter().filter(|&&c| c > 0) {
        let p = cnt as f64 / n_f;
        h -= p * p.log2();
    }
    h
}

/// Joint entropy of the features at `features`.
pub fn joint_entropy<V: FeatureValue>(table: &Table<V>, features: &[usize]) -> Result<f64> {
    table.ensure_not_empty()?;
    let codes = reduce_joint_space_compact(table, features)?;
    Ok(entropy_of_codes(&codes))
}

/// Joint entropy of the named features.
pub fn entropy<V: FeatureValue>(table: &Table<V>, names: &[&str]) -> Result<f64> {
    joint_entropy(table, &resolve(table, names)?)
}

/// $I(X; Y) = H(X) + H(Y) - H(X, Y)$ for two groups of named features.
pub fn mutual_information<V: FeatureValue>(table: &Table<V>, x: &[&str], y: &[&str]) -> Result<f64> {
    let x = resolve(table, x)?;
    let y = resolve(table, y)?;
    mutual_information_of(table, &x, &y)
}

/// $H(X | Y) = H(X) - I(X; Y)$ for two groups of named features.
pub fn conditional_entropy<V: FeatureValue>(table: &Table<V>, x: &[&str], y: &[&str]) -> Result<f64> {
    let x = resolve(table, x)?;
    let y = resolve(table, y)?;
    conditional_entropy_of(table, &x, &y)
}

fn mutual_information_of<V: FeatureValue>(table: &Table<V>, x: &[usize], y: &[usize]) -> Result<f64> {
    let h_x = joint_entropy(table, x)?;
    let h_y = joint_entropy(table, y)?;
    let xy: Vec<usize> = x.iter().chain(y.iter()).copied().collect();
    let h_xy = joint_entropy(table, &xy)?;
    Ok(h_x + h_y - h_xy)
}

fn conditional_entropy_of<V: FeatureValue>(table: &Table<V>, x: &[usize], y: &[usize]) -> Result<f64> {
    let h_x = joint_entropy(table, x)?;
    Ok(h_x - mutual_information_of(table, x, y)?)
}

/// Mutual information between two single features.
#[derive(Debug, Clone, PartialEq)]
pub struct PairwiseMi {
    pub x: String,
    pub y: String,
    pub mi: f64,
}

/// $I(X; Y)$ for every unordered pair of features, in column order.
pub fn pairwise_mutual_information<V: FeatureValue>(table: &Table<V>) -> Result<Vec<PairwiseMi>> {
    let names = table.columns();
    let n = names.len();
    let mut out = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            out.push(PairwiseMi {
                x: names[i].clone(),
                y: names[j].clone(),
                mi: mutual_information_of(table, &[i], &[j])?,
            });
        }
    }
    Ok(out)
}

/// One row of [`entropy_mi_table`].
#[derive(Debug, Clone, PartialEq)]
pub struct EntropyMiRow {
    pub x: String,
    pub y: String,
    pub h_x: f64,
    pub h_y: f64,
    pub mi_xy: f64,
}

/// Per feature pair: both marginal entropies and their mutual information, rounded.
pub fn entropy_mi_table<V: FeatureValue>(table: &Table<V>, round_digits: i32) -> Result<Vec<EntropyMiRow>> {
    let entropies = (0..table.n_features())
        .map(|i| joint_entropy(table, &[i]))
        .collect::<Result<Vec<f64>>>()?;
    let names = table.columns();
    let mut out = Vec::new();
    for i in 0..names.len() {
        for j in (i + 1)..names.len() {
            out.push(EntropyMiRow {
                x: names[i].clone(),
                y: names[j].clone(),
                h_x: round_to(entropies[i], round_digits),
                h_y: round_to(entropies[j], round_digits),
                mi_xy: round_to(mutual_information_of(table, &[i], &[j])?, round_digits),
            });
        }
    }
    Ok(out)
}

/// One row of [`conditional_entropy_table`]: feature `x` against all other features `y`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalEntropyRow {
    pub x: String,
    pub y: Vec<String>,
    pub h_x: f64,
    pub h_y: f64,
    pub h_x_given_y: f64,
}

/// Per feature: $H(X)$, $H(Y)$ and $H(X | Y)$ where $Y$ is every other feature, rounded.
pub fn conditional_entropy_table<V: FeatureValue>(
    table: &Table<V>,
    round_digits: i32,
) -> Result<Vec<ConditionalEntropyRow>> {
    let names = table.columns();
    let mut out = Vec::with_capacity(names.len());
    for i in 0..names.len() {
        let others: Vec<usize> = (0..names.len()).filter(|&j| j != i).collect();
        out.push(ConditionalEntropyRow {
            x: names[i].clone(),
            y: others.iter().map(|&j| names[j].clone()).collect(),
            h_x: round_to(joint_entropy(table, &[i])?, round_digits),
            h_y: round_to(joint_entropy(table, &others)?, round_digits),
            h_x_given_y: round_to(conditional_entropy_of(table, &[i], &others)?, round_digits),
        });
    }
    Ok(out)
}

/// Information shared among the named features: joint entropy minus [`residual_entropy`].
pub fn dual_total_correlation<V: FeatureValue>(table: &Table<V>, names: &[&str]) -> Result<f64> {
    let features = resolve(table, names)?;
    let joint = joint_entropy(table, &features)?;
    Ok(joint - residual_entropy_of(table, &features)?)
}

/// Sum over the named features of each one's entropy given all the others.
pub fn residual_entropy<V: FeatureValue>(table: &Table<V>, names: &[&str]) -> Result<f64> {
    residual_entropy_of(table, &resolve(table, names)?)
}

fn residual_entropy_of<V: FeatureValue>(table: &Table<V>, features: &[usize]) -> Result<f64> {
    let mut sum = 0.0;
    for &f in features {
        let rest: Vec<usize> = features.iter().copied().filter(|&g| g != f).collect();
        sum += conditional_entropy_of(table, &[f], &rest)?;
    }
    Ok(sum)
}

/// Column indices of `names`, deduplicated, in the order given.
fn resolve<V: FeatureValue>(table: &Table<V>, names: &[&str]) -> Result<Vec<usize>> {
    let mut out: Vec<usize> = Vec::with_capacity(names.len());
    for name in names {
        let i = table.column_index(name)?;
        if !out.contains(&i) {
            out.push(i);
        }
    }
    Ok(out)
}

// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use indexmap::IndexMap;

use crate::error::{PifError, Result};
use crate::metrics::engine::distribution::Distribution;
use crate::table::FeatureValue;

/// Kullback–Leibler divergence $D_{KL}(P \| Q)$ in bits.
///
/// The information gained when revising beliefs from the prior `q` to the posterior `p`.
/// Only keys with `p > 0` contribute; each of them must carry non-zero mass in `q`.
pub fn kl_divergence<V: FeatureValue>(p: &Distribution<V>, q: &Distribution<V>) -> Result<f64> {
    let mut kl = 0.0_f64;
    for (k, pk) in p.iter() {
        if pk <= 0.0 {
            continue;
        }
        let qk = prior_mass(q, k)?;
        if qk <= 0.0 {
            return Err(PifError::DomainMismatch {
                value: format!("{k:?}"),
            });
        }
        kl += pk * (pk / qk).log2();
    }
    Ok(kl)
}

/// Absolute change in probability of every posterior key relative to the prior.
pub fn abs_prob_change<V: FeatureValue>(p: &Distribution<V>, q: &Distribution<V>) -> Result<IndexMap<V, f64>> {
    p.iter()
        .map(|(k, pk)| Ok((k.clone(), (pk - prior_mass(q, k)?).abs())))
        .collect()
}

fn prior_mass<V: FeatureValue>(q: &Distribution<V>, k: &V) -> Result<f64> {
    q.get(k).ok_or_else(|| PifError::DomainMismatch {
        value: format!("{k:?}"),
    })
}

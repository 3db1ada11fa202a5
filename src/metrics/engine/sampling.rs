// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Enumeration and coverage-aware sampling of feature subsets.
//!
//! Without a sample budget every `r`-subset of `0..n` is produced once, in lexicographic
//! order. With a budget of `k` subsets the sampler picks one of two regimes:
//!
//! - **Dense** (`k >= C(n, r) / 2`): all subsets are shuffled and walked twice. The first
//!   walk only emits subsets that still touch a feature no emitted subset covers yet; the
//!   second walk fills the remaining budget from whatever was skipped, in shuffled order.
//! - **Sparse** (`k < C(n, r) / 2`): random subsets are drawn, sorted, and accepted if they
//!   are new and either every feature is already covered or they cover a new one.
//!
//! The sparse regime is rejection sampling. It gives up with
//! [`PifError::SamplingExhausted`] after [`SamplerConfig::max_rejections`] consecutive
//! rejected draws instead of looping forever.

use std::collections::HashSet;
use std::ops::Range;

use itertools::{Combinations, Itertools};
use log::{debug, trace};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::{PifError, Result};

/// Number of `r`-subsets of an `n`-set, saturating at `u128::MAX`.
pub fn binomial(n: usize, r: usize) -> u128 {
    if r > n {
        return 0;
    }
    let r = r.min(n - r) as u128;
    let n = n as u128;
    let mut acc: u128 = 1;
    for i in 0..r {
        // acc * (n - i) is divisible by (i + 1) at every step
        acc = match acc.checked_mul(n - i) {
            Some(v) => v / (i + 1),
            None => return u128::MAX,
        };
    }
    acc
}

/// Tuning for the sparse regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SamplerConfig {
    /// Consecutive rejected draws tolerated before giving up
    pub max_rejections: usize,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            max_rejections: 100_000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regime {
    Exhaustive,
    Dense,
    Sparse,
}

/// Lazy sequence of sorted feature-index subsets.
pub struct SubsetSampler<'r, R: ?Sized> {
    state: State<'r, R>,
    failed: bool,
}

enum State<'r, R: ?Sized> {
    Exhaustive(Combinations<Range<usize>>),
    Dense(DenseWalk),
    Sparse(SparseDraw<'r, R>),
}

/// Subsets of `0..n` of size `r`, sampled per [`SamplerConfig::default`].
pub fn sample_subsets<'r, R>(
    n: usize,
    r: usize,
    samples: Option<usize>,
    rng: &'r mut R,
) -> Result<SubsetSampler<'r, R>>
where
    R: Rng + ?Sized,
{
    sample_subsets_with(n, r, samples, rng, SamplerConfig::default())
}

/// Subsets of `0..n` of size `r`; `samples = None` enumerates all of them.
pub fn sample_subsets_with<'r, R>(
    n: usize,
    r: usize,
    samples: Option<usize>,
    rng: &'r mut R,
    config: SamplerConfig,
) -> Result<SubsetSampler<'r, R>>
where
    R: Rng + ?Sized,
{
    if r > n {
        return Err(PifError::SubsetTooLarge { n, r });
    }
    let state = match samples {
        None => State::Exhaustive((0..n).combinations(r)),
        Some(0) => return Err(PifError::ZeroSamples),
        Some(samples) => {
            let total = binomial(n, r);
            if samples as u128 > total {
                return Err(PifError::MoreSamplesThanCombinations {
                    samples,
                    combinations: total,
                });
            }
            if samples as u128 >= total >> 1 {
                debug!("dense subset sampling: {samples} of {total} ({r} of {n})");
                State::Dense(DenseWalk::new(n, r, samples, rng))
            } else {
                debug!("sparse subset sampling: {samples} of {total} ({r} of {n})");
                State::Sparse(SparseDraw {
                    rng,
                    n,
                    r,
                    quota: samples,
                    seen: HashSet::with_capacity(samples),
                    covered: vec![false; n],
                    max_rejections: config.max_rejections,
                })
            }
        }
    };
    Ok(SubsetSampler {
        state,
        failed: false,
    })
}

impl<R: ?Sized> SubsetSampler<'_, R> {
    pub fn regime(&self) -> Regime {
        match self.state {
            State::Exhaustive(_) => Regime::Exhaustive,
            State::Dense(_) => Regime::Dense,
            State::Sparse(_) => Regime::Sparse,
        }
    }
}

impl<R: Rng + ?Sized> Iterator for SubsetSampler<'_, R> {
    type Item = Result<Vec<usize>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match &mut self.state {
            State::Exhaustive(combs) => combs.next().map(Ok),
            State::Dense(walk) => walk.next().map(Ok),
            State::Sparse(draw) => {
                let item = draw.next();
                if matches!(item, Some(Err(_))) {
                    self.failed = true;
                }
                item
            }
        }
    }
}

struct DenseWalk {
    shuffled: Vec<Option<Vec<usize>>>,
    covered: Vec<bool>,
    pos: usize,
    filling: bool,
    produced: usize,
    quota: usize,
}

impl DenseWalk {
    fn new<R: Rng + ?Sized>(n: usize, r: usize, quota: usize, rng: &mut R) -> Self {
        let mut all: Vec<Vec<usize>> = (0..n).combinations(r).collect();
        all.shuffle(rng);
        Self {
            shuffled: all.into_iter().map(Some).collect(),
            covered: vec![false; n],
            pos: 0,
            filling: false,
            produced: 0,
            quota,
        }
    }

    fn next(&mut self) -> Option<Vec<usize>> {
        if self.produced >= self.quota {
            return None;
        }
        if !self.filling {
            while self.pos < self.shuffled.len() {
                let slot = &mut self.shuffled[self.pos];
                self.pos += 1;
                let Some(comb) = slot.as_ref() else { continue };
                if comb.iter().all(|&i| self.covered[i]) {
                    continue;
                }
                for &i in comb {
                    self.covered[i] = true;
                }
                self.produced += 1;
                return slot.take();
            }
            self.filling = true;
            self.pos = 0;
        }
        while self.pos < self.shuffled.len() {
            let slot = self.shuffled[self.pos].take();
            self.pos += 1;
            if slot.is_some() {
                self.produced += 1;
                return slot;
            }
        }
        None
    }
}

struct SparseDraw<'r, R: ?Sized> {
    rng: &'r mut R,
    n: usize,
    r: usize,
    quota: usize,
    seen: HashSet<Vec<usize>>,
    covered: Vec<bool>,
    max_rejections: usize,
}

impl<R: Rng + ?Sized> SparseDraw<'_, R> {
    fn next(&mut self) -> Option<Result<Vec<usize>>> {
        if self.seen.len() >= self.quota {
            return None;
        }
        let mut rejections = 0;
        loop {
            let mut comb = rand::seq::index::sample(&mut *self.rng, self.n, self.r).into_vec();
            comb.sort_unstable();
            let all_covered = self.covered.iter().all(|&c| c);
            let adds_coverage = comb.iter().any(|&i| !self.covered[i]);
            if !self.seen.contains(&comb) && (all_covered || adds_coverage) {
                for &i in &comb {
                    self.covered[i] = true;
                }
                trace!("accepted {comb:?} after {rejections} rejections");
                self.seen.insert(comb.clone());
                return Some(Ok(comb));
            }
            rejections += 1;
            if rejections >= self.max_rejections {
                return Some(Err(PifError::SamplingExhausted { draws: rejections }));
            }
        }
    }
}

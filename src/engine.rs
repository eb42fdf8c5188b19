//! Matching engine.
//!
//! Three layers, applied per (class in A, class in B) pair:
//!
//! 1. **Pairing search**: enumerate every injective partial pairing between
//!    the two classes' selector sets and keep the minimum weighted distance
//!    ratio. The enumeration space is `max!/(max−min)!`; when it exceeds the
//!    configured ceiling the search is skipped entirely and the pair is
//!    treated as having no valid pairing.
//! 2. **Aggregation**: blend the best ratio with a smooth penalty for the
//!    mismatch between the two selector-set sizes.
//! 3. **Selection**: per class in A, rank all classes in B by distance with
//!    deterministic tie-breaking and keep the winner.

use std::collections::{BTreeMap, BTreeSet};

use rayon::prelude::*;

use crate::config::MatchConfig;
use crate::distance::SelectorDistanceTable;
use crate::types::{ClassOccurrences, ClassPair};

/// Distance assigned when no pairing could be evaluated.
const DEFAULT_DISTANCE: f64 = 1.0;

/// Number of injective pairings between selector sets of sizes `m` and `n`:
/// the falling factorial `max·(max−1)·…·(max−min+1)`. Computed in `f64` with
/// early abort; `None` means the count exceeds `ceiling`.
fn injective_pairing_count(m: usize, n: usize, ceiling: u64) -> Option<f64> {
    let (min, max) = if m <= n { (m, n) } else { (n, m) };
    let mut count = 1.0_f64;
    for taken in 0..min {
        count *= (max - taken) as f64;
        if count > ceiling as f64 {
            return None;
        }
    }
    Some(count)
}

/// Exhaustive search over injective partial pairings.
///
/// Pairs are drawn with strictly increasing indices on side A and an
/// injectivity mask on side B; each full pairing of size `pair_count` is
/// scored as Σ(d·w)/Σw with w = √(w_a·w_b). The sums are carried through
/// the recursion so no pairing is ever materialized.
struct PairingSearch<'a> {
    a: &'a [(&'a str, f64)],
    b: &'a [(&'a str, f64)],
    pair_count: usize,
    distances: &'a SelectorDistanceTable,
    used: Vec<bool>,
    best: f64,
}

impl PairingSearch<'_> {
    fn run(mut self) -> f64 {
        self.recurse(0, 0, 0.0, 0.0);
        self.best
    }

    fn recurse(&mut self, a_from: usize, placed: usize, dist_sum: f64, weight_sum: f64) {
        if placed == self.pair_count {
            let ratio = dist_sum / weight_sum;
            if ratio < self.best {
                self.best = ratio;
            }
            return;
        }
        // Branches that skipped too many A selectors can never complete.
        if self.a.len() - a_from < self.pair_count - placed {
            return;
        }
        for i in a_from..self.a.len() {
            let (selector_a, weight_a) = self.a[i];
            for j in 0..self.b.len() {
                if self.used[j] {
                    continue;
                }
                let (selector_b, weight_b) = self.b[j];
                let weight = (weight_a * weight_b).sqrt();
                let dist = self.distances.get(selector_a, selector_b);
                self.used[j] = true;
                self.recurse(i + 1, placed + 1, dist_sum + dist * weight, weight_sum + weight);
                self.used[j] = false;
            }
        }
    }
}

/// Minimum weighted distance ratio over all injective pairings of size
/// `min(|a|, |b|)`.
///
/// `None` when no pairing was evaluated: a side is empty, or the pairing
/// space exceeds the ceiling (logged as an informational note, not an
/// error; the caller substitutes the default distance).
fn best_pairing_distance(
    a: &[(&str, f64)],
    b: &[(&str, f64)],
    distances: &SelectorDistanceTable,
    ceiling: u64,
) -> Option<f64> {
    let pair_count = a.len().min(b.len());
    if pair_count == 0 {
        return None;
    }
    if injective_pairing_count(a.len(), b.len(), ceiling).is_none() {
        tracing::debug!(
            m = a.len(),
            n = b.len(),
            ceiling,
            "pairing space exceeds the complexity ceiling; using default distance"
        );
        return None;
    }
    let search = PairingSearch {
        a,
        b,
        pair_count,
        distances,
        used: vec![false; b.len()],
        best: DEFAULT_DISTANCE,
    };
    Some(search.run())
}

/// Blend the best pairing ratio with the selector-set size mismatch.
///
/// alpha = delta/(max−delta) weighs the penalty against the matched
/// distance; penalty = 1 − 1/(1+(delta/2)²) saturates smoothly as the
/// mismatch grows. Equal sizes reduce to `min_dist` alone; a one-sided
/// (empty vs non-empty) comparison degrades fully to the penalty.
fn class_distance(min_dist: Option<f64>, m: usize, n: usize) -> f64 {
    let min_dist = min_dist.unwrap_or(DEFAULT_DISTANCE);
    let delta = m.abs_diff(n);
    if delta == 0 {
        return min_dist;
    }
    let max = m.max(n);
    let penalty = 1.0 - 1.0 / (1.0 + (delta as f64 / 2.0).powi(2));
    if max == delta {
        return penalty;
    }
    let alpha = delta as f64 / (max - delta) as f64;
    (min_dist + penalty * alpha) / (1.0 + alpha)
}

/// Compute the full class-distance cross product.
///
/// Rows are ordered lexicographically by class in A, columns by class in B.
/// Per-pair computations are independent; the parallel path is bit-identical
/// to the serial one.
pub fn class_distance_table(
    classes_a: &ClassOccurrences,
    classes_b: &ClassOccurrences,
    distances: &SelectorDistanceTable,
    cfg: &MatchConfig,
) -> Vec<ClassPair> {
    let row = |(class_a, selectors_a): (&String, &BTreeMap<String, f64>)| -> Vec<ClassPair> {
        let a: Vec<(&str, f64)> = selectors_a
            .iter()
            .map(|(selector, weight)| (selector.as_str(), *weight))
            .collect();
        classes_b
            .iter()
            .map(|(class_b, selectors_b)| {
                let b: Vec<(&str, f64)> = selectors_b
                    .iter()
                    .map(|(selector, weight)| (selector.as_str(), *weight))
                    .collect();
                let best = best_pairing_distance(&a, &b, distances, cfg.complexity_ceiling);
                ClassPair(
                    class_a.clone(),
                    class_b.clone(),
                    class_distance(best, a.len(), b.len()),
                )
            })
            .collect()
    };
    if cfg.use_parallel {
        classes_a.par_iter().flat_map_iter(row).collect()
    } else {
        classes_a.iter().flat_map(row).collect()
    }
}

/// Pick the best partner in B for every class in A.
///
/// Candidates are ranked by ascending distance; ties prefer, in order, a
/// candidate lexically identical to the A class, then a candidate whose name
/// is not itself a class in A, then the candidates' input order (the sort is
/// stable). The returned winners are unfiltered; thresholding is the
/// caller's concern.
pub fn select_best_matches(
    all_pairs: &[ClassPair],
    a_class_names: &BTreeSet<String>,
) -> Vec<ClassPair> {
    let mut rows: BTreeMap<&str, Vec<&ClassPair>> = BTreeMap::new();
    for pair in all_pairs {
        rows.entry(pair.0.as_str()).or_default().push(pair);
    }
    rows.into_iter()
        .filter_map(|(class_a, mut candidates)| {
            candidates.sort_by(|x, y| {
                x.2.total_cmp(&y.2)
                    .then_with(|| (x.1 != class_a).cmp(&(y.1 != class_a)))
                    .then_with(|| {
                        a_class_names
                            .contains(&x.1)
                            .cmp(&a_class_names.contains(&y.1))
                    })
            });
            candidates.first().map(|pair| (**pair).clone())
        })
        .collect()
}

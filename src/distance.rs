//! Selector-to-selector distance.
//!
//! The metric is purely structural: property names present on only one side
//! count as full mismatches, shared properties are penalized by the
//! normalized edit distance between their raw values, and the sum is
//! normalized by the size of the property-name union. All distances lie in
//! `[0, 1]`.

use std::collections::HashMap;

use rayon::prelude::*;

use crate::config::MatchConfig;
use crate::types::{DeclarationSet, StyleTable};

/// Character-level Levenshtein distance normalized to `[0, 1]` by the longer
/// input's length. Two empty strings are at distance 0.
pub fn edit_distance(a: &str, b: &str) -> f64 {
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 0.0;
    }
    strsim::levenshtein(a, b) as f64 / longest as f64
}

/// Structural distance in `[0, 1]` between two declaration sets.
///
/// distance = (|P1 ∪ P2| − |P1 ∩ P2| + Σ edit(v1, v2)) / |P1 ∪ P2| over the
/// shared properties. Two empty sets are identical and compare at 0; an
/// empty set against a non-empty one falls out of the formula as 1.
pub fn selector_distance(a: &DeclarationSet, b: &DeclarationSet) -> f64 {
    let shared: Vec<&String> = a.keys().filter(|prop| b.contains_key(*prop)).collect();
    let union = a.len() + b.len() - shared.len();
    if union == 0 {
        return 0.0;
    }
    let mut total = (union - shared.len()) as f64;
    for prop in shared {
        total += edit_distance(&a[prop], &b[prop]);
    }
    total / union as f64
}

/// Dense cross product of selector distances between two style tables.
///
/// Indexed by (A selector, B selector), built once per run by
/// [`build_selector_distances`] and read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorDistanceTable {
    rows: HashMap<String, HashMap<String, f64>>,
}

impl SelectorDistanceTable {
    /// Distance between an A selector and a B selector. Pairs outside the
    /// table compare at the maximum distance.
    pub fn get(&self, selector_a: &str, selector_b: &str) -> f64 {
        self.rows
            .get(selector_a)
            .and_then(|row| row.get(selector_b))
            .copied()
            .unwrap_or(1.0)
    }

    /// Number of (A selector, B selector) entries.
    pub fn len(&self) -> usize {
        self.rows.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.values().all(HashMap::is_empty)
    }
}

/// Compute the full A×B selector distance matrix.
///
/// Each cell is an independent pure computation, so the parallel path
/// produces bit-identical results to the serial one.
pub fn build_selector_distances(
    a: &StyleTable,
    b: &StyleTable,
    cfg: &MatchConfig,
) -> SelectorDistanceTable {
    let row = |(selector_a, decls_a): (&String, &DeclarationSet)| {
        let row: HashMap<String, f64> = b
            .iter()
            .map(|(selector_b, decls_b)| {
                (selector_b.clone(), selector_distance(decls_a, decls_b))
            })
            .collect();
        (selector_a.clone(), row)
    };
    let rows = if cfg.use_parallel {
        a.par_iter().map(row).collect()
    } else {
        a.iter().map(row).collect()
    };
    SelectorDistanceTable { rows }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decls(pairs: &[(&str, &str)]) -> DeclarationSet {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn identical_sets_are_at_distance_zero() {
        let set = decls(&[("color", "red"), ("margin", "0")]);
        assert_eq!(selector_distance(&set, &set), 0.0);
    }

    #[test]
    fn disjoint_sets_are_at_distance_one() {
        let a = decls(&[("color", "red"), ("margin", "0")]);
        let b = decls(&[("padding", "1px"), ("top", "0"), ("left", "0")]);
        assert_eq!(selector_distance(&a, &b), 1.0);
    }

    #[test]
    fn distance_is_symmetric_in_value() {
        let a = decls(&[("color", "red"), ("margin", "0"), ("display", "flex")]);
        let b = decls(&[("color", "blue"), ("margin", "0"), ("float", "left")]);
        assert_eq!(selector_distance(&a, &b), selector_distance(&b, &a));
    }

    #[test]
    fn shared_properties_cost_their_value_edit_distance() {
        // One shared property, values "red" vs "rod": 1 edit over 3 chars.
        let a = decls(&[("color", "red")]);
        let b = decls(&[("color", "rod")]);
        assert_eq!(selector_distance(&a, &b), 1.0 / 3.0);
    }

    #[test]
    fn one_sided_properties_count_as_full_mismatches() {
        // union 3, intersection 1, identical shared value.
        let a = decls(&[("color", "red"), ("margin", "0")]);
        let b = decls(&[("color", "red"), ("padding", "1px")]);
        assert_eq!(selector_distance(&a, &b), 2.0 / 3.0);
    }

    #[test]
    fn empty_sets_compare_at_zero() {
        let empty = DeclarationSet::new();
        assert_eq!(selector_distance(&empty, &empty), 0.0);
    }

    #[test]
    fn empty_against_non_empty_is_one() {
        let empty = DeclarationSet::new();
        let b = decls(&[("color", "red")]);
        assert_eq!(selector_distance(&empty, &b), 1.0);
        assert_eq!(selector_distance(&b, &empty), 1.0);
    }

    #[test]
    fn edit_distance_of_equal_strings_is_zero() {
        assert_eq!(edit_distance("flex", "flex"), 0.0);
        assert_eq!(edit_distance("", ""), 0.0);
    }

    #[test]
    fn edit_distance_is_symmetric() {
        assert_eq!(edit_distance("red", "blue"), edit_distance("blue", "red"));
    }

    #[test]
    fn single_append_costs_one_edit() {
        assert_eq!(edit_distance("red", "redx"), 0.25);
    }

    #[test]
    fn edit_distance_from_empty_is_one() {
        assert_eq!(edit_distance("", "red"), 1.0);
    }

    #[test]
    fn table_lookup_defaults_to_max_distance_for_unknown_pairs() {
        let cfg = MatchConfig::default();
        let a: StyleTable = [(".a".to_string(), decls(&[("color", "red")]))].into();
        let b: StyleTable = [(".b".to_string(), decls(&[("color", "red")]))].into();
        let table = build_selector_distances(&a, &b, &cfg);
        assert_eq!(table.get(".a", ".b"), 0.0);
        assert_eq!(table.get(".a", ".missing"), 1.0);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn parallel_build_matches_serial() {
        let decls_for = |i: usize| decls(&[("margin", "0"), ("z-index", &i.to_string())]);
        let a: StyleTable = (0..8).map(|i| (format!(".a{i}"), decls_for(i))).collect();
        let b: StyleTable = (0..8).map(|i| (format!(".b{i}"), decls_for(i + 4))).collect();
        let serial = build_selector_distances(&a, &b, &MatchConfig::default());
        let parallel = build_selector_distances(
            &a,
            &b,
            &MatchConfig {
                use_parallel: true,
                ..Default::default()
            },
        );
        assert_eq!(serial, parallel);
    }
}

//! # cssmatch
//!
//! Structural matching of obfuscated CSS class names across two builds of
//! the same stylesheet.
//!
//! Machine-generated bundles rename their classes on every build, so the
//! only stable signal connecting a class in build A to a class in build B is
//! the *shape* of the rules that reference it: which properties they
//! declare, what the values look like, and how many selectors mention the
//! class. `cssmatch` turns that signal into a distance and picks, for every
//! class in A, the most plausible counterpart in B.
//!
//! ## Pipeline
//!
//! 1. [`stylesheet::build_style_table`]: parse each stylesheet into
//!    selector → declarations.
//! 2. [`classes::extract_class_occurrences`]: find class tokens per
//!    selector with per-selector normalized weights.
//! 3. [`distance::build_selector_distances`]: dense A×B selector distance
//!    matrix from property-set overlap and value edit distance.
//! 4. [`engine::class_distance_table`]: per class pair, search the
//!    injective selector pairings (bounded by the complexity ceiling) and
//!    blend in the set-size penalty.
//! 5. [`engine::select_best_matches`]: rank candidates with deterministic
//!    tie-breaking; [`match_stylesheets`] applies the distance threshold.
//!
//! Every stage is a pure function of its inputs and a [`MatchConfig`], so
//! the whole run is deterministic; enabling
//! [`use_parallel`](MatchConfig::use_parallel) changes wall-clock time, not
//! results.
//!
//! ## Example
//!
//! ```
//! use cssmatch::{MatchConfig, match_stylesheets};
//!
//! let a = ".abcdefghijklmnopqrst{color:red}";
//! let b = ".tsrqponmlkjihgfedcba{color:red}";
//! let report = match_stylesheets(a, b, &MatchConfig::default()).unwrap();
//! assert_eq!(report.pairs["abcdefghijklmnopqrst"], "tsrqponmlkjihgfedcba");
//! ```

pub mod classes;
pub mod config;
pub mod distance;
pub mod engine;
pub mod report;
pub mod stylesheet;
pub mod types;

use std::collections::BTreeSet;

pub use crate::classes::{extract_class_occurrences, token_pattern};
pub use crate::config::MatchConfig;
pub use crate::distance::{
    SelectorDistanceTable, build_selector_distances, edit_distance, selector_distance,
};
pub use crate::engine::{class_distance_table, select_best_matches};
pub use crate::report::{ALL_PAIRS_FILE, PAIRS_FILE, write_artifacts};
pub use crate::stylesheet::build_style_table;
pub use crate::types::{
    ClassOccurrences, ClassPair, DeclarationSet, MatchError, MatchReport, StyleTable,
};

/// Run the full matching pipeline over two stylesheets.
///
/// Returns the complete class-distance cross product plus the thresholded
/// best-match map. Fails only on invalid configuration or when an input
/// yields no parsable rules; recoverable conditions (malformed declarations,
/// oversized pairing spaces, classes without occurrences) are absorbed by
/// the pipeline.
pub fn match_stylesheets(
    css_a: &str,
    css_b: &str,
    cfg: &MatchConfig,
) -> Result<MatchReport, MatchError> {
    cfg.validate()?;

    let styles_a = build_style_table(css_a);
    let styles_b = build_style_table(css_b);
    if styles_a.is_empty() {
        return Err(MatchError::EmptyStylesheet("A"));
    }
    if styles_b.is_empty() {
        return Err(MatchError::EmptyStylesheet("B"));
    }
    tracing::info!(
        selectors_a = styles_a.len(),
        selectors_b = styles_b.len(),
        "style tables built"
    );

    let pattern = token_pattern(cfg.class_token_len)?;
    let classes_a = extract_class_occurrences(&styles_a, &pattern);
    let classes_b = extract_class_occurrences(&styles_b, &pattern);
    tracing::info!(
        classes_a = classes_a.len(),
        classes_b = classes_b.len(),
        "class occurrences extracted"
    );

    let distances = build_selector_distances(&styles_a, &styles_b, cfg);
    tracing::info!(pairs = distances.len(), "selector distance matrix calculated");

    let all_pairs = class_distance_table(&classes_a, &classes_b, &distances, cfg);
    tracing::info!(pairs = all_pairs.len(), "class distance matrix calculated");

    let a_class_names: BTreeSet<String> = classes_a.keys().cloned().collect();
    let pairs = select_best_matches(&all_pairs, &a_class_names)
        .into_iter()
        .filter(|pair| pair.2 < cfg.distance_threshold)
        .map(|pair| (pair.0, pair.1))
        .collect();

    Ok(MatchReport { all_pairs, pairs })
}

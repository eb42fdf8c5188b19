//! Core data model for the matching pipeline.
//!
//! These types represent the artifacts that flow between pipeline stages.
//! They are designed to be:
//!
//! - **Serializable**: the final report is written verbatim as JSON.
//! - **Deterministic**: every mapping that is iterated during distance
//!   computation or output is a `BTreeMap`, so iteration order (and with it
//!   floating-point accumulation order) never depends on hasher state.
//! - **Read-only after construction**: each stage builds its output once and
//!   downstream stages only read it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Property name → raw textual value for one selector.
pub type DeclarationSet = BTreeMap<String, String>;

/// Joined selector text → declarations, one table per stylesheet.
///
/// Built by [`crate::stylesheet::build_style_table`]. Keys are the rule's
/// comma-joined selector fragments; duplicate keys merge last-write-wins per
/// property.
pub type StyleTable = BTreeMap<String, DeclarationSet>;

/// Class token → (selector → normalized usage weight in `(0, 1]`).
///
/// The weight of a class in one selector is the fraction of that selector's
/// class-token matches that are this class. Weights are normalized per
/// selector, not globally.
pub type ClassOccurrences = BTreeMap<String, BTreeMap<String, f64>>;

/// One entry of the full class-distance cross product.
///
/// Serializes as the JSON array `[class_a, class_b, distance]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassPair(pub String, pub String, pub f64);

/// Final result of a matching run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    /// The complete m×n cross product of class distances, ordered
    /// lexicographically by (class in A, class in B).
    pub all_pairs: Vec<ClassPair>,
    /// Best partner per class in A, restricted to entries whose distance is
    /// strictly below the configured threshold. A class in B may appear as
    /// the partner of several A classes.
    pub pairs: BTreeMap<String, String>,
}

/// Errors surfaced by the matching library.
///
/// Recoverable conditions (malformed rules, oversized pairing spaces,
/// degenerate declaration sets) are handled in place and never reach this
/// enum; only inputs that make the whole run meaningless do.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MatchError {
    /// A configuration parameter was rejected by [`crate::config::MatchConfig::validate`].
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// An input stylesheet yielded no parsable style rules; no partial
    /// output is meaningful without both complete style tables.
    #[error("stylesheet {0} contains no parsable style rules")]
    EmptyStylesheet(&'static str),
}

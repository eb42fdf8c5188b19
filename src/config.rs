//! Matcher configuration.
//!
//! The reference behavior is governed by three constants: the 20-character
//! class-token pattern, the 100 000 pairing ceiling, and the 0.1 distance
//! cutoff. They are fixed by default but exposed here as overridable,
//! validated parameters so callers (and the CLI) can tune them without
//! touching the engine.

use serde::{Deserialize, Serialize};

use crate::types::MatchError;

/// Tuning knobs for a matching run.
///
/// `MatchConfig` is cheap to clone and serde-friendly. The defaults
/// reproduce the reference behavior exactly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchConfig {
    /// Exact length, in word characters, of a class token. Selector text is
    /// scanned for word-boundary-delimited runs of exactly this length.
    #[serde(default = "MatchConfig::default_class_token_len")]
    pub class_token_len: usize,
    /// Upper bound on the number of injective selector pairings enumerated
    /// for one class pair. Above it, enumeration is skipped and the pair
    /// falls back to the maximum distance.
    #[serde(default = "MatchConfig::default_complexity_ceiling")]
    pub complexity_ceiling: u64,
    /// Strict upper bound on the distance of a reported match. A distance
    /// exactly equal to the threshold is excluded.
    #[serde(default = "MatchConfig::default_distance_threshold")]
    pub distance_threshold: f64,
    /// Compute the selector and class distance matrices with rayon. The
    /// per-pair computations are independent, so results are identical to
    /// the serial path.
    #[serde(default)]
    pub use_parallel: bool,
}

impl MatchConfig {
    pub(crate) fn default_class_token_len() -> usize {
        20
    }

    pub(crate) fn default_complexity_ceiling() -> u64 {
        100_000
    }

    pub(crate) fn default_distance_threshold() -> f64 {
        0.1
    }

    /// Validate the configuration for a run.
    pub fn validate(&self) -> Result<(), MatchError> {
        if self.class_token_len == 0 {
            return Err(MatchError::InvalidConfig(
                "class_token_len must be greater than zero".into(),
            ));
        }
        if self.complexity_ceiling == 0 {
            return Err(MatchError::InvalidConfig(
                "complexity_ceiling must be greater than zero".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.distance_threshold) {
            return Err(MatchError::InvalidConfig(
                "distance_threshold must be between 0.0 and 1.0".into(),
            ));
        }
        Ok(())
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            class_token_len: Self::default_class_token_len(),
            complexity_ceiling: Self::default_complexity_ceiling(),
            distance_threshold: Self::default_distance_threshold(),
            use_parallel: false,
        }
    }
}

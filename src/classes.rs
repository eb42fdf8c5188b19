//! Class occurrence extraction.
//!
//! Obfuscated class names are fixed-length word tokens; selector text is
//! scanned for them directly rather than parsed. Each selector distributes a
//! unit of weight across its class tokens: a class found `k` times among `n`
//! total token matches gets weight `k/n` for that selector. Selectors with
//! no token matches contribute nothing.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::MatchConfig;
use crate::types::{ClassOccurrences, MatchError, StyleTable};

static DEFAULT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\w{20}\b").expect("default class token pattern"));

/// Compile the class-token pattern for a token length.
///
/// Matches are word-boundary-delimited runs of exactly `token_len` word
/// characters, found non-overlapping left to right. The default length is
/// memoized; `Regex` clones share the compiled program.
pub fn token_pattern(token_len: usize) -> Result<Regex, MatchError> {
    if token_len == MatchConfig::default_class_token_len() {
        return Ok(DEFAULT_PATTERN.clone());
    }
    Regex::new(&format!(r"\b\w{{{token_len}}}\b"))
        .map_err(|err| MatchError::InvalidConfig(format!("class token pattern: {err}")))
}

/// Scan every selector of a style table for class tokens.
pub fn extract_class_occurrences(styles: &StyleTable, pattern: &Regex) -> ClassOccurrences {
    let mut classes = ClassOccurrences::new();
    for selector in styles.keys() {
        let mut counts: BTreeMap<&str, u32> = BTreeMap::new();
        let mut total = 0u32;
        for token in pattern.find_iter(selector) {
            *counts.entry(token.as_str()).or_insert(0) += 1;
            total += 1;
        }
        for (token, count) in counts {
            classes
                .entry(token.to_string())
                .or_default()
                .insert(selector.clone(), f64::from(count) / f64::from(total));
        }
    }
    classes
}

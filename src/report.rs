//! Artifact serialization.
//!
//! A run produces two JSON files: the complete class-distance cross product
//! for inspection, and the thresholded best-match map. Content is compact
//! JSON with deterministic ordering, so identical inputs produce
//! byte-identical artifacts.

use std::fs;
use std::io;
use std::path::Path;

use crate::types::MatchReport;

/// File name of the full cross-product artifact.
pub const ALL_PAIRS_FILE: &str = "all-pairs-dist.json";

/// File name of the thresholded best-match artifact.
pub const PAIRS_FILE: &str = "pairs.json";

/// Write both artifacts under `out_dir`, creating the directory if needed.
pub fn write_artifacts(report: &MatchReport, out_dir: &Path) -> io::Result<()> {
    fs::create_dir_all(out_dir)?;
    fs::write(
        out_dir.join(ALL_PAIRS_FILE),
        serde_json::to_string(&report.all_pairs)?,
    )?;
    fs::write(out_dir.join(PAIRS_FILE), serde_json::to_string(&report.pairs)?)?;
    Ok(())
}

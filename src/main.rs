use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use cssmatch::{MatchConfig, match_stylesheets, write_artifacts};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "cssmatch",
    about = "Match obfuscated CSS class names across two stylesheet builds"
)]
struct Args {
    /// Stylesheet for side A; each of its classes gets a best match in B
    stylesheet_a: PathBuf,

    /// Stylesheet for side B
    stylesheet_b: PathBuf,

    /// Directory for the JSON artifacts
    #[arg(long, default_value = "out", value_name = "DIR")]
    out_dir: PathBuf,

    /// Strict upper bound on the distance of a reported pair
    #[arg(long, default_value_t = MatchConfig::default().distance_threshold)]
    threshold: f64,

    /// Skip pairing enumeration for a class pair above this many combinations
    #[arg(long, default_value_t = MatchConfig::default().complexity_ceiling)]
    ceiling: u64,

    /// Class token length in word characters
    #[arg(long, default_value_t = MatchConfig::default().class_token_len)]
    token_len: usize,

    /// Compute the distance matrices in parallel
    #[arg(long)]
    parallel: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();
    let cfg = MatchConfig {
        class_token_len: args.token_len,
        complexity_ceiling: args.ceiling,
        distance_threshold: args.threshold,
        use_parallel: args.parallel,
    };

    let css_a = fs::read_to_string(&args.stylesheet_a)
        .with_context(|| format!("failed to read stylesheet {}", args.stylesheet_a.display()))?;
    let css_b = fs::read_to_string(&args.stylesheet_b)
        .with_context(|| format!("failed to read stylesheet {}", args.stylesheet_b.display()))?;

    let report = match_stylesheets(&css_a, &css_b, &cfg)?;
    write_artifacts(&report, &args.out_dir)
        .with_context(|| format!("failed to write artifacts to {}", args.out_dir.display()))?;

    tracing::info!(
        matched = report.pairs.len(),
        all_pairs = report.all_pairs.len(),
        out_dir = %args.out_dir.display(),
        "matching complete"
    );
    Ok(())
}

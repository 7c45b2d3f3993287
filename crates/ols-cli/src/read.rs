//! `ols read` - decode a pattern document back into bytes.

use std::fs;
use std::io::Write as _;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use ols_codec::LatticeReader;
use ols_core::StoragePattern;
use tracing::{info, warn};

/// Arguments for `ols read`.
#[derive(Args, Debug)]
pub struct ReadArgs {
    /// Pattern JSON document produced by `ols write`.
    pub pattern: PathBuf,

    /// Write the recovered payload here instead of stdout.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: ReadArgs) -> anyhow::Result<()> {
    let json = fs::read_to_string(&args.pattern)
        .with_context(|| format!("reading pattern from {}", args.pattern.display()))?;
    let pattern: StoragePattern = serde_json::from_str(&json).context("parsing pattern JSON")?;

    let result = LatticeReader::with_builtins().read(&pattern)?;

    info!(
        voxels = result.voxels_processed,
        corrected = result.corrected_errors,
        "pattern decoded"
    );
    if result.detected_uncorrectable > 0 {
        warn!(
            blocks = result.detected_uncorrectable,
            "uncorrectable errors detected; payload may be damaged"
        );
    }

    match &args.output {
        Some(path) => fs::write(path, &result.payload)
            .with_context(|| format!("writing payload to {}", path.display()))?,
        None => std::io::stdout().write_all(&result.payload)?,
    }
    Ok(())
}

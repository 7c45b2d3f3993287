//! `ols write` - encode a payload into a pattern document.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use ols_codec::LatticeWriter;
use tracing::info;

use crate::options::LatticeArgs;

/// Arguments for `ols write`.
#[derive(Args, Debug)]
pub struct WriteArgs {
    /// Payload as a literal string. Mutually exclusive with --input.
    #[arg(required_unless_present = "input", conflicts_with = "input")]
    pub data: Option<String>,

    /// Read the payload from a file instead.
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Write the pattern JSON here instead of stdout.
    #[arg(long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub lattice: LatticeArgs,
}

pub fn run(args: WriteArgs) -> anyhow::Result<()> {
    // Clap enforces exactly one payload source.
    let payload = match (&args.data, &args.input) {
        (Some(data), _) => data.clone().into_bytes(),
        (None, Some(path)) => {
            fs::read(path).with_context(|| format!("reading payload from {}", path.display()))?
        }
        (None, None) => anyhow::bail!("either DATA or --input is required"),
    };

    let writer = LatticeWriter::new(&args.lattice.config(), args.lattice.scheme()?)?;
    let pattern = writer.write(&payload)?;

    info!(
        voxels = pattern.voxel_count(),
        bits_per_voxel = pattern.bits_per_voxel(),
        encoded_bits = pattern.encoded_bit_length(),
        padding_bits = pattern.padding_bits(),
        ecc = pattern.ecc_name(),
        "pattern written"
    );

    let json = serde_json::to_string_pretty(&pattern)?;
    match &args.output {
        Some(path) => fs::write(path, json)
            .with_context(|| format!("writing pattern to {}", path.display()))?,
        None => println!("{json}"),
    }
    Ok(())
}

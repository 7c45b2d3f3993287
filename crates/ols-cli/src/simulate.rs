//! `ols simulate` - write, perturb, and read back in one run.

use clap::Args;
use ols_codec::{LatticeReader, LatticeWriter};
use ols_noise::GaussianNoise;
use tracing::info;

use crate::options::LatticeArgs;

/// Arguments for `ols simulate`.
#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Payload as a literal string.
    pub data: String,

    /// Gaussian standard deviation applied to intensity values.
    #[arg(long, default_value_t = 0.0)]
    pub intensity_noise: f64,

    /// Gaussian standard deviation applied to polarization angles.
    #[arg(long, default_value_t = 0.0)]
    pub polarization_noise: f64,

    /// Seed for reproducible noise. Omit for entropy.
    #[arg(long)]
    pub seed: Option<u64>,

    #[command(flatten)]
    pub lattice: LatticeArgs,
}

pub fn run(args: SimulateArgs) -> anyhow::Result<()> {
    let payload = args.data.as_bytes();

    let writer = LatticeWriter::new(&args.lattice.config(), args.lattice.scheme()?)?;
    let pattern = writer.write(payload)?;
    info!(
        voxels = pattern.voxel_count(),
        bits_per_voxel = pattern.bits_per_voxel(),
        encoded_bits = pattern.encoded_bit_length(),
        padding_bits = pattern.padding_bits(),
        "write phase complete"
    );

    let noise = GaussianNoise {
        intensity_std: args.intensity_noise,
        polarization_std: args.polarization_noise,
    };
    let measured = noise.apply(&pattern, args.seed)?;
    info!(
        intensity_std = args.intensity_noise,
        polarization_std = args.polarization_noise,
        seed = ?args.seed,
        "noise phase complete"
    );

    let result = LatticeReader::with_builtins().read(&measured)?;
    let matched = result.payload == payload;

    println!("voxels written        : {}", pattern.voxel_count());
    println!("corrected errors      : {}", result.corrected_errors);
    println!("detected uncorrectable: {}", result.detected_uncorrectable);
    println!(
        "recovered payload     : {}",
        String::from_utf8_lossy(&result.payload)
    );
    println!("roundtrip             : {}", if matched { "OK" } else { "MISMATCH" });

    if !matched {
        anyhow::bail!("round trip mismatch: recovered payload differs from input");
    }
    Ok(())
}

//! Shared lattice options and argument parsers.

use std::sync::Arc;

use anyhow::Context;
use clap::Args;
use ols_codec::LatticeConfig;
use ols_ecc::{ErrorCorrection, SchemeRegistry};

/// Lattice geometry and quantisation flags shared by `write` and
/// `simulate`.
#[derive(Args, Debug)]
pub struct LatticeArgs {
    /// Grid size as XxYxZ.
    #[arg(long, default_value = "64x64x8", value_parser = parse_grid)]
    pub grid: (u32, u32, u32),

    /// Intensity x polarization level counts, both powers of two.
    #[arg(long, default_value = "16x8", value_parser = parse_levels)]
    pub levels: (u32, u32),

    /// Voxel pitch in micrometres as XxYxZ.
    #[arg(long, default_value = "5.0x5.0x15.0", value_parser = parse_pitch)]
    pub pitch: (f64, f64, f64),

    /// Intensity range as lo,hi.
    #[arg(long, default_value = "0.15,1.0", value_parser = parse_range)]
    pub intensity_range: (f64, f64),

    /// Polarization angle range in radians as lo,hi.
    #[arg(long, default_value = "0.0,3.141592653589793", value_parser = parse_range)]
    pub polarization_range: (f64, f64),

    /// Error-correction scheme name.
    #[arg(long, default_value = "hamming74")]
    pub ecc: String,
}

impl LatticeArgs {
    /// Assemble the writer-side configuration.
    #[must_use]
    pub fn config(&self) -> LatticeConfig {
        LatticeConfig {
            grid_size: self.grid,
            voxel_pitch: self.pitch,
            intensity_levels: self.levels.0,
            intensity_range: self.intensity_range,
            polarization_states: self.levels.1,
            polarization_range: self.polarization_range,
        }
    }

    /// Resolve the requested ECC scheme from the built-in registry.
    pub fn scheme(&self) -> anyhow::Result<Arc<dyn ErrorCorrection>> {
        let registry = SchemeRegistry::with_builtins();
        registry
            .resolve(&self.ecc)
            .with_context(|| format!("available schemes: {}", registry.names().join(", ")))
    }
}

fn parse_grid(value: &str) -> Result<(u32, u32, u32), String> {
    let parts: Vec<&str> = value.split('x').collect();
    if parts.len() != 3 {
        return Err(format!("expected XxYxZ, got `{value}`"));
    }
    let parse = |part: &str| {
        part.parse::<u32>()
            .map_err(|err| format!("bad grid component `{part}`: {err}"))
    };
    Ok((parse(parts[0])?, parse(parts[1])?, parse(parts[2])?))
}

fn parse_levels(value: &str) -> Result<(u32, u32), String> {
    let parts: Vec<&str> = value.split('x').collect();
    if parts.len() != 2 {
        return Err(format!("expected IxP, got `{value}`"));
    }
    let parse = |part: &str| {
        part.parse::<u32>()
            .map_err(|err| format!("bad level count `{part}`: {err}"))
    };
    Ok((parse(parts[0])?, parse(parts[1])?))
}

fn parse_pitch(value: &str) -> Result<(f64, f64, f64), String> {
    let parts: Vec<&str> = value.split('x').collect();
    if parts.len() != 3 {
        return Err(format!("expected XxYxZ, got `{value}`"));
    }
    let parse = |part: &str| {
        part.parse::<f64>()
            .map_err(|err| format!("bad pitch component `{part}`: {err}"))
    };
    Ok((parse(parts[0])?, parse(parts[1])?, parse(parts[2])?))
}

fn parse_range(value: &str) -> Result<(f64, f64), String> {
    let parts: Vec<&str> = value.split(',').collect();
    if parts.len() != 2 {
        return Err(format!("expected lo,hi, got `{value}`"));
    }
    let parse = |part: &str| {
        part.trim()
            .parse::<f64>()
            .map_err(|err| format!("bad range bound `{part}`: {err}"))
    };
    Ok((parse(parts[0])?, parse(parts[1])?))
}

//! Lattice and quantisation configuration for the writer.

use std::f64::consts::PI;

/// Write-side configuration: lattice geometry plus the two quantisation
/// axes.
///
/// Plain data; [`LatticeWriter::new`] resolves it into validated domain
/// values, so an invalid configuration surfaces there rather than here.
///
/// [`LatticeWriter::new`]: crate::LatticeWriter::new
#[derive(Clone, Debug, PartialEq)]
pub struct LatticeConfig {
    /// Lattice dimensions `(nx, ny, nz)`.
    pub grid_size: (u32, u32, u32),

    /// Voxel spacing in micrometres. Metadata only.
    pub voxel_pitch: (f64, f64, f64),

    /// Intensity levels per voxel; a power of two.
    pub intensity_levels: u32,

    /// Physical intensity range `(lo, hi)`.
    pub intensity_range: (f64, f64),

    /// Polarization states per voxel; a power of two.
    pub polarization_states: u32,

    /// Physical polarization angle range `(lo, hi)`, radians.
    pub polarization_range: (f64, f64),
}

impl Default for LatticeConfig {
    fn default() -> Self {
        Self {
            grid_size: (64, 64, 32),
            voxel_pitch: (5.0, 5.0, 20.0),
            intensity_levels: 16,
            intensity_range: (0.15, 1.0),
            polarization_states: 8,
            polarization_range: (0.0, PI),
        }
    }
}

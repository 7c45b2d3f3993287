//! Error types for the core domain model.

use thiserror::Error;

/// Invalid construction parameters for domain values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterError {
    /// A physical quantity was NaN or infinite.
    #[error("{field} must be finite, got {value}")]
    NonFinite {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A range's lower bound was not strictly below its upper bound.
    #[error("range is not ordered: lo {lo} must be strictly below hi {hi}")]
    UnorderedRange { lo: f64, hi: f64 },

    /// A quantisation level count was not a power of two.
    #[error("quantisation levels must be a power of two, got {levels}")]
    NotPowerOfTwo { levels: u32 },

    /// A grid dimension was zero or above the per-axis cap.
    #[error("grid dimension {axis} must be in 1..={max}, got {value}")]
    GridDimension {
        axis: &'static str,
        value: u32,
        max: u32,
    },

    /// A voxel pitch component was zero, negative, or non-finite.
    #[error("voxel pitch {axis} must be positive and finite, got {value}")]
    Pitch { axis: &'static str, value: f64 },

    /// The payload exceeds the configured byte budget.
    #[error("payload of {len} bytes exceeds the {max}-byte limit")]
    PayloadTooLarge { len: usize, max: usize },

    /// Both quantisation axes carry a single level, so no bits fit.
    #[error("at least one quantisation axis must carry information")]
    NoInformativeAxis,
}

/// Bit stream length misalignment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BitError {
    /// The stream length is not a multiple of the required block size.
    #[error("bit stream length {len} is not a multiple of {multiple}")]
    InvalidLength { len: usize, multiple: usize },
}

/// Violations of the storage pattern invariants.
///
/// Raised when assembling a pattern (including deserialization) and by the
/// reader's pre-read revalidation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PatternError {
    /// A component value was itself invalid.
    #[error(transparent)]
    Parameter(#[from] ParameterError),

    /// Encoded length, padding, and voxel count disagree.
    #[error(
        "bit accounting mismatch: {encoded} encoded + {padding} padding bits \
         != {voxels} voxels x {bits_per_voxel} bits"
    )]
    BitAccounting {
        encoded: usize,
        padding: usize,
        voxels: usize,
        bits_per_voxel: u32,
    },

    /// More voxels than the lattice can hold.
    #[error("{voxels} voxels exceed the {capacity}-voxel lattice")]
    LatticeOverflow { voxels: usize, capacity: u64 },

    /// A voxel's coordinates fall outside the grid box.
    #[error("voxel {index} at ({x},{y},{z}) lies outside the {nx}x{ny}x{nz} grid")]
    VoxelOutsideGrid {
        index: usize,
        x: u32,
        y: u32,
        z: u32,
        nx: u32,
        ny: u32,
        nz: u32,
    },
}

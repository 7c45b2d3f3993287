//! Writer and reader error types.

use ols_core::{BitError, ParameterError, PatternError};
use ols_ecc::{EccError, UnknownScheme};
use thiserror::Error;

/// Failures while writing a payload into a pattern.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WriteError {
    /// A configuration value or the payload itself was invalid.
    #[error(transparent)]
    Parameter(#[from] ParameterError),

    /// The encoded payload needs more voxels than the lattice holds.
    #[error("lattice capacity exceeded: requires {required} voxels, grid holds {available}")]
    CapacityExceeded {
        /// Voxels the payload would need.
        required: u64,
        /// Voxels the grid provides.
        available: u64,
    },

    /// The ECC scheme rejected the bit stream.
    #[error(transparent)]
    Ecc(#[from] EccError),

    /// The assembled pattern failed its own invariants.
    #[error(transparent)]
    Pattern(#[from] PatternError),
}

/// Failures while reading a pattern back into bytes.
///
/// Every corrupt-pattern condition carries enough context to say which
/// invariant broke; detected-but-uncorrectable ECC blocks are NOT errors
/// and come back as counters in [`ReadResult`].
///
/// [`ReadResult`]: crate::ReadResult
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReadError {
    /// A structural invariant of the pattern is violated.
    #[error("corrupt pattern: {0}")]
    Corrupt(#[from] PatternError),

    /// The pattern names a scheme the registry does not know.
    #[error(transparent)]
    UnknownScheme(#[from] UnknownScheme),

    /// A voxel's stored coordinates disagree with its position in the
    /// list.
    #[error(
        "corrupt pattern: voxel {index} reports coordinates \
         ({x},{y},{z}) but lattice order expects ({expected_x},{expected_y},{expected_z})"
    )]
    CoordinateMismatch {
        index: usize,
        x: u32,
        y: u32,
        z: u32,
        expected_x: u32,
        expected_y: u32,
        expected_z: u32,
    },

    /// The declared payload cannot fit under the scheme's raw capacity.
    #[error(
        "corrupt pattern: declared payload of {declared_bits} bits exceeds \
         the scheme's raw capacity of {capacity_bits} bits"
    )]
    PayloadOverCapacity {
        declared_bits: usize,
        capacity_bits: usize,
    },

    /// The encoded stream length is not decodable by the named scheme.
    #[error("corrupt pattern: `{scheme}` cannot decode the encoded stream: {source}")]
    UndecodableStream {
        scheme: String,
        #[source]
        source: EccError,
    },

    /// The decoder returned fewer bits than the pattern declares.
    #[error("corrupt pattern: decoder returned {got} bits, pattern declares {declared}")]
    ShortDecode { declared: usize, got: usize },

    /// The decoded payload bits did not form whole bytes.
    #[error("corrupt pattern: {0}")]
    Bits(#[from] BitError),
}

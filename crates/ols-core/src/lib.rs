//! Core domain model for simulated 5D optical data storage.
//!
//! This crate defines the value objects shared by the writer and reader
//! sides of the codec:
//! - [`Voxel`] - a single lattice cell carrying intensity and polarization
//! - [`GridSize`] / [`VoxelPitch`] - lattice geometry
//! - [`Range`] / [`QuantAxis`] - quantisation between integer levels and
//!   physical values
//! - [`StoragePattern`] - the self-describing record a writer produces and
//!   a reader consumes
//! - [`bits`] - MSB-first conversions between bytes, bit streams, and
//!   per-voxel level fields
//!
//! All domain types are immutable after construction and validate their
//! invariants at construction time, including when rebuilt from the serde
//! dictionary projection.

#![forbid(unsafe_code)]

pub mod bits;
mod error;
mod pattern;
mod quantize;
pub mod validate;
mod voxel;

pub use error::{BitError, ParameterError, PatternError};
pub use pattern::{GridSize, StoragePattern, VoxelPitch};
pub use quantize::{QuantAxis, Range};
pub use validate::{MAX_GRID_DIM, MAX_PAYLOAD_BYTES};
pub use voxel::Voxel;

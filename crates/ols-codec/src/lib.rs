//! End-to-end codec for the simulated 5D optical storage channel.
//!
//! The write flow turns payload bytes into a [`StoragePattern`]:
//! bytes → bits → ECC encode → pad → quantise → voxel list. The read flow
//! inverts it, tolerating bounded measurement error through the pattern's
//! ECC scheme and reporting correction diagnostics alongside the payload.
//!
//! Both directions are pure, synchronous functions of their inputs; the
//! only sanctioned change to a pattern between write and read is
//! perturbation of voxel intensity/polarization by an external noise
//! model.
//!
//! [`StoragePattern`]: ols_core::StoragePattern

#![forbid(unsafe_code)]

mod config;
mod error;
mod golden;
mod reader;
mod writer;

pub use config::LatticeConfig;
pub use error::{ReadError, WriteError};
pub use reader::{LatticeReader, ReadResult};
pub use writer::LatticeWriter;

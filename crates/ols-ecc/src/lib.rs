//! Forward error correction for the optical lattice storage codec.
//!
//! Schemes are stateless capability sets behind the [`ErrorCorrection`]
//! trait: a stable name, block encode/decode, and the sizing arithmetic the
//! writer needs. A [`SchemeRegistry`] maps the name recorded in a storage
//! pattern back to the scheme at read time.
//!
//! Three schemes ship in the box:
//! - [`Identity`] (`"none"`) - passthrough
//! - [`Hamming74`] (`"hamming74"`) - corrects one flipped bit per 7-bit
//!   block
//! - [`Parity8`] (`"parity8"`) - detects (but does not correct) one
//!   flipped bit per 9-bit block

#![forbid(unsafe_code)]

mod error;
mod hamming;
mod identity;
mod parity;
mod registry;

pub use error::{EccError, UnknownScheme};
pub use hamming::Hamming74;
pub use identity::Identity;
pub use parity::Parity8;
pub use registry::SchemeRegistry;

/// Output of a decode pass: the recovered bits plus diagnostics.
///
/// The counters are diagnostics, not failures: a decode with nonzero
/// `detected_uncorrectable` still returns `Ok`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decoded {
    /// Recovered raw bits.
    pub bits: Vec<bool>,
    /// Blocks where a single-bit error was corrected.
    pub corrected_errors: usize,
    /// Blocks where an error was detected but could not be corrected.
    pub detected_uncorrectable: usize,
}

/// A forward-error-correction scheme.
///
/// Implementations are stateless; a single shared instance per name
/// suffices. Additional schemes plug in by implementing this trait and
/// registering under a unique name.
pub trait ErrorCorrection: Send + Sync + std::fmt::Debug {
    /// Stable identifier recorded in storage patterns.
    fn name(&self) -> &'static str;

    /// Encode raw bits into the redundant stream.
    ///
    /// # Errors
    /// Returns `EccError::InvalidLength` when the input is not aligned to
    /// the scheme's raw block size.
    fn encode(&self, bits: &[bool]) -> Result<Vec<bool>, EccError>;

    /// Decode an encoded stream back to raw bits with diagnostics.
    ///
    /// # Errors
    /// Returns `EccError::InvalidLength` when the input is not aligned to
    /// the scheme's encoded block size.
    fn decode(&self, bits: &[bool]) -> Result<Decoded, EccError>;

    /// Encoded-stream length for a raw bit count (used by the writer for
    /// sizing). Total: misaligned counts round up to whole blocks.
    fn encoded_len(&self, raw_bits: usize) -> usize;

    /// Raw bits recoverable from an encoded bit count.
    fn raw_capacity(&self, encoded_bits: usize) -> usize;
}

//! Passthrough scheme.

use crate::error::EccError;
use crate::{Decoded, ErrorCorrection};

/// The `"none"` scheme: no redundancy, no correction, never fails.
#[derive(Clone, Copy, Debug, Default)]
pub struct Identity;

impl ErrorCorrection for Identity {
    fn name(&self) -> &'static str {
        "none"
    }

    fn encode(&self, bits: &[bool]) -> Result<Vec<bool>, EccError> {
        Ok(bits.to_vec())
    }

    fn decode(&self, bits: &[bool]) -> Result<Decoded, EccError> {
        Ok(Decoded {
            bits: bits.to_vec(),
            corrected_errors: 0,
            detected_uncorrectable: 0,
        })
    }

    fn encoded_len(&self, raw_bits: usize) -> usize {
        raw_bits
    }

    fn raw_capacity(&self, encoded_bits: usize) -> usize {
        encoded_bits
    }
}

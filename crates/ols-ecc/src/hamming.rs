//! Hamming(7,4) single-error-correcting block code.

use crate::error::EccError;
use crate::{Decoded, ErrorCorrection};

/// The `"hamming74"` scheme: 4 raw bits become 7 encoded bits per block.
///
/// Codeword layout is the classic 1-indexed arrangement with parity at
/// positions 1, 2, 4 and data at 3, 5, 6, 7:
/// `[p1, p2, d1, p3, d2, d3, d4]`. Parity `p_k` covers every position
/// whose 1-indexed value has bit `k` set, so a nonzero decode syndrome is
/// exactly the 1-indexed position of a single flipped bit.
///
/// A double-bit error produces a syndrome indistinguishable from some
/// single-bit error and is silently miscorrected; this scheme never raises
/// `detected_uncorrectable`. That is the accepted limitation of
/// Hamming(7,4) without an overall parity bit.
#[derive(Clone, Copy, Debug, Default)]
pub struct Hamming74;

/// Raw bits per block.
const RAW_BLOCK: usize = 4;
/// Encoded bits per block.
const CODE_BLOCK: usize = 7;

impl ErrorCorrection for Hamming74 {
    fn name(&self) -> &'static str {
        "hamming74"
    }

    fn encode(&self, bits: &[bool]) -> Result<Vec<bool>, EccError> {
        if bits.len() % RAW_BLOCK != 0 {
            return Err(EccError::InvalidLength {
                len: bits.len(),
                multiple: RAW_BLOCK,
            });
        }
        let mut encoded = Vec::with_capacity(bits.len() / RAW_BLOCK * CODE_BLOCK);
        for chunk in bits.chunks_exact(RAW_BLOCK) {
            let (d1, d2, d3, d4) = (chunk[0], chunk[1], chunk[2], chunk[3]);
            let p1 = d1 ^ d2 ^ d4;
            let p2 = d1 ^ d3 ^ d4;
            let p3 = d2 ^ d3 ^ d4;
            encoded.extend_from_slice(&[p1, p2, d1, p3, d2, d3, d4]);
        }
        Ok(encoded)
    }

    fn decode(&self, bits: &[bool]) -> Result<Decoded, EccError> {
        if bits.len() % CODE_BLOCK != 0 {
            return Err(EccError::InvalidLength {
                len: bits.len(),
                multiple: CODE_BLOCK,
            });
        }
        let mut decoded = Vec::with_capacity(bits.len() / CODE_BLOCK * RAW_BLOCK);
        let mut corrected_errors = 0;
        for chunk in bits.chunks_exact(CODE_BLOCK) {
            let mut block = [
                chunk[0], chunk[1], chunk[2], chunk[3], chunk[4], chunk[5], chunk[6],
            ];
            let s1 = block[0] ^ block[2] ^ block[4] ^ block[6];
            let s2 = block[1] ^ block[2] ^ block[5] ^ block[6];
            let s3 = block[3] ^ block[4] ^ block[5] ^ block[6];
            let position = (usize::from(s3) << 2) | (usize::from(s2) << 1) | usize::from(s1);
            if position != 0 {
                block[position - 1] = !block[position - 1];
                corrected_errors += 1;
            }
            decoded.extend_from_slice(&[block[2], block[4], block[5], block[6]]);
        }
        Ok(Decoded {
            bits: decoded,
            corrected_errors,
            detected_uncorrectable: 0,
        })
    }

    fn encoded_len(&self, raw_bits: usize) -> usize {
        raw_bits.div_ceil(RAW_BLOCK) * CODE_BLOCK
    }

    fn raw_capacity(&self, encoded_bits: usize) -> usize {
        encoded_bits / CODE_BLOCK * RAW_BLOCK
    }
}

//! Even-parity-per-byte detection code.

use crate::error::EccError;
use crate::{Decoded, ErrorCorrection};

/// The `"parity8"` scheme: one even-parity bit appended to every 8 raw
/// bits, making 9-bit codewords.
///
/// Detection only: a block whose parity disagrees increments
/// `detected_uncorrectable` and its data bits pass through unchanged. Two
/// flips in one block cancel and go unnoticed.
#[derive(Clone, Copy, Debug, Default)]
pub struct Parity8;

/// Raw bits per block.
const RAW_BLOCK: usize = 8;
/// Encoded bits per block.
const CODE_BLOCK: usize = 9;

impl ErrorCorrection for Parity8 {
    fn name(&self) -> &'static str {
        "parity8"
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
            let parity = chunk.iter().fold(false, |acc, &bit| acc ^ bit);
            encoded.extend_from_slice(chunk);
            encoded.push(parity);
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
        let mut detected_uncorrectable = 0;
        for chunk in bits.chunks_exact(CODE_BLOCK) {
            let parity = chunk.iter().fold(false, |acc, &bit| acc ^ bit);
            if parity {
                detected_uncorrectable += 1;
            }
            decoded.extend_from_slice(&chunk[..RAW_BLOCK]);
        }
        Ok(Decoded {
            bits: decoded,
            corrected_errors: 0,
            detected_uncorrectable,
        })
    }

    fn encoded_len(&self, raw_bits: usize) -> usize {
        raw_bits.div_ceil(RAW_BLOCK) * CODE_BLOCK
    }

    fn raw_capacity(&self, encoded_bits: usize) -> usize {
        encoded_bits / CODE_BLOCK * RAW_BLOCK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn byte_bits(value: u8) -> Vec<bool> {
        (0..8).rev().map(|shift| (value >> shift) & 1 == 1).collect()
    }

    #[test]
    fn appends_even_parity() {
        // 0xA5 has four set bits: parity bit is 0.
        let encoded = Parity8.encode(&byte_bits(0xA5)).unwrap();
        assert_eq!(encoded.len(), 9);
        assert!(!encoded[8]);

        // 0x01 has one set bit: parity bit is 1.
        let encoded = Parity8.encode(&byte_bits(0x01)).unwrap();
        assert!(encoded[8]);
    }

    #[test]
    fn misaligned_input_rejected() {
        assert_eq!(
            Parity8.encode(&[true; 7]),
            Err(EccError::InvalidLength {
                len: 7,
                multiple: 8
            })
        );
        assert_eq!(
            Parity8.decode(&[true; 10]),
            Err(EccError::InvalidLength {
                len: 10,
                multiple: 9
            })
        );
    }

    #[test]
    fn detects_every_single_flip_in_every_block_value() {
        for value in 0u16..256 {
            #[allow(clippy::cast_possible_truncation)]
            let data = byte_bits(value as u8);
            let encoded = Parity8.encode(&data).unwrap();
            for flip in 0..9 {
                let mut corrupted = encoded.clone();
                corrupted[flip] = !corrupted[flip];
                let decoded = Parity8.decode(&corrupted).unwrap();
                assert_eq!(decoded.detected_uncorrectable, 1, "byte {value} flip {flip}");
                assert_eq!(decoded.corrected_errors, 0);
                // Data bits pass through exactly as received, flipped or not.
                assert_eq!(decoded.bits, corrupted[..8].to_vec());
            }
        }
    }

    #[test]
    fn clean_blocks_report_nothing() {
        let data: Vec<bool> = [0x00u8, 0xFF, 0x5A]
            .iter()
            .flat_map(|&byte| byte_bits(byte))
            .collect();
        let encoded = Parity8.encode(&data).unwrap();
        let decoded = Parity8.decode(&encoded).unwrap();
        assert_eq!(decoded.bits, data);
        assert_eq!(decoded.detected_uncorrectable, 0);
    }

    #[test]
    fn cancelling_double_flip_goes_unnoticed() {
        let encoded = Parity8.encode(&byte_bits(0x3C)).unwrap();
        let mut corrupted = encoded.clone();
        corrupted[0] = !corrupted[0];
        corrupted[5] = !corrupted[5];
        let decoded = Parity8.decode(&corrupted).unwrap();
        assert_eq!(decoded.detected_uncorrectable, 0);
        assert_ne!(decoded.bits, byte_bits(0x3C));
    }

    #[test]
    fn sizing() {
        assert_eq!(Parity8.encoded_len(0), 0);
        assert_eq!(Parity8.encoded_len(16), 18);
        assert_eq!(Parity8.encoded_len(9), 18);
        assert_eq!(Parity8.raw_capacity(18), 16);
        assert_eq!(Parity8.raw_capacity(8), 0);
    }
}

//! MSB-first conversions between bytes, bit streams, and level fields.
//!
//! MSB-first is the single bit-ordering convention of the whole codec:
//! byte-to-bit expansion, per-voxel field packing, and ECC block framing
//! all use it.

use crate::error::BitError;

/// Expand bytes into bits, MSB first (bit 7 of byte 0 comes out first).
#[must_use]
pub fn bytes_to_bits(data: &[u8]) -> Vec<bool> {
    let mut bits = Vec::with_capacity(data.len() * 8);
    for byte in data {
        for shift in (0..8).rev() {
            bits.push((byte >> shift) & 1 == 1);
        }
    }
    bits
}

/// Pack bits back into bytes, MSB first. Inverse of [`bytes_to_bits`].
///
/// # Errors
/// Returns `BitError::InvalidLength` when the stream is not a whole number
/// of bytes.
pub fn bits_to_bytes(bits: &[bool]) -> Result<Vec<u8>, BitError> {
    if bits.len() % 8 != 0 {
        return Err(BitError::InvalidLength {
            len: bits.len(),
            multiple: 8,
        });
    }
    let mut out = Vec::with_capacity(bits.len() / 8);
    for chunk in bits.chunks_exact(8) {
        let mut value = 0u8;
        for &bit in chunk {
            value = (value << 1) | u8::from(bit);
        }
        out.push(value);
    }
    Ok(out)
}

/// Interpret a bit slice as an MSB-first unsigned level index.
///
/// Voxel sub-fields never exceed 32 bits.
#[must_use]
pub fn bits_to_level(bits: &[bool]) -> u32 {
    debug_assert!(bits.len() <= 32);
    bits.iter().fold(0, |acc, &bit| (acc << 1) | u32::from(bit))
}

/// Render a level index as `width` bits, MSB first.
///
/// Inverse of [`bits_to_level`] for values below `2^width`.
#[must_use]
pub fn level_to_bits(level: u32, width: u32) -> Vec<bool> {
    debug_assert!(width == 32 || level < (1u32 << width) || width == 0);
    (0..width)
        .rev()
        .map(|shift| (level >> shift) & 1 == 1)
        .collect()
}

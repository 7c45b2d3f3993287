//! Property-based tests for the error-correction schemes.
//!
//! Complements the deterministic in-module grids with randomized coverage:
//! clean round-trips for every scheme, single-flip correction for Hamming,
//! and single-flip detection for Parity8.

use ols_ecc::{ErrorCorrection, Hamming74, Identity, Parity8};
use proptest::prelude::*;

// ─────────────────────────────────────────────────────────────────────────────
// Strategies
// ─────────────────────────────────────────────────────────────────────────────

/// Bit streams aligned to a raw block size.
fn aligned_bits(block: usize, max_blocks: usize) -> impl Strategy<Value = Vec<bool>> {
    (1..=max_blocks)
        .prop_flat_map(move |blocks| prop::collection::vec(any::<bool>(), blocks * block))
}

// ─────────────────────────────────────────────────────────────────────────────
// Clean round-trips
// ─────────────────────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn identity_roundtrip(bits in prop::collection::vec(any::<bool>(), 0..256)) {
        let encoded = Identity.encode(&bits).unwrap();
        prop_assert_eq!(encoded.len(), Identity.encoded_len(bits.len()));
        let decoded = Identity.decode(&encoded).unwrap();
        prop_assert_eq!(decoded.bits, bits);
        prop_assert_eq!(decoded.corrected_errors, 0);
        prop_assert_eq!(decoded.detected_uncorrectable, 0);
    }

    #[test]
    fn hamming_roundtrip(bits in aligned_bits(4, 64)) {
        let encoded = Hamming74.encode(&bits).unwrap();
        prop_assert_eq!(encoded.len(), Hamming74.encoded_len(bits.len()));
        prop_assert_eq!(Hamming74.raw_capacity(encoded.len()), bits.len());
        let decoded = Hamming74.decode(&encoded).unwrap();
        prop_assert_eq!(decoded.bits, bits);
        prop_assert_eq!(decoded.corrected_errors, 0);
    }

    #[test]
    fn parity_roundtrip(bits in aligned_bits(8, 32)) {
        let encoded = Parity8.encode(&bits).unwrap();
        prop_assert_eq!(encoded.len(), Parity8.encoded_len(bits.len()));
        let decoded = Parity8.decode(&encoded).unwrap();
        prop_assert_eq!(decoded.bits, bits);
        prop_assert_eq!(decoded.detected_uncorrectable, 0);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Error behavior
// ─────────────────────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn hamming_corrects_any_single_flip(
        bits in aligned_bits(4, 64),
        flip_seed in any::<usize>(),
    ) {
        let mut encoded = Hamming74.encode(&bits).unwrap();
        let flip = flip_seed % encoded.len();
        encoded[flip] = !encoded[flip];

        let decoded = Hamming74.decode(&encoded).unwrap();
        prop_assert_eq!(decoded.bits, bits);
        prop_assert_eq!(decoded.corrected_errors, 1);
        prop_assert_eq!(decoded.detected_uncorrectable, 0);
    }

    #[test]
    fn parity_detects_any_single_flip(
        bits in aligned_bits(8, 32),
        flip_seed in any::<usize>(),
    ) {
        let mut encoded = Parity8.encode(&bits).unwrap();
        let flip = flip_seed % encoded.len();
        encoded[flip] = !encoded[flip];

        let decoded = Parity8.decode(&encoded).unwrap();
        prop_assert_eq!(decoded.detected_uncorrectable, 1);
        prop_assert_eq!(decoded.corrected_errors, 0);
        // Received data bits come back verbatim.
        let block = flip / 9;
        for (index, &bit) in decoded.bits.iter().enumerate() {
            let source = index / 8 * 9 + index % 8;
            prop_assert_eq!(bit, encoded[source], "bit {} (flipped block {})", index, block);
        }
    }

    #[test]
    fn misaligned_streams_rejected(extra in 1usize..4, blocks in 0usize..16) {
        let bits = vec![false; blocks * 4 + extra];
        prop_assert!(Hamming74.encode(&bits).is_err());
    }
}

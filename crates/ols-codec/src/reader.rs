//! Pattern-to-payload decoding pipeline.

use ols_core::bits::{bits_to_bytes, level_to_bits};
use ols_core::StoragePattern;
use ols_ecc::SchemeRegistry;

use crate::error::ReadError;

/// Result of reading a pattern: the payload plus ECC diagnostics.
///
/// Nonzero counters are measurements, not failures: a read that corrected
/// or merely detected errors still succeeds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReadResult {
    /// The recovered payload.
    pub payload: Vec<u8>,
    /// Single-bit errors the ECC scheme corrected.
    pub corrected_errors: usize,
    /// Errors detected but not correctable by the scheme.
    pub detected_uncorrectable: usize,
    /// Voxels walked to reconstruct the bit stream.
    pub voxels_processed: usize,
}

/// Decodes storage patterns back into payload bytes.
pub struct LatticeReader {
    registry: SchemeRegistry,
}

impl LatticeReader {
    /// Build a reader resolving scheme names against `registry`.
    #[must_use]
    pub fn new(registry: SchemeRegistry) -> Self {
        Self { registry }
    }

    /// Reader over the built-in scheme registry.
    #[must_use]
    pub fn with_builtins() -> Self {
        Self::new(SchemeRegistry::with_builtins())
    }

    /// Decode a pattern, revalidating every invariant first.
    ///
    /// Voxel coordinates are not trusted: each voxel's stored coordinates
    /// must match the ones its list index derives, which pins lattice
    /// order across serialization.
    ///
    /// # Errors
    /// Returns `ReadError::Corrupt` / `CoordinateMismatch` /
    /// `PayloadOverCapacity` / `UndecodableStream` / `ShortDecode` for the
    /// corrupt-pattern conditions and `ReadError::UnknownScheme` when the
    /// recorded ECC name is not registered.
    pub fn read(&self, pattern: &StoragePattern) -> Result<ReadResult, ReadError> {
        pattern.validate()?;
        let scheme = self.registry.resolve(pattern.ecc_name())?;

        let declared_bits = pattern.data_length_bytes() * 8;
        let capacity_bits = scheme.raw_capacity(pattern.encoded_bit_length());
        if declared_bits > capacity_bits {
            return Err(ReadError::PayloadOverCapacity {
                declared_bits,
                capacity_bits,
            });
        }

        let grid_size = pattern.grid_size();
        let intensity_axis = pattern.intensity_axis();
        let polarization_axis = pattern.polarization_axis();
        let mut stream =
            Vec::with_capacity(pattern.voxel_count() * pattern.bits_per_voxel() as usize);
        for (index, voxel) in pattern.voxels().iter().enumerate() {
            let (x, y, z) = voxel.coordinates();
            let (expected_x, expected_y, expected_z) = grid_size.coordinates(index as u64);
            if (x, y, z) != (expected_x, expected_y, expected_z) {
                return Err(ReadError::CoordinateMismatch {
                    index,
                    x,
                    y,
                    z,
                    expected_x,
                    expected_y,
                    expected_z,
                });
            }
            let intensity_level = intensity_axis.physical_to_level(voxel.intensity());
            let polarization_level = polarization_axis.physical_to_level(voxel.polarization());
            stream.extend(level_to_bits(intensity_level, intensity_axis.bits()));
            stream.extend(level_to_bits(polarization_level, polarization_axis.bits()));
        }

        // Drop the padding from the tail before handing to the decoder.
        stream.truncate(pattern.encoded_bit_length());

        let decoded = scheme
            .decode(&stream)
            .map_err(|source| ReadError::UndecodableStream {
                scheme: pattern.ecc_name().to_owned(),
                source,
            })?;

        if decoded.bits.len() < declared_bits {
            return Err(ReadError::ShortDecode {
                declared: declared_bits,
                got: decoded.bits.len(),
            });
        }
        let payload = bits_to_bytes(&decoded.bits[..declared_bits])?;

        Ok(ReadResult {
            payload,
            corrected_errors: decoded.corrected_errors,
            detected_uncorrectable: decoded.detected_uncorrectable,
            voxels_processed: pattern.voxel_count(),
        })
    }
}

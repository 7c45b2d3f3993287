//! Payload-to-pattern encoding pipeline.

use std::sync::Arc;

use ols_core::bits::{bits_to_level, bytes_to_bits};
use ols_core::validate::validate_payload;
use ols_core::{GridSize, QuantAxis, Range, StoragePattern, Voxel, VoxelPitch};
use ols_ecc::ErrorCorrection;

use crate::config::LatticeConfig;
use crate::error::WriteError;

/// Encodes byte payloads into storage patterns.
///
/// Construction resolves and validates the configuration once; `write` is
/// then a pure function of the payload.
pub struct LatticeWriter {
    grid_size: GridSize,
    voxel_pitch: VoxelPitch,
    intensity_axis: QuantAxis,
    polarization_axis: QuantAxis,
    scheme: Arc<dyn ErrorCorrection>,
}

impl LatticeWriter {
    /// Build a writer from a configuration and an ECC scheme.
    ///
    /// # Errors
    /// Returns `WriteError::Parameter` when the grid, pitch, level counts,
    /// or ranges are invalid, or when both axes carry zero bits.
    pub fn new(
        config: &LatticeConfig,
        scheme: Arc<dyn ErrorCorrection>,
    ) -> Result<Self, WriteError> {
        let (nx, ny, nz) = config.grid_size;
        let (px, py, pz) = config.voxel_pitch;
        let grid_size = GridSize::new(nx, ny, nz)?;
        let voxel_pitch = VoxelPitch::new(px, py, pz)?;
        let intensity_axis = QuantAxis::new(
            config.intensity_levels,
            Range::new(config.intensity_range.0, config.intensity_range.1)?,
        )?;
        let polarization_axis = QuantAxis::new(
            config.polarization_states,
            Range::new(config.polarization_range.0, config.polarization_range.1)?,
        )?;
        if intensity_axis.bits() + polarization_axis.bits() == 0 {
            return Err(ols_core::ParameterError::NoInformativeAxis.into());
        }
        Ok(Self {
            grid_size,
            voxel_pitch,
            intensity_axis,
            polarization_axis,
            scheme,
        })
    }

    /// Information content of one voxel under this configuration.
    #[must_use]
    pub const fn bits_per_voxel(&self) -> u32 {
        self.intensity_axis.bits() + self.polarization_axis.bits()
    }

    /// Encode a payload into a fully populated storage pattern.
    ///
    /// The pattern records everything a reader needs: geometry, axes, the
    /// scheme name, and the bit accounting. An empty payload yields a
    /// valid zero-voxel pattern.
    ///
    /// # Errors
    /// Returns `WriteError::Parameter` for oversize payloads and
    /// `WriteError::CapacityExceeded` when the encoded stream needs more
    /// voxels than the lattice holds. The capacity check runs before any
    /// voxel allocation.
    pub fn write(&self, data: &[u8]) -> Result<StoragePattern, WriteError> {
        validate_payload(data)?;

        let bits_per_voxel = self.bits_per_voxel() as usize;
        let raw_bits = data.len() * 8;
        let encoded_bit_length = self.scheme.encoded_len(raw_bits);
        let voxel_count = encoded_bit_length.div_ceil(bits_per_voxel);
        let available = self.grid_size.volume();
        if voxel_count as u64 > available {
            return Err(WriteError::CapacityExceeded {
                required: voxel_count as u64,
                available,
            });
        }
        let padding_bits = voxel_count * bits_per_voxel - encoded_bit_length;

        let mut stream = self.scheme.encode(&bytes_to_bits(data))?;
        debug_assert_eq!(stream.len(), encoded_bit_length);
        stream.resize(stream.len() + padding_bits, false);

        let intensity_bits = self.intensity_axis.bits() as usize;
        let mut voxels = Vec::with_capacity(voxel_count);
        for (index, chunk) in stream.chunks_exact(bits_per_voxel).enumerate() {
            let (x, y, z) = self.grid_size.coordinates(index as u64);
            let intensity_level = bits_to_level(&chunk[..intensity_bits]);
            let polarization_level = bits_to_level(&chunk[intensity_bits..]);
            let voxel = Voxel::new(
                x,
                y,
                z,
                self.intensity_axis.level_to_physical(intensity_level),
                self.polarization_axis.level_to_physical(polarization_level),
            )?;
            voxels.push(voxel);
        }

        let pattern = StoragePattern::new(
            voxels,
            self.grid_size,
            self.voxel_pitch,
            self.intensity_axis,
            self.polarization_axis,
            self.scheme.name(),
            data.len(),
            encoded_bit_length,
            padding_bits,
        )?;
        Ok(pattern)
    }
}

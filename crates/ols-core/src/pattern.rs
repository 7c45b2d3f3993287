//! Lattice geometry and the self-describing storage pattern record.

use serde::{Deserialize, Serialize};

use crate::error::{ParameterError, PatternError};
use crate::quantize::{QuantAxis, Range};
use crate::validate::{validate_finite, MAX_GRID_DIM};
use crate::voxel::Voxel;

/// Lattice dimensions `nx x ny x nz`, each axis in `1..=10_000`.
///
/// Wire shape: `[nx, ny, nz]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "[u32; 3]", into = "[u32; 3]")]
pub struct GridSize {
    nx: u32,
    ny: u32,
    nz: u32,
}

impl GridSize {
    /// Construct a grid size, validating each axis.
    ///
    /// # Errors
    /// Returns `ParameterError::GridDimension` for zero or oversized axes.
    pub fn new(nx: u32, ny: u32, nz: u32) -> Result<Self, ParameterError> {
        for (axis, value) in [("nx", nx), ("ny", ny), ("nz", nz)] {
            if value == 0 || value > MAX_GRID_DIM {
                return Err(ParameterError::GridDimension {
                    axis,
                    value,
                    max: MAX_GRID_DIM,
                });
            }
        }
        Ok(Self { nx, ny, nz })
    }

    /// Voxels along x.
    #[must_use]
    pub const fn nx(&self) -> u32 {
        self.nx
    }

    /// Voxels along y.
    #[must_use]
    pub const fn ny(&self) -> u32 {
        self.ny
    }

    /// Voxels along z.
    #[must_use]
    pub const fn nz(&self) -> u32 {
        self.nz
    }

    /// Total addressable voxels.
    #[must_use]
    pub const fn volume(&self) -> u64 {
        self.nx as u64 * self.ny as u64 * self.nz as u64
    }

    /// Map a linear voxel index to lattice coordinates.
    ///
    /// x varies fastest, then y, then z. This mapping is the single source
    /// of truth for lattice order; writer and reader both derive
    /// coordinates from it.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn coordinates(&self, index: u64) -> (u32, u32, u32) {
        debug_assert!(index < self.volume());
        let plane = u64::from(self.nx) * u64::from(self.ny);
        let z = index / plane;
        let remainder = index % plane;
        let y = remainder / u64::from(self.nx);
        let x = remainder % u64::from(self.nx);
        (x as u32, y as u32, z as u32)
    }

    /// Whether the coordinates lie inside the grid box.
    #[must_use]
    pub const fn contains(&self, x: u32, y: u32, z: u32) -> bool {
        x < self.nx && y < self.ny && z < self.nz
    }
}

impl TryFrom<[u32; 3]> for GridSize {
    type Error = ParameterError;

    fn try_from([nx, ny, nz]: [u32; 3]) -> Result<Self, Self::Error> {
        Self::new(nx, ny, nz)
    }
}

impl From<GridSize> for [u32; 3] {
    fn from(grid: GridSize) -> Self {
        [grid.nx, grid.ny, grid.nz]
    }
}

/// Physical spacing between voxel centres, in micrometres.
///
/// Pure metadata: the pitch never affects encoding. Wire shape:
/// `[px, py, pz]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 3]", into = "[f64; 3]")]
pub struct VoxelPitch {
    px: f64,
    py: f64,
    pz: f64,
}

impl VoxelPitch {
    /// Construct a pitch, validating positivity and finiteness.
    ///
    /// # Errors
    /// Returns `ParameterError::Pitch` for non-positive or non-finite
    /// components.
    pub fn new(px: f64, py: f64, pz: f64) -> Result<Self, ParameterError> {
        for (axis, value) in [("px", px), ("py", py), ("pz", pz)] {
            validate_finite("voxel pitch", value)
                .map_err(|_| ParameterError::Pitch { axis, value })?;
            if value <= 0.0 {
                return Err(ParameterError::Pitch { axis, value });
            }
        }
        Ok(Self { px, py, pz })
    }

    /// Pitch along x.
    #[must_use]
    pub const fn px(&self) -> f64 {
        self.px
    }

    /// Pitch along y.
    #[must_use]
    pub const fn py(&self) -> f64 {
        self.py
    }

    /// Pitch along z.
    #[must_use]
    pub const fn pz(&self) -> f64 {
        self.pz
    }
}

impl TryFrom<[f64; 3]> for VoxelPitch {
    type Error = ParameterError;

    fn try_from([px, py, pz]: [f64; 3]) -> Result<Self, Self::Error> {
        Self::new(px, py, pz)
    }
}

impl From<VoxelPitch> for [f64; 3] {
    fn from(pitch: VoxelPitch) -> Self {
        [pitch.px, pitch.py, pitch.pz]
    }
}

/// The complete, self-describing record a writer produces and a reader
/// consumes.
///
/// A pattern is logically immutable between construction and read. The one
/// sanctioned change between write and read is measurement perturbation of
/// the voxels' physical values, which re-enters through [`with_voxels`]
/// and is therefore revalidated.
///
/// Construction enforces the structural invariants:
/// - both axes' level counts are powers of two (by `QuantAxis`)
/// - at least one axis carries information
/// - `encoded_bit_length + padding_bits == voxel_count * bits_per_voxel`
/// - `voxel_count` fits inside the lattice
/// - every voxel's coordinates lie inside the grid box
///
/// Whether the declared payload fits under the named ECC scheme's raw
/// capacity additionally requires scheme resolution; the reader checks it.
///
/// [`with_voxels`]: StoragePattern::with_voxels
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PatternDoc", into = "PatternDoc")]
pub struct StoragePattern {
    voxels: Vec<Voxel>,
    grid_size: GridSize,
    voxel_pitch: VoxelPitch,
    intensity_axis: QuantAxis,
    polarization_axis: QuantAxis,
    ecc_name: String,
    data_length_bytes: usize,
    encoded_bit_length: usize,
    padding_bits: usize,
}

impl StoragePattern {
    /// Assemble a pattern, validating every structural invariant.
    ///
    /// # Errors
    /// Returns `PatternError` when any invariant is violated.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        voxels: Vec<Voxel>,
        grid_size: GridSize,
        voxel_pitch: VoxelPitch,
        intensity_axis: QuantAxis,
        polarization_axis: QuantAxis,
        ecc_name: impl Into<String>,
        data_length_bytes: usize,
        encoded_bit_length: usize,
        padding_bits: usize,
    ) -> Result<Self, PatternError> {
        let pattern = Self {
            voxels,
            grid_size,
            voxel_pitch,
            intensity_axis,
            polarization_axis,
            ecc_name: ecc_name.into(),
            data_length_bytes,
            encoded_bit_length,
            padding_bits,
        };
        pattern.validate()?;
        Ok(pattern)
    }

    /// Re-check the structural invariants.
    ///
    /// Constructors call this; the reader calls it again before decoding
    /// since patterns can arrive through deserialization or a noise model.
    ///
    /// # Errors
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), PatternError> {
        let bits_per_voxel = self.bits_per_voxel();
        if bits_per_voxel == 0 {
            return Err(ParameterError::NoInformativeAxis.into());
        }
        let expected = self.voxels.len() * bits_per_voxel as usize;
        if self.encoded_bit_length + self.padding_bits != expected {
            return Err(PatternError::BitAccounting {
                encoded: self.encoded_bit_length,
                padding: self.padding_bits,
                voxels: self.voxels.len(),
                bits_per_voxel,
            });
        }
        if self.voxels.len() as u64 > self.grid_size.volume() {
            return Err(PatternError::LatticeOverflow {
                voxels: self.voxels.len(),
                capacity: self.grid_size.volume(),
            });
        }
        for (index, voxel) in self.voxels.iter().enumerate() {
            let (x, y, z) = voxel.coordinates();
            if !self.grid_size.contains(x, y, z) {
                return Err(PatternError::VoxelOutsideGrid {
                    index,
                    x,
                    y,
                    z,
                    nx: self.grid_size.nx(),
                    ny: self.grid_size.ny(),
                    nz: self.grid_size.nz(),
                });
            }
        }
        Ok(())
    }

    /// Rebuild the pattern with a new voxel list and identical metadata.
    ///
    /// This is the sanctioned path for measurement-noise models: the list
    /// must keep the same length and coordinates for the result to survive
    /// a read.
    ///
    /// # Errors
    /// Returns `PatternError` when the new list violates an invariant.
    pub fn with_voxels(&self, voxels: Vec<Voxel>) -> Result<Self, PatternError> {
        Self::new(
            voxels,
            self.grid_size,
            self.voxel_pitch,
            self.intensity_axis,
            self.polarization_axis,
            self.ecc_name.clone(),
            self.data_length_bytes,
            self.encoded_bit_length,
            self.padding_bits,
        )
    }

    /// The ordered voxel list.
    #[must_use]
    pub fn voxels(&self) -> &[Voxel] {
        &self.voxels
    }

    /// Number of voxels in the pattern.
    #[must_use]
    pub fn voxel_count(&self) -> usize {
        self.voxels.len()
    }

    /// Lattice dimensions.
    #[must_use]
    pub const fn grid_size(&self) -> GridSize {
        self.grid_size
    }

    /// Voxel spacing metadata.
    #[must_use]
    pub const fn voxel_pitch(&self) -> VoxelPitch {
        self.voxel_pitch
    }

    /// Intensity quantisation axis.
    #[must_use]
    pub const fn intensity_axis(&self) -> QuantAxis {
        self.intensity_axis
    }

    /// Polarization quantisation axis.
    #[must_use]
    pub const fn polarization_axis(&self) -> QuantAxis {
        self.polarization_axis
    }

    /// Name of the ECC scheme the writer used.
    #[must_use]
    pub fn ecc_name(&self) -> &str {
        &self.ecc_name
    }

    /// Original payload length in bytes.
    #[must_use]
    pub const fn data_length_bytes(&self) -> usize {
        self.data_length_bytes
    }

    /// Length of the ECC-encoded stream before padding.
    #[must_use]
    pub const fn encoded_bit_length(&self) -> usize {
        self.encoded_bit_length
    }

    /// Trailing zero bits appended to fill the last voxel.
    #[must_use]
    pub const fn padding_bits(&self) -> usize {
        self.padding_bits
    }

    /// Information content of a single voxel.
    #[must_use]
    pub const fn bits_per_voxel(&self) -> u32 {
        self.intensity_axis.bits() + self.polarization_axis.bits()
    }

    /// Total encoded capacity of the lattice in bits.
    #[must_use]
    pub const fn capacity_bits(&self) -> u64 {
        self.grid_size.volume() * self.bits_per_voxel() as u64
    }
}

/// Dictionary projection of a pattern, the persistence wire shape.
///
/// Field names and value shapes are fixed; `from_dict(to_dict(p)) == p`
/// including voxel order.
#[derive(Serialize, Deserialize)]
struct PatternDoc {
    grid_size: GridSize,
    voxel_pitch: VoxelPitch,
    intensity_range: Range,
    polarization_range: Range,
    intensity_levels: u32,
    polarization_states: u32,
    error_correction: String,
    data_length_bytes: usize,
    encoded_bit_length: usize,
    padding_bits: usize,
    voxels: Vec<Voxel>,
}

impl TryFrom<PatternDoc> for StoragePattern {
    type Error = PatternError;

    fn try_from(doc: PatternDoc) -> Result<Self, Self::Error> {
        let intensity_axis = QuantAxis::new(doc.intensity_levels, doc.intensity_range)
            .map_err(PatternError::from)?;
        let polarization_axis = QuantAxis::new(doc.polarization_states, doc.polarization_range)
            .map_err(PatternError::from)?;
        Self::new(
            doc.voxels,
            doc.grid_size,
            doc.voxel_pitch,
            intensity_axis,
            polarization_axis,
            doc.error_correction,
            doc.data_length_bytes,
            doc.encoded_bit_length,
            doc.padding_bits,
        )
    }
}

impl From<StoragePattern> for PatternDoc {
    fn from(pattern: StoragePattern) -> Self {
        Self {
            grid_size: pattern.grid_size,
            voxel_pitch: pattern.voxel_pitch,
            intensity_range: pattern.intensity_axis.range(),
            polarization_range: pattern.polarization_axis.range(),
            intensity_levels: pattern.intensity_axis.levels(),
            polarization_states: pattern.polarization_axis.levels(),
            error_correction: pattern.ecc_name,
            data_length_bytes: pattern.data_length_bytes,
            encoded_bit_length: pattern.encoded_bit_length,
            padding_bits: pattern.padding_bits,
            voxels: pattern.voxels,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn axis(levels: u32, lo: f64, hi: f64) -> QuantAxis {
        QuantAxis::new(levels, Range::new(lo, hi).unwrap()).unwrap()
    }

    fn small_pattern() -> StoragePattern {
        // 4 voxels of 2 bits each: 6 encoded bits + 2 padding.
        let grid = GridSize::new(2, 2, 1).unwrap();
        let voxels = (0..4u64)
            .map(|i| {
                let (x, y, z) = grid.coordinates(i);
                Voxel::new(x, y, z, 0.5, 1.0).unwrap()
            })
            .collect();
        StoragePattern::new(
            voxels,
            grid,
            VoxelPitch::new(5.0, 5.0, 15.0).unwrap(),
            axis(2, 0.0, 1.0),
            axis(2, 0.0, 2.0),
            "none",
            0,
            6,
            2,
        )
        .unwrap()
    }

    #[test]
    fn grid_size_validation() {
        assert!(GridSize::new(1, 1, 1).is_ok());
        assert!(GridSize::new(10_000, 10_000, 10_000).is_ok());
        assert!(matches!(
            GridSize::new(0, 1, 1),
            Err(ParameterError::GridDimension { axis: "nx", .. })
        ));
        assert!(matches!(
            GridSize::new(1, 10_001, 1),
            Err(ParameterError::GridDimension { axis: "ny", .. })
        ));
    }

    #[test]
    fn coordinates_x_fastest() {
        let grid = GridSize::new(3, 2, 2).unwrap();
        assert_eq!(grid.coordinates(0), (0, 0, 0));
        assert_eq!(grid.coordinates(1), (1, 0, 0));
        assert_eq!(grid.coordinates(2), (2, 0, 0));
        assert_eq!(grid.coordinates(3), (0, 1, 0));
        assert_eq!(grid.coordinates(5), (2, 1, 0));
        assert_eq!(grid.coordinates(6), (0, 0, 1));
        assert_eq!(grid.coordinates(11), (2, 1, 1));
    }

    #[test]
    fn coordinates_cover_full_grid_in_order() {
        let grid = GridSize::new(4, 3, 2).unwrap();
        let mut seen = Vec::new();
        for index in 0..grid.volume() {
            let (x, y, z) = grid.coordinates(index);
            assert!(grid.contains(x, y, z));
            seen.push((x, y, z));
        }
        // Every cell appears exactly once.
        let mut sorted = seen.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), grid.volume() as usize);
        // And x advances before y before z.
        assert_eq!(seen[0], (0, 0, 0));
        assert_eq!(seen[1], (1, 0, 0));
        assert_eq!(seen[4], (0, 1, 0));
        assert_eq!(seen[12], (0, 0, 1));
    }

    #[test]
    fn pitch_validation() {
        assert!(VoxelPitch::new(5.0, 5.0, 20.0).is_ok());
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                VoxelPitch::new(bad, 5.0, 20.0),
                Err(ParameterError::Pitch { axis: "px", .. })
            ));
        }
    }

    #[test]
    fn pattern_construction_succeeds() {
        let pattern = small_pattern();
        assert_eq!(pattern.voxel_count(), 4);
        assert_eq!(pattern.bits_per_voxel(), 2);
        assert_eq!(pattern.capacity_bits(), 8);
    }

    #[test]
    fn bit_accounting_mismatch_rejected() {
        let pattern = small_pattern();
        let result = StoragePattern::new(
            pattern.voxels().to_vec(),
            pattern.grid_size(),
            pattern.voxel_pitch(),
            pattern.intensity_axis(),
            pattern.polarization_axis(),
            "none",
            0,
            7, // 7 + 2 != 4 * 2
            2,
        );
        assert!(matches!(result, Err(PatternError::BitAccounting { .. })));
    }

    #[test]
    fn no_informative_axis_rejected() {
        let result = StoragePattern::new(
            vec![],
            GridSize::new(2, 2, 1).unwrap(),
            VoxelPitch::new(5.0, 5.0, 15.0).unwrap(),
            axis(1, 0.0, 1.0),
            axis(1, 0.0, 2.0),
            "none",
            0,
            0,
            0,
        );
        assert!(matches!(
            result,
            Err(PatternError::Parameter(ParameterError::NoInformativeAxis))
        ));
    }

    #[test]
    fn overfull_lattice_rejected() {
        let grid = GridSize::new(1, 1, 1).unwrap();
        let voxels = vec![
            Voxel::new(0, 0, 0, 0.5, 1.0).unwrap(),
            Voxel::new(0, 0, 0, 0.5, 1.0).unwrap(),
        ];
        let result = StoragePattern::new(
            voxels,
            grid,
            VoxelPitch::new(5.0, 5.0, 15.0).unwrap(),
            axis(2, 0.0, 1.0),
            axis(2, 0.0, 2.0),
            "none",
            0,
            4,
            0,
        );
        assert!(matches!(result, Err(PatternError::LatticeOverflow { .. })));
    }

    #[test]
    fn out_of_grid_voxel_rejected() {
        let grid = GridSize::new(2, 2, 1).unwrap();
        let voxels = vec![Voxel::new(5, 0, 0, 0.5, 1.0).unwrap()];
        let result = StoragePattern::new(
            voxels,
            grid,
            VoxelPitch::new(5.0, 5.0, 15.0).unwrap(),
            axis(2, 0.0, 1.0),
            axis(2, 0.0, 2.0),
            "none",
            0,
            2,
            0,
        );
        assert!(matches!(
            result,
            Err(PatternError::VoxelOutsideGrid { index: 0, x: 5, .. })
        ));
    }

    #[test]
    fn with_voxels_keeps_metadata() {
        let pattern = small_pattern();
        let perturbed: Vec<Voxel> = pattern
            .voxels()
            .iter()
            .map(|v| Voxel::new(v.x(), v.y(), v.z(), v.intensity() + 0.01, v.polarization()))
            .collect::<Result<_, _>>()
            .unwrap();
        let next = pattern.with_voxels(perturbed).unwrap();
        assert_eq!(next.grid_size(), pattern.grid_size());
        assert_eq!(next.ecc_name(), pattern.ecc_name());
        assert_eq!(next.voxel_count(), pattern.voxel_count());
        assert_ne!(next.voxels()[0].intensity(), pattern.voxels()[0].intensity());
    }

    #[test]
    fn dictionary_projection_roundtrip() {
        let pattern = small_pattern();
        let json = serde_json::to_string(&pattern).unwrap();
        let back: StoragePattern = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pattern);
    }

    #[test]
    fn dictionary_projection_field_names() {
        let pattern = small_pattern();
        let value = serde_json::to_value(&pattern).unwrap();
        let object = value.as_object().unwrap();
        for field in [
            "grid_size",
            "voxel_pitch",
            "intensity_range",
            "polarization_range",
            "intensity_levels",
            "polarization_states",
            "error_correction",
            "data_length_bytes",
            "encoded_bit_length",
            "padding_bits",
            "voxels",
        ] {
            assert!(object.contains_key(field), "missing {field}");
        }
        assert_eq!(value["grid_size"], serde_json::json!([2, 2, 1]));
        assert_eq!(value["error_correction"], "none");
        assert_eq!(value["voxels"][1][0], 1); // x of second voxel
    }

    #[test]
    fn tampered_projection_rejected() {
        let pattern = small_pattern();
        let mut value = serde_json::to_value(&pattern).unwrap();
        // Claim a larger encoded length than the voxels can hold.
        value["encoded_bit_length"] = serde_json::json!(1000);
        let result: Result<StoragePattern, _> = serde_json::from_value(value);
        assert!(result.is_err());
    }
}

//! Single-voxel value object.

use serde::{Deserialize, Serialize};

use crate::error::ParameterError;
use crate::validate::validate_finite;

/// Wire shape of a voxel: `[x, y, z, intensity, polarization]`.
type VoxelTuple = (u32, u32, u32, f64, f64);

/// A single storage voxel: integer lattice coordinates plus the two
/// measured physical attributes.
///
/// Immutable once constructed. Intensity and polarization must be finite;
/// NaN and infinities are rejected, including when deserializing.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "VoxelTuple", into = "VoxelTuple")]
pub struct Voxel {
    x: u32,
    y: u32,
    z: u32,
    intensity: f64,
    polarization: f64,
}

impl Voxel {
    /// Construct a voxel, validating the physical fields.
    ///
    /// # Errors
    /// Returns `ParameterError::NonFinite` when intensity or polarization
    /// is NaN or infinite.
    pub fn new(
        x: u32,
        y: u32,
        z: u32,
        intensity: f64,
        polarization: f64,
    ) -> Result<Self, ParameterError> {
        validate_finite("intensity", intensity)?;
        validate_finite("polarization", polarization)?;
        Ok(Self {
            x,
            y,
            z,
            intensity,
            polarization,
        })
    }

    /// Lattice x coordinate.
    #[must_use]
    pub const fn x(&self) -> u32 {
        self.x
    }

    /// Lattice y coordinate.
    #[must_use]
    pub const fn y(&self) -> u32 {
        self.y
    }

    /// Lattice z coordinate.
    #[must_use]
    pub const fn z(&self) -> u32 {
        self.z
    }

    /// All three lattice coordinates.
    #[must_use]
    pub const fn coordinates(&self) -> (u32, u32, u32) {
        (self.x, self.y, self.z)
    }

    /// Measured intensity.
    #[must_use]
    pub const fn intensity(&self) -> f64 {
        self.intensity
    }

    /// Measured polarization angle.
    #[must_use]
    pub const fn polarization(&self) -> f64 {
        self.polarization
    }
}

impl TryFrom<VoxelTuple> for Voxel {
    type Error = ParameterError;

    fn try_from((x, y, z, intensity, polarization): VoxelTuple) -> Result<Self, Self::Error> {
        Self::new(x, y, z, intensity, polarization)
    }
}

impl From<Voxel> for VoxelTuple {
    fn from(voxel: Voxel) -> Self {
        (
            voxel.x,
            voxel.y,
            voxel.z,
            voxel.intensity,
            voxel.polarization,
        )
    }
}

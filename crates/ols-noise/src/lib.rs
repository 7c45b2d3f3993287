//! Measurement-noise injection for storage simulations.
//!
//! The codec treats noise as an opaque perturbation between write and
//! read: same metadata, same voxel count and coordinates, only the
//! measured intensity/polarization values move. [`GaussianNoise`] is the
//! standard detector model; perturbed values clamp to the axis ranges the
//! way a saturating detector would.

#![forbid(unsafe_code)]

use ols_core::{PatternError, StoragePattern, Voxel};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use thiserror::Error;

/// Failures constructing or applying a noise model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NoiseError {
    /// A standard deviation was negative or non-finite.
    #[error("noise standard deviation must be finite and non-negative, got {value}")]
    InvalidStdDev {
        /// The rejected value.
        value: f64,
    },

    /// The perturbed voxel list no longer satisfied the pattern
    /// invariants.
    #[error(transparent)]
    Pattern(#[from] PatternError),
}

/// Zero-mean Gaussian perturbation of intensity and polarization.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GaussianNoise {
    /// Standard deviation applied to intensity values.
    pub intensity_std: f64,
    /// Standard deviation applied to polarization angles.
    pub polarization_std: f64,
}

impl GaussianNoise {
    /// Perturb a pattern's voxels, returning a new pattern with identical
    /// metadata.
    ///
    /// A `Some(seed)` makes the perturbation reproducible; `None` draws
    /// from OS entropy. Perturbed values clamp to the corresponding axis
    /// range, which also keeps every voxel finite and constructible.
    ///
    /// # Errors
    /// Returns `NoiseError::InvalidStdDev` for negative or non-finite
    /// standard deviations.
    pub fn apply(
        &self,
        pattern: &StoragePattern,
        seed: Option<u64>,
    ) -> Result<StoragePattern, NoiseError> {
        let intensity_noise = normal(self.intensity_std)?;
        let polarization_noise = normal(self.polarization_std)?;
        let mut rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        let intensity_range = pattern.intensity_axis().range();
        let polarization_range = pattern.polarization_axis().range();
        let noisy: Vec<Voxel> = pattern
            .voxels()
            .iter()
            .map(|voxel| {
                let intensity =
                    intensity_range.clamp(voxel.intensity() + intensity_noise.sample(&mut rng));
                let polarization = polarization_range
                    .clamp(voxel.polarization() + polarization_noise.sample(&mut rng));
                Voxel::new(voxel.x(), voxel.y(), voxel.z(), intensity, polarization)
                    .map_err(PatternError::from)
            })
            .collect::<Result<_, _>>()
            .map_err(NoiseError::from)?;

        Ok(pattern.with_voxels(noisy)?)
    }
}

fn normal(std_dev: f64) -> Result<Normal<f64>, NoiseError> {
    if !std_dev.is_finite() || std_dev < 0.0 {
        return Err(NoiseError::InvalidStdDev { value: std_dev });
    }
    Normal::new(0.0, std_dev).map_err(|_| NoiseError::InvalidStdDev { value: std_dev })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ols_core::{GridSize, QuantAxis, Range, VoxelPitch};

    fn test_pattern() -> StoragePattern {
        let grid = GridSize::new(4, 2, 1).unwrap();
        let voxels: Vec<Voxel> = (0..8u64)
            .map(|i| {
                let (x, y, z) = grid.coordinates(i);
                Voxel::new(x, y, z, 0.5, 1.5).unwrap()
            })
            .collect();
        StoragePattern::new(
            voxels,
            grid,
            VoxelPitch::new(5.0, 5.0, 15.0).unwrap(),
            QuantAxis::new(4, Range::new(0.0, 1.0).unwrap()).unwrap(),
            QuantAxis::new(4, Range::new(0.0, 3.0).unwrap()).unwrap(),
            "none",
            4,
            32,
            0,
        )
        .unwrap()
    }

    #[test]
    fn invalid_std_dev_rejected() {
        let pattern = test_pattern();
        for bad in [-0.1, f64::NAN, f64::INFINITY] {
            let noise = GaussianNoise {
                intensity_std: bad,
                polarization_std: 0.0,
            };
            assert!(matches!(
                noise.apply(&pattern, Some(1)),
                Err(NoiseError::InvalidStdDev { .. })
            ));
        }
    }

    #[test]
    fn zero_noise_is_identity() {
        let pattern = test_pattern();
        let noise = GaussianNoise {
            intensity_std: 0.0,
            polarization_std: 0.0,
        };
        let noisy = noise.apply(&pattern, Some(42)).unwrap();
        assert_eq!(noisy, pattern);
    }

    #[test]
    fn same_seed_same_perturbation() {
        let pattern = test_pattern();
        let noise = GaussianNoise {
            intensity_std: 0.05,
            polarization_std: 0.05,
        };
        let first = noise.apply(&pattern, Some(7)).unwrap();
        let second = noise.apply(&pattern, Some(7)).unwrap();
        assert_eq!(first, second);

        let different = noise.apply(&pattern, Some(8)).unwrap();
        assert_ne!(first, different);
    }

    #[test]
    fn metadata_and_coordinates_preserved() {
        let pattern = test_pattern();
        let noise = GaussianNoise {
            intensity_std: 0.2,
            polarization_std: 0.2,
        };
        let noisy = noise.apply(&pattern, Some(3)).unwrap();

        assert_eq!(noisy.grid_size(), pattern.grid_size());
        assert_eq!(noisy.ecc_name(), pattern.ecc_name());
        assert_eq!(noisy.encoded_bit_length(), pattern.encoded_bit_length());
        assert_eq!(noisy.voxel_count(), pattern.voxel_count());
        for (original, perturbed) in pattern.voxels().iter().zip(noisy.voxels()) {
            assert_eq!(original.coordinates(), perturbed.coordinates());
        }
    }

    #[test]
    fn perturbed_values_stay_in_range() {
        let pattern = test_pattern();
        let noise = GaussianNoise {
            intensity_std: 100.0,
            polarization_std: 100.0,
        };
        let noisy = noise.apply(&pattern, Some(11)).unwrap();
        for voxel in noisy.voxels() {
            assert!((0.0..=1.0).contains(&voxel.intensity()));
            assert!((0.0..=3.0).contains(&voxel.polarization()));
        }
    }
}

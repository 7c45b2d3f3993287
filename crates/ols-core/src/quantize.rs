//! Quantisation between integer levels and physical values.

use serde::{Deserialize, Serialize};

use crate::error::ParameterError;
use crate::validate::{validate_finite, validate_levels};

/// An ordered, finite physical range `[lo, hi]` with `lo < hi`.
///
/// Wire shape: `[lo, hi]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 2]", into = "[f64; 2]")]
pub struct Range {
    lo: f64,
    hi: f64,
}

impl Range {
    /// Construct a range, validating ordering and finiteness.
    ///
    /// # Errors
    /// Returns `ParameterError::NonFinite` or
    /// `ParameterError::UnorderedRange`.
    pub fn new(lo: f64, hi: f64) -> Result<Self, ParameterError> {
        validate_finite("range lo", lo)?;
        validate_finite("range hi", hi)?;
        if lo >= hi {
            return Err(ParameterError::UnorderedRange { lo, hi });
        }
        Ok(Self { lo, hi })
    }

    /// Lower bound.
    #[must_use]
    pub const fn lo(&self) -> f64 {
        self.lo
    }

    /// Upper bound.
    #[must_use]
    pub const fn hi(&self) -> f64 {
        self.hi
    }

    /// `hi - lo`; strictly positive by construction.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.hi - self.lo
    }

    /// Clamp a value into the range.
    #[must_use]
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.lo, self.hi)
    }
}

impl TryFrom<[f64; 2]> for Range {
    type Error = ParameterError;

    fn try_from([lo, hi]: [f64; 2]) -> Result<Self, Self::Error> {
        Self::new(lo, hi)
    }
}

impl From<Range> for [f64; 2] {
    fn from(range: Range) -> Self {
        [range.lo, range.hi]
    }
}

/// One quantisation axis: a power-of-two level count over a physical range.
///
/// `levels == 1` is a degenerate but valid axis: it carries zero bits and
/// its single level maps to the range's lower bound.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuantAxis {
    levels: u32,
    range: Range,
}

impl QuantAxis {
    /// Construct an axis, validating the level count.
    ///
    /// # Errors
    /// Returns `ParameterError::NotPowerOfTwo` for level counts that are
    /// not powers of two (including 0).
    pub fn new(levels: u32, range: Range) -> Result<Self, ParameterError> {
        validate_levels(levels)?;
        Ok(Self { levels, range })
    }

    /// Number of levels on this axis.
    #[must_use]
    pub const fn levels(&self) -> u32 {
        self.levels
    }

    /// The physical range.
    #[must_use]
    pub const fn range(&self) -> Range {
        self.range
    }

    /// Bits encoded per voxel on this axis: `log2(levels)`.
    #[must_use]
    pub const fn bits(&self) -> u32 {
        self.levels.trailing_zeros()
    }

    /// Map a level index to its physical value.
    ///
    /// Levels at or above `levels` clamp to the topmost level.
    #[must_use]
    pub fn level_to_physical(&self, level: u32) -> f64 {
        if self.levels == 1 {
            return self.range.lo;
        }
        let level = level.min(self.levels - 1);
        let step = self.range.width() / f64::from(self.levels - 1);
        self.range.lo + f64::from(level) * step
    }

    /// Map a measured physical value back to the nearest level index.
    ///
    /// Values outside the range clamp silently (detector saturation), and
    /// ties round half-away-from-zero.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn physical_to_level(&self, value: f64) -> u32 {
        if self.levels == 1 {
            return 0;
        }
        let clamped = self.range.clamp(value);
        let normalized = (clamped - self.range.lo) / self.range.width();
        let level = (normalized * f64::from(self.levels - 1)).round();
        (level as u32).min(self.levels - 1)
    }
}

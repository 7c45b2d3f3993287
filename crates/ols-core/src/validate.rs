//! Centralized validation predicates shared by writer and reader.

use crate::error::ParameterError;

/// Maximum payload size accepted by the writer (1 MiB).
pub const MAX_PAYLOAD_BYTES: usize = 1024 * 1024;

/// Maximum voxels along any single grid axis.
pub const MAX_GRID_DIM: u32 = 10_000;

/// Reject payloads above [`MAX_PAYLOAD_BYTES`].
///
/// # Errors
/// Returns `ParameterError::PayloadTooLarge` for oversize payloads.
pub fn validate_payload(data: &[u8]) -> Result<(), ParameterError> {
    if data.len() > MAX_PAYLOAD_BYTES {
        return Err(ParameterError::PayloadTooLarge {
            len: data.len(),
            max: MAX_PAYLOAD_BYTES,
        });
    }
    Ok(())
}

/// Reject level counts that are not powers of two.
///
/// Note that 1 is a power of two: a single-level axis is valid and encodes
/// zero bits.
///
/// # Errors
/// Returns `ParameterError::NotPowerOfTwo` otherwise (including 0).
pub fn validate_levels(levels: u32) -> Result<(), ParameterError> {
    if !levels.is_power_of_two() {
        return Err(ParameterError::NotPowerOfTwo { levels });
    }
    Ok(())
}

/// Reject NaN and infinite values.
///
/// # Errors
/// Returns `ParameterError::NonFinite` naming the offending field.
pub fn validate_finite(field: &'static str, value: f64) -> Result<(), ParameterError> {
    if !value.is_finite() {
        return Err(ParameterError::NonFinite { field, value });
    }
    Ok(())
}

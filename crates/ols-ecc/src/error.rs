//! Error-correction error types.

use thiserror::Error;

/// Errors from encoding or decoding a bit stream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EccError {
    /// The stream is not aligned to the scheme's block size.
    #[error("bit stream length {len} is not a multiple of the {multiple}-bit block")]
    InvalidLength {
        /// Offending stream length.
        len: usize,
        /// Required block multiple.
        multiple: usize,
    },
}

/// A pattern named a scheme the registry does not know.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown error-correction scheme `{name}`")]
pub struct UnknownScheme {
    /// The unresolvable name.
    pub name: String,
}

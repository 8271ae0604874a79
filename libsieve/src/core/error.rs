//! Error types for sieve

use std::fmt;

/// Result type for sieve operations
pub type SieveResult<T> = std::result::Result<T, SieveError>;

/// Error type for sieve operations
///
/// Every variant describes input the compressors refuse to touch. Numeric
/// corner cases that have a defined outcome (silent audio, a reconstruction
/// that collapses to zero) are not errors; see [`crate::audio::Guard`].
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum SieveError {
    /// Raster dimensions that cannot describe a rectangular grid
    InvalidDimensions {
        width: usize,
        height: usize,
        reason: &'static str,
    },
    /// Sample buffer length does not match the declared shape
    InvalidPixelData { expected: usize, actual: usize },
    /// NaN or infinity found before the forward transform
    NonFiniteSample { index: usize },
    /// Audio signal with no samples
    EmptySignal,
    /// Audio sample rate of zero
    InvalidSampleRate,
    /// Option value outside its accepted range
    InvalidOption { name: &'static str, reason: String },
}

impl SieveError {
    /// All current variants are malformed-input failures.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            SieveError::InvalidDimensions { .. }
                | SieveError::InvalidPixelData { .. }
                | SieveError::NonFiniteSample { .. }
                | SieveError::EmptySignal
                | SieveError::InvalidSampleRate
                | SieveError::InvalidOption { .. }
        )
    }
}

impl fmt::Display for SieveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SieveError::InvalidDimensions {
                width,
                height,
                reason,
            } => {
                write!(f, "Invalid dimensions {}x{}: {}", width, height, reason)
            }
            SieveError::InvalidPixelData { expected, actual } => {
                write!(f, "Expected {} samples, got {}", expected, actual)
            }
            SieveError::NonFiniteSample { index } => {
                write!(f, "Non-finite sample at index {}", index)
            }
            SieveError::EmptySignal => write!(f, "Audio signal has no samples"),
            SieveError::InvalidSampleRate => write!(f, "Sample rate must be greater than zero"),
            SieveError::InvalidOption { name, reason } => {
                write!(f, "Invalid option `{}`: {}", name, reason)
            }
        }
    }
}

impl std::error::Error for SieveError {}

//! Error types for spectrum analysis

use thiserror::Error;

/// Result alias carrying [`SpectrumError`]
pub type Result<T> = std::result::Result<T, SpectrumError>;

/// Errors raised by analyzer setup and per-block calls
#[derive(Error, Debug)]
pub enum SpectrumError {
    /// Block size is not a power of two of at least 2
    #[error("Sample count must be a power of two >= 2, got {0}")]
    InvalidSampleCount(usize),

    /// Sample rate is zero, negative or not finite
    #[error("Sample rate must be positive and finite, got {0}")]
    InvalidSampleRate(f64),

    /// A sample or window slice does not hold exactly N values
    #[error("Expected {expected} samples, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// The inverse real FFT rejected its buffers
    #[error("Inverse transform failed: {0}")]
    Transform(#[from] realfft::FftError),
}

/// Check that `n` is a usable transform size
pub(crate) fn validate_sample_count(n: usize) -> Result<()> {
    if n >= 2 && n.is_power_of_two() {
        Ok(())
    } else {
        Err(SpectrumError::InvalidSampleCount(n))
    }
}

//! Tone Spectrum - fixed-size magnitude spectra for pitch and tone detection
//!
//! A [`SpectrumAnalyzer`] is created once per window size and turns each block
//! of N samples into N/2 spectrum bins without allocating.

pub mod error;
pub mod spectrum;

pub use error::{Result, SpectrumError};
pub use spectrum::{AnalyzerConfig, SpectrumAnalyzer, SpectrumScale, WindowType};

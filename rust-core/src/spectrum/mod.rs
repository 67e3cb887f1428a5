//! Spectral analysis with FFT

pub mod fft;
pub mod windowing;
pub mod analysis;

pub use fft::SplitRealFft;
pub use windowing::{WindowType, generate_window};
pub use analysis::{AnalyzerConfig, SpectrumAnalyzer, SpectrumScale};

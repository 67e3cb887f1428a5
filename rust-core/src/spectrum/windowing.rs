//! Window functions applied before the transform
//!
//! Coefficients are generated once per analyzer so the per-block path only
//! multiplies.

use std::f64::consts::PI;

/// Window function types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowType {
    /// Hann window: w[n] = 0.5 - 0.5*cos(2πn/(M-1))
    Hann,

    /// Hamming window: w[n] = 0.54 - 0.46*cos(2πn/(M-1))
    Hamming,

    /// Blackman window: w[n] = 0.42 - 0.5*cos(2πn/(M-1)) + 0.08*cos(4πn/(M-1))
    Blackman,

    /// Rectangular window (samples pass through untouched)
    #[default]
    Rectangular,
}

/// Generate window coefficients
///
/// # Arguments
/// * `window_type` - Type of window function
/// * `length` - Number of samples (M)
///
/// # Returns
/// Vector of window coefficients w[n] for n = 0..M-1
pub fn generate_window(window_type: WindowType, length: usize) -> Vec<f64> {
    if length < 2 {
        return vec![1.0; length];
    }

    let span = (length - 1) as f64;
    let angle = |n: usize, harmonic: f64| harmonic * 2.0 * PI * n as f64 / span;

    match window_type {
        WindowType::Hann => (0..length)
            .map(|n| 0.5 - 0.5 * angle(n, 1.0).cos())
            .collect(),
        WindowType::Hamming => (0..length)
            .map(|n| 0.54 - 0.46 * angle(n, 1.0).cos())
            .collect(),
        WindowType::Blackman => (0..length)
            .map(|n| 0.42 - 0.5 * angle(n, 1.0).cos() + 0.08 * angle(n, 2.0).cos())
            .collect(),
        WindowType::Rectangular => vec![1.0; length],
    }
}

/// Amplitude correction factor for a window
///
/// Windowing lowers the coherent gain of a tone; multiplying the linear
/// magnitude by this factor restores it.
///
/// # Returns
/// `length / sum(w)`, exactly 1.0 for the rectangular window
pub fn window_correction_factor(coefficients: &[f64]) -> f64 {
    let sum: f64 = coefficients.iter().sum();
    if sum > 0.0 {
        coefficients.len() as f64 / sum
    } else {
        1.0
    }
}

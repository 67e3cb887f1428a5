//! Fixed-size spectrum analyzer
//!
//! Owns every table and buffer needed for one window size so repeated blocks
//! are analyzed without allocating.

use num_complex::Complex;
use realfft::{ComplexToReal, RealFftPlanner};
use std::sync::Arc;

use super::fft::SplitRealFft;
use super::windowing::{generate_window, window_correction_factor, WindowType};
use crate::error::{Result, SpectrumError};

/// Value reported per frequency bin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpectrumScale {
    /// Squared magnitude (|X[k]|/N)². Cheapest, preserves bin ordering
    #[default]
    Power,

    /// Linear magnitude |X[k]|/N
    Magnitude,
}

/// Spectrum analyzer configuration
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// FFT size N (number of samples, power of 2, at least 2)
    pub fft_size: usize,

    /// Window applied to each block before the transform
    pub window_type: WindowType,

    /// Squared or linear magnitude
    pub scale: SpectrumScale,

    /// Sample rate in Hz, only used to label bins
    pub sample_rate: f64,

    /// Apply amplitude correction for windowing
    pub apply_correction: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            fft_size: 2048,
            window_type: WindowType::Rectangular,
            scale: SpectrumScale::Power,
            sample_rate: 48000.0,
            apply_correction: true,
        }
    }
}

/// Buffers for the inverse round-trip check
struct InverseCheck {
    c2r: Arc<dyn ComplexToReal<f64>>,
    input: Vec<Complex<f64>>,
    output: Vec<f64>,
    scratch: Vec<Complex<f64>>,
}

impl InverseCheck {
    fn new(fft_size: usize) -> Self {
        let mut planner = RealFftPlanner::<f64>::new();
        let c2r = planner.plan_fft_inverse(fft_size);

        Self {
            input: c2r.make_input_vec(),
            output: c2r.make_output_vec(),
            scratch: c2r.make_scratch_vec(),
            c2r,
        }
    }
}

/// Spectrum analyzer for blocks of exactly `fft_size` samples
///
/// Create one per window size. The analyzer is `Send` but each instance
/// serves a single caller at a time.
pub struct SpectrumAnalyzer {
    config: AnalyzerConfig,
    fft_engine: SplitRealFft,
    window: Vec<f64>,

    /// 1/N times the window correction
    gain: f64,

    /// Last computed spectrum, N/2 bins
    output: Vec<f64>,

    inverse: InverseCheck,
}

impl SpectrumAnalyzer {
    /// Create new spectrum analyzer
    ///
    /// Fails with [`SpectrumError::InvalidSampleCount`] unless `fft_size` is a
    /// power of two >= 2.
    pub fn new(config: AnalyzerConfig) -> Result<Self> {
        if !(config.sample_rate.is_finite() && config.sample_rate > 0.0) {
            return Err(SpectrumError::InvalidSampleRate(config.sample_rate));
        }

        let fft_engine = SplitRealFft::new(config.fft_size)?;
        let window = generate_window(config.window_type, config.fft_size);
        let correction = if config.apply_correction {
            window_correction_factor(&window)
        } else {
            1.0
        };

        log::debug!(
            "Created spectrum analyzer: {} samples, {:?} window, {:?} scale",
            config.fft_size,
            config.window_type,
            config.scale
        );

        Ok(Self {
            gain: correction / config.fft_size as f64,
            output: vec![0.0; fft_engine.num_bins()],
            inverse: InverseCheck::new(config.fft_size),
            config,
            fft_engine,
            window,
        })
    }

    /// Create analyzer with default settings for `fft_size` samples
    pub fn with_size(fft_size: usize) -> Result<Self> {
        Self::new(AnalyzerConfig {
            fft_size,
            ..AnalyzerConfig::default()
        })
    }

    /// Analyze one block
    ///
    /// # Arguments
    /// * `samples` - Exactly `fft_size` time-domain samples
    ///
    /// # Returns
    /// N/2 non-negative values for bins 0 (DC) to N/2 - 1. Each value is
    /// `(c·|X[k]|/N)²` under [`SpectrumScale::Power`] or `c·|X[k]|/N` under
    /// [`SpectrumScale::Magnitude`], where `c` is the window correction. A
    /// constant signal `a` reports `a²` (or `|a|`) in bin 0; a sine of
    /// amplitude `A` on a bin centre reports `A²/4` (or `A/2`).
    pub fn compute_spectrum(&mut self, samples: &[f64]) -> Result<&[f64]> {
        let spectrum = self.fft_engine.process(samples, &self.window)?;
        let gain = self.gain;

        match self.config.scale {
            SpectrumScale::Power => {
                for (out, bin) in self.output.iter_mut().zip(spectrum) {
                    *out = bin.norm_sqr() * gain * gain;
                }
            }
            SpectrumScale::Magnitude => {
                for (out, bin) in self.output.iter_mut().zip(spectrum) {
                    *out = bin.norm() * gain;
                }
            }
        }

        log::trace!("Analyzed block of {} samples", samples.len());
        Ok(&self.output)
    }

    /// Last computed spectrum (zeros before the first block)
    pub fn spectrum(&self) -> &[f64] {
        &self.output
    }

    /// Analyze a block and invert it again
    ///
    /// Runs the inverse real FFT of the half spectrum into the auxiliary
    /// N-sample buffer.
    ///
    /// # Returns
    /// Maximum absolute difference between the reconstruction and the
    /// windowed input
    pub fn verify_round_trip(&mut self, samples: &[f64]) -> Result<f64> {
        self.compute_spectrum(samples)?;

        let check = &mut self.inverse;
        check.input.copy_from_slice(self.fft_engine.spectrum());
        // DC and Nyquist must be purely real for the inverse
        let last = check.input.len() - 1;
        check.input[0].im = 0.0;
        check.input[last].im = 0.0;

        check
            .c2r
            .process_with_scratch(&mut check.input, &mut check.output, &mut check.scratch)?;

        let scale = 1.0 / self.config.fft_size as f64;
        let max_error = samples
            .iter()
            .zip(&self.window)
            .zip(&check.output)
            .map(|((&x, &w), &y)| (x * w - y * scale).abs())
            .fold(0.0, f64::max);

        log::debug!("Round-trip max error: {:e}", max_error);
        Ok(max_error)
    }

    /// Last spectrum in dB relative to `reference` (linear amplitude)
    ///
    /// `reference` is clamped to at least 1e-10, like the bin values, so the
    /// output stays finite for zero or negative references.
    pub fn decibels(&self, reference: f64) -> impl Iterator<Item = f64> + '_ {
        let reference = reference.max(1e-10);
        let (factor, floor, reference) = match self.config.scale {
            SpectrumScale::Power => (10.0, 1e-20, reference * reference),
            SpectrumScale::Magnitude => (20.0, 1e-10, reference),
        };

        self.output
            .iter()
            .map(move |&value| factor * (value.max(floor) / reference).log10())
    }

    /// Index of the loudest bin in the last spectrum (lowest index on ties)
    pub fn peak_bin(&self) -> usize {
        let mut peak = 0;
        for (bin, &value) in self.output.iter().enumerate().skip(1) {
            if value > self.output[peak] {
                peak = bin;
            }
        }
        peak
    }

    /// Centre frequency of `bin` in Hz
    pub fn bin_frequency_hz(&self, bin: usize) -> f64 {
        self.fft_engine.bin_to_hz(bin, self.config.sample_rate)
    }

    /// Get frequency bins in Hz
    pub fn frequency_bins_hz(&self) -> Vec<f64> {
        (0..self.num_bins())
            .map(|bin| self.bin_frequency_hz(bin))
            .collect()
    }

    /// Get number of samples per block
    pub fn num_samples(&self) -> usize {
        self.fft_engine.fft_size()
    }

    /// Get number of frequency bins
    pub fn num_bins(&self) -> usize {
        self.fft_engine.num_bins()
    }

    /// Get current configuration
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Free all tables and buffers
    pub fn release(self) {
        log::debug!("Released spectrum analyzer: {} samples", self.config.fft_size);
    }
}

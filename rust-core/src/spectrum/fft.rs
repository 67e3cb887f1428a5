//! Real-input FFT built on a half-size complex transform
//!
//! The N real samples are packed into N/2 complex slots (even samples in the
//! real part, odd samples in the imaginary part), transformed with a complex
//! FFT of size N/2 and then untangled with a twiddle table into the half
//! spectrum X[0..=N/2].

use num_complex::Complex;
use rustfft::{Fft, FftPlanner};
use std::f64::consts::PI;
use std::sync::Arc;

use crate::error::{validate_sample_count, Result, SpectrumError};

/// Split real/imaginary FFT engine for a fixed sample count
pub struct SplitRealFft {
    /// FFT size N (number of real samples)
    fft_size: usize,

    /// Complex FFT processor of size N/2
    fft: Arc<dyn Fft<f64>>,

    /// W^k = exp(-2πik/N) for k = 0..N/2
    twiddles: Vec<Complex<f64>>,

    /// Packed halves: re = x[2m], im = x[2m+1]
    packed: Vec<Complex<f64>>,

    /// Reusable FFT scratch
    scratch: Vec<Complex<f64>>,

    /// Half spectrum X[k] for k = 0..=N/2 (Nyquist last)
    spectrum: Vec<Complex<f64>>,
}

impl SplitRealFft {
    /// Create new engine
    ///
    /// # Arguments
    /// * `fft_size` - Number of real samples N (power of two, N >= 2)
    pub fn new(fft_size: usize) -> Result<Self> {
        validate_sample_count(fft_size)?;
        let half = fft_size / 2;

        let mut planner = FftPlanner::<f64>::new();
        let fft = planner.plan_fft_forward(half);

        let twiddles = (0..half)
            .map(|k| Complex::from_polar(1.0, -2.0 * PI * k as f64 / fft_size as f64))
            .collect();
        let scratch = vec![Complex::new(0.0, 0.0); fft.get_inplace_scratch_len()];

        Ok(Self {
            fft_size,
            fft,
            twiddles,
            packed: vec![Complex::new(0.0, 0.0); half],
            scratch,
            spectrum: vec![Complex::new(0.0, 0.0); half + 1],
        })
    }

    /// Transform a weighted signal into the half spectrum
    ///
    /// # Arguments
    /// * `signal` - Exactly N samples
    /// * `window` - N weights applied sample by sample (all ones for none)
    ///
    /// Either slice having a length other than N is a
    /// [`SpectrumError::LengthMismatch`].
    ///
    /// # Returns
    /// Unnormalized X[k] for k = 0..=N/2, valid until the next call
    pub fn process(&mut self, signal: &[f64], window: &[f64]) -> Result<&[Complex<f64>]> {
        for len in [signal.len(), window.len()] {
            if len != self.fft_size {
                return Err(SpectrumError::LengthMismatch {
                    expected: self.fft_size,
                    actual: len,
                });
            }
        }

        for ((slot, pair), w) in self
            .packed
            .iter_mut()
            .zip(signal.chunks_exact(2))
            .zip(window.chunks_exact(2))
        {
            *slot = Complex::new(pair[0] * w[0], pair[1] * w[1]);
        }

        self.fft.process_with_scratch(&mut self.packed, &mut self.scratch);

        // Z[k] = E[k] + i·O[k] where E and O are the DFTs of the even and odd samples
        let half = self.packed.len();
        let quarter_turn = Complex::new(0.0, -0.5);
        for k in 0..half {
            let z = self.packed[k];
            let zc = self.packed[(half - k) % half].conj();
            let even = (z + zc) * 0.5;
            let odd = (z - zc) * quarter_turn;
            self.spectrum[k] = even + self.twiddles[k] * odd;
        }

        let dc = self.packed[0];
        self.spectrum[half] = Complex::new(dc.re - dc.im, 0.0);

        Ok(&self.spectrum)
    }

    /// Half spectrum from the last call to [`process`](Self::process)
    pub fn spectrum(&self) -> &[Complex<f64>] {
        &self.spectrum
    }

    /// Get FFT size
    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    /// Get number of reported bins (N/2, Nyquist excluded)
    pub fn num_bins(&self) -> usize {
        self.fft_size / 2
    }

    /// Convert bin index to frequency in Hz
    pub fn bin_to_hz(&self, bin: usize, sample_rate: f64) -> f64 {
        bin as f64 * sample_rate / self.fft_size as f64
    }
}

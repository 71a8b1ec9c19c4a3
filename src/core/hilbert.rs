//! Wide-band 90-degree phase shifter (Hilbert transform) via block FFT
//! processing with overlap-add reconstruction.
//!
//! For a real input stream the transformer produces two sample-aligned
//! streams: the original (shifted forward by [`HilbertTransformer::alignment_shift`]
//! samples) and its Hilbert transform. The aligned original is realized as a
//! plain buffer copy, so it is exact; the phase-shifted stream is computed
//! block-wise with a rectangular analysis window, the Hilbert bin multiplier,
//! and an overlap-add whose complementary ramps sum to identity outside the
//! initial transient.

use rustfft::num_complex::Complex;

use crate::core::fft::{FftPair, COMPLEX_ZERO};
use crate::core::types::Sample;
use crate::error::SqError;

/// Minimum supported FFT block size.
pub const MIN_BLOCK_SIZE: usize = 64;

/// Reconstruction weights below this are treated as uncovered positions.
const WEIGHT_EPSILON: f64 = 1e-9;

/// Both output streams of one transformer pass.
#[derive(Debug, Clone)]
pub struct HilbertOutput {
    /// The input shifted forward by the alignment shift (exact copy).
    pub original: Vec<Sample>,
    /// The 90-degree phase-shifted companion, sample-aligned with `original`.
    pub shifted: Vec<Sample>,
}

/// Streaming Hilbert transformer over fixed-size FFT blocks.
pub struct HilbertTransformer {
    block_size: usize,
    overlap: usize,
    hop: usize,
    input_offset: usize,
    fft: FftPair,
    /// Synthesis weights: ramp up over the first `overlap` positions, flat
    /// in the middle, ramp down over the last `overlap`. Adjacent blocks at
    /// hop distance have complementary ramps.
    weights: Vec<f64>,
}

impl HilbertTransformer {
    /// Creates a transformer for the given block size and overlap.
    ///
    /// # Errors
    ///
    /// Returns [`SqError::InvalidConfig`] when `block_size` is not a power of
    /// two, is below [`MIN_BLOCK_SIZE`], or when `overlap` is not strictly
    /// between 0 and `block_size`.
    pub fn new(block_size: usize, overlap: usize) -> Result<Self, SqError> {
        if !block_size.is_power_of_two() {
            return Err(SqError::InvalidConfig(format!(
                "block size must be a power of two, got {}",
                block_size
            )));
        }
        if block_size < MIN_BLOCK_SIZE {
            return Err(SqError::InvalidConfig(format!(
                "block size must be at least {}, got {}",
                MIN_BLOCK_SIZE, block_size
            )));
        }
        if overlap == 0 || overlap >= block_size {
            return Err(SqError::InvalidConfig(format!(
                "overlap must be in (0, {}), got {}",
                block_size, overlap
            )));
        }

        let ramp = (overlap + 1) as f64;
        let weights = (0..block_size)
            .map(|j| {
                let edge = (j + 1).min(block_size - j) as f64;
                (edge / ramp).min(1.0)
            })
            .collect();

        Ok(Self {
            block_size,
            overlap,
            hop: block_size - overlap,
            input_offset: overlap / 4,
            fft: FftPair::new(block_size),
            weights,
        })
    }

    /// FFT block size N.
    #[inline]
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Overlap O between consecutive analysis blocks.
    #[inline]
    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// Advance H = N - O between consecutive blocks.
    #[inline]
    pub fn hop(&self) -> usize {
        self.hop
    }

    /// Forward shift of the emitted streams relative to the input (O/4).
    #[inline]
    pub fn alignment_shift(&self) -> usize {
        self.input_offset
    }

    /// Processes a finite signal, producing both aligned output streams of
    /// the same length as the input. The trailing [`Self::alignment_shift`]
    /// samples flush the internal tails (zero padding past the input end).
    pub fn process(&self, input: &[Sample]) -> HilbertOutput {
        HilbertOutput {
            original: self.aligned_original(input),
            shifted: self.phase_shifted(input),
        }
    }

    /// The aligned-original stream alone: `out[i] = input[i + shift]`, exact.
    ///
    /// The encoder uses this for front channels, which need the alignment
    /// delay but no phase shift.
    pub fn aligned_original(&self, input: &[Sample]) -> Vec<Sample> {
        let n = input.len();
        let shift = self.input_offset;
        let mut out = vec![0.0; n];
        if n > shift {
            out[..n - shift].copy_from_slice(&input[shift..]);
        }
        out
    }

    /// The phase-shifted stream: block FFT, Hilbert multiplier, inverse FFT,
    /// overlap-add with window-sum normalization.
    fn phase_shifted(&self, input: &[Sample]) -> Vec<Sample> {
        let n = input.len();
        if n == 0 {
            return Vec::new();
        }

        let block = self.block_size;
        let lead = self.overlap;
        // Accumulator positions [lead + shift, lead + shift + n) feed the output.
        let needed = lead + n + self.input_offset;
        let mut acc = vec![0.0; needed + block];
        let mut weight_sum = vec![0.0; needed + block];
        let mut buf = vec![COMPLEX_ZERO; block];

        let mut start = 0;
        while start < needed {
            // Rectangular analysis block over the zero-extended input.
            for (j, slot) in buf.iter_mut().enumerate() {
                let pos = start + j;
                let sample = if pos >= lead && pos - lead < n {
                    input[pos - lead]
                } else {
                    0.0
                };
                *slot = Complex::new(sample, 0.0);
            }

            self.fft.forward(&mut buf);
            self.apply_hilbert_multiplier(&mut buf);
            self.fft.inverse(&mut buf);

            // The imaginary residue is numerical noise; only the real part
            // enters the overlap-add.
            for (j, v) in buf.iter().enumerate() {
                let w = self.weights[j];
                acc[start + j] += v.re * w;
                weight_sum[start + j] += w;
            }

            start += self.hop;
        }

        let base = lead + self.input_offset;
        (0..n)
            .map(|i| {
                let w = weight_sum[base + i];
                if w > WEIGHT_EPSILON {
                    acc[base + i] / w
                } else {
                    0.0
                }
            })
            .collect()
    }

    /// Zeroes DC and Nyquist, multiplies positive-frequency bins by -j and
    /// negative-frequency bins by +j.
    fn apply_hilbert_multiplier(&self, spectrum: &mut [Complex<f64>]) {
        let half = self.block_size / 2;
        spectrum[0] = COMPLEX_ZERO;
        spectrum[half] = COMPLEX_ZERO;
        for v in spectrum.iter_mut().take(half).skip(1) {
            *v = Complex::new(v.im, -v.re);
        }
        for v in spectrum.iter_mut().skip(half + 1) {
            *v = Complex::new(-v.im, v.re);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn sine(freq: f64, rate: f64, n: usize) -> Vec<f64> {
        (0..n).map(|i| (2.0 * PI * freq * i as f64 / rate).sin()).collect()
    }

    #[test]
    fn test_rejects_invalid_configuration() {
        assert!(HilbertTransformer::new(1000, 500).is_err());
        assert!(HilbertTransformer::new(32, 16).is_err());
        assert!(HilbertTransformer::new(1024, 0).is_err());
        assert!(HilbertTransformer::new(1024, 1024).is_err());
        assert!(HilbertTransformer::new(1024, 2000).is_err());
        assert!(HilbertTransformer::new(1024, 512).is_ok());
    }

    #[test]
    fn test_original_is_exact_shifted_copy() {
        let h = HilbertTransformer::new(256, 128).unwrap();
        let shift = h.alignment_shift();
        let input: Vec<f64> = (0..1000).map(|i| (i as f64 * 0.37).sin()).collect();
        let out = h.process(&input);

        assert_eq!(out.original.len(), input.len());
        for i in 0..input.len() - shift {
            assert_eq!(out.original[i], input[i + shift], "index {}", i);
        }
        for i in input.len() - shift..input.len() {
            assert_eq!(out.original[i], 0.0);
        }
    }

    #[test]
    fn test_zero_input_produces_zero_output() {
        let h = HilbertTransformer::new(1024, 512).unwrap();
        let out = h.process(&vec![0.0; 4096]);
        assert!(out.original.iter().all(|&s| s == 0.0));
        assert!(out.shifted.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_dc_is_blocked() {
        let h = HilbertTransformer::new(256, 128).unwrap();
        let n = 2048;
        let out = h.process(&vec![0.25; n]);
        // The onset and the zero-padded tail are step transients; DC
        // rejection applies in the steady-state region between them.
        for i in 256..n - 512 {
            assert!(out.shifted[i].abs() < 1e-10, "index {}: {}", i, out.shifted[i]);
        }
    }

    #[test]
    fn test_sine_becomes_negative_cosine() {
        let h = HilbertTransformer::new(1024, 512).unwrap();
        let shift = h.alignment_shift();
        let n = 8192;
        // Period 64 samples: mid-band, far from DC and Nyquist.
        let input = sine(1.0, 64.0, n);
        let out = h.process(&input);

        // Compare in the steady-state region, skipping the transform's
        // startup transient and the flushed tail.
        let skip = h.block_size();
        for i in skip..n - skip {
            let expected = -(2.0 * PI * (i + shift) as f64 / 64.0).cos();
            assert!(
                (out.shifted[i] - expected).abs() < 2e-3,
                "index {}: {} vs {}",
                i,
                out.shifted[i],
                expected
            );
        }
    }

    #[test]
    fn test_streams_are_sample_aligned() {
        // H{sin} = -cos: the shifted stream must lag the original by a
        // quarter period, independent of the block configuration.
        for (block, overlap) in [(512, 256), (1024, 512), (2048, 512)] {
            let h = HilbertTransformer::new(block, overlap).unwrap();
            let n = 8 * block;
            // Period 64 divides every block size and hop, so each interior
            // analysis block sees whole cycles and the transform is exact.
            let period = 64.0;
            let input = sine(1.0, period, n);
            let out = h.process(&input);

            let skip = block;
            let quarter = (period / 4.0) as usize;
            for i in skip..n - skip - quarter {
                assert!(
                    (out.shifted[i + quarter] - out.original[i]).abs() < 1e-6,
                    "block {} overlap {} index {}",
                    block,
                    overlap,
                    i
                );
            }
        }
    }
}

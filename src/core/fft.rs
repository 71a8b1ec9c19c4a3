//! FFT plan caching and shared constants.

use std::sync::Arc;

use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};

/// Zero-valued complex number, used for FFT buffer initialization.
pub const COMPLEX_ZERO: Complex<f64> = Complex::new(0.0, 0.0);

/// A matched forward/inverse FFT plan pair of one fixed length.
///
/// `rustfft` leaves both directions unnormalized; [`FftPair::inverse`]
/// applies the 1/N scaling so that a forward/inverse round trip is the
/// identity to floating-point tolerance. No other scaling convention is
/// exposed to callers.
pub struct FftPair {
    len: usize,
    forward: Arc<dyn Fft<f64>>,
    inverse: Arc<dyn Fft<f64>>,
}

impl FftPair {
    /// Plans forward and inverse transforms of the given length.
    pub fn new(len: usize) -> Self {
        let mut planner = FftPlanner::new();
        let forward = planner.plan_fft_forward(len);
        let inverse = planner.plan_fft_inverse(len);
        Self {
            len,
            forward,
            inverse,
        }
    }

    /// Transform length.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// In-place forward DFT.
    pub fn forward(&self, buf: &mut [Complex<f64>]) {
        debug_assert_eq!(buf.len(), self.len);
        self.forward.process(buf);
    }

    /// In-place inverse DFT, scaled by 1/N.
    pub fn inverse(&self, buf: &mut [Complex<f64>]) {
        debug_assert_eq!(buf.len(), self.len);
        self.inverse.process(buf);
        let scale = 1.0 / self.len as f64;
        for v in buf.iter_mut() {
            *v *= scale;
        }
    }
}

//! Codec configuration shared by the encoder and decoder.

use crate::core::hilbert::MIN_BLOCK_SIZE;
use crate::error::SqError;
use crate::matrix::steering::SteeringParams;

/// The SQ matrix scalar c = sqrt(2)/2.
pub const MATRIX_COEFF: f64 = std::f64::consts::FRAC_1_SQRT_2;

/// Default FFT block size.
pub const DEFAULT_BLOCK_SIZE: usize = 1024;
/// Default overlap (half the default block size).
pub const DEFAULT_OVERLAP: usize = 512;

/// Parameters for the SQ encoder and decoder.
#[derive(Debug, Clone)]
pub struct MatrixParams {
    /// FFT block size N (power of two, >= 64).
    pub block_size: usize,
    /// Overlap O between consecutive blocks, 0 < O < N.
    pub overlap: usize,
    /// Whether the decoder applies the gain-steering post-filter.
    pub logic_steering: bool,
    /// Steering stage configuration (used only when `logic_steering` is set).
    pub steering: SteeringParams,
}

impl Default for MatrixParams {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            overlap: DEFAULT_OVERLAP,
            logic_steering: false,
            steering: SteeringParams::default(),
        }
    }
}

impl MatrixParams {
    /// Creates params with the reference 1024/512 configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the FFT block size and resets the overlap to half of it.
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self.overlap = block_size / 2;
        self
    }

    /// Sets the overlap directly, overriding the default `block_size / 2`.
    pub fn with_overlap(mut self, overlap: usize) -> Self {
        self.overlap = overlap;
        self
    }

    /// Enables or disables the decoder's gain-steering post-filter.
    pub fn with_logic_steering(mut self, enabled: bool) -> Self {
        self.logic_steering = enabled;
        self
    }

    /// Replaces the steering stage configuration.
    pub fn with_steering(mut self, steering: SteeringParams) -> Self {
        self.steering = steering;
        self
    }

    /// Validates block size and overlap.
    ///
    /// # Errors
    ///
    /// Returns [`SqError::InvalidConfig`] for a block size that is not a
    /// power of two or is below the minimum, or an overlap outside
    /// `(0, block_size)`.
    pub fn validate(&self) -> Result<(), SqError> {
        if !self.block_size.is_power_of_two() || self.block_size < MIN_BLOCK_SIZE {
            return Err(SqError::InvalidConfig(format!(
                "block size must be a power of two >= {}, got {}",
                MIN_BLOCK_SIZE, self.block_size
            )));
        }
        if self.overlap == 0 || self.overlap >= self.block_size {
            return Err(SqError::InvalidConfig(format!(
                "overlap must be in (0, {}), got {}",
                self.block_size, self.overlap
            )));
        }
        Ok(())
    }

    /// Forward shift of a full encode-decode round trip: each stage advances
    /// its output by `overlap / 4`, so the cascade advances by `overlap / 2`.
    #[inline]
    pub fn round_trip_shift(&self) -> usize {
        self.overlap / 2
    }

    /// Total processing delay of the encode-decode chain in samples
    /// (768 for the reference 1024/512 configuration). This measures the
    /// internal block buffering, not the emitted-stream alignment; see
    /// [`Self::round_trip_shift`] for the latter.
    #[inline]
    pub fn codec_latency(&self) -> usize {
        self.block_size - self.overlap / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params_are_valid() {
        let p = MatrixParams::default();
        assert!(p.validate().is_ok());
        assert_eq!(p.block_size, 1024);
        assert_eq!(p.overlap, 512);
        assert!(!p.logic_steering);
    }

    #[test]
    fn test_builder() {
        let p = MatrixParams::new()
            .with_block_size(2048)
            .with_overlap(768)
            .with_logic_steering(true);
        assert_eq!(p.block_size, 2048);
        assert_eq!(p.overlap, 768);
        assert!(p.logic_steering);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_block_size_resets_overlap() {
        let p = MatrixParams::new().with_block_size(4096);
        assert_eq!(p.overlap, 2048);
    }

    #[test]
    fn test_validation_rejections() {
        assert!(MatrixParams::new().with_block_size(1000).validate().is_err());
        assert!(MatrixParams::new().with_overlap(0).validate().is_err());
        assert!(MatrixParams::new().with_overlap(1024).validate().is_err());
        assert!(MatrixParams::new().with_block_size(32).validate().is_err());
    }

    #[test]
    fn test_reference_latency_figures() {
        let p = MatrixParams::default();
        assert_eq!(p.round_trip_shift(), 256);
        assert_eq!(p.codec_latency(), 768);
    }
}

//! Core types shared across the crate: samples and multi-channel frames.

use crate::error::SqError;

/// A single audio sample (64-bit float, nominal range -1.0 to 1.0).
pub type Sample = f64;

/// Index of each channel in a quadraphonic frame.
pub const LF: usize = 0;
/// Right front.
pub const RF: usize = 1;
/// Left back.
pub const LB: usize = 2;
/// Right back.
pub const RB: usize = 3;

/// A multi-channel audio frame with planar (non-interleaved) storage.
///
/// Every channel holds at least `num_samples` samples; the codec only reads
/// and writes the first `num_samples` of each.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioFrame {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Per-channel sample data.
    pub channels: Vec<Vec<Sample>>,
    /// Number of valid samples per channel.
    pub num_samples: usize,
}

impl AudioFrame {
    /// Creates a frame from planar channel data, validating its invariants.
    pub fn new(sample_rate: u32, channels: Vec<Vec<Sample>>, num_samples: usize) -> Result<Self, SqError> {
        if sample_rate == 0 {
            return Err(SqError::ShapeMismatch("sample rate must be positive".to_string()));
        }
        for (ch, data) in channels.iter().enumerate() {
            if data.len() < num_samples {
                return Err(SqError::ShapeMismatch(format!(
                    "channel {} has {} samples, want at least {}",
                    ch,
                    data.len(),
                    num_samples
                )));
            }
        }
        Ok(Self {
            sample_rate,
            channels,
            num_samples,
        })
    }

    /// Creates a frame from equal-length channels, inferring the sample count.
    pub fn from_channels(sample_rate: u32, channels: Vec<Vec<Sample>>) -> Result<Self, SqError> {
        let num_samples = channels.iter().map(|c| c.len()).min().unwrap_or(0);
        Self::new(sample_rate, channels, num_samples)
    }

    /// Creates an all-zero frame.
    pub fn silence(sample_rate: u32, num_channels: usize, num_samples: usize) -> Self {
        Self {
            sample_rate,
            channels: vec![vec![0.0; num_samples]; num_channels],
            num_samples,
        }
    }

    /// Returns the number of channels.
    #[inline]
    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Returns a channel's valid samples.
    #[inline]
    pub fn channel(&self, ch: usize) -> &[Sample] {
        &self.channels[ch][..self.num_samples]
    }

    /// Returns the duration in seconds.
    #[inline]
    pub fn duration_secs(&self) -> f64 {
        self.num_samples as f64 / self.sample_rate as f64
    }

    /// Verifies the frame has exactly `expected` channels.
    pub fn expect_channels(&self, expected: usize) -> Result<(), SqError> {
        let actual = self.num_channels();
        if actual != expected {
            return Err(SqError::ChannelMismatch { expected, actual });
        }
        Ok(())
    }
}

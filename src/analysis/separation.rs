//! Channel separation analysis for decoded quad material.
//!
//! Reports per-channel levels and how far the dominant channel sits above
//! the rest. Useful for judging how much of the encoded field a decode
//! recovers, and for comparing the basic matrix against the steered decode.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::types::AudioFrame;
use crate::error::SqError;
use crate::matrix::{MatrixParams, SqDecoder};

/// Level floor used when a channel is fully silent, in dBFS.
const SILENCE_DB: f64 = -120.0;

/// Channel labels in frame order.
const CHANNEL_NAMES: [&str; 4] = ["LF", "RF", "LB", "RB"];

/// Per-channel level and separation figures for a decoded quad frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeparationReport {
    /// Sample rate of the analyzed material.
    pub sample_rate: u32,
    /// Number of samples analyzed.
    pub num_samples: usize,
    /// RMS level per channel in dBFS, frame order (LF, RF, LB, RB).
    pub channel_rms_db: [f64; 4],
    /// Index of the loudest channel.
    pub dominant: usize,
    /// Dominant level minus each channel's level, in dB (0.0 for the
    /// dominant channel itself).
    pub separation_db: [f64; 4],
}

impl SeparationReport {
    /// Name of the dominant channel.
    pub fn dominant_name(&self) -> &'static str {
        CHANNEL_NAMES[self.dominant]
    }
}

impl fmt::Display for SeparationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Separation analysis ({} samples at {} Hz)",
            self.num_samples, self.sample_rate
        )?;
        writeln!(f, "Dominant channel: {}", self.dominant_name())?;
        for ch in 0..4 {
            writeln!(
                f,
                "  {}: {:>7.2} dBFS  (separation {:>6.2} dB)",
                CHANNEL_NAMES[ch], self.channel_rms_db[ch], self.separation_db[ch]
            )?;
        }
        Ok(())
    }
}

/// Analyzes an already-decoded 4-channel frame.
pub fn analyze_frame(frame: &AudioFrame) -> Result<SeparationReport, SqError> {
    frame.expect_channels(4)?;

    let mut channel_rms_db = [SILENCE_DB; 4];
    for ch in 0..4 {
        channel_rms_db[ch] = rms_db(frame.channel(ch));
    }

    let mut dominant = 0;
    for ch in 1..4 {
        if channel_rms_db[ch] > channel_rms_db[dominant] {
            dominant = ch;
        }
    }

    let mut separation_db = [0.0; 4];
    for ch in 0..4 {
        separation_db[ch] = channel_rms_db[dominant] - channel_rms_db[ch];
    }

    Ok(SeparationReport {
        sample_rate: frame.sample_rate,
        num_samples: frame.num_samples,
        channel_rms_db,
        dominant,
        separation_db,
    })
}

/// Decodes a stereo frame with the given parameters and analyzes the result.
pub fn analyze_stereo(frame: &AudioFrame, params: &MatrixParams) -> Result<SeparationReport, SqError> {
    let decoder = SqDecoder::new(params)?;
    let decoded = decoder.process(frame)?;
    analyze_frame(&decoded)
}

/// RMS of a signal in dBFS, floored at silence for empty or zero input.
fn rms_db(signal: &[f64]) -> f64 {
    if signal.is_empty() {
        return SILENCE_DB;
    }
    let mean_sq: f64 = signal.iter().map(|&s| s * s).sum::<f64>() / signal.len() as f64;
    if mean_sq <= 0.0 {
        return SILENCE_DB;
    }
    (10.0 * mean_sq.log10()).max(SILENCE_DB)
}

//! Test-signal generation.
//!
//! Produces deterministic sinusoid material for listening tests and for the
//! `generate-test` CLI subcommand. Each quad channel gets its own frequency
//! so a decoded file makes the channel mapping audible.

use std::f64::consts::PI;

use crate::core::types::{AudioFrame, Sample};

/// Default generator amplitude, leaving headroom below full scale.
const DEFAULT_AMPLITUDE: f64 = 0.5;

/// Per-channel test frequencies in Hz, frame order (LF, RF, LB, RB).
const QUAD_TEST_FREQS: [f64; 4] = [440.0, 880.0, 330.0, 660.0];

/// Generates a sine wave.
pub fn sine(freq_hz: f64, amplitude: f64, sample_rate: u32, num_samples: usize) -> Vec<Sample> {
    (0..num_samples)
        .map(|i| amplitude * (2.0 * PI * freq_hz * i as f64 / sample_rate as f64).sin())
        .collect()
}

/// Generates a logarithmic frequency sweep.
pub fn log_sweep(
    start_hz: f64,
    end_hz: f64,
    amplitude: f64,
    sample_rate: u32,
    num_samples: usize,
) -> Vec<Sample> {
    if num_samples == 0 || start_hz <= 0.0 || end_hz <= 0.0 {
        return vec![0.0; num_samples];
    }
    let duration = num_samples as f64 / sample_rate as f64;
    let k = (end_hz / start_hz).ln() / duration;
    if k.abs() < 1e-12 {
        return sine(start_hz, amplitude, sample_rate, num_samples);
    }
    (0..num_samples)
        .map(|i| {
            let t = i as f64 / sample_rate as f64;
            // Phase is the integral of the instantaneous frequency.
            let phase = 2.0 * PI * start_hz * ((k * t).exp() - 1.0) / k;
            amplitude * phase.sin()
        })
        .collect()
}

/// Builds a 4-channel test frame with one distinct sinusoid per channel.
pub fn quad_test_frame(sample_rate: u32, seconds: f64) -> AudioFrame {
    let n = (sample_rate as f64 * seconds) as usize;
    let channels = QUAD_TEST_FREQS
        .iter()
        .map(|&f| sine(f, DEFAULT_AMPLITUDE, sample_rate, n))
        .collect();
    AudioFrame {
        sample_rate,
        channels,
        num_samples: n,
    }
}

/// Builds a stereo test frame (440 Hz left, 880 Hz right).
pub fn stereo_test_frame(sample_rate: u32, seconds: f64) -> AudioFrame {
    let n = (sample_rate as f64 * seconds) as usize;
    AudioFrame {
        sample_rate,
        channels: vec![
            sine(QUAD_TEST_FREQS[0], DEFAULT_AMPLITUDE, sample_rate, n),
            sine(QUAD_TEST_FREQS[1], DEFAULT_AMPLITUDE, sample_rate, n),
        ],
        num_samples: n,
    }
}

//! Post-decode gain steering.
//!
//! The basic SQ matrix leaves substantial crosstalk between decoded
//! channels. This stage widens the apparent separation by tracking
//! short-time channel energy, picking the dominant direction, and easing
//! the other channels down by a bounded amount. Envelopes are smoothed with
//! per-channel one-pole filters so gain changes never step discontinuously.

use crate::core::types::{AudioFrame, Sample};
use crate::error::SqError;

/// RMS levels below this are treated as silence and leave gains at unity.
const SILENCE_FLOOR: f64 = 1e-8;

/// Configuration for the gain-steering stage.
#[derive(Debug, Clone)]
pub struct SteeringParams {
    /// Sliding RMS window length in samples.
    pub window: usize,
    /// Maximum attenuation applied to non-dominant channels, in dB.
    pub max_attenuation_db: f64,
    /// Maximum boost applied to the dominant channel, in dB.
    pub max_boost_db: f64,
    /// Attack time constant in seconds (gain moving away from unity).
    pub attack_secs: f64,
    /// Release time constant in seconds (gain recovering toward unity).
    pub release_secs: f64,
}

impl Default for SteeringParams {
    fn default() -> Self {
        Self {
            window: 256,
            max_attenuation_db: 6.0,
            max_boost_db: 0.0,
            attack_secs: 0.005,
            release_secs: 0.050,
        }
    }
}

/// Dynamic gain-steering processor for decoded quad frames.
pub struct LogicSteering {
    params: SteeringParams,
    attack_coeff: f64,
    release_coeff: f64,
}

impl LogicSteering {
    /// Creates a steering stage for the given stream sample rate.
    pub fn new(params: SteeringParams, sample_rate: u32) -> Result<Self, SqError> {
        if params.window == 0 {
            return Err(SqError::InvalidConfig(
                "steering window must be positive".to_string(),
            ));
        }
        if params.max_attenuation_db < 0.0 || params.max_boost_db < 0.0 {
            return Err(SqError::InvalidConfig(
                "steering gain limits must be non-negative dB".to_string(),
            ));
        }
        let rate = sample_rate as f64;
        Ok(Self {
            attack_coeff: one_pole_coeff(params.attack_secs, rate),
            release_coeff: one_pole_coeff(params.release_secs, rate),
            params,
        })
    }

    /// Applies steering to a 4-channel frame, returning a new frame of the
    /// same shape.
    pub fn process(&self, frame: &AudioFrame) -> Result<AudioFrame, SqError> {
        frame.expect_channels(4)?;
        let n = frame.num_samples;

        let max_attenuation = db_to_gain(-self.params.max_attenuation_db);
        let boost = db_to_gain(self.params.max_boost_db);

        let mut output: Vec<Vec<Sample>> = vec![vec![0.0; n]; 4];
        // Running sum of squares per channel for the sliding RMS window.
        let mut energy = [0.0f64; 4];
        let mut envelopes = [1.0f64; 4];
        let window = self.params.window;

        for i in 0..n {
            let mut rms = [0.0f64; 4];
            for ch in 0..4 {
                let s = frame.channel(ch)[i];
                energy[ch] += s * s;
                if i >= window {
                    let old = frame.channel(ch)[i - window];
                    energy[ch] -= old * old;
                }
                let len = (i + 1).min(window) as f64;
                rms[ch] = (energy[ch].max(0.0) / len).sqrt();
            }

            let dominant = dominant_channel(&rms);
            let dominant_rms = rms[dominant];

            for ch in 0..4 {
                let target = if dominant_rms <= SILENCE_FLOOR {
                    1.0
                } else if ch == dominant {
                    boost
                } else {
                    // Attenuation scales with how far the channel trails
                    // the dominant one.
                    let deficit = 1.0 - (rms[ch] / dominant_rms).min(1.0);
                    let span = 1.0 - max_attenuation;
                    1.0 - span * deficit
                };

                let coeff = if target < envelopes[ch] {
                    self.attack_coeff
                } else {
                    self.release_coeff
                };
                envelopes[ch] += coeff * (target - envelopes[ch]);
                output[ch][i] = frame.channel(ch)[i] * envelopes[ch];
            }
        }

        AudioFrame::new(frame.sample_rate, output, n)
    }
}

/// One-pole smoothing coefficient for a given time constant.
#[inline]
fn one_pole_coeff(tau_secs: f64, sample_rate: f64) -> f64 {
    if tau_secs <= 0.0 {
        return 1.0;
    }
    1.0 - (-1.0 / (tau_secs * sample_rate)).exp()
}

#[inline]
fn db_to_gain(db: f64) -> f64 {
    10.0f64.powf(db / 20.0)
}

/// Index of the channel with the highest RMS; ties resolve to the lowest
/// index so runs stay deterministic.
#[inline]
fn dominant_channel(rms: &[f64; 4]) -> usize {
    let mut best = 0;
    for ch in 1..4 {
        if rms[ch] > rms[best] {
            best = ch;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn quad_frame(channels: Vec<Vec<Sample>>) -> AudioFrame {
        AudioFrame::from_channels(44100, channels).unwrap()
    }

    #[test]
    fn test_silence_passes_through() {
        let steering = LogicSteering::new(SteeringParams::default(), 44100).unwrap();
        let frame = AudioFrame::silence(44100, 4, 2048);
        let out = steering.process(&frame).unwrap();
        for ch in 0..4 {
            assert!(out.channel(ch).iter().all(|&s| s == 0.0));
        }
    }

    #[test]
    fn test_dominant_channel_is_preserved() {
        let n = 8192;
        let loud: Vec<Sample> = (0..n).map(|i| 0.8 * (2.0 * PI * i as f64 / 50.0).sin()).collect();
        let quiet: Vec<Sample> = (0..n).map(|i| 0.1 * (2.0 * PI * i as f64 / 73.0).sin()).collect();
        let frame = quad_frame(vec![loud.clone(), quiet.clone(), quiet.clone(), quiet]);

        let steering = LogicSteering::new(SteeringParams::default(), 44100).unwrap();
        let out = steering.process(&frame).unwrap();

        // Past the envelope settling region the dominant channel stays at
        // unity gain (default boost is 0 dB).
        for i in n / 2..n {
            assert!(
                (out.channel(0)[i] - loud[i]).abs() < 0.02,
                "index {}: {} vs {}",
                i,
                out.channel(0)[i],
                loud[i]
            );
        }
    }

    #[test]
    fn test_attenuation_is_bounded() {
        let n = 8192;
        let loud: Vec<Sample> = (0..n).map(|i| 0.8 * (2.0 * PI * i as f64 / 50.0).sin()).collect();
        let quiet: Vec<Sample> = (0..n).map(|i| 0.2 * (2.0 * PI * i as f64 / 73.0).sin()).collect();
        let frame = quad_frame(vec![loud, quiet.clone(), quiet.clone(), quiet.clone()]);

        let steering = LogicSteering::new(SteeringParams::default(), 44100).unwrap();
        let out = steering.process(&frame).unwrap();

        // Non-dominant channels are attenuated but never below the 6 dB bound.
        let floor = db_to_gain(-6.0) - 1e-9;
        for i in 0..n {
            let original = quiet[i];
            let steered = out.channel(1)[i];
            assert!(steered.abs() <= original.abs() + 1e-12);
            assert!(steered.abs() >= original.abs() * floor - 1e-12);
        }
    }

    #[test]
    fn test_rejects_wrong_channel_count() {
        let steering = LogicSteering::new(SteeringParams::default(), 44100).unwrap();
        let stereo = AudioFrame::silence(44100, 2, 64);
        assert!(matches!(
            steering.process(&stereo),
            Err(SqError::ChannelMismatch { expected: 4, .. })
        ));
    }

    #[test]
    fn test_rejects_invalid_params() {
        let mut p = SteeringParams::default();
        p.window = 0;
        assert!(LogicSteering::new(p, 44100).is_err());

        let mut p = SteeringParams::default();
        p.max_attenuation_db = -3.0;
        assert!(LogicSteering::new(p, 44100).is_err());
    }
}

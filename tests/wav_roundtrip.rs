//! WAV writer/reader round trips at the codec's I/O boundary.

mod common;

use common::sine_hz;
use sqcodec::io::wav::{read_wav, write_wav_float32, write_wav_pcm16};
use sqcodec::AudioFrame;

/// PCM16 stereo round trip with literal samples covering zero, mid-scale,
/// and both full-scale extremes.
#[test]
fn test_stereo_pcm16_round_trip() {
    let left = vec![0.0, 0.5, -0.5, 1.0, -1.0, 0.25, -0.25];
    let right = vec![0.1, -0.1, 0.9, -0.9, 0.0, 0.75, -0.75];
    let frame = AudioFrame::from_channels(44100, vec![left.clone(), right.clone()]).unwrap();

    let bytes = write_wav_pcm16(&frame).unwrap();
    let decoded = read_wav(&bytes, 2).unwrap();

    assert_eq!(decoded.sample_rate, 44100);
    assert_eq!(decoded.num_channels(), 2);
    assert_eq!(decoded.num_samples, 7);

    let tol = 2.0 / 32767.0;
    for i in 0..7 {
        assert!(
            (decoded.channel(0)[i] - left[i]).abs() <= tol,
            "left[{}]: {} vs {}",
            i,
            decoded.channel(0)[i],
            left[i]
        );
        assert!(
            (decoded.channel(1)[i] - right[i]).abs() <= tol,
            "right[{}]: {} vs {}",
            i,
            decoded.channel(1)[i],
            right[i]
        );
    }
}

/// Quad float32 round trip preserves samples to single precision.
#[test]
fn test_quad_float32_round_trip() {
    let n = 1024;
    let channels: Vec<Vec<f64>> = [440.0, 880.0, 330.0, 660.0]
        .iter()
        .map(|&f| sine_hz(f, 0.6, 44100, n))
        .collect();
    let frame = AudioFrame::from_channels(44100, channels.clone()).unwrap();

    let bytes = write_wav_float32(&frame).unwrap();
    let decoded = read_wav(&bytes, 4).unwrap();

    assert_eq!(decoded.num_channels(), 4);
    assert_eq!(decoded.num_samples, n);
    for ch in 0..4 {
        for i in 0..n {
            assert!(
                (decoded.channel(ch)[i] - channels[ch][i]).abs() < 1e-6,
                "ch {} sample {}",
                ch,
                i
            );
        }
    }
}

/// Non-finite and out-of-range samples are sanitized on write.
#[test]
fn test_writer_sanitizes_bad_samples() {
    let frame = AudioFrame::from_channels(
        44100,
        vec![
            vec![f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 2.5],
            vec![-2.5, 0.0, 1.0, -1.0],
        ],
    )
    .unwrap();

    let pcm = read_wav(&write_wav_pcm16(&frame).unwrap(), 2).unwrap();
    assert_eq!(pcm.channel(0)[0], 0.0);
    assert_eq!(pcm.channel(0)[1], 0.0);
    assert_eq!(pcm.channel(0)[2], 0.0);
    assert!((pcm.channel(0)[3] - 32767.0 / 32768.0).abs() < 1e-9); // saturated
    assert_eq!(pcm.channel(1)[0], -1.0); // saturated to -32768

    let float = read_wav(&write_wav_float32(&frame).unwrap(), 2).unwrap();
    assert_eq!(float.channel(0)[0], 0.0);
    assert_eq!(float.channel(0)[3], 1.0); // clamped
    assert_eq!(float.channel(1)[0], -1.0); // clamped
}

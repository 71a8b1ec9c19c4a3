#![forbid(unsafe_code)]
//! Pure Rust SQ quadraphonic matrix codec.
//!
//! `sqcodec` encodes four discrete channels (LF, RF, LB, RB) into a CBS
//! SQ-compatible stereo pair (LT, RT) and decodes such a pair back to an
//! approximation of the four-channel field. Both directions are built on a
//! wide-band 90-degree phase shifter realized as a block FFT Hilbert
//! transform with overlap-add reconstruction.
//!
//! # Quick Start
//!
//! ```
//! use sqcodec::{AudioFrame, MatrixParams};
//!
//! // Four channels of silence, half a second at 44.1 kHz.
//! let quad = AudioFrame::silence(44100, 4, 22050);
//!
//! let params = MatrixParams::new();
//! let stereo = sqcodec::encode(&quad, &params).unwrap();
//! assert_eq!(stereo.num_channels(), 2);
//!
//! let decoded = sqcodec::decode(&stereo, &params).unwrap();
//! assert_eq!(decoded.num_channels(), 4);
//! ```
//!
//! # Alignment
//!
//! Each direction shifts its output forward by `overlap / 4` samples, so a
//! full encode-decode round trip reproduces front-channel material shifted
//! by `overlap / 2` (256 samples for the reference 1024/512 configuration).
//! The end-to-end processing latency of the chain is
//! `block_size - overlap / 2` samples; see
//! [`MatrixParams::codec_latency`].

pub mod analysis;
pub mod core;
pub mod error;
pub mod io;
pub mod matrix;
pub mod signal;

pub use crate::core::hilbert::{HilbertOutput, HilbertTransformer};
pub use crate::core::types::{AudioFrame, Sample};
pub use error::SqError;
pub use matrix::{MatrixParams, SqDecoder, SqEncoder, SteeringParams, MATRIX_COEFF};

/// Encodes a 4-channel frame (LF, RF, LB, RB) into a 2-channel frame
/// (LT, RT).
///
/// This is the one-shot entry point; construct an [`SqEncoder`] directly to
/// reuse FFT plans across multiple frames.
///
/// # Errors
///
/// Returns [`SqError::InvalidConfig`] for an invalid block size or overlap
/// and [`SqError::ChannelMismatch`] when the frame is not 4-channel.
pub fn encode(frame: &AudioFrame, params: &MatrixParams) -> Result<AudioFrame, SqError> {
    SqEncoder::new(params)?.process(frame)
}

/// Decodes a 2-channel frame (LT, RT) into a 4-channel frame
/// (LF, RF, LB, RB).
///
/// When `params.logic_steering` is set, the gain-steering post-filter runs
/// on the decoded output; the matrix-only decode is canonical otherwise.
///
/// # Errors
///
/// Returns [`SqError::InvalidConfig`] for an invalid block size or overlap
/// and [`SqError::ChannelMismatch`] when the frame is not 2-channel.
pub fn decode(frame: &AudioFrame, params: &MatrixParams) -> Result<AudioFrame, SqError> {
    SqDecoder::new(params)?.process(frame)
}

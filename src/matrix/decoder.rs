//! SQ matrix decoder: a stereo pair back to four channels.

use crate::core::hilbert::HilbertTransformer;
use crate::core::types::{AudioFrame, Sample};
use crate::error::SqError;
use crate::matrix::params::{MatrixParams, MATRIX_COEFF};
use crate::matrix::steering::{LogicSteering, SteeringParams};

/// Decodes (LT, RT) into (LF, RF, LB, RB).
///
/// Basic matrix decode, the conjugate of the encode matrix:
///
/// ```text
/// LF = LT'
/// RF = RT'
/// LB = c*H{LT} + c*RT'
/// RB = c*LT' - c*H{RT}
/// ```
///
/// Front outputs carry crosstalk from encoded rear content and vice versa;
/// that is inherent to the 4-2-4 matrix and the reason the optional
/// gain-steering stage exists. Round-trip exactness holds for front-only
/// material.
pub struct SqDecoder {
    hilbert_lt: HilbertTransformer,
    hilbert_rt: HilbertTransformer,
    /// Steering configuration, present when logic steering is enabled. The
    /// stage itself is built per call because its time constants depend on
    /// the frame's sample rate.
    steering_params: Option<SteeringParams>,
}

impl SqDecoder {
    /// Creates a decoder from validated parameters.
    pub fn new(params: &MatrixParams) -> Result<Self, SqError> {
        params.validate()?;
        Ok(Self {
            hilbert_lt: HilbertTransformer::new(params.block_size, params.overlap)?,
            hilbert_rt: HilbertTransformer::new(params.block_size, params.overlap)?,
            steering_params: if params.logic_steering {
                Some(params.steering.clone())
            } else {
                None
            },
        })
    }

    /// Creates a decoder directly from a block size and overlap.
    pub fn with_block(block_size: usize, overlap: usize) -> Result<Self, SqError> {
        Self::new(
            &MatrixParams::new()
                .with_block_size(block_size)
                .with_overlap(overlap),
        )
    }

    /// Decodes a 2-channel frame into a 4-channel frame of the same sample
    /// rate and sample count.
    pub fn process(&self, frame: &AudioFrame) -> Result<AudioFrame, SqError> {
        frame.expect_channels(2)?;
        let n = frame.num_samples;

        let lt = self.hilbert_lt.process(frame.channel(0));
        let rt = self.hilbert_rt.process(frame.channel(1));

        let mut lf: Vec<Sample> = Vec::with_capacity(n);
        let mut rf: Vec<Sample> = Vec::with_capacity(n);
        let mut lb: Vec<Sample> = Vec::with_capacity(n);
        let mut rb: Vec<Sample> = Vec::with_capacity(n);
        for i in 0..n {
            lf.push(lt.original[i]);
            rf.push(rt.original[i]);
            lb.push(MATRIX_COEFF * lt.shifted[i] + MATRIX_COEFF * rt.original[i]);
            rb.push(MATRIX_COEFF * lt.original[i] - MATRIX_COEFF * rt.shifted[i]);
        }

        let decoded = AudioFrame::new(frame.sample_rate, vec![lf, rf, lb, rb], n)?;

        match &self.steering_params {
            Some(sp) => {
                let steering = LogicSteering::new(sp.clone(), frame.sample_rate)?;
                steering.process(&decoded)
            }
            None => Ok(decoded),
        }
    }
}

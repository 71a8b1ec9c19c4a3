//! SQ matrix encoder: four discrete channels down to a stereo pair.

use crate::core::hilbert::HilbertTransformer;
use crate::core::types::{AudioFrame, Sample, LB, LF, RB, RF};
use crate::error::SqError;
use crate::matrix::params::{MatrixParams, MATRIX_COEFF};

/// Encodes (LF, RF, LB, RB) into (LT, RT).
///
/// Front channels pass straight through with the alignment delay; back
/// channels are mixed into both totals with a 90-degree phase difference
/// between the left and right paths, which is what makes them recoverable
/// by the decoder:
///
/// ```text
/// LT = LF' + c*RB' - c*H{LB}
/// RT = RF' + c*LB' + c*H{RB}
/// ```
///
/// with c = sqrt(2)/2, `'` the aligned original, and `H{}` the Hilbert
/// transform.
pub struct SqEncoder {
    hilbert_lb: HilbertTransformer,
    hilbert_rb: HilbertTransformer,
}

impl SqEncoder {
    /// Creates an encoder from validated parameters.
    pub fn new(params: &MatrixParams) -> Result<Self, SqError> {
        params.validate()?;
        Ok(Self {
            hilbert_lb: HilbertTransformer::new(params.block_size, params.overlap)?,
            hilbert_rb: HilbertTransformer::new(params.block_size, params.overlap)?,
        })
    }

    /// Creates an encoder directly from a block size and overlap.
    pub fn with_block(block_size: usize, overlap: usize) -> Result<Self, SqError> {
        Self::new(
            &MatrixParams::new()
                .with_block_size(block_size)
                .with_overlap(overlap),
        )
    }

    /// Encodes a 4-channel frame into a 2-channel frame of the same sample
    /// rate and sample count. The trailing samples of the output flush the
    /// internal tails.
    pub fn process(&self, frame: &AudioFrame) -> Result<AudioFrame, SqError> {
        frame.expect_channels(4)?;
        let n = frame.num_samples;

        // Front channels only need the alignment delay; rear channels need
        // both the delayed original and the phase-shifted companion.
        let lf = self.hilbert_lb.aligned_original(frame.channel(LF));
        let rf = self.hilbert_rb.aligned_original(frame.channel(RF));
        let lb = self.hilbert_lb.process(frame.channel(LB));
        let rb = self.hilbert_rb.process(frame.channel(RB));

        let mut lt: Vec<Sample> = Vec::with_capacity(n);
        let mut rt: Vec<Sample> = Vec::with_capacity(n);
        for i in 0..n {
            lt.push(lf[i] + MATRIX_COEFF * rb.original[i] - MATRIX_COEFF * lb.shifted[i]);
            rt.push(rf[i] + MATRIX_COEFF * lb.original[i] + MATRIX_COEFF * rb.shifted[i]);
        }

        AudioFrame::new(frame.sample_rate, vec![lt, rt], n)
    }
}

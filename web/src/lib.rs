use sqcodec::{AudioFrame, MatrixParams, SqDecoder, SqEncoder};
use wasm_bindgen::prelude::*;

/// WASM wrapper around the SQ decoder for in-browser demo playback.
#[wasm_bindgen]
pub struct SqDecoderNode {
    decoder: SqDecoder,
    sample_rate: u32,
    params: MatrixParams,
}

#[wasm_bindgen]
impl SqDecoderNode {
    /// Create a decoder node.
    ///
    /// - `sample_rate`: audio sample rate (e.g. 44100)
    /// - `block_size`: FFT block size, power of two (e.g. 1024)
    /// - `overlap`: block overlap (e.g. 512)
    /// - `logic`: enable the gain-steering post-filter
    #[wasm_bindgen(constructor)]
    pub fn new(
        sample_rate: u32,
        block_size: usize,
        overlap: usize,
        logic: bool,
    ) -> Result<SqDecoderNode, JsValue> {
        let params = MatrixParams::new()
            .with_block_size(block_size)
            .with_overlap(overlap)
            .with_logic_steering(logic);
        let decoder = SqDecoder::new(&params).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self {
            decoder,
            sample_rate,
            params,
        })
    }

    /// Decode one LT/RT buffer pair into four planar channels, returned
    /// concatenated: [LF..., RF..., LB..., RB...], each `lt.len()` long.
    pub fn decode(&self, lt: &[f64], rt: &[f64]) -> Result<Vec<f64>, JsValue> {
        let n = lt.len().min(rt.len());
        let frame = AudioFrame::new(
            self.sample_rate,
            vec![lt[..n].to_vec(), rt[..n].to_vec()],
            n,
        )
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let decoded = self
            .decoder
            .process(&frame)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let mut out = Vec::with_capacity(4 * n);
        for ch in 0..4 {
            out.extend_from_slice(decoded.channel(ch));
        }
        Ok(out)
    }

    /// Total processing delay of a full encode-decode chain in samples.
    pub fn codec_latency(&self) -> usize {
        self.params.codec_latency()
    }

    /// Forward shift of decoded output relative to the encoder input.
    pub fn round_trip_shift(&self) -> usize {
        self.params.round_trip_shift()
    }
}

/// Encode four planar channels into an SQ stereo pair, returned
/// concatenated: [LT..., RT...].
#[wasm_bindgen]
pub fn encode_quad(
    sample_rate: u32,
    block_size: usize,
    overlap: usize,
    lf: &[f64],
    rf: &[f64],
    lb: &[f64],
    rb: &[f64],
) -> Result<Vec<f64>, JsValue> {
    let params = MatrixParams::new()
        .with_block_size(block_size)
        .with_overlap(overlap);
    let encoder = SqEncoder::new(&params).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let n = lf.len().min(rf.len()).min(lb.len()).min(rb.len());
    let frame = AudioFrame::new(
        sample_rate,
        vec![
            lf[..n].to_vec(),
            rf[..n].to_vec(),
            lb[..n].to_vec(),
            rb[..n].to_vec(),
        ],
        n,
    )
    .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let stereo = encoder
        .process(&frame)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let mut out = Vec::with_capacity(2 * n);
    out.extend_from_slice(stereo.channel(0));
    out.extend_from_slice(stereo.channel(1));
    Ok(out)
}

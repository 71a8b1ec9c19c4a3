//! Core types, FFT plumbing, and the Hilbert transformer.

pub mod fft;
pub mod hilbert;
pub mod types;

pub use hilbert::{HilbertOutput, HilbertTransformer};
pub use types::{AudioFrame, Sample};

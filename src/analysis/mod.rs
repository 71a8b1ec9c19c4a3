//! Signal analysis utilities.

pub mod separation;

pub use separation::{analyze_frame, analyze_stereo, SeparationReport};

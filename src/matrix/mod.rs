//! The SQ matrix stage: encoder, decoder, configuration, and the optional
//! gain-steering post-filter.

pub mod decoder;
pub mod encoder;
pub mod params;
pub mod steering;

pub use decoder::SqDecoder;
pub use encoder::SqEncoder;
pub use params::{MatrixParams, MATRIX_COEFF};
pub use steering::{LogicSteering, SteeringParams};

//! Error types for the sqcodec crate.

use std::fmt;

/// Errors that can occur during encoding, decoding, or WAV I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqError {
    /// Invalid processor configuration (block size, overlap).
    InvalidConfig(String),
    /// Frame has the wrong number of channels for the operation.
    ChannelMismatch { expected: usize, actual: usize },
    /// Channel lengths or sample counts are inconsistent.
    ShapeMismatch(String),
    /// Unrecognized or unsupported WAV structure.
    InvalidFormat(String),
    /// I/O error.
    IoError(String),
}

impl fmt::Display for SqError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqError::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
            SqError::ChannelMismatch { expected, actual } => {
                write!(f, "expected {} channels, got {}", expected, actual)
            }
            SqError::ShapeMismatch(msg) => write!(f, "inconsistent frame shape: {}", msg),
            SqError::InvalidFormat(msg) => write!(f, "invalid format: {}", msg),
            SqError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for SqError {}

impl From<std::io::Error> for SqError {
    fn from(err: std::io::Error) -> Self {
        SqError::IoError(err.to_string())
    }
}

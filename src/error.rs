//! Error types.

use thiserror::Error;

/// Failure while reading or writing a PPM stream.
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("not a P6 stream (magic token {0:?})")]
    BadMagic(String),
    #[error("unsupported color depth {0}, only 255 is supported")]
    UnsupportedMaxval(u32),
    #[error("malformed header: {0}")]
    BadHeader(String),
    #[error("pixel data truncated: expected {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },
}

/// Failure of a checked canvas access.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CanvasError {
    #[error("pixel ({x}, {y}) is outside the {width}x{height} canvas")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },
    #[error("buffer holds {actual} pixels, {width}x{height} needs {expected}")]
    BufferSize {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },
}

/// Rejected gradient parameters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GradientError {
    #[error("gradient needs 2 to 5 colors, got {0}")]
    InvalidColorCount(usize),
}

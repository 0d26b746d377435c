//! Error types for edge detection.

use std::io;
use std::path::PathBuf;

use common::{FileExtensionError, SerdeFormatError};
use thiserror::Error;

use crate::image::ImageDimensions;

/// Errors reported by the edge detection pipeline and its configuration.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid image dimensions {width}x{height}: width and height must be non-zero")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Buffer dimension mismatch: expected {expected:?}, got {actual:?}")]
    DimensionMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("Pixel data length {actual} does not match {dimensions:?} (expected {expected})")]
    BufferSizeMismatch {
        dimensions: ImageDimensions,
        expected: usize,
        actual: usize,
    },

    #[error("Unsupported channel count {channels}: expected 3 (RGB)")]
    UnsupportedChannelCount { channels: usize },

    #[error(
        "Invalid thresholds low={low}, high={high}: both must lie in [0, 1] with low <= high"
    )]
    InvalidThreshold { low: f32, high: f32 },

    #[error("Failed to read config '{path}': {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Unsupported config file: {0}")]
    ConfigFormat(#[from] FileExtensionError),

    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] SerdeFormatError),
}

pub type Result<T> = std::result::Result<T, Error>;

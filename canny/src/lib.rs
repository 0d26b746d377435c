//! Canny edge detection on in-memory RGB images.
//!
//! The detector reduces a color image to luminance, smooths it with a fixed
//! 5×5 Gaussian, estimates Sobel gradients, thins them with four-direction
//! non-maximum suppression, classifies the result with two thresholds and
//! links weak responses to strong ones by 8-connected hysteresis.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use canny::{detect_edges, PixelBuffer};
//!
//! let image = PixelBuffer::new(width, height, 3, rgb_bytes)?;
//! let edges = detect_edges(&image, 0.1, 0.3)?;
//! assert!(edges.data().iter().all(|&v| v == 0 || v == 255));
//! ```

pub mod edge_detection;
pub mod error;
pub mod image;

#[cfg(any(test, feature = "bench"))]
pub mod testing;

// ============================================================================
// Core types
// ============================================================================

pub use error::{Error, Result};
pub use image::{ImageDimensions, PixelBuffer, RGB_CHANNELS};

// ============================================================================
// Edge detection
// ============================================================================

pub use edge_detection::{
    detect_edges, BorderMode, Config, Diagnostics, EdgeDetectionResult, EdgeDetector,
    HysteresisMethod, ThresholdPolicy, DEFAULT_HIGH_THRESHOLD, DEFAULT_LOW_THRESHOLD,
};

// ============================================================================
// Stages
// ============================================================================

pub use edge_detection::{
    clamp_coord, classify, double_threshold, gaussian_smooth, link_edges,
    non_maximum_suppression, sobel_gradients, to_edge_map, to_grayscale, within_margin,
    EdgeClass, GradientField, HysteresisStats, Orientation, EDGE_VALUE, GAUSSIAN_KERNEL,
    GAUSSIAN_KERNEL_SUM,
};

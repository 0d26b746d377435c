//! Pipeline stages for edge detection.
//!
//! Each stage is a pure function that reads the full output of the previous
//! stage and materializes a new buffer of the same dimensions. Hysteresis is
//! the exception: it mutates the classification buffer in place.

pub mod gaussian;
pub mod gradient;
pub mod grayscale;
pub mod hysteresis;
pub mod suppression;
pub mod threshold;

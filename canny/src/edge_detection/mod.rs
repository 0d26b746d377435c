//! Edge detector and its result types.
//!
//! The pipeline runs six stages in order, each consuming the full output of
//! the previous one:
//!
//! 1. [`to_grayscale`]: RGB to luminance in [0, 1]
//! 2. [`gaussian_smooth`]: fixed 5×5 blur
//! 3. [`sobel_gradients`]: magnitude and direction
//! 4. [`non_maximum_suppression`]: thin to one-pixel ridges
//! 5. [`double_threshold`]: None / Weak / Strong
//! 6. [`link_edges`] + [`to_edge_map`]: promote connected Weak pixels, emit 0/255

pub mod boundary;
pub mod config;
pub mod stages;

#[cfg(test)]
mod tests;

use rayon::prelude::*;

use crate::error::Result;
use crate::image::PixelBuffer;

pub use boundary::{clamp_coord, within_margin};
pub use config::{
    BorderMode, Config, HysteresisMethod, ThresholdPolicy, DEFAULT_HIGH_THRESHOLD,
    DEFAULT_LOW_THRESHOLD,
};
pub use stages::gaussian::{gaussian_smooth, GAUSSIAN_KERNEL, GAUSSIAN_KERNEL_SUM};
pub use stages::gradient::{sobel_gradients, GradientField};
pub use stages::grayscale::to_grayscale;
pub use stages::hysteresis::{link_edges, to_edge_map, HysteresisStats, EDGE_VALUE};
pub use stages::suppression::{non_maximum_suppression, Orientation};
pub use stages::threshold::{classify, double_threshold, EdgeClass};

/// Result of edge detection with diagnostics.
#[derive(Debug, Clone)]
pub struct EdgeDetectionResult {
    /// Binary edge map with the input's dimensions and channel count.
    pub edges: PixelBuffer<u8>,
    /// Counts from the thresholding and linking stages.
    pub diagnostics: Diagnostics,
}

/// Diagnostic counts from one detection run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Diagnostics {
    /// Pixels classified Strong by double thresholding.
    pub strong_pixels: usize,
    /// Pixels classified Weak by double thresholding.
    pub weak_pixels: usize,
    /// Weak pixels promoted to Strong by hysteresis.
    pub promoted_pixels: usize,
    /// Passes taken by the hysteresis method.
    pub hysteresis_passes: usize,
    /// Pixels set to 255 in the edge map.
    pub edge_pixels: usize,
}

// =============================================================================
// EdgeDetector
// =============================================================================

/// Canny edge detector.
///
/// Wraps [`Config`] and runs the full pipeline on single images or batches.
///
/// # Example
///
/// ```rust,ignore
/// use canny::{EdgeDetector, Config, HysteresisMethod};
///
/// let detector = EdgeDetector::new();
/// let result = detector.detect(&image)?;
///
/// let detector = EdgeDetector::from_config(Config {
///     low_threshold: 0.05,
///     hysteresis: HysteresisMethod::ParallelPasses,
///     ..Default::default()
/// });
/// let results = detector.detect_all(&images);
/// ```
#[derive(Debug, Default)]
pub struct EdgeDetector {
    config: Config,
}

impl EdgeDetector {
    /// Create a detector with default configuration.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Detect edges in one RGB image.
    ///
    /// Fails before any stage runs when the image has a zero dimension, does
    /// not have three channels, or the thresholds are invalid under
    /// [`ThresholdPolicy::Reject`].
    pub fn detect(&self, image: &PixelBuffer<u8>) -> Result<EdgeDetectionResult> {
        image.validate_rgb()?;
        self.check_thresholds()?;

        let config = &self.config;
        let _span = tracing::debug_span!(
            "detect_edges",
            width = image.width(),
            height = image.height()
        )
        .entered();

        let gray = to_grayscale(image);
        let smoothed = gaussian_smooth(&gray, config.border_mode);
        tracing::debug!(border_mode = ?config.border_mode, "Smoothed luminance");

        let gradient = sobel_gradients(&smoothed, config.border_mode);
        let suppressed = non_maximum_suppression(&gradient);
        if tracing::enabled!(tracing::Level::DEBUG) {
            let ridge_pixels = suppressed.iter().filter(|&&m| m > 0.0).count();
            tracing::debug!("Non-maximum suppression kept {} pixels", ridge_pixels);
        }

        let mut classes =
            double_threshold(&suppressed, config.low_threshold, config.high_threshold);
        let (strong_pixels, weak_pixels) = stages::threshold::count_classes(&classes);
        tracing::debug!(
            strong = strong_pixels,
            weak = weak_pixels,
            "Classified with thresholds low={} high={}",
            config.low_threshold,
            config.high_threshold
        );

        let stats = link_edges(&mut classes, config.hysteresis);
        tracing::debug!(
            method = ?config.hysteresis,
            "Hysteresis promoted {} pixels in {} passes",
            stats.promoted,
            stats.passes
        );

        let edges = to_edge_map(&classes, image.channels());
        let diagnostics = Diagnostics {
            strong_pixels,
            weak_pixels,
            promoted_pixels: stats.promoted,
            hysteresis_passes: stats.passes,
            edge_pixels: strong_pixels + stats.promoted,
        };

        Ok(EdgeDetectionResult { edges, diagnostics })
    }

    /// Detect edges in several images in parallel.
    ///
    /// Each image succeeds or fails independently.
    pub fn detect_all(&self, images: &[PixelBuffer<u8>]) -> Vec<Result<EdgeDetectionResult>> {
        images.par_iter().map(|image| self.detect(image)).collect()
    }

    fn check_thresholds(&self) -> Result<()> {
        let Err(err) = self.config.validate() else {
            return Ok(());
        };

        match self.config.threshold_policy {
            ThresholdPolicy::Reject => Err(err),
            ThresholdPolicy::Warn => {
                tracing::warn!("{err}; classifying with the thresholds as given");
                Ok(())
            }
        }
    }
}

/// Detect edges with default settings and the given thresholds, returning
/// only the edge map.
pub fn detect_edges(
    input: &PixelBuffer<u8>,
    low_threshold: f32,
    high_threshold: f32,
) -> Result<PixelBuffer<u8>> {
    let detector = EdgeDetector::from_config(Config::with_thresholds(low_threshold, high_threshold));
    Ok(detector.detect(input)?.edges)
}

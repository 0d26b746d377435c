//! Configuration types for edge detection.
//!
//! [`Config`] is a flat struct: thresholds first, then the policies that
//! select between equivalent or documented-divergent behaviors.

use std::path::Path;

use common::SerdeFormat;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default lower hysteresis threshold on the suppressed gradient magnitude.
pub const DEFAULT_LOW_THRESHOLD: f32 = 0.1;
/// Default upper hysteresis threshold on the suppressed gradient magnitude.
pub const DEFAULT_HIGH_THRESHOLD: f32 = 0.3;

// ============================================================================
// Enums
// ============================================================================

/// What to do with a threshold pair that is non-finite, outside `[0, 1]`,
/// or has `low > high`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ThresholdPolicy {
    /// Fail with [`Error::InvalidThreshold`] before any stage runs.
    #[default]
    Reject,
    /// Log a warning and classify with the thresholds exactly as given.
    /// With `low > high` every classified pixel becomes Strong.
    Warn,
}

/// Algorithm used to link weak pixels to strong ones.
///
/// All variants produce the same final classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HysteresisMethod {
    /// In-place row-major rescans until a scan promotes nothing.
    FixedPoint,
    /// Row-parallel passes; each pass reads a snapshot of the previous one.
    ParallelPasses,
    /// Flood fill from every strong pixel, visiting each weak pixel once.
    #[default]
    Worklist,
}

/// Border handling for the Gaussian and Sobel stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BorderMode {
    /// Pixels within the kernel radius of the border are forced to zero:
    /// 2 pixels for the Gaussian, 1 pixel for Sobel.
    #[default]
    ZeroHalo,
    /// Every pixel is computed, reading out-of-range neighbors from the
    /// nearest edge pixel.
    Clamped,
}

// ============================================================================
// Config
// ============================================================================

/// Edge detection parameters.
///
/// Missing fields fall back to their defaults when deserializing, so a config
/// file only needs the values it changes:
///
/// ```yaml
/// low_threshold: 0.05
/// hysteresis: ParallelPasses
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Suppressed magnitudes at or above this are Weak (unless Strong).
    pub low_threshold: f32,
    /// Suppressed magnitudes at or above this are Strong.
    pub high_threshold: f32,
    pub threshold_policy: ThresholdPolicy,
    pub hysteresis: HysteresisMethod,
    pub border_mode: BorderMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            low_threshold: DEFAULT_LOW_THRESHOLD,
            high_threshold: DEFAULT_HIGH_THRESHOLD,
            threshold_policy: ThresholdPolicy::default(),
            hysteresis: HysteresisMethod::default(),
            border_mode: BorderMode::default(),
        }
    }
}

impl Config {
    /// Default configuration with the given thresholds.
    pub fn with_thresholds(low_threshold: f32, high_threshold: f32) -> Self {
        Self {
            low_threshold,
            high_threshold,
            ..Default::default()
        }
    }

    /// Check the threshold pair: both finite, both in `[0, 1]`, `low <= high`.
    ///
    /// This reports the condition regardless of [`ThresholdPolicy`]; the
    /// detector decides whether it is fatal.
    pub fn validate(&self) -> Result<()> {
        if thresholds_valid(self.low_threshold, self.high_threshold) {
            Ok(())
        } else {
            Err(Error::InvalidThreshold {
                low: self.low_threshold,
                high: self.high_threshold,
            })
        }
    }

    /// Parse a config from YAML or JSON text.
    pub fn from_str(text: &str, format: SerdeFormat) -> Result<Self> {
        Ok(common::serde::deserialize(text, format)?)
    }

    /// Load a config file; the format is chosen by its extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = SerdeFormat::from_path(path)?;
        let text = std::fs::read_to_string(path).map_err(|source| Error::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_str(&text, format)?;
        tracing::debug!(path = %path.display(), ?config, "Loaded edge detection config");
        Ok(config)
    }

    pub fn serialize(&self, format: SerdeFormat) -> Result<String> {
        Ok(common::serde::serialize(self, format)?)
    }
}

fn thresholds_valid(low: f32, high: f32) -> bool {
    let unit = 0.0..=1.0;
    unit.contains(&low) && unit.contains(&high) && low <= high
}

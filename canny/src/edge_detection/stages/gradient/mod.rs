//! Sobel gradient estimation.


use common::buffer2::Buffer2;
use common::parallel::ZipRowsMut;
use rayon::prelude::*;

use crate::edge_detection::boundary::{sample_clamped, within_margin};
use crate::edge_detection::config::BorderMode;
use crate::error::{Error, Result};

/// Width of the forced-zero ring in [`BorderMode::ZeroHalo`].
pub const SOBEL_RADIUS: usize = 1;

/// Gradient magnitude and direction, co-indexed over the same W×H grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientField {
    /// `sqrt(gx² + gy²)`, never negative.
    pub magnitude: Buffer2<f32>,
    /// `atan2(gy, gx)` in radians, within `(-π, π]`.
    pub direction: Buffer2<f32>,
}

impl GradientField {
    /// Build a field from precomputed buffers.
    pub fn new(magnitude: Buffer2<f32>, direction: Buffer2<f32>) -> Result<Self> {
        if !magnitude.same_dimensions(&direction) {
            return Err(Error::DimensionMismatch {
                expected: magnitude.dimensions(),
                actual: direction.dimensions(),
            });
        }

        Ok(Self {
            magnitude,
            direction,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.magnitude.width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.magnitude.height()
    }

    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        self.magnitude.dimensions()
    }
}

/// Horizontal and vertical derivatives at `(x, y)` with clamp-to-edge reads.
///
/// The 3×3 Sobel kernels are unrolled; zero taps are skipped.
#[inline]
pub fn sobel_at(input: &Buffer2<f32>, x: usize, y: usize) -> (f32, f32) {
    let p = |dx: isize, dy: isize| sample_clamped(input, x, y, dx, dy);

    let gx = -p(-1, -1) + p(1, -1) + -2.0 * p(-1, 0) + 2.0 * p(1, 0) + -p(-1, 1) + p(1, 1);
    let gy = -p(-1, -1) - 2.0 * p(0, -1) - p(1, -1) + p(-1, 1) + 2.0 * p(0, 1) + p(1, 1);

    (gx, gy)
}

/// Compute the Sobel gradient field of a smoothed luminance field.
///
/// With [`BorderMode::ZeroHalo`] the outermost ring has `gx = gy = 0`, so its
/// magnitude and direction are both 0.
pub fn sobel_gradients(input: &Buffer2<f32>, border: BorderMode) -> GradientField {
    let (width, height) = input.dimensions();
    let mut magnitude = Buffer2::new_default(width, height);
    let mut direction = Buffer2::new_default(width, height);
    if width == 0 || height == 0 {
        return GradientField {
            magnitude,
            direction,
        };
    }

    magnitude
        .pixels_mut()
        .zip_rows(direction.pixels_mut())
        .par_row_chunks_mut(width)
        .for_each(|(first_row, (mag_chunk, dir_chunk))| {
            let rows = mag_chunk
                .chunks_mut(width)
                .zip(dir_chunk.chunks_mut(width));
            for (local_y, (mag_row, dir_row)) in rows.enumerate() {
                let y = first_row + local_y;
                for x in 0..width {
                    let (gx, gy) = match border {
                        BorderMode::ZeroHalo
                            if within_margin(x, y, width, height, SOBEL_RADIUS) =>
                        {
                            (0.0, 0.0)
                        }
                        _ => sobel_at(input, x, y),
                    };
                    // -0.0 would turn atan2(gy, -|gx|) into -π
                    let gy = gy + 0.0;
                    mag_row[x] = (gx * gx + gy * gy).sqrt();
                    dir_row[x] = gy.atan2(gx);
                }
            }
        });

    GradientField {
        magnitude,
        direction,
    }
}

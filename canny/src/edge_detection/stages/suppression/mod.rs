//! Four-bucket non-maximum suppression.
//!
//! Each interior pixel is compared against the two 8-neighbors selected by its
//! quantized gradient direction. Neighbor magnitudes are read directly, never
//! interpolated along the continuous angle.


use std::f32::consts::PI;

use common::buffer2::Buffer2;
use common::parallel::RowChunksMut;
use rayon::prelude::*;

use super::gradient::GradientField;
use crate::edge_detection::boundary::{sample_clamped, within_margin};

/// Pixels within this distance of the border are always suppressed.
pub const SUPPRESSION_MARGIN: usize = 1;

/// Quantized gradient orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Around 0° / 180°.
    Horizontal,
    /// Around 45°.
    Rising,
    /// Around 90°.
    Vertical,
    /// Around 135°.
    Falling,
}

impl Orientation {
    /// Bucket a direction in radians from `atan2`.
    ///
    /// Negative angles are shifted by π, so opposite gradients share a bucket.
    pub fn from_direction(radians: f32) -> Self {
        let radians = if radians < 0.0 { radians + PI } else { radians };
        Self::from_degrees(radians * 180.0 / PI)
    }

    /// Bucket an angle in `[0, 180]` degrees. Breakpoints fall into the higher bucket.
    pub fn from_degrees(degrees: f32) -> Self {
        if degrees < 22.5 || degrees >= 157.5 {
            Orientation::Horizontal
        } else if degrees < 67.5 {
            Orientation::Rising
        } else if degrees < 112.5 {
            Orientation::Vertical
        } else {
            Orientation::Falling
        }
    }

    /// `(dx, dy)` offsets of the two neighbors a pixel must match or exceed.
    pub fn neighbor_offsets(self) -> [(isize, isize); 2] {
        match self {
            Orientation::Horizontal => [(-1, 0), (1, 0)],
            Orientation::Rising => [(1, -1), (-1, 1)],
            Orientation::Vertical => [(0, -1), (0, 1)],
            Orientation::Falling => [(-1, -1), (1, 1)],
        }
    }
}

/// Thin the gradient magnitude to one-pixel ridges.
///
/// An interior pixel keeps its magnitude when it is greater than or equal to
/// both neighbors along its orientation and becomes 0.0 otherwise. The
/// outermost ring is always 0.0.
pub fn non_maximum_suppression(gradient: &GradientField) -> Buffer2<f32> {
    let (width, height) = gradient.dimensions();
    let mut output = Buffer2::new_default(width, height);
    if width == 0 || height == 0 {
        return output;
    }

    let magnitude = &gradient.magnitude;
    let direction = &gradient.direction;

    output
        .pixels_mut()
        .par_row_chunks_mut(width)
        .for_each(|(first_row, chunk)| {
            for (local_y, row) in chunk.chunks_mut(width).enumerate() {
                let y = first_row + local_y;
                for (x, out) in row.iter_mut().enumerate() {
                    if within_margin(x, y, width, height, SUPPRESSION_MARGIN) {
                        continue;
                    }

                    let current = magnitude[(x, y)];
                    let [(ax, ay), (bx, by)] =
                        Orientation::from_direction(direction[(x, y)]).neighbor_offsets();
                    let a = sample_clamped(magnitude, x, y, ax, ay);
                    let b = sample_clamped(magnitude, x, y, bx, by);

                    if current >= a && current >= b {
                        *out = current;
                    }
                }
            }
        });

    output
}

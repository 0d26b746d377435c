//! Fixed 5×5 Gaussian smoothing.


use common::buffer2::Buffer2;
use common::parallel::RowChunksMut;
use rayon::prelude::*;

use crate::edge_detection::boundary::{sample_clamped, within_margin};
use crate::edge_detection::config::BorderMode;

/// Integer weights of the 5×5 Gaussian kernel (σ ≈ 1.4).
pub const GAUSSIAN_KERNEL: [[f32; 5]; 5] = [
    [2.0, 4.0, 5.0, 4.0, 2.0],
    [4.0, 9.0, 12.0, 9.0, 4.0],
    [5.0, 12.0, 15.0, 12.0, 5.0],
    [4.0, 9.0, 12.0, 9.0, 4.0],
    [2.0, 4.0, 5.0, 4.0, 2.0],
];

/// Sum of [`GAUSSIAN_KERNEL`]; the weighted sum is divided by this once.
pub const GAUSSIAN_KERNEL_SUM: f32 = 159.0;

/// Kernel radius; also the width of the forced-zero ring in [`BorderMode::ZeroHalo`].
pub const GAUSSIAN_RADIUS: usize = 2;

/// Smooth a scalar field with [`GAUSSIAN_KERNEL`].
///
/// Neighborhood reads use clamp-to-edge addressing. With
/// [`BorderMode::ZeroHalo`] every pixel within [`GAUSSIAN_RADIUS`] of the
/// border is 0.0 instead of being computed.
pub fn gaussian_smooth(input: &Buffer2<f32>, border: BorderMode) -> Buffer2<f32> {
    let (width, height) = input.dimensions();
    let mut output = Buffer2::new_default(width, height);
    if width == 0 || height == 0 {
        return output;
    }

    output
        .pixels_mut()
        .par_row_chunks_mut(width)
        .for_each(|(first_row, chunk)| {
            for (local_y, row) in chunk.chunks_mut(width).enumerate() {
                let y = first_row + local_y;
                for (x, out) in row.iter_mut().enumerate() {
                    *out = match border {
                        BorderMode::ZeroHalo
                            if within_margin(x, y, width, height, GAUSSIAN_RADIUS) =>
                        {
                            0.0
                        }
                        _ => smooth_at(input, x, y),
                    };
                }
            }
        });

    output
}

#[inline]
fn smooth_at(input: &Buffer2<f32>, x: usize, y: usize) -> f32 {
    let radius = GAUSSIAN_RADIUS as isize;
    let mut sum = 0.0f32;
    for (ky, weights) in GAUSSIAN_KERNEL.iter().enumerate() {
        let dy = ky as isize - radius;
        for (kx, &weight) in weights.iter().enumerate() {
            let dx = kx as isize - radius;
            sum += sample_clamped(input, x, y, dx, dy) * weight;
        }
    }
    sum / GAUSSIAN_KERNEL_SUM
}

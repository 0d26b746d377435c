//! RGB to luminance reduction.

use common::buffer2::Buffer2;
use common::parallel::RowChunksMut;
use rayon::prelude::*;

use crate::image::{PixelBuffer, RGB_CHANNELS};

/// ITU-R BT.601 luma weights for R, G, B.
pub const LUMA_WEIGHTS: [f32; 3] = [0.299, 0.587, 0.114];

/// Luminance of one 8-bit RGB pixel, in [0, 1].
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> f32 {
    let r = r as f32 / 255.0;
    let g = g as f32 / 255.0;
    let b = b as f32 / 255.0;
    LUMA_WEIGHTS[0] * r + LUMA_WEIGHTS[1] * g + LUMA_WEIGHTS[2] * b
}

/// Convert an interleaved RGB image to a single-channel luminance field.
///
/// Panics if the image does not have exactly three channels; the pipeline
/// validates this at entry.
pub fn to_grayscale(image: &PixelBuffer<u8>) -> Buffer2<f32> {
    assert_eq!(
        image.channels(),
        RGB_CHANNELS,
        "grayscale reduction requires an RGB image"
    );

    let width = image.width();
    let height = image.height();
    let mut gray = Buffer2::new_default(width, height);
    if width == 0 || height == 0 {
        return gray;
    }

    let src = image.data();
    let src_row_len = image.row_len();

    gray.pixels_mut()
        .par_row_chunks_mut(width)
        .for_each(|(first_row, chunk)| {
            for (local_y, row) in chunk.chunks_mut(width).enumerate() {
                let y = first_row + local_y;
                let src_row = &src[y * src_row_len..(y + 1) * src_row_len];
                for (out, rgb) in row.iter_mut().zip(src_row.chunks_exact(RGB_CHANNELS)) {
                    *out = luminance(rgb[0], rgb[1], rgb[2]);
                }
            }
        });

    gray
}

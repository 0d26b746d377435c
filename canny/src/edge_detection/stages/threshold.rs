//! Double thresholding of the suppressed magnitude.

use common::buffer2::Buffer2;
use common::parallel::RowChunksMut;
use rayon::prelude::*;

/// Per-pixel edge classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum EdgeClass {
    #[default]
    None = 0,
    Weak = 1,
    Strong = 2,
}

/// Classify one magnitude. The Strong check runs first, so with
/// `low > high` no pixel is ever Weak.
#[inline]
pub fn classify(magnitude: f32, low_threshold: f32, high_threshold: f32) -> EdgeClass {
    if magnitude >= high_threshold {
        EdgeClass::Strong
    } else if magnitude >= low_threshold {
        EdgeClass::Weak
    } else {
        EdgeClass::None
    }
}

/// Classify every pixel of the suppressed magnitude buffer.
pub fn double_threshold(
    suppressed: &Buffer2<f32>,
    low_threshold: f32,
    high_threshold: f32,
) -> Buffer2<EdgeClass> {
    let (width, height) = suppressed.dimensions();
    let mut classes = Buffer2::new_default(width, height);
    if width == 0 || height == 0 {
        return classes;
    }

    classes
        .pixels_mut()
        .par_row_chunks_mut(width)
        .for_each(|(first_row, chunk)| {
            let start = first_row * width;
            let src = &suppressed.pixels()[start..start + chunk.len()];
            for (class, &magnitude) in chunk.iter_mut().zip(src) {
                *class = classify(magnitude, low_threshold, high_threshold);
            }
        });

    classes
}

/// Number of `Strong` and `Weak` pixels.
pub fn count_classes(classes: &Buffer2<EdgeClass>) -> (usize, usize) {
    classes
        .pixels()
        .par_iter()
        .fold(
            || (0usize, 0usize),
            |(strong, weak), class| match class {
                EdgeClass::Strong => (strong + 1, weak),
                EdgeClass::Weak => (strong, weak + 1),
                EdgeClass::None => (strong, weak),
            },
        )
        .reduce(|| (0, 0), |a, b| (a.0 + b.0, a.1 + b.1))
}

//! Neighborhood addressing shared by the windowed stages.

use common::buffer2::Buffer2;

/// Resolve a possibly out-of-range coordinate to the nearest valid index in `0..limit`.
#[inline]
pub fn clamp_coord(c: isize, limit: usize) -> usize {
    debug_assert!(limit > 0);
    c.clamp(0, limit as isize - 1) as usize
}

/// True when `(x, y)` lies within `margin` pixels of any image edge.
///
/// Stages that force a zero halo check this before evaluating their kernel.
#[inline]
pub fn within_margin(x: usize, y: usize, width: usize, height: usize, margin: usize) -> bool {
    x < margin || y < margin || x + margin >= width || y + margin >= height
}

/// Read `field` at `(x + dx, y + dy)` with clamp-to-edge addressing.
#[inline]
pub(crate) fn sample_clamped(field: &Buffer2<f32>, x: usize, y: usize, dx: isize, dy: isize) -> f32 {
    let sx = clamp_coord(x as isize + dx, field.width());
    let sy = clamp_coord(y as isize + dy, field.height());
    field[(sx, sy)]
}

//! Hysteresis edge linking and edge map output.
//!
//! Weak pixels are promoted to Strong when they are 8-connected, possibly
//! through other Weak pixels, to a Strong pixel. Only interior pixels are
//! promoted; a Strong pixel on the outer ring can still seed its neighbors.
//! Promotion is monotonic, so every [`HysteresisMethod`] reaches the same
//! final classification.


use common::buffer2::Buffer2;
use common::parallel::RowChunksMut;
use rayon::prelude::*;

use super::threshold::EdgeClass;
use crate::edge_detection::boundary::{clamp_coord, within_margin};
use crate::edge_detection::config::HysteresisMethod;
use crate::image::PixelBuffer;

/// Edge map value for Strong pixels. Everything else is 0.
pub const EDGE_VALUE: u8 = 255;

const LINK_MARGIN: usize = 1;

const NEIGHBORS_8: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Outcome of a linking run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HysteresisStats {
    /// Weak pixels promoted to Strong.
    pub promoted: usize,
    /// Full passes over the image, including the final pass that promoted
    /// nothing. Always 1 for [`HysteresisMethod::Worklist`].
    pub passes: usize,
}

/// Promote connected Weak pixels to Strong in place.
pub fn link_edges(classes: &mut Buffer2<EdgeClass>, method: HysteresisMethod) -> HysteresisStats {
    let (width, height) = classes.dimensions();
    if width <= 2 * LINK_MARGIN || height <= 2 * LINK_MARGIN {
        return HysteresisStats {
            promoted: 0,
            passes: 1,
        };
    }

    match method {
        HysteresisMethod::FixedPoint => link_fixed_point(classes),
        HysteresisMethod::ParallelPasses => link_parallel_passes(classes),
        HysteresisMethod::Worklist => link_worklist(classes),
    }
}

#[inline]
fn has_strong_neighbor(classes: &Buffer2<EdgeClass>, x: usize, y: usize) -> bool {
    let (width, height) = classes.dimensions();
    NEIGHBORS_8.iter().any(|&(dx, dy)| {
        let nx = clamp_coord(x as isize + dx, width);
        let ny = clamp_coord(y as isize + dy, height);
        classes[(nx, ny)] == EdgeClass::Strong
    })
}

/// Row-major in-place rescans until a scan changes nothing.
fn link_fixed_point(classes: &mut Buffer2<EdgeClass>) -> HysteresisStats {
    let (width, height) = classes.dimensions();
    let mut stats = HysteresisStats::default();

    loop {
        stats.passes += 1;
        let mut changed = false;
        for y in LINK_MARGIN..height - LINK_MARGIN {
            for x in LINK_MARGIN..width - LINK_MARGIN {
                if classes[(x, y)] == EdgeClass::Weak && has_strong_neighbor(classes, x, y) {
                    classes[(x, y)] = EdgeClass::Strong;
                    stats.promoted += 1;
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }

    stats
}

/// Jacobi-style passes: each pass reads the previous pass's snapshot and
/// writes a fresh buffer row-parallel.
fn link_parallel_passes(classes: &mut Buffer2<EdgeClass>) -> HysteresisStats {
    let (width, height) = classes.dimensions();
    let mut next = classes.clone();
    let mut stats = HysteresisStats::default();

    loop {
        stats.passes += 1;
        next.pixels_mut().copy_from_slice(classes.pixels());

        let snapshot: &Buffer2<EdgeClass> = classes;
        let promoted: usize = next
            .pixels_mut()
            .par_row_chunks_mut(width)
            .map(|(first_row, chunk)| {
                let mut promoted = 0;
                for (local_y, row) in chunk.chunks_mut(width).enumerate() {
                    let y = first_row + local_y;
                    if y < LINK_MARGIN || y + LINK_MARGIN >= height {
                        continue;
                    }
                    for x in LINK_MARGIN..width - LINK_MARGIN {
                        if row[x] == EdgeClass::Weak && has_strong_neighbor(snapshot, x, y) {
                            row[x] = EdgeClass::Strong;
                            promoted += 1;
                        }
                    }
                }
                promoted
            })
            .sum();

        std::mem::swap(classes, &mut next);
        if promoted == 0 {
            break;
        }
        stats.promoted += promoted;
    }

    stats
}

/// Flood fill seeded from every Strong pixel; each Weak pixel is visited once.
fn link_worklist(classes: &mut Buffer2<EdgeClass>) -> HysteresisStats {
    let (width, height) = classes.dimensions();
    let mut stack: Vec<(usize, usize)> = classes
        .iter()
        .enumerate()
        .filter(|(_, class)| **class == EdgeClass::Strong)
        .map(|(idx, _)| (idx % width, idx / width))
        .collect();

    let mut promoted = 0;
    while let Some((x, y)) = stack.pop() {
        for &(dx, dy) in &NEIGHBORS_8 {
            let nx = x as isize + dx;
            let ny = y as isize + dy;
            if nx < 0 || ny < 0 {
                continue;
            }
            let (nx, ny) = (nx as usize, ny as usize);
            if nx >= width || ny >= height || within_margin(nx, ny, width, height, LINK_MARGIN) {
                continue;
            }
            if classes[(nx, ny)] == EdgeClass::Weak {
                classes[(nx, ny)] = EdgeClass::Strong;
                promoted += 1;
                stack.push((nx, ny));
            }
        }
    }

    HysteresisStats {
        promoted,
        passes: 1,
    }
}

/// Convert a linked classification into a binary edge map with `channels`
/// identical channels: Strong becomes [`EDGE_VALUE`], everything else 0.
pub fn to_edge_map(classes: &Buffer2<EdgeClass>, channels: usize) -> PixelBuffer<u8> {
    assert!(channels > 0, "edge map needs at least one channel");

    let (width, height) = classes.dimensions();
    let mut edges = PixelBuffer::new_filled(width, height, channels, 0u8);
    if width == 0 || height == 0 {
        return edges;
    }

    let row_len = edges.row_len();
    edges
        .data_mut()
        .par_row_chunks_mut(row_len)
        .for_each(|(first_row, chunk)| {
            for (local_y, row) in chunk.chunks_mut(row_len).enumerate() {
                let src = classes.row(first_row + local_y);
                for (pixel, &class) in row.chunks_exact_mut(channels).zip(src) {
                    if class == EdgeClass::Strong {
                        pixel.fill(EDGE_VALUE);
                    }
                }
            }
        });

    edges
}

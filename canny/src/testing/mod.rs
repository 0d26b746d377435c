//! Synthetic images for tests and benchmarks.

#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::image::{PixelBuffer, RGB_CHANNELS};

pub const BLACK: [u8; 3] = [0, 0, 0];
pub const WHITE: [u8; 3] = [255, 255, 255];

/// Initialize tracing subscriber for tests.
/// Safe to call multiple times - will only initialize once.
/// Respects RUST_LOG env var, defaults to "info".
#[cfg(test)]
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// Every pixel set to `color`.
pub fn uniform_image(width: usize, height: usize, color: [u8; 3]) -> PixelBuffer<u8> {
    PixelBuffer::from_fn(width, height, RGB_CHANNELS, |_, _, c| color[c])
}

/// Columns `0..split` are `left`, the rest `right`.
pub fn vertical_step(
    width: usize,
    height: usize,
    split: usize,
    left: [u8; 3],
    right: [u8; 3],
) -> PixelBuffer<u8> {
    PixelBuffer::from_fn(width, height, RGB_CHANNELS, |x, _, c| {
        if x < split {
            left[c]
        } else {
            right[c]
        }
    })
}

/// `background` with a `foreground` square covering `start..end` on both axes.
pub fn square_image(
    width: usize,
    height: usize,
    start: usize,
    end: usize,
    background: [u8; 3],
    foreground: [u8; 3],
) -> PixelBuffer<u8> {
    let inside = |v: usize| (start..end).contains(&v);
    PixelBuffer::from_fn(width, height, RGB_CHANNELS, |x, y, c| {
        if inside(x) && inside(y) {
            foreground[c]
        } else {
            background[c]
        }
    })
}

/// Black-to-white vertical step at `split` with uniform noise of up to
/// `amplitude` gray levels added to every channel.
pub fn noisy_step(
    width: usize,
    height: usize,
    split: usize,
    amplitude: u8,
    seed: u64,
) -> PixelBuffer<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    let amplitude = amplitude as i16;
    PixelBuffer::from_fn(width, height, RGB_CHANNELS, |x, _, _| {
        let base: i16 = if x < split { 0 } else { 255 };
        let noise = rng.random_range(-amplitude..=amplitude);
        (base + noise).clamp(0, 255) as u8
    })
}

/// Random RGB content; used to compare configurations on unstructured input.
pub fn random_image(width: usize, height: usize, seed: u64) -> PixelBuffer<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    PixelBuffer::from_fn(width, height, RGB_CHANNELS, |_, _, _| rng.random())
}

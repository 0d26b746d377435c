//! Interleaved multi-channel pixel buffers.

use crate::error::{Error, Result};

/// Number of channels the edge detector accepts and produces.
pub const RGB_CHANNELS: usize = 3;

/// Image dimensions: width, height and channels per pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageDimensions {
    /// Image width in pixels
    pub width: usize,
    /// Image height in pixels
    pub height: usize,
    /// Number of interleaved channels (3 for RGB)
    pub channels: usize,
}

impl ImageDimensions {
    pub fn new(width: usize, height: usize, channels: usize) -> Self {
        Self {
            width,
            height,
            channels,
        }
    }

    /// Total number of stored values (width * height * channels).
    pub fn pixel_count(&self) -> usize {
        self.width * self.height * self.channels
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Dense row-major `width × height × channels` buffer with interleaved channels.
///
/// The value of channel `c` at `(x, y)` lives at `(y * width + x) * channels + c`.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer<T> {
    dimensions: ImageDimensions,
    data: Vec<T>,
}

impl<T> PixelBuffer<T> {
    /// Wrap existing interleaved data.
    ///
    /// Fails with [`Error::BufferSizeMismatch`] when `data` does not hold exactly
    /// `width * height * channels` values.
    pub fn new(width: usize, height: usize, channels: usize, data: Vec<T>) -> Result<Self> {
        let dimensions = ImageDimensions::new(width, height, channels);
        if data.len() != dimensions.pixel_count() {
            return Err(Error::BufferSizeMismatch {
                dimensions,
                expected: dimensions.pixel_count(),
                actual: data.len(),
            });
        }

        Ok(Self { dimensions, data })
    }

    /// Build a buffer by evaluating `f(x, y, channel)` for every value.
    pub fn from_fn<F>(width: usize, height: usize, channels: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize, usize) -> T,
    {
        let dimensions = ImageDimensions::new(width, height, channels);
        let mut data = Vec::with_capacity(dimensions.pixel_count());
        for y in 0..height {
            for x in 0..width {
                for c in 0..channels {
                    data.push(f(x, y, c));
                }
            }
        }

        Self { dimensions, data }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.dimensions.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.dimensions.height
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.dimensions.channels
    }

    #[inline]
    pub fn dimensions(&self) -> ImageDimensions {
        self.dimensions
    }

    /// Number of values in one row (`width * channels`).
    #[inline]
    pub fn row_len(&self) -> usize {
        self.dimensions.width * self.dimensions.channels
    }

    /// All channel values of the pixel at `(x, y)`.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> &[T] {
        debug_assert!(x < self.width() && y < self.height());
        let channels = self.channels();
        let start = (y * self.width() + x) * channels;
        &self.data[start..start + channels]
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize, channel: usize) -> &T {
        debug_assert!(channel < self.channels());
        &self.pixel(x, y)[channel]
    }

    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Check the buffer can enter the edge detection pipeline: non-zero
    /// width and height, exactly three channels.
    pub fn validate_rgb(&self) -> Result<()> {
        if self.dimensions.is_empty() {
            return Err(Error::InvalidDimensions {
                width: self.width(),
                height: self.height(),
            });
        }
        if self.channels() != RGB_CHANNELS {
            return Err(Error::UnsupportedChannelCount {
                channels: self.channels(),
            });
        }
        Ok(())
    }
}

impl<T: Clone> PixelBuffer<T> {
    pub fn new_filled(width: usize, height: usize, channels: usize, value: T) -> Self {
        let dimensions = ImageDimensions::new(width, height, channels);
        Self {
            dimensions,
            data: vec![value; dimensions.pixel_count()],
        }
    }
}

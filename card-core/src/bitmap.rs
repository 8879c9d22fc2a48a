//! Decoded raster data owned by image objects.

use crate::error::{CardError, CardResult};

/// A decoded RGBA8 bitmap.
///
/// The scene owns the pixels through the image object holding this value;
/// bitmaps are never shared between scenes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Bitmap {
    /// Create a bitmap from raw RGBA8 pixels (4 bytes per pixel, row-major).
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions are zero or the buffer length does
    /// not match `width * height * 4`.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> CardResult<Self> {
        if width == 0 || height == 0 {
            return Err(CardError::InvalidInput(format!(
                "bitmap dimensions must be non-zero, got {width}x{height}"
            )));
        }
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(CardError::InvalidInput(format!(
                "bitmap buffer is {} bytes, expected {expected}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Natural width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Natural height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Natural width/height ratio.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// The raw RGBA8 pixel buffer.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

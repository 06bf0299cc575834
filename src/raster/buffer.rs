//! # Pixel Buffer
//!
//! Row-major RGBA8 raster used both as the read-only source image and as the
//! mutable output canvas that thread strokes are composited onto.
//!
//! ## Memory Layout
//!
//! ```text
//! index(x, y) = (y * width + x) * 4
//!
//! ┌──────┬──────┬──────┬──────┐
//! │  R   │  G   │  B   │  A   │  one pixel, 8 bits per channel
//! └──────┴──────┴──────┴──────┘
//! ```
//!
//! Decoding and PNG encoding are delegated to the `image` crate; the core
//! never parses image formats itself.

use std::path::Path;

use image::RgbaImage;

use crate::error::StitchError;

/// Bytes per RGBA pixel.
pub const CHANNELS: usize = 4;

/// An owned RGBA8 raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Allocate a fully transparent buffer.
    ///
    /// Fails with [`StitchError::CanvasUnavailable`] for empty or oversized
    /// dimensions.
    pub fn new(width: usize, height: usize) -> Result<Self, StitchError> {
        let len = byte_len(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![0; len],
        })
    }

    /// Wrap existing RGBA bytes. The length must be exactly `width * height * 4`.
    pub fn from_rgba(width: usize, height: usize, data: Vec<u8>) -> Result<Self, StitchError> {
        let len = byte_len(width, height)?;
        if data.len() != len {
            return Err(StitchError::CanvasUnavailable(format!(
                "expected {} bytes for {}x{} RGBA, got {}",
                len,
                width,
                height,
                data.len()
            )));
        }
        Ok(Self { width, height, data })
    }

    /// Copy an `image` crate RGBA image.
    pub fn from_image(image: &RgbaImage) -> Result<Self, StitchError> {
        Self::from_rgba(
            image.width() as usize,
            image.height() as usize,
            image.as_raw().clone(),
        )
    }

    /// Decode an encoded image (PNG, JPEG, ...) from memory.
    pub fn decode(bytes: &[u8]) -> Result<Self, StitchError> {
        let image = image::load_from_memory(bytes)
            .map_err(|e| StitchError::ImageLoad(e.to_string()))?;
        Self::from_image(&image.to_rgba8())
    }

    /// Open and decode an image file.
    pub fn open(path: &Path) -> Result<Self, StitchError> {
        let image = image::open(path)
            .map_err(|e| StitchError::ImageLoad(format!("{}: {}", path.display(), e)))?;
        Self::from_image(&image.to_rgba8())
    }

    /// Convert into an `image` crate RGBA image.
    pub fn to_image(&self) -> Result<RgbaImage, StitchError> {
        RgbaImage::from_raw(self.width as u32, self.height as u32, self.data.clone()).ok_or_else(
            || StitchError::CanvasUnavailable("raster does not fit an RGBA image".to_string()),
        )
    }

    /// Encode the buffer as PNG and write it to `path`.
    pub fn save_png(&self, path: &Path) -> Result<(), StitchError> {
        self.to_image()?
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(|e| StitchError::Export(format!("Failed to save PNG: {}", e)))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw RGBA bytes, row-major.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| (y * self.width + x) * CHANNELS)
    }

    /// Read one pixel, or `None` outside the buffer.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        self.index(x, y).map(|i| {
            let p = &self.data[i..i + CHANNELS];
            [p[0], p[1], p[2], p[3]]
        })
    }

    /// Overwrite one pixel. Out-of-bounds writes are ignored.
    #[inline]
    pub fn put_pixel(&mut self, x: usize, y: usize, rgba: [u8; 4]) {
        if let Some(i) = self.index(x, y) {
            self.data[i..i + CHANNELS].copy_from_slice(&rgba);
        }
    }

    /// Composite a color over one pixel (source-over, straight alpha).
    ///
    /// `alpha` is the effective coverage times the color's opacity, in [0, 1].
    /// Out-of-bounds writes are ignored.
    pub fn blend_pixel(&mut self, x: usize, y: usize, rgb: [u8; 3], alpha: f32) {
        let Some(i) = self.index(x, y) else {
            return;
        };
        let sa = alpha.clamp(0.0, 1.0);
        if sa <= 0.0 {
            return;
        }

        let dst = &mut self.data[i..i + CHANNELS];
        let da = dst[3] as f32 / 255.0;
        let out_a = sa + da * (1.0 - sa);
        if out_a <= 0.0 {
            return;
        }

        for c in 0..3 {
            let s = rgb[c] as f32;
            let d = dst[c] as f32;
            let v = (s * sa + d * da * (1.0 - sa)) / out_a;
            dst[c] = v.round().clamp(0.0, 255.0) as u8;
        }
        dst[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
    }

    /// Iterate all pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = [u8; 4]> + '_ {
        self.data
            .chunks_exact(CHANNELS)
            .map(|p| [p[0], p[1], p[2], p[3]])
    }
}

fn byte_len(width: usize, height: usize) -> Result<usize, StitchError> {
    if width == 0 || height == 0 {
        return Err(StitchError::CanvasUnavailable(format!(
            "cannot allocate a {}x{} raster",
            width, height
        )));
    }
    width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(CHANNELS))
        .ok_or_else(|| {
            StitchError::CanvasUnavailable(format!("{}x{} raster is too large", width, height))
        })
}

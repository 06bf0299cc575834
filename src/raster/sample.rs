//! Region color sampling.
//!
//! Averages every pixel of a rectangle that lies inside the buffer. Regions
//! that hang off the edge average fewer pixels; regions with no pixel inside
//! the buffer return [`SampledColor::EMPTY`] (transparent black) so callers
//! skip them through the usual opacity gate.

use super::buffer::PixelBuffer;

/// Alpha (0-255 scale) below which a sample counts as "no stitch".
pub const OPACITY_THRESHOLD: f32 = 128.0;

/// Average color over a region, before rounding.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SampledColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl SampledColor {
    /// Sentinel for regions that clip to zero pixels.
    pub const EMPTY: SampledColor = SampledColor {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    /// True when the region is opaque enough to carry thread.
    #[inline]
    pub fn is_opaque(&self) -> bool {
        self.a >= OPACITY_THRESHOLD
    }
}

/// Average the pixels in `[x0, x0 + w) x [y0, y0 + h)` clipped to the buffer.
pub fn sample(buffer: &PixelBuffer, x0: i64, y0: i64, w: i64, h: i64) -> SampledColor {
    let x_start = x0.max(0);
    let y_start = y0.max(0);
    let x_end = x0.saturating_add(w).min(buffer.width() as i64);
    let y_end = y0.saturating_add(h).min(buffer.height() as i64);

    if x_start >= x_end || y_start >= y_end {
        return SampledColor::EMPTY;
    }

    let mut sum = [0u64; 4];
    for y in y_start..y_end {
        for x in x_start..x_end {
            if let Some(p) = buffer.pixel(x as usize, y as usize) {
                for (acc, v) in sum.iter_mut().zip(p) {
                    *acc += v as u64;
                }
            }
        }
    }

    let count = ((x_end - x_start) * (y_end - y_start)) as f32;
    SampledColor {
        r: sum[0] as f32 / count,
        g: sum[1] as f32 / count,
        b: sum[2] as f32 / count,
        a: sum[3] as f32 / count,
    }
}

/// Sample the single pixel under a floating-point lattice position.
#[inline]
pub fn sample_point(buffer: &PixelBuffer, x: f32, y: f32) -> SampledColor {
    sample(buffer, x.floor() as i64, y.floor() as i64, 1, 1)
}

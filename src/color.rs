//! # Thread Color
//!
//! Color math for turning sampled image regions into thread colors.
//!
//! ## Adjustment
//!
//! Strokes are drawn darker than the region they sample and partially
//! transparent, so layered threads build up woven density:
//!
//! ```text
//! channel' = floor(channel * factor)
//! alpha'   = factor
//! ```
//!
//! ## Prominence
//!
//! A scalar in `[0, ~1.5]` that peaks for saturated mid-tones:
//!
//! ```text
//! luminance  = (0.299 r + 0.587 g + 0.114 b) / 255
//! saturation = (max - min) / max            (0 when max = 0)
//! prominence = saturation^0.3 * (1 - |luminance - 0.5|) * 1.5
//! ```

use crate::raster::SampledColor;

/// Default darkening factor, also used as the stroke opacity.
pub const DEFAULT_DARKEN: f32 = 0.8;

/// Cells at or below this prominence are not stitched in embroidery mode.
pub const PROMINENCE_THRESHOLD: f32 = 0.1;

/// Exponent that compresses the saturation curve.
const SATURATION_EXPONENT: f32 = 0.3;

/// Peak gain applied to the prominence product.
const PROMINENCE_GAIN: f32 = 1.5;

/// A drawable thread color: darkened RGB plus stroke opacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThreadColor {
    pub rgb: [u8; 3],
    pub alpha: f32,
}

/// Scale each channel by `factor`, floor it, and use `factor` as opacity.
pub fn adjust(r: f32, g: f32, b: f32, factor: f32) -> ThreadColor {
    let scale = |c: f32| (c * factor).floor().clamp(0.0, 255.0) as u8;
    ThreadColor {
        rgb: [scale(r), scale(g), scale(b)],
        alpha: factor.clamp(0.0, 1.0),
    }
}

/// [`adjust`] applied to a sampled region color.
#[inline]
pub fn adjust_sampled(color: &SampledColor, factor: f32) -> ThreadColor {
    adjust(color.r, color.g, color.b, factor)
}

/// Relative luminance in [0, 1] (Rec. 601 weights).
#[inline]
pub fn luminance(color: &SampledColor) -> f32 {
    (0.299 * color.r + 0.587 * color.g + 0.114 * color.b) / 255.0
}

/// HSV-style saturation in [0, 1].
#[inline]
pub fn saturation(color: &SampledColor) -> f32 {
    let max = color.r.max(color.g).max(color.b);
    let min = color.r.min(color.g).min(color.b);
    if max == 0.0 { 0.0 } else { (max - min) / max }
}

/// Prominence from precomputed luminance and saturation.
#[inline]
pub fn prominence_from(luminance: f32, saturation: f32) -> f32 {
    saturation.powf(SATURATION_EXPONENT) * (1.0 - (luminance - 0.5).abs()) * PROMINENCE_GAIN
}

/// How strongly a region reads as thread-worthy content.
pub fn prominence(color: &SampledColor) -> f32 {
    prominence_from(luminance(color), saturation(color))
}

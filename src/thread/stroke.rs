//! Thread strokes and jittered bundles.
//!
//! Each stitch site is drawn as a bundle of [`THREADS_PER_BUNDLE`] strokes,
//! each nudged by up to half a pixel and up to 0.1 rad so the result looks
//! hand-laid rather than stamped. Randomness comes from a caller-supplied
//! [`rand::Rng`], so tests can pin placement with a seeded or fixed source.

use rand::Rng;

use super::path::{PathGenerator, stroke_width};
use crate::color::ThreadColor;
use crate::geometry::Point;
use crate::raster::{PixelBuffer, StrokeStyle, stroke_polylines};
use crate::settings::ThreadPattern;

/// Strokes drawn per stitch site.
pub const THREADS_PER_BUNDLE: usize = 5;

/// Full width of the positional jitter window, in pixels ([-0.5, 0.5)).
pub const POSITION_JITTER: f32 = 1.0;

/// Full width of the angular jitter window, in radians ([-0.1, 0.1)).
pub const ANGLE_JITTER: f32 = 0.2;

/// One drawn thread.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThreadStroke {
    pub anchor: Point,
    pub length: f32,
    /// Radians
    pub angle: f32,
    pub color: ThreadColor,
    pub pattern: ThreadPattern,
    /// Drives width and, for wave/zigzag/spiral, amplitude
    pub prominence: f32,
}

impl ThreadStroke {
    /// Rasterize onto `canvas`.
    pub fn draw(&self, canvas: &mut PixelBuffer, generator: &PathGenerator) {
        let path = generator
            .generate(self.pattern, self.length, self.prominence)
            .place(self.anchor, self.angle);
        let style = StrokeStyle {
            rgb: self.color.rgb,
            alpha: self.color.alpha,
            width: stroke_width(self.prominence),
        };
        stroke_polylines(canvas, &path.polylines, &style);
    }
}

/// Uniform offset in `[-spread / 2, spread / 2)`.
#[inline]
pub fn centered_jitter<R: Rng + ?Sized>(rng: &mut R, spread: f32) -> f32 {
    (rng.random::<f32>() - 0.5) * spread
}

/// Scatter [`THREADS_PER_BUNDLE`] copies of `base` around its anchor and angle.
pub fn jittered_bundle<R: Rng + ?Sized>(rng: &mut R, base: &ThreadStroke) -> Vec<ThreadStroke> {
    (0..THREADS_PER_BUNDLE)
        .map(|_| {
            let dx = centered_jitter(rng, POSITION_JITTER);
            let dy = centered_jitter(rng, POSITION_JITTER);
            let da = centered_jitter(rng, ANGLE_JITTER);
            ThreadStroke {
                anchor: base.anchor + Point::new(dx, dy),
                angle: base.angle + da,
                ..*base
            }
        })
        .collect()
}

/// Rng that always yields the midpoint of the unit interval, so every
/// jitter offset is exactly zero.
#[cfg(test)]
pub(crate) struct MidpointRng;

#[cfg(test)]
impl rand::RngCore for MidpointRng {
    fn next_u32(&mut self) -> u32 {
        1 << 31
    }

    fn next_u64(&mut self) -> u64 {
        1 << 63
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        dst.fill(0x80);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn base() -> ThreadStroke {
        ThreadStroke {
            anchor: Point::new(10.0, 20.0),
            length: 8.0,
            angle: 0.5,
            color: ThreadColor {
                rgb: [10, 20, 30],
                alpha: 0.8,
            },
            pattern: ThreadPattern::Wave,
            prominence: 0.7,
        }
    }

    #[test]
    fn test_bundle_within_jitter_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let bundle = jittered_bundle(&mut rng, &base());
        assert_eq!(bundle.len(), THREADS_PER_BUNDLE);
        for s in &bundle {
            assert!((s.anchor.x - 10.0).abs() <= 0.5);
            assert!((s.anchor.y - 20.0).abs() <= 0.5);
            assert!((s.angle - 0.5).abs() <= 0.1 + 1e-6);
            assert_eq!(s.length, 8.0);
            assert_eq!(s.prominence, 0.7);
            assert_eq!(s.pattern, ThreadPattern::Wave);
        }
    }

    #[test]
    fn test_midpoint_rng_gives_exact_placement() {
        let bundle = jittered_bundle(&mut MidpointRng, &base());
        assert!(bundle.iter().all(|s| *s == base()));
    }

    #[test]
    fn test_seeded_bundles_repeat() {
        let a = jittered_bundle(&mut StdRng::seed_from_u64(99), &base());
        let b = jittered_bundle(&mut StdRng::seed_from_u64(99), &base());
        assert_eq!(a, b);
    }

    #[test]
    fn test_draw_marks_canvas() {
        let mut canvas = PixelBuffer::from_rgba(30, 30, vec![255; 30 * 30 * 4]).unwrap();
        let stroke = ThreadStroke {
            anchor: Point::new(15.0, 15.0),
            pattern: ThreadPattern::Straight,
            angle: 0.0,
            ..base()
        };
        stroke.draw(
            &mut canvas,
            &PathGenerator {
                wave_amplitude: 5.0,
                wave_frequency: 1.0,
            },
        );
        let center = canvas.pixel(15, 15).unwrap();
        assert!(center[0] < 255, "stroke should darken the center: {:?}", center);
        assert_eq!(canvas.pixel(15, 2), Some([255, 255, 255, 255]));
    }
}

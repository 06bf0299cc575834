//! Polyline stroking.
//!
//! Draws a set of polylines with a given width, round caps and round joins,
//! composited once per stroke so overlapping segments of the same thread do
//! not darken their own joints. Coverage is the distance from each pixel
//! center to the nearest segment, passed through an anti-aliased edge.
//!
//! ```text
//!         ┌───────── stroke bounding box ─────────┐
//!         │   ╭──────────────────────────────╮    │
//!         │  (  ●────────────●─────────────●  )   │  coverage = max over segments
//!         │   ╰──────────────────────────────╯    │
//!         └───────────────────────────────────────┘
//! ```

use super::buffer::PixelBuffer;
use crate::geometry::{Point, aa_edge};

/// Style for one composited stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    /// Line color.
    pub rgb: [u8; 3],
    /// Stroke opacity in [0, 1].
    pub alpha: f32,
    /// Full line width in pixels.
    pub width: f32,
}

/// Stroke `polylines` onto `canvas`.
///
/// A polyline with a single point renders as a round dot. Empty polylines
/// are ignored.
pub fn stroke_polylines(canvas: &mut PixelBuffer, polylines: &[Vec<Point>], style: &StrokeStyle) {
    let half = style.width.max(0.0) / 2.0;
    // Edge ramp centered on the geometric boundary approximates area coverage.
    let inner = (half - 0.5).max(0.0);
    let reach = half + 0.5;

    let Some((min, max)) = bounds(polylines) else {
        return;
    };

    let x0 = ((min.x - reach).floor().max(0.0)) as usize;
    let y0 = ((min.y - reach).floor().max(0.0)) as usize;
    let x1 = (max.x + reach).ceil().min(canvas.width() as f32);
    let y1 = (max.y + reach).ceil().min(canvas.height() as f32);
    if x1 <= x0 as f32 || y1 <= y0 as f32 {
        return;
    }
    let (x1, y1) = (x1 as usize, y1 as usize);
    let box_w = x1 - x0;

    let mut coverage = vec![0.0f32; box_w * (y1 - y0)];

    for line in polylines {
        match line.as_slice() {
            [] => {}
            [only] => splat_segment(&mut coverage, (x0, y0, x1, y1), *only, *only, inner, reach),
            points => {
                for pair in points.windows(2) {
                    splat_segment(&mut coverage, (x0, y0, x1, y1), pair[0], pair[1], inner, reach);
                }
            }
        }
    }

    for (i, &c) in coverage.iter().enumerate() {
        if c > 0.0 {
            let x = x0 + i % box_w;
            let y = y0 + i / box_w;
            canvas.blend_pixel(x, y, style.rgb, c * style.alpha);
        }
    }
}

/// Accumulate (max) coverage for one segment within its own bounding box.
fn splat_segment(
    coverage: &mut [f32],
    (bx0, by0, bx1, by1): (usize, usize, usize, usize),
    a: Point,
    b: Point,
    inner: f32,
    reach: f32,
) {
    let sx0 = (a.x.min(b.x) - reach).floor().max(bx0 as f32) as usize;
    let sy0 = (a.y.min(b.y) - reach).floor().max(by0 as f32) as usize;
    let sx1 = ((a.x.max(b.x) + reach).ceil().max(0.0) as usize).min(bx1);
    let sy1 = ((a.y.max(b.y) + reach).ceil().max(0.0) as usize).min(by1);
    let box_w = bx1 - bx0;

    for y in sy0..sy1 {
        for x in sx0..sx1 {
            let center = Point::new(x as f32 + 0.5, y as f32 + 0.5);
            let d = center.distance_to_segment(a, b);
            let c = aa_edge(d, inner, 1.0);
            if c > 0.0 {
                let idx = (y - by0) * box_w + (x - bx0);
                if c > coverage[idx] {
                    coverage[idx] = c;
                }
            }
        }
    }
}

fn bounds(polylines: &[Vec<Point>]) -> Option<(Point, Point)> {
    let mut points = polylines
        .iter()
        .flatten()
        .filter(|p| p.x.is_finite() && p.y.is_finite());
    let first = *points.next()?;
    Some(points.fold((first, first), |(min, max), p| {
        (
            Point::new(min.x.min(p.x), min.y.min(p.y)),
            Point::new(max.x.max(p.x), max.y.max(p.y)),
        )
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white(width: usize, height: usize) -> PixelBuffer {
        PixelBuffer::from_rgba(width, height, vec![255; width * height * 4]).unwrap()
    }

    fn style(alpha: f32, width: f32) -> StrokeStyle {
        StrokeStyle {
            rgb: [0, 0, 0],
            alpha,
            width,
        }
    }

    #[test]
    fn test_horizontal_line_covers_its_row() {
        let mut canvas = white(20, 10);
        let line = vec![vec![Point::new(2.0, 5.0), Point::new(18.0, 5.0)]];
        stroke_polylines(&mut canvas, &line, &style(1.0, 2.0));

        // Rows 4 and 5 straddle y = 5.0 and are fully covered mid-line
        assert_eq!(canvas.pixel(10, 4), Some([0, 0, 0, 255]));
        assert_eq!(canvas.pixel(10, 5), Some([0, 0, 0, 255]));
        // Far away rows are untouched
        assert_eq!(canvas.pixel(10, 0), Some([255, 255, 255, 255]));
        assert_eq!(canvas.pixel(10, 9), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_partial_alpha_blends() {
        let mut canvas = white(10, 10);
        let line = vec![vec![Point::new(0.0, 5.0), Point::new(10.0, 5.0)]];
        stroke_polylines(&mut canvas, &line, &style(0.5, 2.0));
        let p = canvas.pixel(5, 5).unwrap();
        assert!(p[0] > 100 && p[0] < 155, "expected mid gray, got {:?}", p);
    }

    #[test]
    fn test_self_overlap_composites_once() {
        // Back-and-forth polyline over the same pixels
        let mut canvas = white(10, 10);
        let line = vec![vec![
            Point::new(1.0, 5.0),
            Point::new(9.0, 5.0),
            Point::new(1.0, 5.0),
        ]];
        stroke_polylines(&mut canvas, &line, &style(0.5, 2.0));

        let mut reference = white(10, 10);
        let single = vec![vec![Point::new(1.0, 5.0), Point::new(9.0, 5.0)]];
        stroke_polylines(&mut reference, &single, &style(0.5, 2.0));

        assert_eq!(canvas, reference);
    }

    #[test]
    fn test_offscreen_stroke_is_ignored() {
        let mut canvas = white(10, 10);
        let line = vec![vec![Point::new(-50.0, -50.0), Point::new(-40.0, -40.0)]];
        stroke_polylines(&mut canvas, &line, &style(1.0, 2.0));
        assert_eq!(canvas, white(10, 10));
    }

    #[test]
    fn test_single_point_draws_dot() {
        let mut canvas = white(10, 10);
        stroke_polylines(&mut canvas, &[vec![Point::new(5.0, 5.0)]], &style(1.0, 3.0));
        assert_eq!(canvas.pixel(5, 5), Some([0, 0, 0, 255]));
    }
}

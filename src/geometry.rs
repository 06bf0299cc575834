//! 2D geometry primitives shared by path synthesis and the stroke rasterizer.

use std::ops::{Add, Mul, Sub};

/// A point (or vector) in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Point at `radius` along polar angle `theta`.
    #[inline]
    pub fn polar(radius: f32, theta: f32) -> Self {
        Self::new(radius * theta.cos(), radius * theta.sin())
    }

    /// Rotate about the origin by `angle` radians (y grows downward, so positive is clockwise on screen).
    #[inline]
    pub fn rotate(self, angle: f32) -> Self {
        let (sin_a, cos_a) = angle.sin_cos();
        Self::new(
            self.x * cos_a - self.y * sin_a,
            self.x * sin_a + self.y * cos_a,
        )
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }

    #[inline]
    pub fn distance(self, other: Point) -> f32 {
        (self - other).length()
    }

    /// Shortest distance from `self` to the segment `a`-`b`.
    pub fn distance_to_segment(self, a: Point, b: Point) -> f32 {
        let ab = b - a;
        let len_sq = ab.x * ab.x + ab.y * ab.y;
        if len_sq < 1e-10 {
            return self.distance(a);
        }
        let ap = self - a;
        let t = ((ap.x * ab.x + ap.y * ab.y) / len_sq).clamp(0.0, 1.0);
        self.distance(a + ab * t)
    }
}

impl Add for Point {
    type Output = Point;

    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Point {
    type Output = Point;

    #[inline]
    fn mul(self, rhs: f32) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

/// Anti-aliased edge falloff.
///
/// Turns a distance from [`Point::distance_to_segment`] into stroke coverage:
/// 1.0 inside `half_thickness`, linear ramp to 0.0 over `aa_width`, then 0.0.
#[inline]
pub fn aa_edge(dist: f32, half_thickness: f32, aa_width: f32) -> f32 {
    if dist < half_thickness {
        1.0
    } else if dist < half_thickness + aa_width {
        1.0 - (dist - half_thickness) / aa_width
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_rotate_quarter_turn() {
        let p = Point::new(1.0, 0.0).rotate(FRAC_PI_2);
        assert!(p.x.abs() < 1e-6);
        assert!((p.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_distance_to_segment() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        assert!((Point::new(5.0, 3.0).distance_to_segment(a, b) - 3.0).abs() < 1e-6);
        // Beyond the end clamps to the endpoint
        assert!((Point::new(13.0, 4.0).distance_to_segment(a, b) - 5.0).abs() < 1e-6);
        // Degenerate segment behaves like a point
        assert!((Point::new(3.0, 4.0).distance_to_segment(a, a) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_aa_edge() {
        assert_eq!(aa_edge(0.2, 0.5, 1.0), 1.0);
        assert!((aa_edge(1.0, 0.5, 1.0) - 0.5).abs() < 1e-6);
        assert_eq!(aa_edge(2.0, 0.5, 1.0), 0.0);
    }

    #[test]
    fn test_segment_distance_drives_coverage() {
        let (a, b) = (Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        let coverage = |p: Point| aa_edge(p.distance_to_segment(a, b), 1.0, 1.0);
        assert_eq!(coverage(Point::new(5.0, 0.5)), 1.0);
        assert!((coverage(Point::new(5.0, 1.5)) - 0.5).abs() < 1e-6);
        // Past the end cap
        assert_eq!(coverage(Point::new(13.0, 0.0)), 0.0);
    }
}

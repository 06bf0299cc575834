//! # Thread Path Synthesis
//!
//! Builds the geometry of a single thread stroke in a local frame centered
//! at the origin. The stroke runs along +x; callers rotate and translate the
//! result with [`ThreadPath::place`].
//!
//! ## Families
//!
//! ```text
//! straight    ●───────────────────────●                 2 points
//!
//! wave        ●╮   ╭──╮   ╭──╮   ╭──●                   21 points, sin over the length
//!              ╰──╯    ╰──╯    ╰──╯
//!
//! zigzag      ●╲  ╱╲  ╱╲  ╱╲  ╱╲  ╱●                    21 points, alternating ∓amplitude
//!               ╲╱  ╲╱  ╲╱  ╲╱  ╲╱
//!
//! spiral      Archimedean, radius 0 → amplitude        floor(100 * turns) + 1 points
//!             over `wave_frequency` turns
//!
//! crosshatch  ┼┼┼┼┼┼┼┼┼┼┼  11 vertical + 11 horizontal   22 two-point segments
//!             ┼┼┼┼┼┼┼┼┼┼┼  segments at length / 10
//! ```
//!
//! Amplitudes scale with `prominence`, so bolder regions get livelier threads.

use std::f32::consts::TAU;

use crate::geometry::Point;
use crate::settings::{RenderSettings, ThreadPattern};

/// Sample intervals along a wave or zigzag stroke.
const WAVE_STEPS: usize = 20;

/// Spiral samples per full turn.
const SPIRAL_STEPS_PER_TURN: f32 = 100.0;

/// Crosshatch divisions per side.
const CROSSHATCH_DIVISIONS: usize = 10;

/// One or more polylines making up a thread stroke.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ThreadPath {
    pub polylines: Vec<Vec<Point>>,
}

impl ThreadPath {
    fn single(points: Vec<Point>) -> Self {
        Self {
            polylines: vec![points],
        }
    }

    /// Total number of points across all polylines.
    pub fn point_count(&self) -> usize {
        self.polylines.iter().map(Vec::len).sum()
    }

    /// All points in drawing order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.polylines.iter().flatten().copied()
    }

    /// Rotate by `angle` and move the origin to `anchor`.
    pub fn place(mut self, anchor: Point, angle: f32) -> Self {
        for p in self.polylines.iter_mut().flatten() {
            *p = p.rotate(angle) + anchor;
        }
        self
    }
}

/// Pattern parameters shared by every stroke of a render pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathGenerator {
    /// Amplitude at prominence 1.0, in pixels.
    pub wave_amplitude: f32,
    /// Wave cycles per stroke; spiral turns.
    pub wave_frequency: f32,
}

impl PathGenerator {
    pub fn from_settings(settings: &RenderSettings) -> Self {
        Self {
            wave_amplitude: settings.wave_amplitude,
            wave_frequency: settings.wave_frequency,
        }
    }

    /// Build the local-frame path for one stroke.
    pub fn generate(&self, pattern: ThreadPattern, length: f32, prominence: f32) -> ThreadPath {
        let amplitude = self.wave_amplitude * prominence;
        match pattern {
            ThreadPattern::Straight => straight(length),
            ThreadPattern::Wave => wave(length, amplitude, self.wave_frequency),
            ThreadPattern::Zigzag => zigzag(length, amplitude),
            ThreadPattern::Spiral => spiral(amplitude, self.wave_frequency),
            ThreadPattern::Crosshatch => crosshatch(length),
        }
    }
}

/// Line width for a stroke of the given prominence.
#[inline]
pub fn stroke_width(prominence: f32) -> f32 {
    1.0 + prominence * 1.5
}

fn straight(length: f32) -> ThreadPath {
    let half = length / 2.0;
    ThreadPath::single(vec![Point::new(-half, 0.0), Point::new(half, 0.0)])
}

/// x position of step `i` of `steps` across the stroke length.
#[inline]
fn step_x(length: f32, i: usize, steps: usize) -> f32 {
    -length / 2.0 + length * (i as f32 / steps as f32)
}

fn wave(length: f32, amplitude: f32, frequency: f32) -> ThreadPath {
    let points = (0..=WAVE_STEPS)
        .map(|i| {
            let t = i as f32 / WAVE_STEPS as f32;
            Point::new(step_x(length, i, WAVE_STEPS), (t * frequency * TAU).sin() * amplitude)
        })
        .collect();
    ThreadPath::single(points)
}

fn zigzag(length: f32, amplitude: f32) -> ThreadPath {
    let points = (0..=WAVE_STEPS)
        .map(|i| {
            let y = if i % 2 == 0 { -amplitude } else { amplitude };
            Point::new(step_x(length, i, WAVE_STEPS), y)
        })
        .collect();
    ThreadPath::single(points)
}

fn spiral(radius: f32, turns: f32) -> ThreadPath {
    let total = turns * SPIRAL_STEPS_PER_TURN;
    let steps = total.max(0.0).floor() as usize;
    let points = (0..=steps)
        .map(|i| {
            let theta = (i as f32 / SPIRAL_STEPS_PER_TURN) * TAU;
            let r = if total > 0.0 { radius / total * i as f32 } else { 0.0 };
            Point::polar(r, theta)
        })
        .collect();
    ThreadPath::single(points)
}

fn crosshatch(length: f32) -> ThreadPath {
    let half = length / 2.0;
    let offsets: Vec<f32> = (0..=CROSSHATCH_DIVISIONS)
        .map(|i| step_x(length, i, CROSSHATCH_DIVISIONS))
        .collect();

    let vertical = offsets
        .iter()
        .map(|&x| vec![Point::new(x, -half), Point::new(x, half)]);
    let horizontal = offsets
        .iter()
        .map(|&y| vec![Point::new(-half, y), Point::new(half, y)]);

    ThreadPath {
        polylines: vertical.chain(horizontal).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn generator(amplitude: f32, frequency: f32) -> PathGenerator {
        PathGenerator {
            wave_amplitude: amplitude,
            wave_frequency: frequency,
        }
    }

    #[test]
    fn test_straight_two_symmetric_points() {
        for length in [0.5, 1.0, 7.0, 20.0, 123.4] {
            let path = generator(5.0, 1.0).generate(ThreadPattern::Straight, length, 0.7);
            let points: Vec<Point> = path.points().collect();
            assert_eq!(points.len(), 2);
            assert_eq!(points[0].x, -points[1].x);
            assert_eq!(points[0].y, 0.0);
            assert_eq!(points[1].x, length / 2.0);
        }
    }

    #[test]
    fn test_wave_and_zigzag_span_length() {
        for pattern in [ThreadPattern::Wave, ThreadPattern::Zigzag] {
            for length in [3.0, 20.0, 37.5] {
                let path = generator(5.0, 1.5).generate(pattern, length, 0.7);
                let points: Vec<Point> = path.points().collect();
                assert_eq!(points.len(), 21, "{:?}", pattern);
                assert!((points[0].x + length / 2.0).abs() < 1e-4);
                assert!((points[20].x - length / 2.0).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn test_wave_amplitude_scales_with_prominence() {
        let path = generator(4.0, 0.25).generate(ThreadPattern::Wave, 20.0, 0.5);
        let points: Vec<Point> = path.points().collect();
        // Quarter cycle over the full length: last point sits at the crest
        assert!((points[20].y - 2.0).abs() < 1e-4);
        assert_eq!(points[0].y, 0.0);
    }

    #[test]
    fn test_zigzag_alternates() {
        let path = generator(5.0, 1.0).generate(ThreadPattern::Zigzag, 20.0, 1.0);
        let ys: Vec<f32> = path.points().map(|p| p.y).collect();
        assert_eq!(ys[0], -5.0);
        assert_eq!(ys[1], 5.0);
        assert_eq!(ys[20], -5.0);
    }

    #[test]
    fn test_spiral_point_count_and_radius() {
        for frequency in [0.5, 1.0, 1.37, 3.0] {
            let path = generator(5.0, frequency).generate(ThreadPattern::Spiral, 20.0, 0.7);
            let points: Vec<Point> = path.points().collect();
            let expected = (frequency * 100.0f32).floor() as usize + 1;
            assert_eq!(points.len(), expected, "frequency {}", frequency);
            assert_eq!(points[0].length(), 0.0);
            let outer = points.last().unwrap().length();
            assert!(outer <= 3.5 + 1e-4, "outer radius {}", outer);
        }
    }

    #[test]
    fn test_crosshatch_segments() {
        let path = generator(5.0, 1.0).generate(ThreadPattern::Crosshatch, 20.0, 0.7);
        assert_eq!(path.polylines.len(), 22);
        assert!(path.polylines.iter().all(|l| l.len() == 2));
        for p in path.points() {
            assert!(p.x.abs() <= 10.0 + 1e-4 && p.y.abs() <= 10.0 + 1e-4);
        }
        // First vertical segment on the left edge, full height
        assert_eq!(path.polylines[0], vec![Point::new(-10.0, -10.0), Point::new(-10.0, 10.0)]);
    }

    #[test]
    fn test_place_rotates_then_translates() {
        let path = generator(5.0, 1.0)
            .generate(ThreadPattern::Straight, 10.0, 0.7)
            .place(Point::new(100.0, 50.0), FRAC_PI_2);
        let points: Vec<Point> = path.points().collect();
        assert!((points[0].x - 100.0).abs() < 1e-4);
        assert!((points[0].y - 45.0).abs() < 1e-4);
        assert!((points[1].y - 55.0).abs() < 1e-4);
    }

    #[test]
    fn test_stroke_width() {
        assert_eq!(stroke_width(0.0), 1.0);
        assert!((stroke_width(0.7) - 2.05).abs() < 1e-6);
    }
}

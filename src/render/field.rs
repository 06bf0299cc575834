//! # Thread Field
//!
//! Overlays the whole canvas with thread bundles laid out on a lattice.
//!
//! ## Lattices
//!
//! ```text
//! Directional (horizontal / vertical / diagonal)      Radial
//!
//!  ●────●────●────●                                     ● ● ●
//!  │    │    │    │   spacing = threadSpacing * 10    ●   ●   ●
//!  ●────●────●────●   x, y ∈ {0, s, 2s, ...} ≤ size   ●  ● ◎ ●  ●   rings every `spacing`
//!  │    │    │    │                                     ●   ●   ●   n = max(8, ⌊2πr / s⌋)
//!  ●────●────●────●                                       ● ● ●
//! ```
//!
//! Every lattice point samples one source pixel. Transparent pixels
//! (alpha < 128) and points that fall outside the image are skipped;
//! everything else gets a bundle of darkened strokes `2 * spacing` long at a
//! fixed prominence of 0.7.

use std::f32::consts::{FRAC_PI_2, TAU};

use rand::Rng;

use crate::color::{self, DEFAULT_DARKEN};
use crate::error::StitchError;
use crate::geometry::Point;
use crate::raster::{PixelBuffer, sample_point};
use crate::settings::RenderSettings;
use crate::thread::stroke::{ANGLE_JITTER, centered_jitter};
use crate::thread::{PathGenerator, ThreadStroke, jittered_bundle};

/// Prominence used for every field stroke.
pub const FIELD_PROMINENCE: f32 = 0.7;

/// Minimum number of points on a radial ring.
pub const MIN_RING_POINTS: usize = 8;

/// Largest lattice a single pass will build.
pub const MAX_LATTICE_POINTS: usize = 1 << 22;

/// A stitch site and the direction its threads run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticePoint {
    pub position: Point,
    /// Radians
    pub angle: f32,
}

/// Counters from one field pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldStats {
    pub lattice_points: usize,
    pub skipped: usize,
    pub strokes: usize,
}

/// Regular grid covering `[0, width] x [0, height]` inclusive.
pub fn directional_lattice(width: usize, height: usize, spacing: f32, angle: f32) -> Vec<LatticePoint> {
    if !(spacing.is_finite() && spacing > 0.0) {
        return Vec::new();
    }
    let steps = |extent: usize| (extent as f32 / spacing).floor() as usize;
    let (cols, rows) = (steps(width), steps(height));

    let mut points = Vec::with_capacity((cols + 1) * (rows + 1));
    for j in 0..=rows {
        for i in 0..=cols {
            points.push(LatticePoint {
                position: Point::new(i as f32 * spacing, j as f32 * spacing),
                angle,
            });
        }
    }
    points
}

/// Points on a ring of the given radius.
#[inline]
pub fn ring_point_count(radius: f32, spacing: f32) -> usize {
    let circumference = TAU * radius;
    MIN_RING_POINTS.max((circumference / spacing).floor() as usize)
}

/// Concentric rings around the image center, out to the corner distance.
///
/// Threads run along the ring: each point's angle is its polar angle plus a quarter turn.
pub fn radial_lattice(width: usize, height: usize, spacing: f32) -> Vec<LatticePoint> {
    if !(spacing.is_finite() && spacing > 0.0) {
        return Vec::new();
    }
    let center = Point::new(width as f32 / 2.0, height as f32 / 2.0);
    let max_radius = center.length();

    let mut points = Vec::new();
    let mut ring = 1usize;
    loop {
        let radius = ring as f32 * spacing;
        if radius > max_radius {
            break;
        }
        let count = ring_point_count(radius, spacing);
        for i in 0..count {
            let theta = (i as f32 / count as f32) * TAU;
            points.push(LatticePoint {
                position: center + Point::polar(radius, theta),
                angle: theta + FRAC_PI_2,
            });
        }
        ring += 1;
    }
    points
}

/// Upper bound on the number of lattice points, computed without allocating.
pub fn lattice_size_bound(width: usize, height: usize, spacing: f32, radial: bool) -> f64 {
    let spacing = spacing as f64;
    if !(spacing.is_finite() && spacing > 0.0) {
        return 0.0;
    }
    if radial {
        let max_radius = (width as f64 / 2.0).hypot(height as f64 / 2.0);
        let rings = (max_radius / spacing).floor();
        rings * (MIN_RING_POINTS as f64 + std::f64::consts::TAU * max_radius / spacing)
    } else {
        ((width as f64 / spacing).floor() + 1.0) * ((height as f64 / spacing).floor() + 1.0)
    }
}

/// Lattice for the configured stitch direction.
///
/// Fails with [`StitchError::InvalidSetting`] when the spacing is too fine
/// for the image size.
pub fn lattice_for(
    settings: &RenderSettings,
    width: usize,
    height: usize,
) -> Result<Vec<LatticePoint>, StitchError> {
    let spacing = settings.lattice_spacing();
    let angle = settings.stitch_direction.angle();

    let bound = lattice_size_bound(width, height, spacing, angle.is_none());
    if bound > MAX_LATTICE_POINTS as f64 {
        return Err(StitchError::invalid(
            "threadSpacing",
            format!(
                "{} is too fine for a {}x{} image (~{:.0} lattice points, limit {})",
                settings.thread_spacing, width, height, bound, MAX_LATTICE_POINTS
            ),
        ));
    }

    Ok(match angle {
        Some(angle) => directional_lattice(width, height, spacing, angle),
        None => radial_lattice(width, height, spacing),
    })
}

/// Draw the thread field onto `canvas`, sampling colors from `source`.
pub fn render_field<R: Rng + ?Sized>(
    canvas: &mut PixelBuffer,
    source: &PixelBuffer,
    settings: &RenderSettings,
    rng: &mut R,
) -> Result<FieldStats, StitchError> {
    let spacing = settings.lattice_spacing();
    let generator = PathGenerator::from_settings(settings);
    let lattice = lattice_for(settings, source.width(), source.height())?;
    // Directional sites get an extra per-site angle wobble; radial sites follow the ring.
    let site_wobble = settings.stitch_direction.angle().is_some();

    let mut stats = FieldStats {
        lattice_points: lattice.len(),
        ..Default::default()
    };

    for site in &lattice {
        let sampled = sample_point(source, site.position.x, site.position.y);
        if !sampled.is_opaque() {
            stats.skipped += 1;
            continue;
        }

        let angle = if site_wobble {
            site.angle + centered_jitter(rng, ANGLE_JITTER)
        } else {
            site.angle
        };

        let base = ThreadStroke {
            anchor: site.position,
            length: spacing * 2.0,
            angle,
            color: color::adjust_sampled(&sampled, DEFAULT_DARKEN),
            pattern: settings.thread_pattern,
            prominence: FIELD_PROMINENCE,
        };

        for stroke in jittered_bundle(rng, &base) {
            stroke.draw(canvas, &generator);
            stats.strokes += 1;
        }
    }

    log::debug!(
        "thread field ({}): {} sites, {} skipped, {} strokes",
        settings.stitch_direction,
        stats.lattice_points,
        stats.skipped,
        stats.strokes
    );
    Ok(stats)
}

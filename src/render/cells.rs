//! # Embroidery Cells
//!
//! Cell-based pass used by the embroidery view mode.
//!
//! The image is cut into square cells:
//!
//! ```text
//! cell = max(2, min(width, height) / (grid_size * 2.5))
//! ```
//!
//! Each cell's average color is scored for prominence; cells above
//! [`PROMINENCE_THRESHOLD`] get a bundle of strokes through their center,
//! one cell long, oriented by the stitch direction. Radial layouts have no
//! cell pass; the thread field draws the rings.

use rand::Rng;

use crate::color::{self, DEFAULT_DARKEN, PROMINENCE_THRESHOLD};
use crate::geometry::Point;
use crate::raster::{PixelBuffer, sample};
use crate::settings::RenderSettings;
use crate::thread::{PathGenerator, ThreadStroke, jittered_bundle};

/// Smallest cell edge in pixels.
pub const MIN_CELL_SIZE: f32 = 2.0;

/// Cells per grid unit along the short side.
const CELLS_PER_GRID_UNIT: f32 = 2.5;

/// Counters from one cell pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellStats {
    pub cells: usize,
    pub transparent: usize,
    pub faint: usize,
    pub strokes: usize,
}

/// Cell edge length for an image and grid size.
pub fn cell_size(width: usize, height: usize, grid_size: u32) -> f32 {
    let short = width.min(height) as f32;
    MIN_CELL_SIZE.max(short / (grid_size.max(1) as f32 * CELLS_PER_GRID_UNIT))
}

/// Draw embroidery cells onto `canvas`, sampling colors from `source`.
pub fn render_cells<R: Rng + ?Sized>(
    canvas: &mut PixelBuffer,
    source: &PixelBuffer,
    settings: &RenderSettings,
    grid_size: u32,
    rng: &mut R,
) -> CellStats {
    let mut stats = CellStats::default();
    let Some(angle) = settings.stitch_direction.angle() else {
        log::debug!("embroidery cells: radial direction, deferring to thread field");
        return stats;
    };

    let size = cell_size(source.width(), source.height(), grid_size);
    let generator = PathGenerator::from_settings(settings);
    let (width, height) = (source.width() as f32, source.height() as f32);

    let mut row = 0usize;
    while (row as f32 * size) < height {
        let y = row as f32 * size;
        let mut col = 0usize;
        while (col as f32 * size) < width {
            let x = col as f32 * size;
            stats.cells += 1;
            col += 1;

            let x0 = x.floor() as i64;
            let y0 = y.floor() as i64;
            let w = (x + size).ceil() as i64 - x0;
            let h = (y + size).ceil() as i64 - y0;
            let avg = sample(source, x0, y0, w, h);
            if !avg.is_opaque() {
                stats.transparent += 1;
                continue;
            }

            let prominence = color::prominence(&avg);
            if prominence <= PROMINENCE_THRESHOLD {
                stats.faint += 1;
                continue;
            }

            let base = ThreadStroke {
                anchor: Point::new(x + size / 2.0, y + size / 2.0),
                length: size,
                angle,
                color: color::adjust_sampled(&avg, DEFAULT_DARKEN),
                pattern: settings.thread_pattern,
                prominence,
            };
            for stroke in jittered_bundle(rng, &base) {
                stroke.draw(canvas, &generator);
                stats.strokes += 1;
            }
        }
        row += 1;
    }

    log::debug!(
        "embroidery cells: size {:.2}px, {} cells, {} transparent, {} faint, {} strokes",
        size,
        stats.cells,
        stats.transparent,
        stats.faint,
        stats.strokes
    );
    stats
}

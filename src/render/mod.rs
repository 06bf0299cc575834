//! # Rendering Module
//!
//! Turns a source image into an embroidery-style rendering.
//!
//! ## Modules
//!
//! - [`cells`]: Embroidery-mode cell pass (prominence-gated bundles per cell)
//! - [`field`]: Thread field overlay on a directional or radial lattice
//!
//! ## Pass Order
//!
//! ```text
//! source ──copy──► canvas ──cells (embroidery only)──► canvas ──field──► canvas ──► palette
//!    │                          ▲                                 ▲
//!    └───────── colors are always sampled from the untouched source ┘
//! ```
//!
//! ## Usage Example
//!
//! ```
//! use stitchwork::raster::PixelBuffer;
//! use stitchwork::render;
//! use stitchwork::settings::RenderSettings;
//!
//! let source = PixelBuffer::from_rgba(32, 32, [200, 60, 60, 255].repeat(32 * 32))?;
//! let rendering = render::render(&source, &RenderSettings::default(), 50, &mut rand::rng())?;
//!
//! assert_eq!(rendering.raster.width(), 32);
//! assert!(rendering.palette.len() <= 32);
//! # Ok::<(), stitchwork::StitchError>(())
//! ```

pub mod cells;
pub mod field;

use rand::Rng;

use crate::error::StitchError;
use crate::palette::{self, Palette};
use crate::raster::PixelBuffer;
use crate::settings::{self, RenderSettings, ViewMode};

pub use cells::CellStats;
pub use field::FieldStats;

/// Result of one full render pass.
#[derive(Debug, Clone)]
pub struct Rendering {
    /// Output raster, same dimensions as the source.
    pub raster: PixelBuffer,
    /// Distinct opaque colors of the output, in scan order.
    pub palette: Palette,
    pub cell_stats: CellStats,
    pub field_stats: FieldStats,
}

/// Render `source` with one settings snapshot.
///
/// The output starts as a copy of the source; the cell pass (embroidery
/// view only) and then the thread field are drawn on top of it.
pub fn render<R: Rng + ?Sized>(
    source: &PixelBuffer,
    settings: &RenderSettings,
    grid_size: u32,
    rng: &mut R,
) -> Result<Rendering, StitchError> {
    settings.validate()?;
    settings::validate_grid_size(grid_size)?;

    let mut raster = source.clone();

    let cell_stats = if settings.view_mode == ViewMode::Embroidery {
        cells::render_cells(&mut raster, source, settings, grid_size, rng)
    } else {
        CellStats::default()
    };

    let field_stats = field::render_field(&mut raster, source, settings, rng)?;
    let palette = palette::extract(&raster);

    log::info!(
        "Rendered {}x{} ({} view, {} {}): {} strokes, {} palette colors",
        raster.width(),
        raster.height(),
        settings.view_mode,
        settings.stitch_direction,
        settings.thread_pattern,
        cell_stats.strokes + field_stats.strokes,
        palette.len()
    );

    Ok(Rendering {
        raster,
        palette,
        cell_stats,
        field_stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SettingUpdate;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn gradient(width: usize, height: usize) -> PixelBuffer {
        let mut data = Vec::with_capacity(width * height * 4);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&[(x * 255 / width) as u8, (y * 255 / height) as u8, 90, 255]);
            }
        }
        PixelBuffer::from_rgba(width, height, data).unwrap()
    }

    #[test]
    fn test_normal_view_skips_cell_pass() {
        let source = gradient(50, 50);
        let rendering =
            render(&source, &RenderSettings::default(), 50, &mut StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(rendering.cell_stats, CellStats::default());
        assert!(rendering.field_stats.strokes > 0);
        assert_eq!(rendering.raster.width(), 50);
        assert_eq!(rendering.raster.height(), 50);
    }

    #[test]
    fn test_embroidery_view_runs_both_passes() {
        let source = gradient(50, 50);
        let settings = RenderSettings::default()
            .with(SettingUpdate::ViewMode(ViewMode::Embroidery))
            .unwrap();
        let rendering = render(&source, &settings, 10, &mut StdRng::seed_from_u64(1)).unwrap();
        assert!(rendering.cell_stats.strokes > 0);
        assert!(rendering.field_stats.strokes > 0);
    }

    #[test]
    fn test_seeded_render_is_reproducible() {
        let source = gradient(40, 30);
        let settings = RenderSettings::default();
        let a = render(&source, &settings, 50, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = render(&source, &settings, 50, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a.raster, b.raster);
        assert_eq!(a.palette, b.palette);
    }

    #[test]
    fn test_invalid_inputs_rejected_before_drawing() {
        let source = gradient(10, 10);
        let bad = RenderSettings {
            thread_spacing: -1.0,
            ..Default::default()
        };
        assert!(render(&source, &bad, 50, &mut StdRng::seed_from_u64(1)).is_err());
        assert!(render(&source, &RenderSettings::default(), 0, &mut StdRng::seed_from_u64(1)).is_err());
    }
}

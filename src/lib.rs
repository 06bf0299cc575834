//! # Stitchwork - Embroidery Pattern Rendering
//!
//! Stitchwork turns a raster image into a stylized embroidery rendering and
//! a binary stitch file. It provides:
//!
//! - **Sampling**: Region color averaging over RGBA buffers
//! - **Thread geometry**: Straight, wave, zigzag, spiral and crosshatch strokes
//! - **Rendering**: Embroidery cell pass and directional/radial thread fields
//! - **Palette**: Distinct output colors and a numbered thread list
//! - **Stitch export**: Placeholder `.dst`-style binary stream
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use stitchwork::{Session, settings::{SettingUpdate, ThreadPattern, ViewMode}};
//!
//! let mut session = Session::open(Path::new("photo.png"))?;
//! session.update(SettingUpdate::ViewMode(ViewMode::Embroidery))?;
//! session.update(SettingUpdate::ThreadPattern(ThreadPattern::Wave))?;
//!
//! let rendering = session.recompute(&mut rand::rng())?;
//! println!("{} colors", rendering.palette.len());
//!
//! session.export_png(Path::new("pattern.png"))?;
//! std::fs::write("pattern.dst", session.export_stitch_file()?)?;
//! std::fs::write("pattern-colors.txt", session.color_list()?)?;
//!
//! # Ok::<(), stitchwork::StitchError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`raster`] | Pixel buffers, sampling, stroke rasterization |
//! | [`color`] | Thread color adjustment and prominence scoring |
//! | [`thread`] | Stroke geometry and jittered bundles |
//! | [`render`] | Cell and thread-field passes |
//! | [`palette`] | Output palette and color list |
//! | [`stitch`] | Stitch file encoding |
//! | [`settings`] | Render settings and validated updates |
//! | [`session`] | Source + settings + last rendering, explicit recompute |
//! | [`error`] | Error types |

pub mod color;
pub mod error;
pub mod geometry;
pub mod palette;
pub mod raster;
pub mod render;
pub mod session;
pub mod settings;
pub mod stitch;
pub mod thread;

// Re-exports for convenience
pub use error::StitchError;
pub use raster::PixelBuffer;
pub use session::Session;
pub use settings::RenderSettings;

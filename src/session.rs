//! # Pattern Session
//!
//! Holds the source image, the current settings and the last rendering.
//!
//! Setting changes only mark the session stale; nothing is redrawn until
//! [`Session::recompute`] is called. Callers that receive a burst of changes
//! (slider drags, batch edits) can coalesce them and recompute once.
//! Every recompute is a full redraw from the source with a settings
//! snapshot taken at the start of the pass.
//!
//! ```text
//! update() ──► stale ──recompute()──► Rendering ──► export_png / export_stitch_file / color_list
//! ```

use std::path::Path;

use rand::Rng;

use crate::error::StitchError;
use crate::palette::Palette;
use crate::raster::PixelBuffer;
use crate::render::{self, Rendering};
use crate::settings::{self, DEFAULT_GRID_SIZE, RenderSettings, SettingUpdate};
use crate::stitch::PatternDocument;

/// One image being turned into a pattern.
#[derive(Debug, Clone)]
pub struct Session {
    source: PixelBuffer,
    settings: RenderSettings,
    grid_size: u32,
    rendering: Option<Rendering>,
    stale: bool,
}

impl Session {
    /// Start a session with default settings.
    pub fn new(source: PixelBuffer) -> Self {
        Self {
            source,
            settings: RenderSettings::default(),
            grid_size: DEFAULT_GRID_SIZE,
            rendering: None,
            stale: true,
        }
    }

    /// Decode an image file and start a session.
    pub fn open(path: &Path) -> Result<Self, StitchError> {
        Ok(Self::new(PixelBuffer::open(path)?))
    }

    /// Replace all settings at once (validated).
    pub fn with_settings(mut self, settings: RenderSettings) -> Result<Self, StitchError> {
        settings.validate()?;
        self.settings = settings;
        self.stale = true;
        Ok(self)
    }

    pub fn source(&self) -> &PixelBuffer {
        &self.source
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn grid_size(&self) -> u32 {
        self.grid_size
    }

    /// True when the last rendering no longer reflects the inputs.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Swap in a new source image.
    pub fn set_source(&mut self, source: PixelBuffer) {
        self.source = source;
        self.stale = true;
    }

    /// Apply one settings change. Invalid values leave the session untouched.
    pub fn update(&mut self, update: SettingUpdate) -> Result<(), StitchError> {
        self.settings.apply(update)?;
        self.stale = true;
        Ok(())
    }

    pub fn set_grid_size(&mut self, grid_size: u32) -> Result<(), StitchError> {
        settings::validate_grid_size(grid_size)?;
        self.grid_size = grid_size;
        self.stale = true;
        Ok(())
    }

    /// Redraw everything from the source.
    pub fn recompute<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<&Rendering, StitchError> {
        let snapshot = self.settings.clone();
        let rendering = render::render(&self.source, &snapshot, self.grid_size, rng)?;
        self.stale = false;
        let rendering: &Rendering = self.rendering.insert(rendering);
        Ok(rendering)
    }

    /// The last completed rendering, if any.
    pub fn rendering(&self) -> Option<&Rendering> {
        self.rendering.as_ref()
    }

    fn require_rendering(&self) -> Result<&Rendering, StitchError> {
        self.rendering.as_ref().ok_or_else(|| {
            StitchError::CanvasUnavailable("nothing has been rendered yet".to_string())
        })
    }

    /// Colors of the last rendering.
    pub fn palette(&self) -> Result<&Palette, StitchError> {
        Ok(&self.require_rendering()?.palette)
    }

    /// Numbered thread list of the last rendering.
    pub fn color_list(&self) -> Result<String, StitchError> {
        Ok(self.palette()?.color_list())
    }

    /// Stitch file bytes for the last rendering.
    pub fn export_stitch_file(&self) -> Result<Vec<u8>, StitchError> {
        let rendering = self.require_rendering()?;
        Ok(PatternDocument::from_raster(&rendering.raster).to_bytes())
    }

    /// Write the last rendering as PNG.
    pub fn export_png(&self, path: &Path) -> Result<(), StitchError> {
        self.require_rendering()?.raster.save_png(path)?;
        log::info!("Wrote {}", path.display());
        Ok(())
    }
}

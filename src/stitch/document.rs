//! Pattern documents: ordered stitch commands ready for encoding.
//!
//! [`PatternDocument::from_raster_grid`] reproduces the placeholder walk:
//! it ignores the drawn strokes and visits a fixed 50-pixel grid over the
//! output raster, emitting a zero jump and a stitch at every grid point.

use super::commands;
use crate::raster::PixelBuffer;

/// Grid pitch of the placeholder walk, in pixels.
pub const GRID_PITCH: usize = 50;

/// One stitch-file command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StitchCommand {
    /// Move without stitching
    Jump { dx: i32, dy: i32 },
    /// Needle down
    Stitch { dx: i32, dy: i32 },
}

impl StitchCommand {
    fn record(self) -> [u8; commands::RECORD_LEN] {
        match self {
            Self::Jump { dx, dy } => commands::jump(dx, dy),
            Self::Stitch { dx, dy } => commands::stitch(dx, dy),
        }
    }
}

/// Commands for one export. The end record is appended on encoding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternDocument {
    pub commands: Vec<StitchCommand>,
}

impl PatternDocument {
    /// Placeholder walk over a `width` x `height` raster.
    pub fn from_raster_grid(width: usize, height: usize) -> Self {
        let mut commands = Vec::new();
        for y in (0..height).step_by(GRID_PITCH) {
            for x in (0..width).step_by(GRID_PITCH) {
                commands.push(StitchCommand::Jump { dx: 0, dy: 0 });
                commands.push(StitchCommand::Stitch {
                    dx: x as i32,
                    dy: y as i32,
                });
            }
        }
        Self { commands }
    }

    /// Placeholder walk over a rendered raster.
    pub fn from_raster(raster: &PixelBuffer) -> Self {
        Self::from_raster_grid(raster.width(), raster.height())
    }

    /// Encoded length in bytes.
    pub fn encoded_len(&self) -> usize {
        commands::HEADER_LEN + (self.commands.len() + 1) * commands::RECORD_LEN
    }

    /// Header, one record per command, then the end record.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        out.extend(commands::header());
        for command in &self.commands {
            out.extend_from_slice(&command.record());
        }
        out.extend_from_slice(&commands::end());
        out
    }
}

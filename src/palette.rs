//! # Palette
//!
//! Reads the finished rendering back and lists the distinct opaque colors
//! it contains, plus the plain-text thread list built from them.
//!
//! ## Extraction Rules
//!
//! - Row-major scan of the output raster
//! - Pixels with alpha < 128 are ignored
//! - Colors are exact `(r, g, b)` triples; no merging of near colors
//! - First-seen order, at most [`MAX_PALETTE_COLORS`] entries
//!
//! ## Color List Format
//!
//! ```text
//! 1. 310 - Black (rgb(0,0,0))
//! 2. DMC-417 - Custom Color (rgb(12,200,7))
//! ```

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::raster::PixelBuffer;

/// Palette size cap.
pub const MAX_PALETTE_COLORS: usize = 32;

/// Alpha (0-255) at or above which a pixel counts as opaque.
const OPAQUE_ALPHA: u8 = 128;

/// Default file name for the exported color list.
pub const COLOR_LIST_FILENAME: &str = "pattern-colors.txt";

/// Name used for colors with no catalogued thread.
const CUSTOM_COLOR_NAME: &str = "Custom Color";

/// Threads with a known exact color.
const KNOWN_THREADS: &[(Rgb, &str, &str)] = &[
    (Rgb::new(255, 255, 255), "B5200", "Snow White"),
    (Rgb::new(0, 0, 0), "310", "Black"),
    (Rgb::new(237, 27, 36), "666", "Bright Red"),
];

/// An opaque 8-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    fn packed(self) -> u32 {
        (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }
}

/// Formats as `rgb(r,g,b)`.
impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}

/// Ordered set of distinct colors found in a rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rgb> {
        self.colors.iter()
    }

    /// Render the numbered thread list, one line per color.
    pub fn color_list(&self) -> String {
        self.colors
            .iter()
            .enumerate()
            .map(|(i, &rgb)| {
                let thread = thread_for(rgb);
                format!("{}. {} - {} ({})", i + 1, thread.code, thread.name, rgb)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Scan `raster` for up to [`MAX_PALETTE_COLORS`] distinct opaque colors.
pub fn extract(raster: &PixelBuffer) -> Palette {
    let mut seen = HashSet::with_capacity(MAX_PALETTE_COLORS);
    let mut colors = Vec::with_capacity(MAX_PALETTE_COLORS);

    for [r, g, b, a] in raster.pixels() {
        if a < OPAQUE_ALPHA {
            continue;
        }
        let rgb = Rgb::new(r, g, b);
        if seen.insert(rgb) {
            colors.push(rgb);
            if colors.len() == MAX_PALETTE_COLORS {
                break;
            }
        }
    }

    Palette { colors }
}

/// Thread code and name for a palette color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadInfo {
    pub code: String,
    pub name: &'static str,
}

/// Look up a catalogued thread, or derive a stable custom code.
pub fn thread_for(rgb: Rgb) -> ThreadInfo {
    if let Some(&(_, code, name)) = KNOWN_THREADS.iter().find(|(known, _, _)| *known == rgb) {
        return ThreadInfo {
            code: code.to_string(),
            name,
        };
    }
    ThreadInfo {
        code: format!("DMC-{}", mix(rgb.packed()) % 1000),
        name: CUSTOM_COLOR_NAME,
    }
}

/// Integer bit mixer.
#[inline]
fn mix(mut x: u32) -> u32 {
    x = x.wrapping_mul(0x45d9f3b);
    x ^= x >> 16;
    x = x.wrapping_mul(0x45d9f3b);
    x ^= x >> 16;
    x
}

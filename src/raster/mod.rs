//! # Raster Module
//!
//! Pixel-level building blocks for the rendering pipeline.
//!
//! ## Modules
//!
//! - [`buffer`]: RGBA8 pixel buffer, decode/encode through the `image` crate
//! - [`sample`]: Region averaging with an explicit empty-region sentinel
//! - [`stroke`]: Anti-aliased polyline stroking with round caps and joins

pub mod buffer;
pub mod sample;
pub mod stroke;

pub use buffer::PixelBuffer;
pub use sample::{SampledColor, sample, sample_point};
pub use stroke::{StrokeStyle, stroke_polylines};

//! # Thread Module
//!
//! Geometry and placement of individual thread strokes.
//!
//! - [`path`]: Local-frame stroke geometry for the five thread families
//! - [`stroke`]: Drawable strokes and jittered five-thread bundles

pub mod path;
pub mod stroke;

pub use path::{PathGenerator, ThreadPath, stroke_width};
pub use stroke::{THREADS_PER_BUNDLE, ThreadStroke, jittered_bundle};

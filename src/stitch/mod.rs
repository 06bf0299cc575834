//! # Stitch File Export
//!
//! Binary stitch file produced from a rendering.
//!
//! ## Module Structure
//!
//! - [`commands`]: Header and three-byte record builders
//! - [`document`]: Ordered command list and the placeholder grid walk
//!
//! ## Usage Example
//!
//! ```
//! use stitchwork::stitch::PatternDocument;
//!
//! let doc = PatternDocument::from_raster_grid(100, 100);
//! let bytes = doc.to_bytes();
//!
//! // 512 header + 4 grid points * (jump + stitch) + end record
//! assert_eq!(bytes.len(), 512 + 4 * 6 + 3);
//! ```
//!
//! The stream does not describe the drawn threads; it is a fixed-grid
//! placeholder kept for compatibility with existing exports.

pub mod commands;
pub mod document;

pub use document::{PatternDocument, StitchCommand};

/// Default file name for stitch exports.
pub const DEFAULT_FILENAME: &str = "pattern.dst";

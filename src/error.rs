//! # Error Types
//!
//! This module defines error types used throughout the stitchwork library.

use thiserror::Error;

/// Main error type for stitchwork operations
#[derive(Debug, Error)]
pub enum StitchError {
    /// Source image could not be read or decoded
    #[error("Image load failed: {0}")]
    ImageLoad(String),

    /// Drawing surface could not be created or is not available yet
    #[error("Canvas unavailable: {0}")]
    CanvasUnavailable(String),

    /// A setting was rejected at the boundary
    #[error("Invalid setting '{field}': {reason}")]
    InvalidSetting { field: &'static str, reason: String },

    /// Settings file could not be parsed
    #[error("Settings error: {0}")]
    Settings(String),

    /// Export (PNG, stitch file, color list) failed
    #[error("Export error: {0}")]
    Export(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StitchError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidSetting {
            field,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_setting_message() {
        let err = StitchError::invalid("threadSpacing", "must be positive, got -1");
        assert_eq!(
            err.to_string(),
            "Invalid setting 'threadSpacing': must be positive, got -1"
        );
    }
}

//! # Render Settings
//!
//! Immutable per-render configuration. A render pass borrows one snapshot of
//! [`RenderSettings`]; changes go through [`SettingUpdate`], which validates
//! the new value before it is stored.
//!
//! ## JSON Format
//!
//! ```json
//! {
//!   "viewMode": "embroidery",
//!   "stitchDirection": "radial",
//!   "threadPattern": "wave",
//!   "threadSpacing": 1.5,
//!   "waveAmplitude": 5,
//!   "waveFrequency": 1,
//!   "threadIntensity": 1.0
//! }
//! ```
//!
//! Missing fields take their defaults.
//!
//! ## Valid Ranges
//!
//! | Field | Range |
//! |-------|-------|
//! | threadSpacing | [0.5, 10] |
//! | waveAmplitude | [0, 100] |
//! | waveFrequency | (0, 20] |
//! | threadIntensity | [0, 10] |
//! | grid size | >= 1 |

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::StitchError;

/// Smallest thread spacing; keeps the lattice pitch at 5 px or more.
pub const MIN_THREAD_SPACING: f32 = 0.5;

/// Largest thread spacing.
pub const MAX_THREAD_SPACING: f32 = 10.0;

/// Default number of grid cells along the short image side (embroidery cell sizing).
pub const DEFAULT_GRID_SIZE: u32 = 50;

/// How the output is presented.
///
/// Only `Embroidery` changes the rendering; the others keep the thread
/// field overlay alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Normal,
    Stitches,
    Symbols,
    Embroidery,
}

/// Orientation of thread strokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StitchDirection {
    #[default]
    Horizontal,
    Vertical,
    Diagonal,
    /// Concentric rings around the image center
    Radial,
}

impl StitchDirection {
    /// Fixed stroke angle in radians, or `None` for radial layouts.
    pub fn angle(self) -> Option<f32> {
        match self {
            Self::Horizontal => Some(0.0),
            Self::Vertical => Some(FRAC_PI_2),
            Self::Diagonal => Some(FRAC_PI_4),
            Self::Radial => None,
        }
    }
}

/// Geometric family of a single thread stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreadPattern {
    #[default]
    Straight,
    Wave,
    Zigzag,
    Spiral,
    Crosshatch,
}

impl ThreadPattern {
    /// Parse a pattern tag, falling back to `Straight` for unknown names.
    pub fn from_name_lenient(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            log::warn!("unknown thread pattern '{}', using straight", name);
            Self::default()
        })
    }
}

macro_rules! named_enum {
    ($ty:ident, $field:literal, { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            /// All variants, in display order.
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            pub fn name(self) -> &'static str {
                match self {
                    $($ty::$variant => $name),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $ty {
            type Err = StitchError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($name => Ok($ty::$variant),)+
                    other => Err(StitchError::invalid(
                        $field,
                        format!("unknown value '{}'", other),
                    )),
                }
            }
        }
    };
}

named_enum!(ViewMode, "viewMode", {
    Normal => "normal",
    Stitches => "stitches",
    Symbols => "symbols",
    Embroidery => "embroidery",
});

named_enum!(StitchDirection, "stitchDirection", {
    Horizontal => "horizontal",
    Vertical => "vertical",
    Diagonal => "diagonal",
    Radial => "radial",
});

named_enum!(ThreadPattern, "threadPattern", {
    Straight => "straight",
    Wave => "wave",
    Zigzag => "zigzag",
    Spiral => "spiral",
    Crosshatch => "crosshatch",
});

/// Per-render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderSettings {
    /// Presentation mode. Default: normal
    pub view_mode: ViewMode,
    /// Stroke orientation. Default: horizontal
    pub stitch_direction: StitchDirection,
    /// Stroke geometry. Unknown names read as straight. Default: straight
    #[serde(deserialize_with = "lenient_pattern")]
    pub thread_pattern: ThreadPattern,
    /// Lattice spacing multiplier (pixels / 10). Default: 1.0
    pub thread_spacing: f32,
    /// Wave/zigzag/spiral amplitude in pixels at prominence 1. Default: 5.0
    pub wave_amplitude: f32,
    /// Wave cycles per stroke, spiral turns. Default: 1.0
    pub wave_frequency: f32,
    /// Display-only intensity, does not change geometry. Default: 1.0
    pub thread_intensity: f32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            view_mode: ViewMode::Normal,
            stitch_direction: StitchDirection::Horizontal,
            thread_pattern: ThreadPattern::Straight,
            thread_spacing: 1.0,
            wave_amplitude: 5.0,
            wave_frequency: 1.0,
            thread_intensity: 1.0,
        }
    }
}

fn lenient_pattern<'de, D>(deserializer: D) -> Result<ThreadPattern, D::Error>
where
    D: Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?;
    Ok(ThreadPattern::from_name_lenient(&name))
}

/// A single typed settings change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettingUpdate {
    ViewMode(ViewMode),
    StitchDirection(StitchDirection),
    ThreadPattern(ThreadPattern),
    ThreadSpacing(f32),
    WaveAmplitude(f32),
    WaveFrequency(f32),
    ThreadIntensity(f32),
}

impl SettingUpdate {
    /// Check the carried value without applying it.
    pub fn validate(&self) -> Result<(), StitchError> {
        match *self {
            Self::ViewMode(_) | Self::StitchDirection(_) | Self::ThreadPattern(_) => Ok(()),
            Self::ThreadSpacing(v) => {
                check_range("threadSpacing", v, MIN_THREAD_SPACING, true, MAX_THREAD_SPACING)
            }
            Self::WaveAmplitude(v) => check_range("waveAmplitude", v, 0.0, true, 100.0),
            Self::WaveFrequency(v) => check_range("waveFrequency", v, 0.0, false, 20.0),
            Self::ThreadIntensity(v) => check_range("threadIntensity", v, 0.0, true, 10.0),
        }
    }
}

/// `min` is inclusive when `min_inclusive`, `max` is always inclusive.
fn check_range(
    field: &'static str,
    value: f32,
    min: f32,
    min_inclusive: bool,
    max: f32,
) -> Result<(), StitchError> {
    if !value.is_finite() {
        return Err(StitchError::invalid(field, format!("must be finite, got {}", value)));
    }
    let above_min = if min_inclusive { value >= min } else { value > min };
    if !above_min || value > max {
        let open = if min_inclusive { '[' } else { '(' };
        return Err(StitchError::invalid(
            field,
            format!("{} is outside {}{}, {}]", value, open, min, max),
        ));
    }
    Ok(())
}

/// Reject a grid size of zero.
pub fn validate_grid_size(grid_size: u32) -> Result<(), StitchError> {
    if grid_size == 0 {
        return Err(StitchError::invalid("gridSize", "must be at least 1"));
    }
    Ok(())
}

impl RenderSettings {
    /// Apply one validated change. On error the settings are unchanged.
    pub fn apply(&mut self, update: SettingUpdate) -> Result<(), StitchError> {
        update.validate()?;
        match update {
            SettingUpdate::ViewMode(v) => self.view_mode = v,
            SettingUpdate::StitchDirection(v) => self.stitch_direction = v,
            SettingUpdate::ThreadPattern(v) => self.thread_pattern = v,
            SettingUpdate::ThreadSpacing(v) => self.thread_spacing = v,
            SettingUpdate::WaveAmplitude(v) => self.wave_amplitude = v,
            SettingUpdate::WaveFrequency(v) => self.wave_frequency = v,
            SettingUpdate::ThreadIntensity(v) => self.thread_intensity = v,
        }
        Ok(())
    }

    /// Builder-style [`apply`](Self::apply).
    pub fn with(mut self, update: SettingUpdate) -> Result<Self, StitchError> {
        self.apply(update)?;
        Ok(self)
    }

    /// Validate every numeric field.
    pub fn validate(&self) -> Result<(), StitchError> {
        for update in [
            SettingUpdate::ThreadSpacing(self.thread_spacing),
            SettingUpdate::WaveAmplitude(self.wave_amplitude),
            SettingUpdate::WaveFrequency(self.wave_frequency),
            SettingUpdate::ThreadIntensity(self.thread_intensity),
        ] {
            update.validate()?;
        }
        Ok(())
    }

    /// Lattice spacing in pixels used by the thread field.
    #[inline]
    pub fn lattice_spacing(&self) -> f32 {
        self.thread_spacing * 10.0
    }

    /// Parse and validate settings from JSON.
    pub fn from_json(json: &str) -> Result<Self, StitchError> {
        let settings: Self =
            serde_json::from_str(json).map_err(|e| StitchError::Settings(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load and validate a JSON settings file.
    pub fn load(path: &Path) -> Result<Self, StitchError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, StitchError> {
        serde_json::to_string_pretty(self).map_err(|e| StitchError::Settings(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_validate() {
        RenderSettings::default().validate().unwrap();
        assert_eq!(RenderSettings::default().lattice_spacing(), 10.0);
    }

    #[test]
    fn test_apply_rejects_negative_spacing_and_keeps_old_value() {
        let mut settings = RenderSettings::default();
        let err = settings.apply(SettingUpdate::ThreadSpacing(-1.0)).unwrap_err();
        assert!(matches!(
            err,
            StitchError::InvalidSetting {
                field: "threadSpacing",
                ..
            }
        ));
        assert_eq!(settings.thread_spacing, 1.0);
    }

    #[test]
    fn test_apply_rejects_nan_and_zero_frequency() {
        let mut settings = RenderSettings::default();
        assert!(settings.apply(SettingUpdate::WaveFrequency(f32::NAN)).is_err());
        assert!(settings.apply(SettingUpdate::WaveFrequency(0.0)).is_err());
        settings.apply(SettingUpdate::WaveFrequency(2.5)).unwrap();
        assert_eq!(settings.wave_frequency, 2.5);
    }

    #[test]
    fn test_zero_amplitude_allowed() {
        let settings = RenderSettings::default()
            .with(SettingUpdate::WaveAmplitude(0.0))
            .unwrap();
        assert_eq!(settings.wave_amplitude, 0.0);
    }

    #[test]
    fn test_json_camel_case_with_defaults() {
        let settings = RenderSettings::from_json(
            r#"{"viewMode": "embroidery", "stitchDirection": "radial", "threadSpacing": 2}"#,
        )
        .unwrap();
        assert_eq!(
            settings,
            RenderSettings {
                view_mode: ViewMode::Embroidery,
                stitch_direction: StitchDirection::Radial,
                thread_spacing: 2.0,
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_json_out_of_range_is_rejected() {
        let err = RenderSettings::from_json(r#"{"threadSpacing": -3}"#).unwrap_err();
        assert!(matches!(err, StitchError::InvalidSetting { .. }));

        let err = RenderSettings::from_json(r#"{"threadSpacing": "wide"}"#).unwrap_err();
        assert!(matches!(err, StitchError::Settings(_)));
    }

    #[test]
    fn test_tiny_spacing_is_rejected() {
        for spacing in [1e-6, 0.1, 0.49] {
            let err = RenderSettings::default()
                .with(SettingUpdate::ThreadSpacing(spacing))
                .unwrap_err();
            assert!(matches!(
                err,
                StitchError::InvalidSetting {
                    field: "threadSpacing",
                    ..
                }
            ));
        }
        assert!(RenderSettings::from_json(r#"{"threadSpacing": 0.000001}"#).is_err());

        let settings = RenderSettings::default()
            .with(SettingUpdate::ThreadSpacing(MIN_THREAD_SPACING))
            .unwrap();
        assert_eq!(settings.lattice_spacing(), 5.0);
    }

    #[test]
    fn test_unknown_pattern_in_json_reads_as_straight() {
        let settings =
            RenderSettings::from_json(r#"{"threadPattern": "lace", "viewMode": "embroidery"}"#)
                .unwrap();
        assert_eq!(settings.thread_pattern, ThreadPattern::Straight);
        assert_eq!(settings.view_mode, ViewMode::Embroidery);

        let settings = RenderSettings::from_json(r#"{"threadPattern": "Zigzag"}"#).unwrap();
        assert_eq!(settings.thread_pattern, ThreadPattern::Zigzag);
    }

    #[test]
    fn test_json_roundtrip() {
        let settings = RenderSettings {
            thread_pattern: ThreadPattern::Spiral,
            ..Default::default()
        };
        let json = settings.to_json().unwrap();
        assert!(json.contains("\"threadPattern\": \"spiral\""));
        assert_eq!(RenderSettings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_enum_names() {
        assert_eq!("Radial".parse::<StitchDirection>().unwrap(), StitchDirection::Radial);
        assert_eq!(ThreadPattern::Crosshatch.to_string(), "crosshatch");
        assert!("sideways".parse::<StitchDirection>().is_err());
        assert_eq!(ThreadPattern::from_name_lenient("lace"), ThreadPattern::Straight);
        assert_eq!(ThreadPattern::from_name_lenient("zigzag"), ThreadPattern::Zigzag);
        assert_eq!(ViewMode::ALL.len(), 4);
    }

    #[test]
    fn test_direction_angles() {
        assert_eq!(StitchDirection::Horizontal.angle(), Some(0.0));
        assert_eq!(StitchDirection::Vertical.angle(), Some(FRAC_PI_2));
        assert_eq!(StitchDirection::Diagonal.angle(), Some(FRAC_PI_4));
        assert_eq!(StitchDirection::Radial.angle(), None);
    }

    #[test]
    fn test_grid_size_validation() {
        assert!(validate_grid_size(0).is_err());
        validate_grid_size(1).unwrap();
    }
}

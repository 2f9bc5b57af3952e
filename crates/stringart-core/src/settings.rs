//! Editor configuration.

use crate::shapes::StringColor;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Settings errors.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Setting {field} must be {requirement}, got {value}")]
    OutOfRange {
        field: &'static str,
        requirement: &'static str,
        value: f64,
    },
}

/// Tunables for snapping, hit testing and new fan defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Spacing of nails along a line; also the length snap grid.
    pub nail_distance: f64,
    /// Angle rounding for length snapping, in degrees.
    pub angle_increment: f64,
    /// Radius within which a point snaps onto an existing nail.
    pub nail_snap_radius: f64,
    /// Radius within which a point snaps onto the length/angle grid.
    pub length_snap_radius: f64,
    /// Radius for selecting nails and strings with the pointer.
    pub hit_tolerance: f64,
    /// Color of the first fan; later fans reuse the last color edited.
    pub default_color: StringColor,
    pub default_stroke_width: f64,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            nail_distance: 10.0,
            angle_increment: 15.0,
            nail_snap_radius: 10.0,
            length_snap_radius: 20.0,
            hit_tolerance: 5.0,
            default_color: StringColor::default(),
            default_stroke_width: 1.0,
        }
    }
}

impl EditorSettings {
    /// Parse settings, filling in defaults for missing fields.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check that every tunable is usable.
    ///
    /// The nail distance and angle increment divide lengths and angles, so
    /// they must be positive; radii and widths only need to be non-negative.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let positive = [
            ("nail_distance", self.nail_distance),
            ("angle_increment", self.angle_increment),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SettingsError::OutOfRange {
                    field,
                    requirement: "a positive number",
                    value,
                });
            }
        }

        let non_negative = [
            ("nail_snap_radius", self.nail_snap_radius),
            ("length_snap_radius", self.length_snap_radius),
            ("hit_tolerance", self.hit_tolerance),
            ("default_stroke_width", self.default_stroke_width),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(SettingsError::OutOfRange {
                    field,
                    requirement: "zero or more",
                    value,
                });
            }
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from `path`, falling back to defaults if it does not exist.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            log::debug!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Platform settings location, e.g. `~/.config/stringart/settings.json`.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("stringart").join("settings.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = EditorSettings::from_json(r#"{ "nail_distance": 5.0 }"#).unwrap();
        assert_eq!(settings.nail_distance, 5.0);
        assert_eq!(settings.angle_increment, 15.0);
        assert_eq!(settings.default_color, StringColor::default());
    }

    #[test]
    fn test_invalid_color_rejected() {
        let result = EditorSettings::from_json(r##"{ "default_color": "#zzz" }"##);
        assert!(matches!(result, Err(SettingsError::Parse(_))));
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(EditorSettings::default().validate().is_ok());
    }

    #[test]
    fn test_non_positive_grid_rejected() {
        for json in [
            r#"{ "nail_distance": 0 }"#,
            r#"{ "nail_distance": -10 }"#,
            r#"{ "angle_increment": 0 }"#,
        ] {
            let result = EditorSettings::from_json(json);
            assert!(matches!(result, Err(SettingsError::OutOfRange { .. })), "{json}");
        }
    }

    #[test]
    fn test_negative_radius_rejected() {
        let result = EditorSettings::from_json(r#"{ "hit_tolerance": -1 }"#);
        assert!(matches!(
            result,
            Err(SettingsError::OutOfRange { field: "hit_tolerance", .. })
        ));
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "angle_increment": -15 }"#).unwrap();
        assert!(matches!(
            EditorSettings::load(&path),
            Err(SettingsError::OutOfRange { field: "angle_increment", .. })
        ));
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let settings = EditorSettings::load(&dir.path().join("nope.json")).unwrap();
        assert_eq!(settings, EditorSettings::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let mut expected = EditorSettings::default();
        expected.hit_tolerance = 8.0;
        std::fs::write(&path, expected.to_json().unwrap()).unwrap();
        assert_eq!(EditorSettings::load(&path).unwrap(), expected);
    }
}

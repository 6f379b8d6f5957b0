//! Application settings
//!
//! Settings are read once at start-up, either from the path passed with
//! `--config` or from `settings.json` in the platform config directory.
//! Nothing is written back.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use shared::DiagramConfig;

/// Orbit camera settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Initial distance from the axis
    pub distance: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Initial horizontal angle in degrees
    pub yaw_degrees: f32,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Damping factor applied per frame (0 disables damping)
    pub damping: f32,
    /// Degrees of rotation per dragged pixel
    pub rotate_speed: f32,
    /// Zoom factor per scrolled point
    pub zoom_speed: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            distance: 15.0,
            min_distance: 6.0,
            max_distance: 18.0,
            yaw_degrees: 45.0,
            fov_degrees: 60.0,
            damping: 0.08,
            rotate_speed: 0.5,
            zoom_speed: 0.01,
        }
    }
}

/// Viewport settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportSettings {
    /// Background color RGB
    pub background_color: [u8; 3],
    /// Opacity of the face planes behind the buttons
    pub face_opacity: f32,
    /// Colour of the central axis
    pub axis_color: [u8; 3],
    /// How far a hovered button is blended towards white
    pub hover_tint: f32,
    /// Highlight colour of the selected button
    pub selection_color: [u8; 3],
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            background_color: [0xf3, 0xf4, 0xf8],
            face_opacity: 0.4,
            axis_color: [0x2f, 0x35, 0x42],
            hover_tint: 0.35,
            selection_color: [0xff, 0xd4, 0x3b],
        }
    }
}

/// UI settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Font size in points
    pub font_size: f32,
    /// Interface language: "ru" or "en"
    pub language: String,
    /// Show the block legend
    pub show_legend: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            font_size: 14.0,
            language: "ru".to_string(),
            show_legend: true,
        }
    }
}

/// All application settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub camera: CameraSettings,
    pub viewport: ViewportSettings,
    pub ui: UiSettings,
    /// Diagram description; the built-in diagram is used when absent
    pub diagram: Option<DiagramConfig>,
}

impl AppSettings {
    /// Default settings file location
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "prism", "prism-diagram")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Load settings from the default location, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Ignoring settings file {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Load and validate settings from an explicit path
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
        let settings = Self::from_json(&json)?;
        tracing::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn from_json(json: &str) -> Result<Self, String> {
        let settings: AppSettings =
            serde_json::from_str(json).map_err(|e| format!("JSON parse error: {e}"))?;
        if let Some(diagram) = &settings.diagram {
            diagram.validate().map_err(|e| e.to_string())?;
        }
        Ok(settings)
    }

    /// Diagram to display
    pub fn diagram(&self) -> DiagramConfig {
        self.diagram.clone().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = AppSettings::default();
        assert_eq!(settings.viewport.background_color, [243, 244, 248]);
        assert_eq!(settings.camera.min_distance, 6.0);
        assert_eq!(settings.camera.max_distance, 18.0);
        assert_eq!(settings.camera.damping, 0.08);
        assert_eq!(settings.diagram().block_count(), 4);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings =
            AppSettings::from_json(r#"{"camera": {"distance": 10.0}, "ui": {"language": "en"}}"#)
                .unwrap();
        assert_eq!(settings.camera.distance, 10.0);
        assert_eq!(settings.camera.fov_degrees, 60.0);
        assert_eq!(settings.ui.language, "en");
        assert_eq!(settings.ui.font_size, 14.0);
    }

    #[test]
    fn test_invalid_diagram_rejected() {
        let err = AppSettings::from_json(r#"{"diagram": {"blocks": []}}"#).unwrap_err();
        assert!(err.contains("no blocks"), "{err}");
    }

    #[test]
    fn test_load_from_missing_file() {
        let err = AppSettings::load_from(Path::new("/nonexistent/prism/settings.json")).unwrap_err();
        assert!(err.starts_with("Failed to read"));
    }
}

//! # Unified Configuration
//!
//! All engine settings in one place: core engine behavior, the drawing surface
//! and the root scene. Every section has sensible defaults so a config file
//! only needs to mention what it changes.

use serde::{Deserialize, Serialize};

pub use crate::config::{Config, ConfigError};

/// Background color used by scenes that do not override it
pub const DEFAULT_CLEAR_COLOR: &str = "white";

/// # Engine Configuration
///
/// Core engine behavior: logging and frame pacing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Log level for the engine
    pub log_level: String,
    /// Target FPS used by drivers that pace their frames
    pub target_fps: Option<u32>,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            target_fps: Some(60),
        }
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Set target FPS
    pub fn with_target_fps(mut self, fps: u32) -> Self {
        self.target_fps = Some(fps);
        self
    }

    /// Frame duration implied by the target FPS, in seconds
    pub fn target_frame_time(&self) -> Option<f32> {
        self.target_fps
            .filter(|fps| *fps > 0)
            .map(|fps| 1.0 / fps as f32)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.log_level.parse::<log::LevelFilter>().is_err() {
            return Err(format!("Unknown log level: {}", self.log_level));
        }
        if self.target_fps == Some(0) {
            return Err("Target FPS must be at least 1".to_string());
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Canvas Configuration
///
/// Pixel dimensions of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Surface width in pixels
    pub width: u32,
    /// Surface height in pixels
    pub height: u32,
}

impl CanvasConfig {
    /// Create a canvas configuration with the given size
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.width == 0 || self.height == 0 {
            return Err(format!(
                "Canvas size must be non-zero, got {}x{}",
                self.width, self.height
            ));
        }
        Ok(())
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self::new(640, 480)
    }
}

/// # Scene Configuration
///
/// Options recognized by [`Scene`](crate::scene::Scene) construction. An empty
/// clear color disables background painting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Color painted over the whole surface before entities are drawn
    pub clear_color: String,
}

impl SceneConfig {
    /// Create a scene configuration with the given clear color
    pub fn new(clear_color: impl Into<String>) -> Self {
        Self {
            clear_color: clear_color.into(),
        }
    }

    /// Scene configuration that never paints a background
    pub fn transparent() -> Self {
        Self::new("")
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CLEAR_COLOR)
    }
}

/// # Complete Application Configuration
///
/// Top-level configuration that encompasses all engine subsystems.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Engine core configuration
    pub engine: EngineConfig,
    /// Drawing surface configuration
    pub canvas: CanvasConfig,
    /// Root scene configuration
    pub scene: SceneConfig,
}

impl ApplicationConfig {
    /// Create a new application configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the engine section
    pub fn with_engine(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }

    /// Replace the canvas section
    pub fn with_canvas(mut self, canvas: CanvasConfig) -> Self {
        self.canvas = canvas;
        self
    }

    /// Replace the root scene section
    pub fn with_scene(mut self, scene: SceneConfig) -> Self {
        self.scene = scene;
        self
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), String> {
        self.engine.validate()?;
        self.canvas.validate()?;
        Ok(())
    }
}

impl Config for ApplicationConfig {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigFormat;

    #[test]
    fn test_defaults() {
        let config = ApplicationConfig::default();
        assert_eq!(config.scene.clear_color, "white");
        assert_eq!(config.canvas, CanvasConfig::new(640, 480));
        assert_eq!(config.engine.log_level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let text = "[canvas]\nwidth = 320\n\n[scene]\nclear_color = \"black\"\n";
        let config = ApplicationConfig::from_str_with(text, ConfigFormat::Toml).unwrap();
        assert_eq!(config.canvas.width, 320);
        assert_eq!(config.canvas.height, 480);
        assert_eq!(config.scene.clear_color, "black");
        assert_eq!(config.engine, EngineConfig::default());
    }

    #[test]
    fn test_file_round_trip_ron() {
        let path = std::env::temp_dir().join("canvas_engine_app_config_test.ron");
        let config = ApplicationConfig::new()
            .with_canvas(CanvasConfig::new(200, 100))
            .with_scene(SceneConfig::transparent())
            .with_engine(EngineConfig::new().with_log_level("debug"));

        config.save_to_file(&path).unwrap();
        let loaded = ApplicationConfig::load_from_file(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_validation_failures() {
        let bad_canvas = ApplicationConfig::new().with_canvas(CanvasConfig::new(0, 10));
        assert!(bad_canvas.validate().is_err());

        let bad_level =
            ApplicationConfig::new().with_engine(EngineConfig::new().with_log_level("loud"));
        assert!(bad_level.validate().is_err());

        let bad_fps = ApplicationConfig::new().with_engine(EngineConfig::new().with_target_fps(0));
        assert!(bad_fps.validate().is_err());
    }

    #[test]
    fn test_target_frame_time() {
        let engine = EngineConfig::new().with_target_fps(50);
        approx::assert_relative_eq!(engine.target_frame_time().unwrap(), 0.02);

        let unpaced = EngineConfig {
            target_fps: None,
            ..EngineConfig::default()
        };
        assert!(unpaced.target_frame_time().is_none());
    }
}

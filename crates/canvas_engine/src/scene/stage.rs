//! Frame driver
//!
//! The [`Stage`] owns the root of the scene tree together with the surface
//! size and a frame timer. Each call to [`Stage::frame`] ticks the root as the
//! active scene.

use super::error::SceneError;
use super::node::{Scene, SceneRef, Tick};
use super::surface::{Canvas, DrawContext};
use crate::core::config::ApplicationConfig;
use crate::foundation::time::Timer;
use thiserror::Error;

/// Errors raised while building or running a stage
#[derive(Error, Debug)]
pub enum StageError {
    /// Configuration rejected by validation
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A frame's traversal failed
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),
}

/// Root scene, surface and frame clock
#[derive(Debug)]
pub struct Stage {
    root: SceneRef,
    canvas: Canvas,
    timer: Timer,
}

impl Stage {
    /// Build a stage from validated configuration
    pub fn new(config: &ApplicationConfig) -> Result<Self, StageError> {
        config.validate().map_err(StageError::Config)?;
        let canvas = Canvas::from(config.canvas);
        log::info!(
            "Creating stage: {}x{} canvas, clear color {:?}",
            canvas.width,
            canvas.height,
            config.scene.clear_color
        );
        Ok(Self::with_root(
            Scene::from_config(&config.scene).into_ref(),
            canvas,
        ))
    }

    /// Build a stage around an existing root scene
    pub fn with_root(root: SceneRef, canvas: Canvas) -> Self {
        Self {
            root,
            canvas,
            timer: Timer::new(),
        }
    }

    /// The root scene
    pub fn root(&self) -> &SceneRef {
        &self.root
    }

    /// Surface dimensions passed to every tick
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Change the surface dimensions used by later frames
    pub fn resize(&mut self, width: u32, height: u32) {
        log::debug!("Resizing stage to {}x{}", width, height);
        self.canvas = Canvas::new(width, height);
    }

    /// Frame clock
    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    /// Run one frame using wall-clock time since the previous frame
    pub fn frame(&mut self, context: &mut dyn DrawContext) -> Result<(), StageError> {
        let delta = self.timer.update();
        self.tick_root(delta, context)
    }

    /// Run one frame with a caller-supplied delta
    ///
    /// The scene tree receives `delta` unchanged, negative values included.
    /// Only the timer's statistics clamp it to zero.
    pub fn frame_with_delta(
        &mut self,
        delta: f32,
        context: &mut dyn DrawContext,
    ) -> Result<(), StageError> {
        self.timer.advance(delta);
        self.tick_root(delta, context)
    }

    fn tick_root(&self, delta: f32, context: &mut dyn DrawContext) -> Result<(), StageError> {
        self.root.tick(Tick {
            is_active: true,
            delta,
            canvas: &self.canvas,
            context,
        })?;
        Ok(())
    }
}

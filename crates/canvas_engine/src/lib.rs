//! # Canvas Engine
//!
//! A small 2D engine core built from two pieces:
//!
//! - **Components**: function-shaped components run under a hooks context,
//!   exposing a live API over their returned object and instance state
//! - **Scenes**: a tree of scenes and entities ticked once per frame over a
//!   canvas-like drawing surface
//!
//! ## Quick Start
//!
//! ```rust
//! use canvas_engine::prelude::*;
//!
//! struct Square;
//!
//! impl SceneEntity for Square {
//!     fn draw(&self, frame: &mut Frame<'_>) -> Result<(), SceneError> {
//!         frame.context.set_fill_style("orange");
//!         frame.context.fill_rect(10.0, 10.0, 5.0, 5.0);
//!         Ok(())
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut stage = Stage::new(&ApplicationConfig::default())?;
//!     stage.root().borrow_mut().add_child(EntityRef::new(Square));
//!
//!     let mut buffer = CommandBuffer::new();
//!     stage.frame_with_delta(1.0 / 60.0, &mut buffer)?;
//!     assert_eq!(buffer.len(), 2); // clear + square
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Core engine modules
pub mod core;

pub mod config;
pub mod foundation;
pub mod ecs;
pub mod component;
pub mod scene;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        component::{
            instantiate, instantiate_named, ComponentApi, ComponentError, ComponentInstance,
            HooksSystem, NativeFunction, Object, Value,
        },
        core::config::{ApplicationConfig, CanvasConfig, Config, EngineConfig, SceneConfig},
        ecs::{Entity, World},
        foundation::time::Timer,
        scene::{
            Canvas, CommandBuffer, DrawContext, EntityRef, Frame, HasChildren, PresentsScenes,
            Scene, SceneChild, SceneEntity, SceneError, SceneRef, Stage, StageError, Tick,
        },
    };
}

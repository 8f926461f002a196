//! Scene tree
//!
//! Scenes hold entities and nested scenes and drive the per-frame
//! update/draw traversal over a 2D drawing surface.
//!
//! ## Traversal
//!
//! ```text
//! Stage::frame
//!      ↓  is_active = true
//! root Scene: update entities → clear → draw entities
//!      ↓  is_active = (child == active_scene)
//! child Scenes (inactive ones return immediately)
//! ```

mod command_buffer;
mod entity;
mod error;
mod node;
mod stage;
mod surface;


pub use command_buffer::{CommandBuffer, DrawCommand, DEFAULT_STYLE};
pub use entity::{EntityRef, SceneEntity};
pub use error::SceneError;
pub use node::{HasChildren, PresentsScenes, Scene, SceneChild, SceneRef, Tick};
pub use stage::{Stage, StageError};
pub use surface::{Canvas, DrawContext, Frame};

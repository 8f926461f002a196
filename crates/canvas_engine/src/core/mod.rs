//! # Core Engine Module
//!
//! Shared abstractions used throughout the engine.
//!
//! ## Organization
//!
//! - **Config**: Unified configuration for the engine, canvas and root scene
//! - **Foundation**: Low-level utilities (logging, timing, collections)
//! - **ECS**: Entity handle allocation

pub mod config;

// Re-export foundation modules for convenience
pub use crate::ecs;
pub use crate::foundation;

// Re-export commonly used config types
pub use config::{
    ApplicationConfig, CanvasConfig, Config, ConfigError, EngineConfig, SceneConfig,
    DEFAULT_CLEAR_COLOR,
};

//! Entity handles
//!
//! Entities are plain generational handles. Behavior lives elsewhere: scene
//! children implement [`crate::scene::SceneEntity`] and component instances are
//! bound to an [`Entity`] by [`crate::component::instantiate`].

pub mod world;
pub mod entity;

pub use world::World;
pub use entity::Entity;

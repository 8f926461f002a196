//! Scene traversal errors

use thiserror::Error;

/// Errors that abort a scene tick
///
/// The first error stops the traversal of the current frame: later entities,
/// sibling scenes and the rest of every ancestor's traversal are skipped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// An entity's update or draw failed
    #[error("Entity error: {0}")]
    Entity(String),

    /// A scene or entity was reached while it was already in use, which
    /// happens when a scene is reachable from itself
    #[error("Reentrant {kind} access during tick")]
    Reentrant {
        /// What was reentered: `"scene"` or `"entity"`
        kind: &'static str,
    },
}

impl SceneError {
    /// Build an entity failure
    pub fn entity(message: impl Into<String>) -> Self {
        Self::Entity(message.into())
    }
}

//! Component system errors

use thiserror::Error;

/// Errors raised by dynamic property access
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PropertyError {
    /// A prototype assignment would make an object its own ancestor
    #[error("Setting this prototype would create a cycle")]
    PrototypeCycle,

    /// The named property does not hold a function
    #[error("Property '{0}' is not a function")]
    NotCallable(String),
}

/// Errors raised by hook calls
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HookError {
    /// A hook ran while no component function was executing
    #[error("{hook} called outside of a component function")]
    NoActiveInstance {
        /// Name of the hook that was called
        hook: &'static str,
    },
}

/// Errors surfaced by component functions and the APIs they return
///
/// Whatever a component function returns as `Err` reaches the caller of
/// [`instantiate`](super::instantiate) unchanged.
#[derive(Error, Debug)]
pub enum ComponentError {
    /// Hook misuse inside a component function
    #[error(transparent)]
    Hook(#[from] HookError),

    /// Property access failure
    #[error(transparent)]
    Property(#[from] PropertyError),

    /// Failure reported by the component itself
    #[error("Component failed: {0}")]
    Failed(String),
}

impl ComponentError {
    /// Build a component-reported failure
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

//! Hooks-style components
//!
//! A component is a function of its props, run by [`instantiate`] under a
//! [`HooksSystem`] that knows which [`ComponentInstance`] is being built.
//! Hooks such as [`HooksSystem::use_field`] attach state to that instance.
//!
//! ```text
//! instantiate(hooks, component, props, entity)
//!      │  push instance ──► component(hooks, props) ──► pop instance
//!      ▼
//! returned Object? ── yes ──► Facade { returned object, then instance state }
//!      └──────────── no ───► the instance itself
//! ```

mod error;
mod hooks;
mod instance;
mod instantiate;
mod property;
mod value;


pub use error::{ComponentError, HookError, PropertyError};
pub use hooks::{FieldHandle, HooksSystem, InstanceScope};
pub use instance::{ComponentInstance, ENTITY_FIELD};
pub use instantiate::{instantiate, instantiate_named, ComponentApi};
pub use property::{collect_property_names, Facade, PropertyNames};
pub use value::{NativeFunction, Object, Value};

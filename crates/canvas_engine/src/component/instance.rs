//! Component instances

use super::value::{Object, Value};
use crate::ecs::Entity;
use std::fmt;
use std::rc::Rc;

/// Name of the state field every instance carries for its owning entity
pub const ENTITY_FIELD: &str = "entity";

struct InstanceData {
    component: &'static str,
    entity: Entity,
    state: Object,
}

/// The stateful object created for one component instantiation
///
/// Hooks attach their fields to the instance's state object while the
/// component function runs. Handles are cheap to clone and compare by
/// identity; two instantiations never share an instance.
#[derive(Clone)]
pub struct ComponentInstance {
    inner: Rc<InstanceData>,
}

impl ComponentInstance {
    /// Create an instance of `component` bound to `entity`
    pub fn new(component: &'static str, entity: Entity) -> Self {
        let state = Object::new().with(ENTITY_FIELD, entity);
        Self {
            inner: Rc::new(InstanceData {
                component,
                entity,
                state,
            }),
        }
    }

    /// Name of the component this instance was created from
    pub fn component_name(&self) -> &'static str {
        self.inner.component
    }

    /// Entity the instance is attached to
    pub fn entity(&self) -> Entity {
        self.inner.entity
    }

    /// Backing state object
    pub fn state(&self) -> &Object {
        &self.inner.state
    }

    /// Read a state field
    pub fn get(&self, name: &str) -> Value {
        self.inner.state.get(name)
    }

    /// Write a state field
    pub fn set(&self, name: impl Into<String>, value: impl Into<Value>) {
        self.inner.state.set(name, value);
    }

    /// Whether both handles refer to the same instance
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl PartialEq for ComponentInstance {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for ComponentInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentInstance")
            .field("component", &self.inner.component)
            .field("entity", &self.inner.entity)
            .field("state", &self.inner.state)
            .finish()
    }
}

//! Hooks context
//!
//! The hooks system tracks which component instance is currently being built.
//! It is a stack: instantiating a component from inside another component's
//! function pushes the inner instance and pops it again when the inner call
//! finishes, leaving the outer instance current for the rest of its body.

use super::error::HookError;
use super::instance::ComponentInstance;
use super::value::{Object, Value};
use crate::ecs::Entity;
use std::cell::RefCell;

/// Stack of instances whose component functions are executing
#[derive(Debug, Default)]
pub struct HooksSystem {
    stack: RefCell<Vec<ComponentInstance>>,
}

impl HooksSystem {
    /// Create a hooks system with no active instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` with `instance` as the current instance
    ///
    /// The previous context is restored when `f` returns or unwinds.
    pub fn with_instance<R>(&self, instance: &ComponentInstance, f: impl FnOnce() -> R) -> R {
        let _scope = self.enter(instance);
        f()
    }

    /// Make `instance` current until the returned scope is dropped
    pub fn enter(&self, instance: &ComponentInstance) -> InstanceScope<'_> {
        let mut stack = self.stack.borrow_mut();
        let restore_depth = stack.len();
        stack.push(instance.clone());
        log::trace!(
            "Entered {} (depth {})",
            instance.component_name(),
            restore_depth + 1
        );
        InstanceScope {
            hooks: self,
            restore_depth,
        }
    }

    /// The instance whose component function is running, if any
    pub fn current(&self) -> Option<ComponentInstance> {
        self.stack.borrow().last().cloned()
    }

    /// Number of nested component functions currently running
    pub fn depth(&self) -> usize {
        self.stack.borrow().len()
    }

    /// Attach a named state field to the current instance
    ///
    /// The field starts at `initial` unless the instance already has it. The
    /// returned handle keeps reading and writing the instance's field after the
    /// component function has returned.
    pub fn use_field(
        &self,
        name: impl Into<String>,
        initial: impl Into<Value>,
    ) -> Result<FieldHandle, HookError> {
        let instance = self.require_current("use_field")?;
        let name = name.into();
        let state = instance.state().clone();
        if !state.has_own(&name) {
            state.set(name.clone(), initial);
        }
        Ok(FieldHandle { state, name })
    }

    /// Entity the current instance is attached to
    pub fn use_entity(&self) -> Result<Entity, HookError> {
        self.require_current("use_entity").map(|instance| instance.entity())
    }

    fn require_current(&self, hook: &'static str) -> Result<ComponentInstance, HookError> {
        self.current().ok_or(HookError::NoActiveInstance { hook })
    }
}

/// Guard restoring the previous hooks context on drop
#[must_use = "the instance is only current while the scope is alive"]
#[derive(Debug)]
pub struct InstanceScope<'a> {
    hooks: &'a HooksSystem,
    restore_depth: usize,
}

impl Drop for InstanceScope<'_> {
    fn drop(&mut self) {
        self.hooks.stack.borrow_mut().truncate(self.restore_depth);
    }
}

/// Handle to a state field attached by [`HooksSystem::use_field`]
#[derive(Debug, Clone)]
pub struct FieldHandle {
    state: Object,
    name: String,
}

impl FieldHandle {
    /// Field name on the instance
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current value
    pub fn get(&self) -> Value {
        self.state.get(&self.name)
    }

    /// Replace the value
    pub fn set(&self, value: impl Into<Value>) {
        self.state.set(self.name.clone(), value);
    }

    /// Replace the value with a function of the current one
    pub fn update(&self, f: impl FnOnce(Value) -> Value) {
        self.set(f(self.get()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::World;

    fn instance(name: &'static str) -> ComponentInstance {
        let mut world = World::new();
        ComponentInstance::new(name, world.create_entity())
    }

    #[test]
    fn test_with_instance_restores_previous_context() {
        let hooks = HooksSystem::new();
        let outer = instance("Outer");
        let inner = instance("Inner");

        hooks.with_instance(&outer, || {
            assert_eq!(hooks.current(), Some(outer.clone()));
            hooks.with_instance(&inner, || {
                assert_eq!(hooks.current(), Some(inner.clone()));
                assert_eq!(hooks.depth(), 2);
            });
            assert_eq!(hooks.current(), Some(outer.clone()));
        });
        assert_eq!(hooks.current(), None);
    }

    #[test]
    fn test_with_instance_returns_closure_result() {
        let hooks = HooksSystem::new();
        let value = hooks.with_instance(&instance("A"), || 42);
        assert_eq!(value, 42);
    }

    #[test]
    fn test_context_restored_after_panic() {
        let hooks = HooksSystem::new();
        let outer = instance("Outer");
        let _scope = hooks.enter(&outer);

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            hooks.with_instance(&instance("Boom"), || panic!("component exploded"));
        }));

        assert!(result.is_err());
        assert_eq!(hooks.current(), Some(outer));
        assert_eq!(hooks.depth(), 1);
    }

    #[test]
    fn test_use_field_outside_component_fails() {
        let hooks = HooksSystem::new();
        assert_eq!(
            hooks.use_field("count", 0).unwrap_err(),
            HookError::NoActiveInstance { hook: "use_field" }
        );
        assert!(hooks.use_entity().is_err());
    }

    #[test]
    fn test_use_field_attaches_to_current_instance() {
        let hooks = HooksSystem::new();
        let target = instance("Counter");

        let field = hooks
            .with_instance(&target, || hooks.use_field("count", 1))
            .unwrap();

        assert_eq!(target.get("count"), Value::from(1));
        field.update(|v| Value::from(v.as_number().unwrap_or(0.0) + 1.0));
        assert_eq!(target.get("count"), Value::from(2.0));

        target.set("count", 10);
        assert_eq!(field.get(), Value::from(10));
    }

    #[test]
    fn test_use_field_keeps_existing_value() {
        let hooks = HooksSystem::new();
        let target = instance("Counter");
        target.set("count", 5);

        let field = hooks
            .with_instance(&target, || hooks.use_field("count", 0))
            .unwrap();

        assert_eq!(field.get(), Value::from(5));
    }

    #[test]
    fn test_use_entity_reports_owner() {
        let hooks = HooksSystem::new();
        let target = instance("Owned");
        let entity = hooks.with_instance(&target, || hooks.use_entity()).unwrap();
        assert_eq!(entity, target.entity());
    }
}

//! Component instantiation

use super::error::ComponentError;
use super::hooks::HooksSystem;
use super::instance::ComponentInstance;
use super::property::Facade;
use super::value::Value;
use crate::ecs::Entity;

/// Public API produced by [`instantiate`]
///
/// Either a facade forwarding to the object the component function returned
/// and to the instance's state, or the instance itself when the function
/// returned anything other than an object.
#[derive(Debug, Clone)]
pub enum ComponentApi {
    /// Forwarding view over the returned object and the instance
    Facade(Facade),
    /// The instance, returned as is
    Instance(ComponentInstance),
}

impl ComponentApi {
    /// Read a property
    pub fn get(&self, name: &str) -> Value {
        match self {
            Self::Facade(facade) => facade.get(name),
            Self::Instance(instance) => instance.get(name),
        }
    }

    /// Write a property through to its backing object
    pub fn set(&self, name: impl Into<String>, value: impl Into<Value>) {
        match self {
            Self::Facade(facade) => facade.set(name, value),
            Self::Instance(instance) => instance.set(name, value),
        }
    }

    /// Whether the property is reachable through this API
    pub fn has(&self, name: &str) -> bool {
        match self {
            Self::Facade(facade) => facade.has(name),
            Self::Instance(instance) => instance.state().has(name),
        }
    }

    /// Invoke a function-valued property
    pub fn call(&self, name: &str, args: &[Value]) -> Result<Value, ComponentError> {
        match self {
            Self::Facade(facade) => facade.call(name, args),
            Self::Instance(instance) => match instance.get(name) {
                Value::Function(function) => function.call(args),
                _ => Err(super::PropertyError::NotCallable(name.to_string()).into()),
            },
        }
    }

    /// Names reachable through this API
    pub fn property_names(&self) -> Vec<String> {
        match self {
            Self::Facade(facade) => facade.property_names(),
            Self::Instance(instance) => super::collect_property_names(instance.state())
                .into_iter()
                .collect(),
        }
    }

    /// Whether this API is `instance` itself
    pub fn is_instance(&self, instance: &ComponentInstance) -> bool {
        matches!(self, Self::Instance(own) if own.ptr_eq(instance))
    }

    /// The instance, when the API is the instance itself
    pub fn as_instance(&self) -> Option<&ComponentInstance> {
        match self {
            Self::Instance(instance) => Some(instance),
            Self::Facade(_) => None,
        }
    }

    /// The facade, when the component returned an object
    pub fn as_facade(&self) -> Option<&Facade> {
        match self {
            Self::Facade(facade) => Some(facade),
            Self::Instance(_) => None,
        }
    }
}

/// Run a component function for `entity` and build its public API
///
/// The component's name is taken from its Rust type; use
/// [`instantiate_named`] to give it a readable one.
pub fn instantiate<P, F>(
    hooks: &HooksSystem,
    component: F,
    props: &P,
    entity: Entity,
) -> Result<ComponentApi, ComponentError>
where
    P: ?Sized,
    F: FnOnce(&HooksSystem, &P) -> Result<Value, ComponentError>,
{
    instantiate_named(hooks, std::any::type_name::<F>(), component, props, entity)
}

/// Run a named component function for `entity` and build its public API
///
/// The function runs with a fresh [`ComponentInstance`] as the current hooks
/// instance; the previous instance is current again once it returns, fails
/// or panics. Errors from the function are returned unchanged.
///
/// If the function returns an object, the API is a [`Facade`] forwarding to
/// that object and then to the instance state, so instance fields win on
/// name collisions. Otherwise the API is the instance itself.
pub fn instantiate_named<P, F>(
    hooks: &HooksSystem,
    name: &'static str,
    component: F,
    props: &P,
    entity: Entity,
) -> Result<ComponentApi, ComponentError>
where
    P: ?Sized,
    F: FnOnce(&HooksSystem, &P) -> Result<Value, ComponentError>,
{
    let instance = ComponentInstance::new(name, entity);
    log::trace!("Instantiating {} for {}", name, entity);

    let returned = hooks.with_instance(&instance, || component(hooks, props))?;

    let api = match returned {
        Value::Object(object) => {
            let mut facade = Facade::new();
            let from_return = facade.install_proxy(&object);
            let from_instance = facade.install_proxy(instance.state());
            log::trace!(
                "{} API forwards {} returned and {} instance properties",
                name,
                from_return,
                from_instance
            );
            ComponentApi::Facade(facade)
        }
        other => {
            log::trace!("{} returned {}, exposing instance", name, other.type_name());
            ComponentApi::Instance(instance)
        }
    };

    Ok(api)
}

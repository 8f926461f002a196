//! Dynamic values and shared property objects
//!
//! Component functions return a [`Value`]; when it is an [`Object`] its
//! properties become part of the component's public API. Objects are shared
//! handles: cloning an `Object` clones the handle, not the properties.

use super::error::{ComponentError, PropertyError};
use crate::ecs::Entity;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A dynamically typed property value
#[derive(Clone, Default)]
pub enum Value {
    /// No value at all; what reading a missing property yields
    #[default]
    Undefined,
    /// Explicit absence of a value
    Null,
    /// Boolean
    Bool(bool),
    /// Number
    Number(f64),
    /// String
    String(String),
    /// Entity handle
    Entity(Entity),
    /// Shared object (compared by identity)
    Object(Object),
    /// Native callable (compared by identity)
    Function(NativeFunction),
}

impl Value {
    /// Short name of the value's type, used in logs
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Entity(_) => "entity",
            Self::Object(_) => "object",
            Self::Function(_) => "function",
        }
    }

    /// Whether this is `Undefined`
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    /// Numeric payload, if this is a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Boolean payload, if this is a bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// String payload, if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Entity payload, if this is an entity
    pub fn as_entity(&self) -> Option<Entity> {
        match self {
            Self::Entity(e) => Some(*e),
            _ => None,
        }
    }

    /// Object handle, if this is an object
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Function handle, if this is a function
    pub fn as_function(&self) -> Option<&NativeFunction> {
        match self {
            Self::Function(f) => Some(f),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Undefined, Self::Undefined) | (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Entity(a), Self::Entity(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a.ptr_eq(b),
            (Self::Function(a), Self::Function(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => f.write_str("Undefined"),
            Self::Null => f.write_str("Null"),
            Self::Bool(b) => write!(f, "Bool({b})"),
            Self::Number(n) => write!(f, "Number({n})"),
            Self::String(s) => write!(f, "String({s:?})"),
            Self::Entity(e) => write!(f, "{e}"),
            Self::Object(o) => fmt::Debug::fmt(o, f),
            Self::Function(func) => fmt::Debug::fmt(func, f),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Entity> for Value {
    fn from(value: Entity) -> Self {
        Self::Entity(value)
    }
}

impl From<Object> for Value {
    fn from(value: Object) -> Self {
        Self::Object(value)
    }
}

impl From<NativeFunction> for Value {
    fn from(value: NativeFunction) -> Self {
        Self::Function(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

type NativeFn = dyn Fn(&[Value]) -> Result<Value, ComponentError>;

/// A callable stored in a property
///
/// Component functions typically return closures over their hook fields so
/// that callers can drive the component through its API.
#[derive(Clone)]
pub struct NativeFunction {
    func: Rc<NativeFn>,
}

impl NativeFunction {
    /// Wrap a closure
    pub fn new(func: impl Fn(&[Value]) -> Result<Value, ComponentError> + 'static) -> Self {
        Self {
            func: Rc::new(func),
        }
    }

    /// Invoke the function
    pub fn call(&self, args: &[Value]) -> Result<Value, ComponentError> {
        (self.func)(args)
    }

    /// Whether both handles refer to the same function
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.func, &other.func)
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Function({:p})", Rc::as_ptr(&self.func).cast::<()>())
    }
}

#[derive(Default)]
struct ObjectData {
    prototype: Option<Object>,
    properties: Vec<(String, Value)>,
}

/// Shared, mutable property bag with an optional prototype
///
/// Reads fall back along the prototype chain; writes always land on the
/// receiver as own properties, shadowing any inherited value.
#[derive(Clone, Default)]
pub struct Object {
    inner: Rc<RefCell<ObjectData>>,
}

impl Object {
    /// Create an empty object with no prototype
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty object inheriting from `prototype`
    pub fn with_prototype(prototype: &Object) -> Self {
        let object = Self::new();
        object.inner.borrow_mut().prototype = Some(prototype.clone());
        object
    }

    /// Builder form of [`Object::set`]
    #[must_use]
    pub fn with(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// The immediate prototype
    pub fn prototype(&self) -> Option<Object> {
        self.inner.borrow().prototype.clone()
    }

    /// Replace the prototype
    ///
    /// Fails without changing anything if `self` would become its own ancestor.
    pub fn set_prototype(&self, prototype: Option<&Object>) -> Result<(), PropertyError> {
        let mut ancestor = prototype.cloned();
        while let Some(current) = ancestor {
            if current.ptr_eq(self) {
                return Err(PropertyError::PrototypeCycle);
            }
            ancestor = current.prototype();
        }
        self.inner.borrow_mut().prototype = prototype.cloned();
        Ok(())
    }

    /// Read a property, consulting the prototype chain
    pub fn get(&self, name: &str) -> Value {
        let prototype = {
            let data = self.inner.borrow();
            if let Some((_, value)) = data.properties.iter().find(|(key, _)| key == name) {
                return value.clone();
            }
            data.prototype.clone()
        };
        prototype.map_or(Value::Undefined, |proto| proto.get(name))
    }

    /// Read an own property only
    pub fn get_own(&self, name: &str) -> Option<Value> {
        self.inner
            .borrow()
            .properties
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
    }

    /// Write an own property
    pub fn set(&self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        let mut data = self.inner.borrow_mut();
        match data.properties.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = value,
            None => data.properties.push((name, value)),
        }
    }

    /// Whether the property exists here or on an ancestor
    pub fn has(&self, name: &str) -> bool {
        self.has_own(name) || self.prototype().is_some_and(|proto| proto.has(name))
    }

    /// Whether the property exists on this object itself
    pub fn has_own(&self, name: &str) -> bool {
        self.inner.borrow().properties.iter().any(|(key, _)| key == name)
    }

    /// Names of own properties in definition order
    pub fn own_property_names(&self) -> Vec<String> {
        self.inner
            .borrow()
            .properties
            .iter()
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// Whether both handles refer to the same object
    pub fn ptr_eq(&self, other: &Object) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Names only: objects may refer to themselves.
        f.debug_struct("Object")
            .field("properties", &self.own_property_names())
            .field("has_prototype", &self.prototype().is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_follow_prototype_chain() {
        let base = Object::new().with("speed", 1).with("name", "base");
        let derived = Object::with_prototype(&base).with("name", "derived");

        assert_eq!(derived.get("speed"), Value::from(1));
        assert_eq!(derived.get("name"), Value::from("derived"));
        assert!(derived.get("missing").is_undefined());
        assert!(derived.has("speed"));
        assert!(!derived.has_own("speed"));
    }

    #[test]
    fn test_writes_shadow_instead_of_mutating_prototype() {
        let base = Object::new().with("speed", 1);
        let derived = Object::with_prototype(&base);

        derived.set("speed", 5);

        assert_eq!(derived.get("speed"), Value::from(5));
        assert_eq!(base.get("speed"), Value::from(1));
    }

    #[test]
    fn test_clones_share_properties() {
        let a = Object::new();
        let b = a.clone();
        b.set("hp", 10);
        assert_eq!(a.get("hp"), Value::from(10));
        assert_eq!(a, b);
        assert_ne!(a, Object::new());
    }

    #[test]
    fn test_prototype_cycle_rejected() {
        let a = Object::new();
        let b = Object::with_prototype(&a);
        let c = Object::with_prototype(&b);

        assert_eq!(a.set_prototype(Some(&c)), Err(PropertyError::PrototypeCycle));
        assert_eq!(a.set_prototype(Some(&a)), Err(PropertyError::PrototypeCycle));
        assert!(a.prototype().is_none());

        assert!(c.set_prototype(None).is_ok());
        assert!(a.set_prototype(Some(&c)).is_ok());
    }

    #[test]
    fn test_value_equality_semantics() {
        let f = NativeFunction::new(|_| Ok(Value::Null));
        assert_eq!(Value::from(f.clone()), Value::from(f));
        assert_ne!(
            Value::from(NativeFunction::new(|_| Ok(Value::Null))),
            Value::from(NativeFunction::new(|_| Ok(Value::Null)))
        );
        assert_eq!(Value::from(Some("x")), Value::from("x"));
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_ne!(Value::Null, Value::Undefined);
    }
}

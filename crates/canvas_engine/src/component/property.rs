//! Property name collection and forwarding facades
//!
//! A [`Facade`] is the public face of a component that returned an object: for
//! every property reachable on its backing sources it holds an accessor that
//! reads and writes the source directly. Nothing is copied, so a write through
//! the facade is visible on the source and the other way round.

use super::error::{ComponentError, PropertyError};
use super::value::{Object, Value};

/// Deduplicated property names, ancestors first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyNames {
    names: Vec<String>,
}

impl PropertyNames {
    /// Add a name unless already present
    pub fn insert(&mut self, name: String) -> bool {
        if self.contains(&name) {
            return false;
        }
        self.names.push(name);
        true
    }

    /// Whether the name was collected
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Number of distinct names
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether nothing was collected
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterate names in collection order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl IntoIterator for PropertyNames {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.names.into_iter()
    }
}

/// Collect every property name reachable through `object`'s prototype chain
///
/// The root of the chain is visited first and `object`'s own names last. A
/// name defined at several levels is reported once.
pub fn collect_property_names(object: &Object) -> PropertyNames {
    let mut names = PropertyNames::default();
    gather_property_names(object, &mut names);
    names
}

fn gather_property_names(object: &Object, so_far: &mut PropertyNames) {
    if let Some(prototype) = object.prototype() {
        gather_property_names(&prototype, so_far);
    }
    for name in object.own_property_names() {
        so_far.insert(name);
    }
}

#[derive(Debug, Clone)]
struct Accessor {
    name: String,
    source: Object,
}

/// Live view over one or more backing objects
///
/// Cloning a facade yields another view onto the same sources.
#[derive(Debug, Clone, Default)]
pub struct Facade {
    accessors: Vec<Accessor>,
    fields: Object,
}

impl Facade {
    /// Create a facade with no accessors
    pub fn new() -> Self {
        Self::default()
    }

    /// Forward every property of `source` through this facade
    ///
    /// An accessor already installed for the same name is replaced, so the
    /// most recently installed source wins on collisions. Returns the number
    /// of names forwarded.
    pub fn install_proxy(&mut self, source: &Object) -> usize {
        let names = collect_property_names(source);
        let count = names.len();
        for name in names {
            match self.accessors.iter_mut().find(|a| a.name == name) {
                Some(accessor) => accessor.source = source.clone(),
                None => self.accessors.push(Accessor {
                    name,
                    source: source.clone(),
                }),
            }
        }
        count
    }

    /// The object a forwarded name reads from and writes to
    pub fn source_of(&self, name: &str) -> Option<&Object> {
        self.accessor(name).map(|a| &a.source)
    }

    /// Read a property
    pub fn get(&self, name: &str) -> Value {
        match self.accessor(name) {
            Some(accessor) => accessor.source.get(name),
            None => self.fields.get(name),
        }
    }

    /// Write a property
    ///
    /// Forwarded names write through to their source. Any other name becomes
    /// a field of the facade itself.
    pub fn set(&self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        match self.accessor(&name) {
            Some(accessor) => accessor.source.set(name, value),
            None => self.fields.set(name, value),
        }
    }

    /// Whether the name is forwarded or held locally
    pub fn has(&self, name: &str) -> bool {
        self.accessor(name).is_some() || self.fields.has_own(name)
    }

    /// Invoke a function-valued property
    pub fn call(&self, name: &str, args: &[Value]) -> Result<Value, ComponentError> {
        match self.get(name) {
            Value::Function(function) => function.call(args),
            _ => Err(PropertyError::NotCallable(name.to_string()).into()),
        }
    }

    /// Forwarded names followed by local field names
    pub fn property_names(&self) -> Vec<String> {
        self.accessors
            .iter()
            .map(|a| a.name.clone())
            .chain(self.fields.own_property_names())
            .collect()
    }

    fn accessor(&self, name: &str) -> Option<&Accessor> {
        self.accessors.iter().find(|a| a.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::value::NativeFunction;

    #[test]
    fn test_collects_names_across_chain() {
        let root = Object::new().with("a", 1).with("shared", "root");
        let middle = Object::with_prototype(&root).with("b", 2);
        let leaf = Object::with_prototype(&middle).with("shared", "leaf").with("c", 3);

        let names = collect_property_names(&leaf);
        let collected: Vec<&str> = names.iter().collect();

        assert_eq!(collected, vec!["a", "shared", "b", "c"]);
        assert_eq!(names.len(), 4);
    }

    #[test]
    fn test_object_without_prototype_contributes_own_names() {
        let object = Object::new().with("x", 0).with("y", 0);
        let names = collect_property_names(&object);
        assert!(names.contains("x") && names.contains("y"));
        assert_eq!(names.len(), 2);
        assert!(collect_property_names(&Object::new()).is_empty());
    }

    #[test]
    fn test_writes_flow_both_ways() {
        let source = Object::new().with("hp", 10);
        let mut facade = Facade::new();
        facade.install_proxy(&source);

        facade.set("hp", 7);
        assert_eq!(source.get("hp"), Value::from(7));

        source.set("hp", 3);
        assert_eq!(facade.get("hp"), Value::from(3));
    }

    #[test]
    fn test_inherited_names_forward_and_shadow_on_write() {
        let base = Object::new().with("speed", 2);
        let source = Object::with_prototype(&base);
        let mut facade = Facade::new();
        facade.install_proxy(&source);

        assert_eq!(facade.get("speed"), Value::from(2));
        facade.set("speed", 9);
        assert_eq!(source.get_own("speed"), Some(Value::from(9)));
        assert_eq!(base.get("speed"), Value::from(2));
    }

    #[test]
    fn test_later_source_wins_on_collision() {
        let first = Object::new().with("shared", "first").with("only_first", 1);
        let second = Object::new().with("shared", "second").with("only_second", 2);
        let mut facade = Facade::new();
        facade.install_proxy(&first);
        facade.install_proxy(&second);

        assert_eq!(facade.get("shared"), Value::from("second"));
        assert!(facade.source_of("shared").unwrap().ptr_eq(&second));
        assert!(facade.source_of("only_first").unwrap().ptr_eq(&first));
        assert!(facade.source_of("only_second").unwrap().ptr_eq(&second));

        facade.set("shared", "written");
        assert_eq!(second.get("shared"), Value::from("written"));
        assert_eq!(first.get("shared"), Value::from("first"));
    }

    #[test]
    fn test_unknown_names_are_local_fields() {
        let source = Object::new().with("a", 1);
        let mut facade = Facade::new();
        facade.install_proxy(&source);

        assert!(facade.get("extra").is_undefined());
        facade.set("extra", true);
        assert_eq!(facade.get("extra"), Value::from(true));
        assert!(!source.has("extra"));
        assert_eq!(facade.property_names(), vec!["a".to_string(), "extra".to_string()]);
    }

    #[test]
    fn test_call_forwards_to_function_property() {
        let source = Object::new()
            .with("double", NativeFunction::new(|args| {
                let n = args.first().and_then(Value::as_number).unwrap_or(0.0);
                Ok(Value::from(n * 2.0))
            }))
            .with("label", "not a function");
        let mut facade = Facade::new();
        facade.install_proxy(&source);

        assert_eq!(facade.call("double", &[Value::from(4)]).unwrap(), Value::from(8.0));
        assert!(matches!(
            facade.call("label", &[]),
            Err(ComponentError::Property(PropertyError::NotCallable(name))) if name == "label"
        ));
    }
}

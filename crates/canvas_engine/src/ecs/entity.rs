//! Entity implementation

slotmap::new_key_type! {
    /// Entity identifier
    ///
    /// Generational: a handle to a destroyed entity never aliases a later one.
    pub struct Entity;
}

impl Entity {
    /// Stable numeric form of the handle, useful for logging
    pub fn id(self) -> u64 {
        slotmap::Key::data(&self).as_ffi()
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({:#x})", self.id())
    }
}

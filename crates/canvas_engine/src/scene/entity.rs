//! Scene entities

use super::error::SceneError;
use super::surface::Frame;
use crate::foundation::collections::IdentityKey;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Something a scene updates and draws once per frame
pub trait SceneEntity {
    /// Advance simulation by `delta` seconds
    fn update(&mut self, _delta: f32) -> Result<(), SceneError> {
        Ok(())
    }

    /// Draw onto the frame's surface
    fn draw(&self, frame: &mut Frame<'_>) -> Result<(), SceneError>;
}

/// Shared handle to a scene entity, compared by identity
#[derive(Clone)]
pub struct EntityRef {
    inner: Rc<RefCell<dyn SceneEntity>>,
}

impl EntityRef {
    /// Take ownership of an entity
    pub fn new(entity: impl SceneEntity + 'static) -> Self {
        Self {
            inner: Rc::new(RefCell::new(entity)),
        }
    }

    /// Wrap an entity the caller keeps its own typed handle to
    pub fn from_shared<T: SceneEntity + 'static>(entity: Rc<RefCell<T>>) -> Self {
        Self { inner: entity }
    }

    /// Whether both handles refer to the same entity
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn update(&self, delta: f32) -> Result<(), SceneError> {
        self.inner
            .try_borrow_mut()
            .map_err(|_| SceneError::Reentrant { kind: "entity" })?
            .update(delta)
    }

    pub(crate) fn draw(&self, frame: &mut Frame<'_>) -> Result<(), SceneError> {
        self.inner
            .try_borrow()
            .map_err(|_| SceneError::Reentrant { kind: "entity" })?
            .draw(frame)
    }
}

impl PartialEq for EntityRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl IdentityKey for EntityRef {
    fn identity(&self) -> usize {
        Rc::as_ptr(&self.inner).cast::<()>() as usize
    }
}

impl fmt::Debug for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityRef({:p})", Rc::as_ptr(&self.inner).cast::<()>())
    }
}

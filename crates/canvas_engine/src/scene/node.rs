//! Scene tree node
//!
//! A [`Scene`] owns a set of entities and a set of child scenes. At most one
//! child is the active scene; each tick only the active child runs its own
//! update/draw pass and recursion, every other child is skipped for the frame.

use super::entity::EntityRef;
use super::error::SceneError;
use super::surface::{Canvas, DrawContext, Frame};
use crate::core::config::SceneConfig;
use crate::foundation::collections::{IdentityKey, IdentitySet};
use std::cell::{Cell, Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

/// Membership operations of a tree node
pub trait HasChildren<C> {
    /// Whether `child` is a direct child
    fn has_child(&self, child: &C) -> bool;

    /// Add a direct child; adding an existing child does nothing
    fn add_child(&mut self, child: C);

    /// Remove a direct child; removing a non-child does nothing
    fn remove_child(&mut self, child: &C);
}

/// Nodes that show one of their child scenes at a time
pub trait PresentsScenes {
    /// Make `scene` a child and the active one
    fn present(&mut self, scene: SceneRef);
}

/// Either kind of scene child
#[derive(Debug, Clone, PartialEq)]
pub enum SceneChild {
    /// An updatable, drawable entity
    Entity(EntityRef),
    /// A nested scene
    Scene(SceneRef),
}

impl From<EntityRef> for SceneChild {
    fn from(entity: EntityRef) -> Self {
        Self::Entity(entity)
    }
}

impl From<SceneRef> for SceneChild {
    fn from(scene: SceneRef) -> Self {
        Self::Scene(scene)
    }
}

/// Per-frame traversal input
pub struct Tick<'a> {
    /// Whether this scene runs this frame
    pub is_active: bool,
    /// Seconds since the previous frame
    pub delta: f32,
    /// Surface dimensions
    pub canvas: &'a Canvas,
    /// Drawing context shared by the whole tree
    pub context: &'a mut dyn DrawContext,
}

/// A node of the scene tree
pub struct Scene {
    entities: IdentitySet<EntityRef>,
    scenes: IdentitySet<SceneRef>,
    active_scene: Option<SceneRef>,
    clear_color: String,
}

impl Scene {
    /// Create a scene with the default clear color
    pub fn new() -> Self {
        Self::from_config(&SceneConfig::default())
    }

    /// Create a scene with the given clear color; empty disables clearing
    pub fn with_clear_color(clear_color: impl Into<String>) -> Self {
        Self {
            entities: IdentitySet::new(),
            scenes: IdentitySet::new(),
            active_scene: None,
            clear_color: clear_color.into(),
        }
    }

    /// Create a scene from configuration
    pub fn from_config(config: &SceneConfig) -> Self {
        Self::with_clear_color(config.clear_color.clone())
    }

    /// Move the scene behind a shared handle
    pub fn into_ref(self) -> SceneRef {
        SceneRef::new(self)
    }

    /// Background color painted before entities draw
    pub fn clear_color(&self) -> &str {
        &self.clear_color
    }

    /// Change the background color; empty disables clearing
    pub fn set_clear_color(&mut self, clear_color: impl Into<String>) {
        self.clear_color = clear_color.into();
    }

    /// The child scene that runs each tick, if any
    ///
    /// This is not cleared when the scene is removed as a child, so it can
    /// point at a scene that is no longer a member.
    pub fn active_scene(&self) -> Option<&SceneRef> {
        self.active_scene.as_ref()
    }

    /// Choose the child scene that runs each tick
    pub fn set_active_scene(&mut self, scene: Option<SceneRef>) {
        self.active_scene = scene;
    }

    /// Child entities in insertion order
    pub fn entities(&self) -> impl Iterator<Item = &EntityRef> {
        self.entities.iter()
    }

    /// Child scenes in insertion order
    pub fn scenes(&self) -> impl Iterator<Item = &SceneRef> {
        self.scenes.iter()
    }

    /// Number of child entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Number of child scenes
    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }

    /// Run one frame of this scene
    ///
    /// Inactive scenes return immediately. Active scenes update every entity,
    /// paint the clear color over the whole canvas, draw every entity and
    /// then tick each child scene, passing `is_active` only to the active one.
    ///
    /// Use [`SceneRef::tick`] for scenes whose entities change the tree while
    /// the frame runs.
    pub fn tick(&self, tick: Tick<'_>) -> Result<(), SceneError> {
        run_tick(self, tick)
    }
}

/// Read access to a scene's members while its frame runs
///
/// Every pass of a frame asks for a fresh list of members, so changes made by
/// an entity are seen by the passes that follow it.
trait TickSource {
    fn entity_snapshot(&self) -> Result<Vec<EntityRef>, SceneError>;
    fn scene_snapshot(&self) -> Result<Vec<SceneRef>, SceneError>;
    fn has_entity(&self, entity: &EntityRef) -> Result<bool, SceneError>;
    fn child_state(&self, scene: &SceneRef) -> Result<ChildState, SceneError>;
    fn clear(&self, canvas: &Canvas, context: &mut dyn DrawContext) -> Result<(), SceneError>;
}

/// Whether a child scene is still a member, and whether it is active
#[derive(Debug, Clone, Copy)]
struct ChildState {
    member: bool,
    active: bool,
}

impl Scene {
    fn child_state_of(&self, scene: &SceneRef) -> ChildState {
        ChildState {
            member: self.scenes.contains(scene),
            active: self.active_scene.as_ref() == Some(scene),
        }
    }

    fn paint_background(&self, canvas: &Canvas, context: &mut dyn DrawContext) {
        if !self.clear_color.is_empty() {
            context.set_fill_style(&self.clear_color);
            context.fill_rect(0.0, 0.0, canvas.width_f32(), canvas.height_f32());
        }
    }
}

impl TickSource for Scene {
    fn entity_snapshot(&self) -> Result<Vec<EntityRef>, SceneError> {
        Ok(self.entities.iter().cloned().collect())
    }

    fn scene_snapshot(&self) -> Result<Vec<SceneRef>, SceneError> {
        Ok(self.scenes.iter().cloned().collect())
    }

    fn has_entity(&self, entity: &EntityRef) -> Result<bool, SceneError> {
        Ok(self.entities.contains(entity))
    }

    fn child_state(&self, scene: &SceneRef) -> Result<ChildState, SceneError> {
        Ok(self.child_state_of(scene))
    }

    fn clear(&self, canvas: &Canvas, context: &mut dyn DrawContext) -> Result<(), SceneError> {
        self.paint_background(canvas, context);
        Ok(())
    }
}

impl TickSource for SceneRef {
    fn entity_snapshot(&self) -> Result<Vec<EntityRef>, SceneError> {
        self.read()?.entity_snapshot()
    }

    fn scene_snapshot(&self) -> Result<Vec<SceneRef>, SceneError> {
        self.read()?.scene_snapshot()
    }

    fn has_entity(&self, entity: &EntityRef) -> Result<bool, SceneError> {
        self.read()?.has_entity(entity)
    }

    fn child_state(&self, scene: &SceneRef) -> Result<ChildState, SceneError> {
        Ok(self.read()?.child_state_of(scene))
    }

    fn clear(&self, canvas: &Canvas, context: &mut dyn DrawContext) -> Result<(), SceneError> {
        self.read()?.paint_background(canvas, context);
        Ok(())
    }
}

/// One frame over `source`
///
/// Members removed during a pass are skipped when reached; members added
/// during a pass take part from the next pass on.
fn run_tick(source: &impl TickSource, tick: Tick<'_>) -> Result<(), SceneError> {
    let Tick {
        is_active,
        delta,
        canvas,
        context,
    } = tick;

    if !is_active {
        return Ok(());
    }

    let entities = source.entity_snapshot()?;
    log::trace!("Ticking scene: {} entities, delta {}", entities.len(), delta);

    for entity in &entities {
        if source.has_entity(entity)? {
            entity.update(delta)?;
        }
    }

    source.clear(canvas, &mut *context)?;

    for entity in &source.entity_snapshot()? {
        if source.has_entity(entity)? {
            let mut frame = Frame {
                canvas,
                context: &mut *context,
            };
            entity.draw(&mut frame)?;
        }
    }

    for scene in &source.scene_snapshot()? {
        let state = source.child_state(scene)?;
        if !state.member {
            continue;
        }
        scene.tick(Tick {
            is_active: state.active,
            delta,
            canvas,
            context: &mut *context,
        })?;
    }

    Ok(())
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("entities", &self.entities.len())
            .field("scenes", &self.scenes.len())
            .field("active_scene", &self.active_scene)
            .field("clear_color", &self.clear_color)
            .finish()
    }
}

impl HasChildren<EntityRef> for Scene {
    fn has_child(&self, child: &EntityRef) -> bool {
        self.entities.contains(child)
    }

    fn add_child(&mut self, child: EntityRef) {
        if self.entities.insert(child) {
            log::debug!("Added entity, scene now has {}", self.entities.len());
        }
    }

    fn remove_child(&mut self, child: &EntityRef) {
        if self.entities.remove(child) {
            log::debug!("Removed entity, scene now has {}", self.entities.len());
        }
    }
}

impl HasChildren<SceneRef> for Scene {
    fn has_child(&self, child: &SceneRef) -> bool {
        self.scenes.contains(child)
    }

    fn add_child(&mut self, child: SceneRef) {
        if self.scenes.insert(child) {
            log::debug!("Added child scene, scene now has {}", self.scenes.len());
        }
    }

    fn remove_child(&mut self, child: &SceneRef) {
        if self.scenes.remove(child) {
            if self.active_scene.as_ref() == Some(child) {
                log::debug!("Removed the active child scene; it stays active");
            } else {
                log::debug!("Removed child scene, scene now has {}", self.scenes.len());
            }
        }
    }
}

impl HasChildren<SceneChild> for Scene {
    fn has_child(&self, child: &SceneChild) -> bool {
        match child {
            SceneChild::Entity(entity) => self.has_child(entity),
            SceneChild::Scene(scene) => self.has_child(scene),
        }
    }

    fn add_child(&mut self, child: SceneChild) {
        match child {
            SceneChild::Entity(entity) => self.add_child(entity),
            SceneChild::Scene(scene) => self.add_child(scene),
        }
    }

    fn remove_child(&mut self, child: &SceneChild) {
        match child {
            SceneChild::Entity(entity) => self.remove_child(entity),
            SceneChild::Scene(scene) => self.remove_child(scene),
        }
    }
}

impl PresentsScenes for Scene {
    fn present(&mut self, scene: SceneRef) {
        log::debug!("Presenting scene");
        self.scenes.insert(scene.clone());
        self.active_scene = Some(scene);
    }
}

/// Scene plus the flag marking it as mid-frame
struct SceneCell {
    scene: RefCell<Scene>,
    ticking: Cell<bool>,
}

/// Clears the ticking flag when the frame ends or unwinds
struct TickingGuard<'a> {
    cell: &'a SceneCell,
}

impl Drop for TickingGuard<'_> {
    fn drop(&mut self) {
        self.cell.ticking.set(false);
    }
}

/// Shared handle to a scene, compared by identity
///
/// The scene is only borrowed for short reads while it ticks, so entities may
/// add, remove and present children on any scene during their update or draw.
#[derive(Clone)]
pub struct SceneRef {
    inner: Rc<SceneCell>,
}

impl SceneRef {
    /// Put a scene behind a shared handle
    pub fn new(scene: Scene) -> Self {
        Self {
            inner: Rc::new(SceneCell {
                scene: RefCell::new(scene),
                ticking: Cell::new(false),
            }),
        }
    }

    /// Borrow the scene
    ///
    /// # Panics
    ///
    /// Panics if the scene is mutably borrowed.
    pub fn borrow(&self) -> Ref<'_, Scene> {
        self.inner.scene.borrow()
    }

    /// Mutably borrow the scene
    ///
    /// # Panics
    ///
    /// Panics if the scene is already borrowed.
    pub fn borrow_mut(&self) -> RefMut<'_, Scene> {
        self.inner.scene.borrow_mut()
    }

    /// Whether this scene's frame is running
    pub fn is_ticking(&self) -> bool {
        self.inner.ticking.get()
    }

    /// Tick the scene behind this handle
    ///
    /// Fails with [`SceneError::Reentrant`] if the scene is already ticking,
    /// which happens when it is its own descendant.
    pub fn tick(&self, tick: Tick<'_>) -> Result<(), SceneError> {
        if !tick.is_active {
            return Ok(());
        }
        if self.inner.ticking.replace(true) {
            log::warn!("Scene reached while already ticking; is it its own descendant?");
            return Err(SceneError::Reentrant { kind: "scene" });
        }
        let _guard = TickingGuard { cell: &self.inner };
        run_tick(self, tick)
    }

    /// Whether both handles refer to the same scene
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    fn read(&self) -> Result<Ref<'_, Scene>, SceneError> {
        self.inner.scene.try_borrow().map_err(|_| {
            log::warn!("Scene is mutably borrowed while its frame runs");
            SceneError::Reentrant { kind: "scene" }
        })
    }
}

impl IdentityKey for SceneRef {
    fn identity(&self) -> usize {
        Rc::as_ptr(&self.inner) as usize
    }
}

impl PartialEq for SceneRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for SceneRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SceneRef({:p})", Rc::as_ptr(&self.inner))
    }
}

impl From<Scene> for SceneRef {
    fn from(scene: Scene) -> Self {
        Self::new(scene)
    }
}

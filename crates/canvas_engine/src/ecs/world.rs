//! Entity allocation

use super::Entity;
use slotmap::SlotMap;

/// Per-entity bookkeeping
#[derive(Debug, Clone, Default)]
struct EntityRecord {
    name: Option<String>,
}

/// Registry of live entities
#[derive(Debug, Default)]
pub struct World {
    entities: SlotMap<Entity, EntityRecord>,
}

impl World {
    /// Create a new world
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new entity
    pub fn create_entity(&mut self) -> Entity {
        let entity = self.entities.insert(EntityRecord::default());
        log::trace!("Created {}", entity);
        entity
    }

    /// Create a new entity with a debug name
    pub fn create_named_entity(&mut self, name: impl Into<String>) -> Entity {
        let entity = self.entities.insert(EntityRecord {
            name: Some(name.into()),
        });
        log::trace!("Created {} ({:?})", entity, self.name(entity));
        entity
    }

    /// Destroy an entity, returning `false` if it was not alive
    pub fn destroy_entity(&mut self, entity: Entity) -> bool {
        let removed = self.entities.remove(entity).is_some();
        if removed {
            log::trace!("Destroyed {}", entity);
        }
        removed
    }

    /// Whether the entity is alive
    pub fn contains(&self, entity: Entity) -> bool {
        self.entities.contains_key(entity)
    }

    /// Debug name of an entity, if it has one
    pub fn name(&self, entity: Entity) -> Option<&str> {
        self.entities.get(entity)?.name.as_deref()
    }

    /// Number of live entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Get an iterator over all entities
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_destroy() {
        let mut world = World::new();
        let a = world.create_entity();
        let b = world.create_named_entity("player");

        assert_eq!(world.entity_count(), 2);
        assert_eq!(world.name(b), Some("player"));
        assert_eq!(world.name(a), None);

        assert!(world.destroy_entity(a));
        assert!(!world.destroy_entity(a));
        assert!(!world.contains(a));
        assert!(world.contains(b));
        assert_eq!(world.entities().collect::<Vec<_>>(), vec![b]);
    }

    #[test]
    fn test_stale_handle_does_not_alias() {
        let mut world = World::new();
        let first = world.create_entity();
        world.destroy_entity(first);
        let second = world.create_entity();

        assert_ne!(first, second);
        assert!(!world.contains(first));
        assert_ne!(first.id(), second.id());
    }
}

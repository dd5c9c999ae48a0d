//! The entity store.
//!
//! [`World`] allocates entity identities and holds each entity's components,
//! keyed by [`ComponentTypeId`]. Components are stored type-erased and
//! recovered through downcasting in [`World::get`].

use std::collections::HashMap;

use thiserror::Error;

use crate::component::{Component, ComponentTypeId, ErasedComponent};
use crate::entity::{Entity, EntityAllocator};
use crate::stamp::Stamp;

#[derive(Debug, Error)]
pub enum WorldError {
    #[error("{0} not found")]
    EntityNotFound(Entity),
    #[error("failed to serialise component '{component}' of {entity}: {source}")]
    Serialize {
        entity: Entity,
        component: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// A single entity's component set.
#[derive(Debug, Default)]
struct EntityData {
    components: HashMap<ComponentTypeId, Box<dyn ErasedComponent>>,
}

/// Entity storage with typed component access.
#[derive(Debug)]
pub struct World {
    allocator: EntityAllocator,
    entities: HashMap<Entity, EntityData>,
}

impl World {
    /// Create a new empty world.
    #[must_use]
    pub fn new() -> Self {
        Self {
            allocator: EntityAllocator::new(),
            entities: HashMap::new(),
        }
    }

    // -- Entity lifecycle --

    /// Create a new entity without any components.
    pub fn create(&mut self) -> Entity {
        let entity = self.allocator.allocate();
        self.entities.insert(entity, EntityData::default());
        entity
    }

    /// Create a new entity pre-populated with everything recorded in `stamp`.
    pub fn spawn(&mut self, stamp: Stamp) -> Entity {
        let entity = self.create();
        if let Some(data) = self.entities.get_mut(&entity) {
            for component in stamp.into_components() {
                data.components.insert(component.id(), component);
            }
        }
        entity
    }

    /// Check if an entity exists.
    #[must_use]
    pub fn contains(&self, entity: Entity) -> bool {
        self.entities.contains_key(&entity)
    }

    /// Return the count of live entities.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Return all entity IDs in allocation order.
    #[must_use]
    pub fn entities(&self) -> Vec<Entity> {
        let mut all: Vec<Entity> = self.entities.keys().copied().collect();
        all.sort();
        all
    }

    // -- Component operations --

    /// Assign a component to an entity, replacing any existing value of the
    /// same type.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::EntityNotFound`] if the entity does not exist.
    pub fn assign<T: Component>(&mut self, entity: Entity, value: T) -> Result<(), WorldError> {
        self.assign_erased(entity, Box::new(value))
    }

    /// Assign a type-erased component to an entity.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::EntityNotFound`] if the entity does not exist.
    pub fn assign_erased(
        &mut self,
        entity: Entity,
        value: Box<dyn ErasedComponent>,
    ) -> Result<(), WorldError> {
        let data = self
            .entities
            .get_mut(&entity)
            .ok_or(WorldError::EntityNotFound(entity))?;
        data.components.insert(value.id(), value);
        Ok(())
    }

    /// Check if an entity has a component of type `T`.
    #[must_use]
    pub fn has<T: Component>(&self, entity: Entity) -> bool {
        self.entities
            .get(&entity)
            .is_some_and(|d| d.components.contains_key(&T::component_type_id()))
    }

    /// Get a component of type `T` from an entity.
    #[must_use]
    pub fn get<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.entities
            .get(&entity)?
            .components
            .get(&T::component_type_id())?
            .as_any()
            .downcast_ref::<T>()
    }

    /// Number of components attached to an entity (0 if it does not exist).
    #[must_use]
    pub fn component_count(&self, entity: Entity) -> usize {
        self.entities
            .get(&entity)
            .map_or(0, |d| d.components.len())
    }

    /// Get all component names on an entity, sorted.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::EntityNotFound`] if the entity does not exist.
    pub fn component_names(&self, entity: Entity) -> Result<Vec<&'static str>, WorldError> {
        let data = self
            .entities
            .get(&entity)
            .ok_or(WorldError::EntityNotFound(entity))?;
        let mut names: Vec<&'static str> = data.components.values().map(|c| c.name()).collect();
        names.sort_unstable();
        Ok(names)
    }

    /// Serialise all components of an entity into a JSON object keyed by
    /// component name.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::EntityNotFound`] if the entity does not exist, or
    /// [`WorldError::Serialize`] if a component fails to serialise.
    pub fn snapshot(&self, entity: Entity) -> Result<serde_json::Value, WorldError> {
        let data = self
            .entities
            .get(&entity)
            .ok_or(WorldError::EntityNotFound(entity))?;

        let mut components: Vec<&dyn ErasedComponent> =
            data.components.values().map(|c| &**c).collect();
        components.sort_by_key(|c| c.name());

        let mut map = serde_json::Map::new();
        for component in components {
            let value = component.to_json().map_err(|source| WorldError::Serialize {
                entity,
                component: component.name(),
                source,
            })?;
            map.insert(component.name().to_string(), value);
        }
        Ok(serde_json::Value::Object(map))
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

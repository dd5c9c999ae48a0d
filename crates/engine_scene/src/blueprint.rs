//! Blueprints and their instantiation.
//!
//! A [`Blueprint`] is the instance-independent output of the build phase: a
//! [`Stamp`] of component values plus ordered child blueprints. It holds no
//! entity identities, so the same blueprint (or a clone of it) can be turned
//! into any number of entity subtrees with [`instantiate`].
//!
//! [`instantiate_indexed`] additionally records every entity that carries a
//! [`Name`] in an [`EntityIndex`], so callers can find instantiated entities
//! by the key they were declared under.

use std::collections::HashMap;

use engine_component::{Entity, Stamp, World, WorldError};
use tracing::{debug, trace};

use crate::hierarchy::{Children, Name, Parent, TimeScale};

/// Build-time description of one entity and its descendants.
///
/// Cloning a blueprint deep-copies the whole subtree.
#[derive(Debug, Clone, Default)]
pub struct Blueprint {
    /// Components recorded for this entity.
    pub stamp: Stamp,
    /// Child blueprints, in declaration order.
    pub children: Vec<Blueprint>,
}

impl Blueprint {
    /// A blueprint with the given stamp and no children.
    #[must_use]
    pub fn new(stamp: Stamp) -> Self {
        Self {
            stamp,
            children: Vec::new(),
        }
    }

    /// Append a child blueprint.
    #[must_use]
    pub fn with_child(mut self, child: Blueprint) -> Self {
        self.children.push(child);
        self
    }

    /// The declared name recorded in the stamp, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.stamp.get::<Name>().map(Name::as_str)
    }

    /// Number of entities this blueprint instantiates into.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        1 + self.children.iter().map(Blueprint::entity_count).sum::<usize>()
    }

    /// Instantiate this blueprint into `world`. See [`instantiate`].
    ///
    /// # Errors
    ///
    /// Propagates any [`WorldError`] raised by the store.
    pub fn instantiate(self, world: &mut World) -> Result<Entity, WorldError> {
        instantiate(world, self)
    }
}

/// Declared name to entity lookup, filled during instantiation.
///
/// The first entity instantiated under a name keeps it; later entities with
/// the same name (copies of one blueprint, or equally named nodes in
/// different branches) are not recorded.
#[derive(Debug, Clone, Default)]
pub struct EntityIndex {
    entities: HashMap<String, Entity>,
}

impl EntityIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The entity recorded under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Entity> {
        self.entities.get(name).copied()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entities.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Iterate recorded names and entities in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Entity)> {
        self.entities.iter().map(|(name, &entity)| (name.as_str(), entity))
    }

    /// Record `entity` under `name` unless the name is taken. Returns whether
    /// it was recorded.
    pub fn record(&mut self, name: &str, entity: Entity) -> bool {
        if self.entities.contains_key(name) {
            debug!(name, %entity, "name already indexed, keeping the first entity");
            return false;
        }
        self.entities.insert(name.to_string(), entity);
        true
    }
}

/// Materialize a blueprint subtree into `world` and return its root entity.
///
/// Each entity is created from its stamp, receives a default [`TimeScale`]
/// if the stamp did not record one, and gets a [`Children`] component listing
/// its direct children in order (empty for leaves). Every child receives a
/// [`Parent`] pointing back at the entity that created it.
///
/// Entities created before a failure are not removed.
///
/// # Errors
///
/// Propagates any [`WorldError`] raised by the store.
pub fn instantiate(world: &mut World, blueprint: Blueprint) -> Result<Entity, WorldError> {
    spawn_tree(world, blueprint, None)
}

/// Like [`instantiate`], recording every named entity of the subtree in
/// `index`.
///
/// # Errors
///
/// Propagates any [`WorldError`] raised by the store.
pub fn instantiate_indexed(
    world: &mut World,
    blueprint: Blueprint,
    index: &mut EntityIndex,
) -> Result<Entity, WorldError> {
    spawn_tree(world, blueprint, Some(index))
}

fn spawn_tree(
    world: &mut World,
    blueprint: Blueprint,
    mut index: Option<&mut EntityIndex>,
) -> Result<Entity, WorldError> {
    let Blueprint { stamp, children } = blueprint;

    let name = stamp.get::<Name>().map(|n| n.name.clone());
    let entity = world.spawn(stamp);
    if let (Some(index), Some(name)) = (index.as_deref_mut(), name) {
        index.record(&name, entity);
    }
    if !world.has::<TimeScale>(entity) {
        world.assign(entity, TimeScale::DEFAULT)?;
    }

    let mut child_entities = Vec::with_capacity(children.len());
    for child in children {
        let child_entity = spawn_tree(world, child, index.as_deref_mut())?;
        world.assign(child_entity, Parent { parent: entity })?;
        child_entities.push(child_entity);
    }
    trace!(%entity, children = child_entities.len(), "instantiated entity");

    world.assign(
        entity,
        Children {
            children: child_entities,
        },
    )?;
    Ok(entity)
}

/// Instantiate a forest of blueprints in order, returning their root entities.
///
/// # Errors
///
/// Propagates any [`WorldError`] raised by the store.
pub fn instantiate_all(
    world: &mut World,
    blueprints: impl IntoIterator<Item = Blueprint>,
) -> Result<Vec<Entity>, WorldError> {
    blueprints
        .into_iter()
        .map(|blueprint| instantiate(world, blueprint))
        .collect()
}

/// Like [`instantiate_all`], recording every named entity in `index`.
///
/// # Errors
///
/// Propagates any [`WorldError`] raised by the store.
pub fn instantiate_all_indexed(
    world: &mut World,
    blueprints: impl IntoIterator<Item = Blueprint>,
    index: &mut EntityIndex,
) -> Result<Vec<Entity>, WorldError> {
    blueprints
        .into_iter()
        .map(|blueprint| instantiate_indexed(world, blueprint, index))
        .collect()
}

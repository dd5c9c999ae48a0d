//! Component constructor registry.
//!
//! A [`ComponentConstructor`] turns the declared data for one component type
//! into either a component on a live entity or a value recorded in a
//! [`Stamp`]. The [`ComponentRegistry`] maps component names, as written in
//! scene documents, to their constructors. It is populated at start-up and
//! then only read.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use engine_component::{Entity, Stamp, World};
use tracing::debug;

use crate::ctors::{TimeScaleConstructor, TransformConstructor};
use crate::error::ConstructError;
use crate::tree::Node;

/// Builds one component type from declared data.
///
/// Each implementation decides how a second write of the same component
/// composes with the first. The built-in constructors replace the whole
/// component.
pub trait ComponentConstructor: Send + Sync {
    /// Construct the component and assign it to a live entity.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstructError`] if `data` is ill-typed or the entity does
    /// not exist.
    fn apply_to_entity(
        &self,
        world: &mut World,
        entity: Entity,
        data: &Node,
    ) -> Result<(), ConstructError>;

    /// Construct the component and record it in a stamp.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstructError`] if `data` is ill-typed.
    fn apply_to_stamp(&self, stamp: &mut Stamp, data: &Node) -> Result<(), ConstructError>;
}

/// Name-keyed table of component constructors.
#[derive(Default, Clone)]
pub struct ComponentRegistry {
    constructors: HashMap<String, Arc<dyn ComponentConstructor>>,
}

impl ComponentRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in constructors:
    /// `transform` and `time_scale`.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("transform", TransformConstructor);
        registry.register("time_scale", TimeScaleConstructor);
        registry
    }

    /// Register a constructor under `name`. A constructor already registered
    /// under the same name is replaced.
    pub fn register(&mut self, name: impl Into<String>, constructor: impl ComponentConstructor + 'static) {
        self.register_shared(name, Arc::new(constructor));
    }

    /// Register an already shared constructor under `name`.
    pub fn register_shared(
        &mut self,
        name: impl Into<String>,
        constructor: Arc<dyn ComponentConstructor>,
    ) {
        let name = name.into();
        if self.constructors.insert(name.clone(), constructor).is_some() {
            debug!(component = %name, "replaced component constructor");
        }
    }

    /// Look up the constructor registered under `name`.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&dyn ComponentConstructor> {
        self.constructors.get(name).map(|c| &**c)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    /// Registered component names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }

    /// Construct the component named `name` directly on a live entity.
    ///
    /// Returns `Ok(false)` if no constructor is registered under `name`.
    ///
    /// # Errors
    ///
    /// Propagates the constructor's [`ConstructError`].
    pub fn construct(
        &self,
        world: &mut World,
        entity: Entity,
        name: &str,
        data: &Node,
    ) -> Result<bool, ConstructError> {
        match self.lookup(name) {
            Some(constructor) => {
                constructor.apply_to_entity(world, entity, data)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("constructors", &self.names())
            .finish()
    }
}

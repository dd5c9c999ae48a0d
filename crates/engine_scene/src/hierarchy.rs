//! Components assigned by the builder and the instantiator themselves.
//!
//! [`Parent`] and [`Children`] wire up the entity hierarchy described by a
//! blueprint tree. [`TimeScale`] is the per-entity time multiplier every
//! instantiated entity receives. [`Name`] carries the key a node was
//! declared under.

use engine_component::{Component, Entity};
use serde::{Deserialize, Serialize};

/// The name an entity was declared under in its scene document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Name {
    pub name: String,
}

impl Name {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl Component for Name {
    fn type_name() -> &'static str {
        "Name"
    }
}

/// Points a child entity at its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parent {
    pub parent: Entity,
}

impl Component for Parent {
    fn type_name() -> &'static str {
        "Parent"
    }
}

/// The direct children of an entity, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Children {
    pub children: Vec<Entity>,
}

impl Component for Children {
    fn type_name() -> &'static str {
        "Children"
    }
}

/// Scales the passage of time for one entity.
///
/// `0.5` makes the entity run at half speed, `2.0` at double speed. Entities
/// that do not declare a time scale get [`TimeScale::DEFAULT`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeScale {
    pub scale: f32,
}

impl TimeScale {
    /// Real time, unscaled.
    pub const DEFAULT: Self = Self { scale: 1.0 };

    #[must_use]
    pub const fn new(scale: f32) -> Self {
        Self { scale }
    }

    /// Scale a global time value (elapsed or delta seconds) for this entity.
    #[must_use]
    pub fn apply(&self, seconds: f32) -> f32 {
        self.scale * seconds
    }
}

impl Default for TimeScale {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Component for TimeScale {
    fn type_name() -> &'static str {
        "TimeScale"
    }
}

//! Entity handles.
//!
//! An [`Entity`] names one object in a [`World`](crate::World). Handles are
//! only ever minted by the world's allocator, so a handle from one world says
//! nothing about another.

use serde::{Deserialize, Serialize};

/// Opaque handle to an entity in a [`World`](crate::World).
///
/// Serializes as its bare numeric id so hierarchy components such as a
/// parent link dump as plain numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Entity(u64);

impl Entity {
    /// Wrap a raw id. The result only names a live entity if some world
    /// allocated that id.
    #[must_use]
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Hands out entity ids for one world, starting at 1 and never reusing one.
#[derive(Debug)]
pub(crate) struct EntityAllocator {
    next_id: u64,
}

impl EntityAllocator {
    pub(crate) fn new() -> Self {
        Self { next_id: 1 }
    }

    pub(crate) fn allocate(&mut self) -> Entity {
        let entity = Entity(self.next_id);
        self.next_id += 1;
        entity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocation_is_sequential_from_one() {
        let mut allocator = EntityAllocator::new();
        let ids: Vec<u64> = (0..3).map(|_| allocator.allocate().id()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_display() {
        assert_eq!(Entity::from_raw(7).to_string(), "Entity(7)");
    }

    #[test]
    fn test_serde_is_transparent() {
        let entity = Entity::from_raw(42);
        let json = serde_json::to_value(entity).unwrap();
        assert_eq!(json, serde_json::json!(42));
        let restored: Entity = serde_json::from_value(json).unwrap();
        assert_eq!(restored, entity);
    }
}
